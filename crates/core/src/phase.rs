//! World-phase state machine.
//!
//! Callbacks are edge-triggered: an edge only fires when the previous phase is
//! the expected predecessor of the new one. The held phase is always replaced
//! by the new one, whatever edges fired.

use arrayvec::ArrayVec;

use crate::types::{PhaseEdge, WorldPhase};

/// At most an "end" and a "start" edge per transition.
pub type PhaseEdges = ArrayVec<PhaseEdge, 2>;

/// Edges crossed when moving from `prev` to `next`.
pub fn phase_edges(prev: WorldPhase, next: WorldPhase) -> PhaseEdges {
    let mut edges = PhaseEdges::new();
    match (prev, next) {
        (WorldPhase::Configuration, WorldPhase::Configuration) => {}
        (_, WorldPhase::Configuration) => edges.push(PhaseEdge::ConfigurationStart),
        (WorldPhase::Configuration, WorldPhase::Startup) => {
            edges.push(PhaseEdge::ConfigurationEnd);
            edges.push(PhaseEdge::StartupStart);
        }
        (WorldPhase::Startup, WorldPhase::Game) => {
            edges.push(PhaseEdge::StartupEnd);
            edges.push(PhaseEdge::GameStart);
        }
        (WorldPhase::Game, WorldPhase::GameOver) => edges.push(PhaseEdge::GameEnd),
        _ => {}
    }
    edges
}

/// Holds the current phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseMachine {
    current: WorldPhase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WorldPhase {
        self.current
    }

    /// Move to `next`, returning the edges crossed on the way.
    pub fn advance(&mut self, next: WorldPhase) -> PhaseEdges {
        let edges = phase_edges(self.current, next);
        self.current = next;
        edges
    }
}
