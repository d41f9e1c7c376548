//! Per-connection spectator context.
//!
//! A `Session` is created when a connection opens and dropped when it closes.
//! It owns the phase machine, the object tracker and the viewport normalizer,
//! and resets the episode-scoped parts of them when a game ends.

use crate::heading::Heading;
use crate::phase::{PhaseEdges, PhaseMachine};
use crate::tracker::ObjectTracker;
use crate::types::{ObjectKind, PhaseEdge, WorldPhase};
use crate::viewport::{ViewPoint, ViewportNormalizer};

/// One object ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub point: ViewPoint,
    pub heading: Heading,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArenaSnapshot {
    pub phase: WorldPhase,
    pub scale: f64,
    pub faulted: bool,
    pub mechs: Vec<PlacedObject>,
    pub projectiles: Vec<PlacedObject>,
    /// Objects left out because their position was not finite.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    phase: PhaseMachine,
    tracker: ObjectTracker,
    viewport: ViewportNormalizer,
}

impl Session {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            phase: PhaseMachine::new(),
            tracker: ObjectTracker::new(),
            viewport: ViewportNormalizer::new(width, height),
        }
    }

    pub fn phase(&self) -> WorldPhase {
        self.phase.current()
    }

    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ObjectTracker {
        &mut self.tracker
    }

    pub fn viewport(&self) -> &ViewportNormalizer {
        &self.viewport
    }

    /// Scale as of the last snapshot. Growth happens while snapshotting, so
    /// objects applied since then are not reflected until the next one.
    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn is_faulted(&self) -> bool {
        self.tracker.is_faulted()
    }

    pub fn set_extent(&mut self, width: u16, height: u16) {
        self.viewport.set_extent(width, height);
    }

    /// Apply a world-state update.
    ///
    /// The episode is reset when the game ends. A new game also starts from
    /// the initial scale, keeping objects spawned during startup; the next
    /// snapshot grows the scale to fit them.
    pub fn advance_phase(&mut self, next: WorldPhase) -> PhaseEdges {
        let edges = self.phase.advance(next);
        if edges.contains(&PhaseEdge::GameEnd) {
            self.reset_episode();
        } else if edges.contains(&PhaseEdge::GameStart) {
            self.viewport.reset();
        }
        edges
    }

    /// Clear tracked objects, the fault flag and the scale.
    pub fn reset_episode(&mut self) {
        self.tracker.reset();
        self.viewport.reset();
    }

    /// Normalize every tracked object for drawing.
    pub fn snapshot(&mut self) -> ArenaSnapshot {
        let mut snap = ArenaSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Like [`Session::snapshot`], reusing `snap`'s allocations.
    ///
    /// Two passes: the first grows the scale until every object fits, the
    /// second projects all of them at that final scale so earlier objects are
    /// not left at a stale scale.
    ///
    /// While the tracker is faulted the objects in `snap` are left as they
    /// were and the scale does not grow; only phase and fault flag refresh.
    pub fn snapshot_into(&mut self, snap: &mut ArenaSnapshot) {
        snap.phase = self.phase.current();
        snap.faulted = self.tracker.is_faulted();
        if snap.faulted {
            return;
        }

        snap.mechs.clear();
        snap.projectiles.clear();
        snap.skipped = 0;

        for kind in [ObjectKind::Mech, ObjectKind::Projectile] {
            for (_, obj) in self.tracker.objects(kind) {
                if self.viewport.normalize(obj.position).is_none() {
                    snap.skipped += 1;
                }
            }
        }

        for kind in [ObjectKind::Mech, ObjectKind::Projectile] {
            let out = match kind {
                ObjectKind::Mech => &mut snap.mechs,
                ObjectKind::Projectile => &mut snap.projectiles,
            };
            for (id, obj) in self.tracker.objects(kind) {
                if !obj.position.is_finite() {
                    continue;
                }
                out.push(PlacedObject {
                    id,
                    kind,
                    point: self.viewport.project(obj.position),
                    heading: Heading::from_rotation(obj.rotation),
                });
            }
        }

        snap.scale = self.viewport.scale();
    }
}
