//! Live object sets mirrored from server updates.
//!
//! Mechs and Projectiles live in separate maps because ids are only unique
//! within a kind. Moves and destroys carry no kind, so they search Mechs first
//! and then Projectiles. An update for an id found in neither map means the
//! local mirror has diverged from the server: the tracker raises a sticky fault
//! flag that stays set until [`ObjectTracker::reset`].

use std::collections::BTreeMap;
use std::fmt;

use glam::{Quat, Vec3};
use thiserror::Error;

use crate::types::ObjectKind;

/// Last-known pose of a tracked object, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerOp {
    Move,
    Destroy,
}

impl fmt::Display for TrackerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => f.write_str("move"),
            Self::Destroy => f.write_str("destroy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("{op} for object {id} not found in any list")]
    UnknownObject { id: u32, op: TrackerOp },
}

#[derive(Debug, Clone, Default)]
pub struct ObjectTracker {
    mechs: BTreeMap<u32, TrackedObject>,
    projectiles: BTreeMap<u32, TrackedObject>,
    faulted: bool,
}

impl ObjectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, replacing any earlier spawn with the same id and kind.
    pub fn spawn(
        &mut self,
        kind: ObjectKind,
        id: u32,
        position: Vec3,
        rotation: Quat,
    ) -> Option<TrackedObject> {
        self.map_mut(kind)
            .insert(id, TrackedObject { position, rotation })
    }

    /// Update the pose of `id`. Returns the kind it was found under.
    pub fn move_object(
        &mut self,
        id: u32,
        position: Vec3,
        rotation: Quat,
    ) -> Result<ObjectKind, TrackerError> {
        for kind in [ObjectKind::Mech, ObjectKind::Projectile] {
            if let Some(obj) = self.map_mut(kind).get_mut(&id) {
                obj.position = position;
                obj.rotation = rotation;
                return Ok(kind);
            }
        }
        Err(self.fault(id, TrackerOp::Move))
    }

    /// Remove `id`. Returns the kind it was found under.
    pub fn destroy(&mut self, id: u32) -> Result<ObjectKind, TrackerError> {
        for kind in [ObjectKind::Mech, ObjectKind::Projectile] {
            if self.map_mut(kind).remove(&id).is_some() {
                return Ok(kind);
            }
        }
        Err(self.fault(id, TrackerOp::Destroy))
    }

    /// Objects of one kind, in ascending id order.
    pub fn objects(&self, kind: ObjectKind) -> impl Iterator<Item = (u32, &TrackedObject)> + '_ {
        self.map(kind).iter().map(|(id, obj)| (*id, obj))
    }

    pub fn get(&self, kind: ObjectKind, id: u32) -> Option<&TrackedObject> {
        self.map(kind).get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.mechs.contains_key(&id) || self.projectiles.contains_key(&id)
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.map(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.mechs.is_empty() && self.projectiles.is_empty()
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Drop every object and clear the fault flag.
    pub fn reset(&mut self) {
        self.mechs.clear();
        self.projectiles.clear();
        self.faulted = false;
    }

    fn fault(&mut self, id: u32, op: TrackerOp) -> TrackerError {
        self.faulted = true;
        TrackerError::UnknownObject { id, op }
    }

    fn map(&self, kind: ObjectKind) -> &BTreeMap<u32, TrackedObject> {
        match kind {
            ObjectKind::Mech => &self.mechs,
            ObjectKind::Projectile => &self.projectiles,
        }
    }

    fn map_mut(&mut self, kind: ObjectKind) -> &mut BTreeMap<u32, TrackedObject> {
        match kind {
            ObjectKind::Mech => &mut self.mechs,
            ObjectKind::Projectile => &mut self.projectiles,
        }
    }
}
