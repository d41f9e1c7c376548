//! Heading classification for mech glyphs.
//!
//! The forward axis `(0, 0, 1)` is rotated by the object's orientation and the
//! result is bucketed on its x component. Screen rows grow with world z, so a
//! forward vector with positive z points down the screen.

use glam::{Quat, Vec3};

/// Glyph drawn for every projectile, whatever its orientation.
pub const PROJECTILE_GLYPH: char = '⦷';

const CENTER_BAND: f32 = 0.2;
const DIAGONAL_BAND: f32 = 0.8;

/// Screen-space compass heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Heading {
    /// Classify an orientation quaternion (x, y, z, w order as sent by the server).
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::from_forward(rotation * Vec3::Z)
    }

    /// Classify an already-rotated forward vector.
    pub fn from_forward(forward: Vec3) -> Self {
        let (x, z) = (forward.x, forward.z);
        if !x.is_finite() || !z.is_finite() {
            return Self::Up;
        }
        let down = z > 0.0;

        if x > -CENTER_BAND && x < CENTER_BAND {
            if down {
                Self::Down
            } else {
                Self::Up
            }
        } else if x > -DIAGONAL_BAND && x <= -CENTER_BAND {
            if down {
                Self::DownLeft
            } else {
                Self::UpLeft
            }
        } else if x < DIAGONAL_BAND && x >= CENTER_BAND {
            if down {
                Self::DownRight
            } else {
                Self::UpRight
            }
        } else if x <= -DIAGONAL_BAND {
            Self::Left
        } else {
            Self::Right
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Up => '↑',
            Self::UpRight => '↗',
            Self::Right => '→',
            Self::DownRight => '↘',
            Self::Down => '↓',
            Self::DownLeft => '↙',
            Self::Left => '←',
            Self::UpLeft => '↖',
        }
    }
}
