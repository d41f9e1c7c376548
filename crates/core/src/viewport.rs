//! World-to-viewport normalization with an auto-growing scale.
//!
//! World x/z are divided by the scale and shifted by the viewport half extents.
//! When a point lands outside `[0, width] x [0, height]` the scale grows in
//! whole steps until it fits. The scale is shared by every object, so a single
//! far-away point shrinks the whole picture: callers must re-project all
//! objects from raw world coordinates after any growth.

use glam::Vec3;

/// A world position mapped into viewport space.
///
/// `y` is the scaled height, carried along for display only and never bounds
/// checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportNormalizer {
    width: f64,
    height: f64,
    scale: f64,
}

impl ViewportNormalizer {
    pub const INITIAL_SCALE: f64 = 1.0;
    pub const SCALE_STEP: f64 = 1.0;

    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            scale: Self::INITIAL_SCALE,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Change the viewport size. The scale is kept; it only grows on the next
    /// normalization if the smaller extent no longer fits.
    pub fn set_extent(&mut self, width: u16, height: u16) {
        self.width = width as f64;
        self.height = height as f64;
    }

    /// Back to the initial scale (episode reset).
    pub fn reset(&mut self) {
        self.scale = Self::INITIAL_SCALE;
    }

    /// Map `position` at the current scale without growing it.
    pub fn project(&self, position: Vec3) -> ViewPoint {
        let (x, y, z) = self.project_wide(position);
        ViewPoint {
            x: x as f32,
            y: y as f32,
            z: z as f32,
        }
    }

    pub fn contains(&self, p: ViewPoint) -> bool {
        self.contains_wide(p.x as f64, p.z as f64)
    }

    /// Map `position`, growing the scale until it fits.
    ///
    /// Returns `None` (scale untouched) for non-finite positions or a
    /// zero-sized viewport, where no scale could ever fit.
    pub fn normalize(&mut self, position: Vec3) -> Option<ViewPoint> {
        if !position.is_finite() || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }

        // Smallest whole number of steps that satisfies |x| / scale <= width / 2
        // on both axes.
        let required = (2.0 * (position.x as f64).abs() / self.width)
            .max(2.0 * (position.z as f64).abs() / self.height);
        if required > self.scale {
            let steps = ((required - self.scale) / Self::SCALE_STEP).ceil();
            let mut scale = self.scale + steps * Self::SCALE_STEP;
            // `required` may be rounded up past a whole step.
            let lower = scale - Self::SCALE_STEP;
            if lower >= self.scale && self.fits_at(position, lower) {
                scale = lower;
            }
            self.scale = scale;
        }

        // Float rounding can leave the point a hair outside; finish step-wise.
        loop {
            if self.fits_at(position, self.scale) {
                break;
            }
            let next = self.scale + Self::SCALE_STEP;
            if next == self.scale {
                break;
            }
            self.scale = next;
        }
        Some(self.project(position))
    }

    fn project_wide(&self, position: Vec3) -> (f64, f64, f64) {
        self.project_at(position, self.scale)
    }

    fn project_at(&self, position: Vec3, scale: f64) -> (f64, f64, f64) {
        (
            position.x as f64 / scale + self.width / 2.0,
            position.y as f64 / scale,
            position.z as f64 / scale + self.height / 2.0,
        )
    }

    fn fits_at(&self, position: Vec3, scale: f64) -> bool {
        let (x, _, z) = self.project_at(position, scale);
        self.contains_wide(x, z)
    }

    fn contains_wide(&self, x: f64, z: f64) -> bool {
        x >= 0.0 && x <= self.width && z >= 0.0 && z <= self.height
    }
}
