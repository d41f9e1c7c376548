//! ArenaView: draws an `ArenaSnapshot` into a framebuffer.
//!
//! Pure; no terminal I/O happens here.

use crate::core::{ArenaSnapshot, PlacedObject, PROJECTILE_GLYPH};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

const MECH_FG: Rgb = Rgb::new(0, 128, 128);
const PROJECTILE_FG: Rgb = Rgb::new(128, 128, 0);
const STATUS_FG: Rgb = Rgb::new(150, 150, 150);
const FAULT_FG: Rgb = Rgb::new(200, 60, 60);

/// Connection state shown in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    #[default]
    Connecting,
    Connected,
    /// Login acknowledged.
    Live,
    Ended,
    Closed,
    TimedOut,
    Failed,
}

impl LinkStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Live => "live",
            Self::Ended => "ended",
            Self::Closed => "closed",
            Self::TimedOut => "timed out",
            Self::Failed => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArenaView {
    show_status: bool,
}

impl ArenaView {
    pub fn new() -> Self {
        Self { show_status: true }
    }

    /// Drop the bottom status line, leaving only the scale header.
    pub fn without_status(mut self) -> Self {
        self.show_status = false;
        self
    }

    /// Redraw `fb` from scratch.
    ///
    /// Objects are drawn last so they stay visible over the text lines; mechs
    /// sharing a cell with a projectile lose to the projectile.
    pub fn render_into(&self, snap: &ArenaSnapshot, link: LinkStatus, fb: &mut FrameBuffer) {
        fb.clear();
        if fb.width() == 0 || fb.height() == 0 {
            return;
        }

        if self.show_status {
            self.draw_status(snap, link, fb);
        }
        fb.put_str(0, 0, &format!("Scale: {}", snap.scale), CellStyle::default());

        let mech_style = CellStyle::fg(MECH_FG).bold();
        for obj in &snap.mechs {
            let (x, y) = cell_of(obj, fb);
            fb.put_char(x, y, obj.heading.glyph(), mech_style);
        }
        let projectile_style = CellStyle::fg(PROJECTILE_FG);
        for obj in &snap.projectiles {
            let (x, y) = cell_of(obj, fb);
            fb.put_char(x, y, PROJECTILE_GLYPH, projectile_style);
        }
    }

    fn draw_status(&self, snap: &ArenaSnapshot, link: LinkStatus, fb: &mut FrameBuffer) {
        let y = fb.height() - 1;
        let line = format!(
            "{} | mechs {} | projectiles {} | {}",
            snap.phase.label(),
            snap.mechs.len(),
            snap.projectiles.len(),
            link.label()
        );
        let end = fb.put_str(0, y, &line, CellStyle::fg(STATUS_FG).dim());
        if snap.faulted {
            fb.put_str(end, y, " | tracker fault", CellStyle::fg(FAULT_FG).bold());
        }
    }
}

/// Grid cell for a projected point. The point may sit exactly on the far
/// edge, so it is clamped into the last row or column.
fn cell_of(obj: &PlacedObject, fb: &FrameBuffer) -> (u16, u16) {
    let clamp = |v: f32, extent: u16| -> u16 {
        let max = extent.saturating_sub(1);
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            (v.floor() as u32).min(u32::from(max)) as u16
        }
    };
    (clamp(obj.point.x, fb.width()), clamp(obj.point.z, fb.height()))
}
