//! Presentation settings and preferences
//!
//! Session-only: nothing here is written to storage.

use serde::{Deserialize, Serialize};

/// Player preferences for audio and display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Behaviour ===
    /// Pause a running game when the window loses focus or the tab is hidden
    pub pause_on_blur: bool,

    // === Display ===
    /// Draw the 1px gaps between cells
    pub grid_lines: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pause_on_blur: true,
            grid_lines: true,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Gap between cells in pixels
    pub fn cell_gap_px(&self) -> f32 {
        if self.grid_lines {
            crate::consts::CELL_GAP_PX
        } else {
            0.0
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
    }
}
