use std::env;

use crate::model::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH, WINDOW_TITLE};

/// Window and presentation settings. Game rules are not configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Logical window size; matches the game's viewport by default.
    pub width: u32,
    pub height: u32,
    pub present_mode: wgpu::PresentMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: VIEWPORT_WIDTH as u32,
            height: VIEWPORT_HEIGHT as u32,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}

impl WindowConfig {
    /// Defaults, with `PONG2D_VSYNC` deciding the present mode.
    pub fn from_env() -> Self {
        let vsync = env::var("PONG2D_VSYNC").ok();
        Self {
            present_mode: present_mode_from(vsync.as_deref()),
            ..Self::default()
        }
    }
}

/// Movement is per frame, so turning vsync off also speeds the game up.
fn present_mode_from(vsync: Option<&str>) -> wgpu::PresentMode {
    match vsync.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "0" | "false" | "off") => wgpu::PresentMode::AutoNoVsync,
        _ => wgpu::PresentMode::Fifo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_viewport() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "Pong 2D");
        assert_eq!(config.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn test_vsync_parsing() {
        assert_eq!(present_mode_from(None), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode_from(Some("1")), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode_from(Some("0")), wgpu::PresentMode::AutoNoVsync);
        assert_eq!(present_mode_from(Some(" OFF ")), wgpu::PresentMode::AutoNoVsync);
        assert_eq!(present_mode_from(Some("false")), wgpu::PresentMode::AutoNoVsync);
        assert_eq!(present_mode_from(Some("yes")), wgpu::PresentMode::Fifo);
    }
}
