use std::time::Duration;

use crate::gfx::{CursorMode, DebugMode};

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererProperties {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Multisample count.
    pub samples: u32,
    pub wireframe: bool,
    pub fullscreen: bool,
    pub vsync: bool,
    pub cursor: CursorMode,
    pub debug: DebugMode,
    /// Physics step in seconds, passed to every `update`.
    pub fixed_dt: f32,
    /// Optional `(min, max)` bounds for the wall-clock render delta.
    pub render_dt_clamps: Option<(Duration, Duration)>,
}

impl Default for RendererProperties {
    fn default() -> Self {
        Self {
            title: "untitled".to_string(),
            width: 1280,
            height: 720,
            samples: 1,
            wireframe: false,
            fullscreen: false,
            vsync: false,
            cursor: CursorMode::Enabled,
            debug: DebugMode::Notification,
            fixed_dt: 1.0 / 60.0,
            render_dt_clamps: None,
        }
    }
}

impl RendererProperties {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_cursor(mut self, cursor: CursorMode) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_debug(mut self, debug: DebugMode) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_fixed_dt(mut self, fixed_dt: f32) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    pub fn with_render_dt_clamps(mut self, min: Duration, max: Duration) -> Self {
        self.render_dt_clamps = Some((min, max));
        self
    }

    /// Width over height; 1.0 for a degenerate size.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = RendererProperties::default();
        assert_eq!(p.title, "untitled");
        assert_eq!((p.width, p.height), (1280, 720));
        assert_eq!(p.samples, 1);
        assert!(!p.wireframe && !p.fullscreen && !p.vsync);
        assert_eq!(p.cursor, CursorMode::Enabled);
        assert_eq!(p.debug, DebugMode::Notification);
        assert!((p.fixed_dt - 1.0 / 60.0).abs() < f32::EPSILON);
        assert!(p.render_dt_clamps.is_none());
    }

    #[test]
    fn builder_overrides() {
        let p = RendererProperties::default()
            .with_title("second")
            .with_size(640, 480)
            .with_cursor(CursorMode::Disabled)
            .with_fixed_dt(0.01);

        assert_eq!(p.title, "second");
        assert_eq!((p.width, p.height), (640, 480));
        assert_eq!(p.cursor, CursorMode::Disabled);
        assert_eq!(p.fixed_dt, 0.01);
        assert!((p.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }
}
