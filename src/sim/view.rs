//! Pan and zoom view transform
//!
//! Independent of the simulation: only pointer drag and wheel input touch it,
//! and the next rendered frame picks up the change.

use serde::{Deserialize, Serialize};

use crate::sim::constants::view::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Always within [MIN_ZOOM, MAX_ZOOM]
    zoom: f32,
    /// Pan offset in scene units
    pub pan: Vec2,
    #[serde(skip)]
    drag_anchor: Option<Vec2>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Vec2::ZERO,
            drag_anchor: None,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Pointer pressed at screen position `at`
    pub fn begin_drag(&mut self, at: Vec2) {
        self.drag_anchor = Some(at);
    }

    /// Pointer moved; pans by the screen motion divided by zoom
    pub fn drag_to(&mut self, at: Vec2) {
        if let Some(anchor) = self.drag_anchor {
            self.pan_by(at - anchor);
            self.drag_anchor = Some(at);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Pan by a screen-space motion
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.pan += screen_delta / self.zoom;
    }

    /// Wheel scroll at `cursor` (screen position relative to the surface).
    /// Scrolling down (positive `delta_y`) zooms out. The scene point under
    /// the cursor stays put on screen.
    pub fn wheel(&mut self, delta_y: f32, cursor: Vec2) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }

        let step = -delta_y.signum() * ZOOM_STEP;
        let new_zoom = (self.zoom + step).clamp(MIN_ZOOM, MAX_ZOOM);

        let scene_point = cursor / self.zoom - self.pan;
        self.pan = cursor / new_zoom - scene_point;
        self.zoom = new_zoom;
    }

    /// Scene point currently under a screen cursor
    pub fn scene_under(&self, cursor: Vec2) -> Vec2 {
        cursor / self.zoom - self.pan
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_stays_bounded() {
        let mut view = ViewState::new();
        for _ in 0..100 {
            view.wheel(-120.0, Vec2::new(10.0, 10.0));
            assert!(view.zoom() <= MAX_ZOOM);
        }
        assert_eq!(view.zoom(), MAX_ZOOM);

        for _ in 0..100 {
            view.wheel(120.0, Vec2::new(10.0, 10.0));
            assert!(view.zoom() >= MIN_ZOOM);
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_set_zoom_clamps() {
        let mut view = ViewState::new();
        view.set_zoom(10.0);
        assert_eq!(view.zoom(), MAX_ZOOM);
        view.set_zoom(0.0);
        assert_eq!(view.zoom(), MIN_ZOOM);
        view.set_zoom(f32::NAN);
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_wheel_keeps_cursor_point_fixed() {
        let mut view = ViewState::new();
        view.pan = Vec2::new(-30.0, 12.0);
        let cursor = Vec2::new(400.0, 250.0);

        let before = view.scene_under(cursor);
        view.wheel(-1.0, cursor);
        let after = view.scene_under(cursor);

        assert!((view.zoom() - 1.1).abs() < 1e-5);
        assert!(before.approx_eq(after, 1e-3), "{:?} vs {:?}", before, after);
    }

    #[test]
    fn test_zero_wheel_is_noop() {
        let mut view = ViewState::new();
        view.wheel(0.0, Vec2::new(5.0, 5.0));
        assert_eq!(view, ViewState::new());
    }

    #[test]
    fn test_drag_scales_by_zoom() {
        let mut view = ViewState::new();
        view.set_zoom(2.0);

        assert!(!view.is_dragging());
        view.begin_drag(Vec2::new(100.0, 100.0));
        assert!(view.is_dragging());
        view.drag_to(Vec2::new(120.0, 90.0));
        assert!(view.pan.approx_eq(Vec2::new(10.0, -5.0), 1e-6));

        view.drag_to(Vec2::new(140.0, 90.0));
        assert!(view.pan.approx_eq(Vec2::new(20.0, -5.0), 1e-6));

        view.end_drag();
        assert!(!view.is_dragging());
        view.drag_to(Vec2::new(500.0, 500.0));
        assert!(view.pan.approx_eq(Vec2::new(20.0, -5.0), 1e-6));
    }

    #[test]
    fn test_reset() {
        let mut view = ViewState::new();
        view.set_zoom(2.5);
        view.pan = Vec2::new(1.0, 2.0);
        view.reset();
        assert_eq!(view.zoom(), DEFAULT_ZOOM);
        assert_eq!(view.pan, Vec2::ZERO);
    }
}
