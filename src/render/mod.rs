//! Frame rendering
//!
//! Draws one frame of the scene onto any [`RenderSurface`]: view transform,
//! grid, spacecraft, radar sweep, tiered debris and the zoom HUD.

pub mod surface;

use std::f32::consts::TAU;
use std::time::Duration;

use crate::sim::constants::radar::SWEEP_WIDTH;
use crate::sim::constants::view::{GRID_SPACING, REFERENCE_RINGS};
use crate::sim::state::{DebrisParticle, SimulationState};
use crate::sim::systems::proximity::{ProximityTier, RadarBands};
use crate::sim::view::ViewState;
use crate::util::vec2::Vec2;

pub use surface::{DrawCommand, RecordingSurface, RenderSurface, Rgba};

/// Scene palette
pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::new(10, 15, 30, 0.2);
    pub const GRID: Rgba = Rgba::new(30, 58, 95, 0.3);
    pub const REFERENCE_RING: Rgba = Rgba::new(30, 58, 95, 0.5);
    pub const SPACECRAFT: Rgba = Rgba::new(5, 233, 209, 1.0);
    pub const SPACECRAFT_GLOW: Rgba = Rgba::new(5, 233, 209, 0.3);
    pub const RADAR: Rgba = Rgba::new(5, 233, 209, 0.5);
    pub const RADAR_SWEEP: Rgba = Rgba::new(5, 233, 209, 0.1);
    pub const CRITICAL: Rgba = Rgba::new(234, 56, 76, 0.8);
    pub const WARNING: Rgba = Rgba::new(247, 115, 22, 0.8);
    pub const DETECTED: Rgba = Rgba::new(255, 191, 36, 0.8);
    pub const UNDETECTED: Rgba = Rgba::new(150, 150, 150, 0.3);
    pub const GLOW_ALPHA: f32 = 0.3;
    pub const BAND_ALPHA: f32 = 0.5;
    pub const COLLISION_FLASH: Rgba = Rgba::new(234, 56, 76, 0.3);
    pub const LABEL: Rgba = Rgba::new(255, 255, 255, 0.7);
}

const SPACECRAFT_RADIUS: f32 = 5.0;
const SPACECRAFT_GLOW_RADIUS: f32 = 8.0;
const DEBRIS_GLOW_EXTRA: f32 = 3.0;
const LABEL_SIZE_PX: f32 = 10.0;
const HUD_SIZE_PX: f32 = 12.0;
const HUD_POSITION: Vec2 = Vec2 { x: 10.0, y: 20.0 };

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a SimulationState,
    pub view: &'a ViewState,
    pub bands: RadarBands,
    /// Time since the loop started; drives the radar sweep
    pub elapsed: Duration,
    /// A collision was detected this frame
    pub collision_flash: bool,
}

/// Radar sweep start angle: one radian per second, wrapped to [0, 2π)
pub fn sweep_angle(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f64() % TAU as f64) as f32
}

/// Fill color for a particle in the given tier
pub fn tier_color(tier: ProximityTier) -> Rgba {
    match tier {
        ProximityTier::Critical => palette::CRITICAL,
        ProximityTier::Warning => palette::WARNING,
        ProximityTier::InRange => palette::DETECTED,
        ProximityTier::OutOfRange => palette::UNDETECTED,
    }
}

/// Distance readout shown next to close particles
pub fn distance_label(distance: f32) -> String {
    format!("{} km", (distance / 10.0).floor() as i64)
}

pub fn render_frame(surface: &mut dyn RenderSurface, frame: &Frame<'_>) {
    let size = surface.size();
    let center = size * 0.5;
    let zoom = frame.view.zoom();
    let pan = frame.view.pan;
    let spacecraft = frame.state.spacecraft.position;

    surface.clear();
    surface.save();

    // Zoom about the surface center, then pan
    surface.translate(center);
    surface.scale(zoom);
    surface.translate(pan - center);

    surface.fill_rect(-pan - center / zoom, size / zoom, palette::BACKGROUND);

    // Keep the spacecraft centered
    surface.translate(center - spacecraft);

    draw_grid(surface, size / zoom, spacecraft);
    draw_spacecraft(surface, spacecraft);
    draw_radar(surface, spacecraft, &frame.bands, frame.elapsed);
    for particle in &frame.state.debris {
        draw_particle(surface, spacecraft, particle, &frame.bands);
    }

    surface.restore();

    if frame.collision_flash {
        surface.fill_rect(Vec2::ZERO, size, palette::COLLISION_FLASH);
    }

    surface.text(
        HUD_POSITION,
        &format!("Zoom: {:.1}x", zoom),
        HUD_SIZE_PX,
        palette::LABEL,
    );
}

fn draw_grid(surface: &mut dyn RenderSurface, viewport: Vec2, around: Vec2) {
    let start_x = ((around.x - viewport.x) / GRID_SPACING).floor() * GRID_SPACING;
    let end_x = ((around.x + viewport.x) / GRID_SPACING).ceil() * GRID_SPACING;
    let start_y = ((around.y - viewport.y) / GRID_SPACING).floor() * GRID_SPACING;
    let end_y = ((around.y + viewport.y) / GRID_SPACING).ceil() * GRID_SPACING;

    let mut x = start_x;
    while x <= end_x {
        surface.stroke_line(Vec2::new(x, start_y), Vec2::new(x, end_y), palette::GRID);
        x += GRID_SPACING;
    }

    let mut y = start_y;
    while y <= end_y {
        surface.stroke_line(Vec2::new(start_x, y), Vec2::new(end_x, y), palette::GRID);
        y += GRID_SPACING;
    }

    for radius in REFERENCE_RINGS {
        surface.stroke_circle(Vec2::ZERO, radius, palette::REFERENCE_RING);
    }
}

fn draw_spacecraft(surface: &mut dyn RenderSurface, at: Vec2) {
    surface.fill_circle(at, SPACECRAFT_RADIUS, palette::SPACECRAFT);
    surface.fill_circle(at, SPACECRAFT_GLOW_RADIUS, palette::SPACECRAFT_GLOW);
}

fn draw_radar(surface: &mut dyn RenderSurface, at: Vec2, bands: &RadarBands, elapsed: Duration) {
    surface.stroke_circle(at, bands.radius, palette::RADAR);

    let start = sweep_angle(elapsed);
    surface.fill_wedge(at, bands.radius, start, start + SWEEP_WIDTH, palette::RADAR_SWEEP);

    surface.stroke_circle(at, bands.critical, palette::CRITICAL.with_alpha(palette::BAND_ALPHA));
    surface.stroke_circle(at, bands.warning, palette::WARNING.with_alpha(palette::BAND_ALPHA));
}

fn draw_particle(
    surface: &mut dyn RenderSurface,
    spacecraft: Vec2,
    particle: &DebrisParticle,
    bands: &RadarBands,
) {
    let distance = spacecraft.distance_to(particle.position);
    let tier = bands.classify(distance);
    let color = tier_color(tier);

    surface.fill_circle(particle.position, particle.size, color);
    if !tier.is_detected() {
        return;
    }

    let glow = color.with_alpha(palette::GLOW_ALPHA);
    surface.fill_circle(particle.position, particle.size + DEBRIS_GLOW_EXTRA, glow);

    if tier.is_near() {
        surface.stroke_line(spacecraft, particle.position, glow);
        let label_at = spacecraft.midpoint(particle.position) - Vec2::new(0.0, 5.0);
        surface.text(label_at, &distance_label(distance), LABEL_SIZE_PX, palette::LABEL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Spacecraft;

    fn scene(debris: Vec<DebrisParticle>) -> SimulationState {
        SimulationState::with_debris(Spacecraft::at(Vec2::new(640.0, 360.0)), debris, 0)
    }

    fn particle_offset(dx: f32, dy: f32) -> DebrisParticle {
        DebrisParticle::new(Vec2::new(640.0 + dx, 360.0 + dy), Vec2::ZERO, 2.0)
    }

    fn render(state: &SimulationState, view: &ViewState, flash: bool) -> RecordingSurface {
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        let frame = Frame {
            state,
            view,
            bands: RadarBands::from_range(15.0),
            elapsed: Duration::from_millis(1_500),
            collision_flash: flash,
        };
        render_frame(&mut surface, &frame);
        surface
    }

    #[test]
    fn test_frame_is_balanced() {
        let state = scene(vec![particle_offset(40.0, 0.0)]);
        let surface = render(&state, &ViewState::new(), false);

        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_hud_shows_zoom() {
        let state = scene(Vec::new());
        let mut view = ViewState::new();
        view.set_zoom(2.0);
        let surface = render(&state, &view, false);
        assert!(surface.texts().any(|t| t == "Zoom: 2.0x"));
    }

    #[test]
    fn test_distance_labels_only_for_near_particles() {
        let state = scene(vec![
            particle_offset(40.0, 0.0),
            particle_offset(0.0, 75.0),
            particle_offset(120.0, 0.0),
            particle_offset(400.0, 0.0),
        ]);
        let surface = render(&state, &ViewState::new(), false);
        let labels: Vec<&str> = surface.texts().filter(|t| t.ends_with("km")).collect();
        assert_eq!(labels, vec!["4 km", "7 km"]);
    }

    #[test]
    fn test_particle_colors_follow_tier() {
        let state = scene(vec![particle_offset(40.0, 0.0), particle_offset(400.0, 0.0)]);
        let surface = render(&state, &ViewState::new(), false);

        let fills: Vec<Rgba> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillCircle { radius, color, .. } if *radius == 2.0 => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![palette::CRITICAL, palette::UNDETECTED]);
    }

    #[test]
    fn test_sweep_rotates_with_time() {
        assert!((sweep_angle(Duration::from_millis(1_500)) - 1.5).abs() < 1e-5);
        let wrapped = sweep_angle(Duration::from_secs(7));
        assert!((wrapped - (7.0 - TAU)).abs() < 1e-4);

        let state = scene(Vec::new());
        let surface = render(&state, &ViewState::new(), false);
        let wedge = surface.commands().iter().find_map(|command| match command {
            DrawCommand::FillWedge { start, end, .. } => Some((*start, *end)),
            _ => None,
        });
        let (start, end) = wedge.unwrap();
        assert!((start - 1.5).abs() < 1e-5);
        assert!((end - start - SWEEP_WIDTH).abs() < 1e-5);
    }

    #[test]
    fn test_collision_flash_drawn_in_screen_space() {
        let state = scene(Vec::new());
        let surface = render(&state, &ViewState::new(), true);
        let flash = DrawCommand::FillRect {
            origin: Vec2::ZERO,
            size: Vec2::new(1280.0, 720.0),
            color: palette::COLLISION_FLASH,
        };
        assert!(surface.commands().contains(&flash));

        let surface = render(&state, &ViewState::new(), false);
        assert!(!surface.commands().contains(&flash));
    }

    #[test]
    fn test_distance_label() {
        assert_eq!(distance_label(0.0), "0 km");
        assert_eq!(distance_label(89.9), "8 km");
        assert_eq!(distance_label(90.0), "9 km");
    }
}
