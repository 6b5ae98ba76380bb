//! Immediate-mode drawing surface and a recording implementation

use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// RGBA color, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Anything the frame renderer can draw on. Transforms stack with save/restore
/// like a 2D canvas context.
pub trait RenderSurface {
    /// Surface size in screen pixels (width, height)
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn scale(&mut self, factor: f32);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Filled pie slice from `start` to `end` radians
    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba);
    fn text(&mut self, at: Vec2, text: &str, size_px: f32, color: Rgba);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate(Vec2),
    Scale(f32),
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, color: Rgba },
    FillWedge { center: Vec2, radius: f32, start: f32, end: f32, color: Rgba },
    StrokeLine { from: Vec2, to: Vec2, color: Rgba },
    Text { at: Vec2, text: String, size_px: f32, color: Rgba },
}

/// Surface that records the last frame's commands. Used headless and in tests.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::with_capacity(256),
            depth: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current save/restore nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    /// Clearing starts a new frame, dropping the previous recording
    fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn scale(&mut self, factor: f32) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, color });
    }

    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillWedge {
            center,
            radius,
            start,
            end,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine { from, to, color });
    }

    fn text(&mut self, at: Vec2, text: &str, size_px: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            size_px,
            color,
        });
    }
}
