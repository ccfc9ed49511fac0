// src/animation_lib/surface.rs

use std::ops::{Deref, DerefMut};
use glam::Vec2;

/// 8-bit RGBA, the range the animations think in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeMode {
    /// Leave the outline open at the last vertex
    Open,
    /// Connect the last vertex back to the first
    Close,
}

/// The drawing capability a polygon calls into. Implemented by the host.
pub trait DrawingSurface {
    fn stroke(&mut self, color: Color);
    fn stroke_weight(&mut self, weight: f32);
    fn fill(&mut self, color: Color);
    fn no_fill(&mut self);
    fn begin_shape(&mut self);
    fn vertex(&mut self, point: Vec2);
    fn end_shape(&mut self, mode: ShapeMode);
    fn push_style(&mut self);
    fn pop_style(&mut self);
}

/// Pushes the surface style on creation and pops it on drop, so the previous
/// style comes back on every exit path.
pub struct StyleScope<'a> {
    surface: &'a mut dyn DrawingSurface,
}

impl<'a> StyleScope<'a> {
    pub fn new(surface: &'a mut dyn DrawingSurface) -> Self {
        surface.push_style();
        Self { surface }
    }
}

impl<'a> Deref for StyleScope<'a> {
    type Target = dyn DrawingSurface + 'a;
    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for StyleScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.surface.pop_style();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Stroke(Color),
    StrokeWeight(f32),
    Fill(Color),
    NoFill,
    BeginShape,
    Vertex(Vec2),
    EndShape(ShapeMode),
    PushStyle,
    PopStyle,
}

/// Surface that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn shape_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::BeginShape)).count()
    }

    /// Vertices of every shape, in the order they were issued.
    pub fn vertices(&self) -> Vec<Vec2> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Vertex(point) => Some(*point),
                _ => None,
            })
            .collect()
    }

    /// Push/pop nesting depth after replaying all commands.
    pub fn style_depth(&self) -> i64 {
        self.commands.iter().fold(0, |depth, c| match c {
            DrawCommand::PushStyle => depth + 1,
            DrawCommand::PopStyle => depth - 1,
            _ => depth,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn stroke(&mut self, color: Color) { self.commands.push(DrawCommand::Stroke(color)); }
    fn stroke_weight(&mut self, weight: f32) { self.commands.push(DrawCommand::StrokeWeight(weight)); }
    fn fill(&mut self, color: Color) { self.commands.push(DrawCommand::Fill(color)); }
    fn no_fill(&mut self) { self.commands.push(DrawCommand::NoFill); }
    fn begin_shape(&mut self) { self.commands.push(DrawCommand::BeginShape); }
    fn vertex(&mut self, point: Vec2) { self.commands.push(DrawCommand::Vertex(point)); }
    fn end_shape(&mut self, mode: ShapeMode) { self.commands.push(DrawCommand::EndShape(mode)); }
    fn push_style(&mut self) { self.commands.push(DrawCommand::PushStyle); }
    fn pop_style(&mut self) { self.commands.push(DrawCommand::PopStyle); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_then_bail(surface: &mut dyn DrawingSurface, bail: bool) -> Result<(), ()> {
        let mut scope = StyleScope::new(surface);
        scope.stroke(Color::gray(10));
        if bail {
            return Err(());
        }
        scope.begin_shape();
        scope.end_shape(ShapeMode::Open);
        Ok(())
    }

    #[test]
    fn test_style_scope_pops_on_every_path() {
        let mut surface = RecordingSurface::new();
        assert!(draw_then_bail(&mut surface, true).is_err());
        assert_eq!(surface.commands.last(), Some(&DrawCommand::PopStyle));
        assert_eq!(surface.style_depth(), 0);

        surface.clear();
        assert!(draw_then_bail(&mut surface, false).is_ok());
        assert_eq!(surface.commands.first(), Some(&DrawCommand::PushStyle));
        assert_eq!(surface.commands.last(), Some(&DrawCommand::PopStyle));
        assert_eq!(surface.shape_count(), 1);
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(Color::gray(255).to_f32_array(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0, 0, 0).to_f32_array(), [0.0, 0.0, 0.0, 1.0]);
    }
}
