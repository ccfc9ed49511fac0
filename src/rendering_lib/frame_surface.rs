// src/rendering_lib/frame_surface.rs

use glam::Vec2;
use crate::animation_lib::surface::{Color, DrawingSurface, ShapeMode};
use crate::rendering_lib::vertex::Vertex;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Style {
    stroke: Color,
    stroke_weight: f32,
    fill: Option<Color>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color::gray(0),
            stroke_weight: 1.0,
            fill: Some(Color::gray(255)),
        }
    }
}

/// `DrawingSurface` that tessellates every shape into colored triangles for
/// the renderer. Fills are fanned from the first vertex, so they assume a
/// convex outline; strokes become one quad per segment.
#[derive(Debug, Default)]
pub struct FrameSurface {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    style: Style,
    style_stack: Vec<Style>,
    shape: Option<Vec<Vec2>>,
}

impl FrameSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops last frame's geometry and resets the style.
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.style = Style::default();
        if !self.style_stack.is_empty() {
            log::warn!("{} style pushes were never popped last frame", self.style_stack.len());
            self.style_stack.clear();
        }
        if self.shape.take().is_some() {
            log::warn!("shape left open at end of frame, discarding it");
        }
    }

    pub fn vertices(&self) -> &[Vertex] { &self.vertices }
    pub fn indices(&self) -> &[u32] { &self.indices }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn fill_convex(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let start = self.vertices.len() as u32;
        self.vertices.extend(points.iter().map(|p| Vertex::new(*p, color)));
        for i in 1..(points.len() as u32 - 1) {
            self.indices.extend_from_slice(&[start, start + i, start + i + 1]);
        }
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2) {
        let direction = (to - from).normalize_or_zero();
        if direction == Vec2::ZERO || self.style.stroke_weight <= 0.0 {
            return;
        }
        let offset = direction.perp() * (self.style.stroke_weight * 0.5);
        let color = self.style.stroke;
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            Vertex::new(from + offset, color),
            Vertex::new(to + offset, color),
            Vertex::new(to - offset, color),
            Vertex::new(from - offset, color),
        ]);
        self.indices.extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
    }
}

impl DrawingSurface for FrameSurface {
    fn stroke(&mut self, color: Color) {
        self.style.stroke = color;
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.style.stroke_weight = weight;
    }

    fn fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    fn no_fill(&mut self) {
        self.style.fill = None;
    }

    fn begin_shape(&mut self) {
        if self.shape.replace(Vec::new()).is_some() {
            log::warn!("begin_shape called inside an open shape, discarding the previous one");
        }
    }

    fn vertex(&mut self, point: Vec2) {
        match self.shape.as_mut() {
            Some(points) => points.push(point),
            None => log::warn!("vertex {:?} issued outside begin_shape/end_shape", point),
        }
    }

    fn end_shape(&mut self, mode: ShapeMode) {
        let Some(points) = self.shape.take() else {
            log::warn!("end_shape called without begin_shape");
            return;
        };
        if let Some(fill) = self.style.fill {
            self.fill_convex(&points, fill);
        }
        for pair in points.windows(2) {
            self.stroke_segment(pair[0], pair[1]);
        }
        if mode == ShapeMode::Close && points.len() >= 3 {
            self.stroke_segment(points[points.len() - 1], points[0]);
        }
    }

    fn push_style(&mut self) {
        self.style_stack.push(self.style);
    }

    fn pop_style(&mut self) {
        match self.style_stack.pop() {
            Some(style) => self.style = style,
            None => log::warn!("pop_style without matching push_style"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation_lib::{AnimatedPolygon, AnimationKind, NormalizedTime, PolygonAnimation, VertexPool};

    fn square(surface: &mut FrameSurface, mode: ShapeMode) {
        surface.begin_shape();
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
            surface.vertex(Vec2::new(x, y));
        }
        surface.end_shape(mode);
    }

    #[test]
    fn test_filled_closed_square() {
        let mut surface = FrameSurface::new();
        square(&mut surface, ShapeMode::Close);
        // 2 fan triangles plus 4 edges of 2 triangles each
        assert_eq!(surface.triangle_count(), 2 + 4 * 2);
        assert_eq!(surface.vertices().len(), 4 + 4 * 4);
    }

    #[test]
    fn test_open_outline_without_fill() {
        let mut surface = FrameSurface::new();
        surface.no_fill();
        square(&mut surface, ShapeMode::Open);
        assert_eq!(surface.triangle_count(), 3 * 2);
    }

    #[test]
    fn test_stroke_quad_has_requested_width() {
        let mut surface = FrameSurface::new();
        surface.no_fill();
        surface.stroke_weight(4.0);
        surface.begin_shape();
        surface.vertex(Vec2::new(0.0, 0.0));
        surface.vertex(Vec2::new(10.0, 0.0));
        surface.end_shape(ShapeMode::Open);
        let ys: Vec<f32> = surface.vertices().iter().map(|v| v.position[1]).collect();
        assert_eq!(ys, vec![2.0, 2.0, -2.0, -2.0]);
    }

    #[test]
    fn test_degenerate_segments_are_skipped() {
        let mut surface = FrameSurface::new();
        surface.no_fill();
        surface.begin_shape();
        surface.vertex(Vec2::ONE);
        surface.vertex(Vec2::ONE);
        surface.end_shape(ShapeMode::Close);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_style_stack_restores_previous_style() {
        let mut surface = FrameSurface::new();
        surface.push_style();
        surface.fill(Color::rgb(1, 2, 3));
        surface.stroke_weight(9.0);
        surface.pop_style();
        assert_eq!(surface.style, Style::default());

        // unbalanced pop is ignored
        surface.pop_style();
        assert_eq!(surface.style, Style::default());
    }

    #[test]
    fn test_converged_polygon_leaves_no_outline() {
        let pool = VertexPool::from_points(vec![Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(0.0, 6.0)]);
        let mut polygon = AnimatedPolygon::new(AnimationKind::Converging);
        for index in 0..3 {
            polygon.add_vertex(index);
        }
        polygon.init(&pool).unwrap();

        let mut surface = FrameSurface::new();
        polygon.draw(&pool, &mut surface).unwrap();
        assert_eq!(surface.triangle_count(), 3 * 2);

        polygon.update(NormalizedTime::END).unwrap();
        surface.begin_frame();
        polygon.draw(&pool, &mut surface).unwrap();
        assert!(surface.is_empty());
    }
}
