//! Output mesh data structure

use crate::point::*;
use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};

/// Offset subtracted from both UV axes to centre vertex positions
pub const UV_CENTER_OFFSET: f64 = 0.5;

/// An indexed 2D triangle mesh with one UV per vertex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteMesh {
    /// Vertex positions, centred on the sprite's own origin
    pub vertices: Vec<Point2d>,
    /// Texture coordinates in `[0, 1]`, parallel to `vertices`
    pub uvs: Vec<Point2d>,
    /// Triangle index triples into `vertices`
    pub triangles: Vec<[usize; 3]>,
}

impl SpriteMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            uvs: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Build a mesh over the vertices of `polygon`.
    ///
    /// UVs are the polygon points; positions are the same points shifted by
    /// `-(0.5, 0.5)` so the `[0, 1]` UV span is centred on the origin.
    pub fn from_polygon(polygon: &Polygon, triangles: Vec<[usize; 3]>) -> Self {
        let uvs = polygon.points.clone();
        let offset = Vector2d::new(UV_CENTER_OFFSET, UV_CENTER_OFFSET);
        let vertices = uvs.iter().map(|uv| uv - offset).collect();
        Self {
            vertices,
            uvs,
            triangles,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Sum of unsigned triangle areas in vertex space
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                cross(&self.vertices[a], &self.vertices[b], &self.vertices[c]).abs() * 0.5
            })
            .sum()
    }

    /// Whether every triangle index refers to an existing vertex
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len();
        self.triangles.iter().flatten().all(|&i| i < n)
    }

    /// Flatten positions to `[x, y]` pairs for upload to a renderer
    pub fn positions_f32(&self) -> Vec<[f32; 2]> {
        self.vertices
            .iter()
            .map(|p| [p.x as f32, p.y as f32])
            .collect()
    }

    /// Flatten triangle indices to a `u32` index buffer
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flatten()
            .map(|&i| i as u32)
            .collect()
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.uvs.clear();
        self.triangles.clear();
    }
}
