//! Lyon-based triangulation of a table frame.
//!
//! A [`Surface`] that turns the same fill/stroke commands the Canvas2D
//! painter consumes into a flat triangle list, for hosts that draw the table
//! through WebGPU instead.
//!
//! ```ignore
//! let mut mesh = TableMesh::new();
//! sim.draw_list().replay(Some(&mut mesh));
//! upload(mesh.vertices());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::color::Color;
use super::traits::Surface;

/// Per-vertex data: position + RGBA. 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl MeshVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(position: lyon::math::Point, color: Color) -> Self {
        Self {
            x: position.x,
            y: position.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

struct FillCtor {
    color: Color,
}

impl FillVertexConstructor<MeshVertex> for FillCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> MeshVertex {
        MeshVertex::at(vertex.position(), self.color)
    }
}

struct StrokeCtor {
    color: Color,
}

impl StrokeVertexConstructor<MeshVertex> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> MeshVertex {
        MeshVertex::at(vertex.position(), self.color)
    }
}

/// Triangle list built from one frame of drawing commands.
pub struct TableMesh {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<MeshVertex, u32>,
    vertices: Vec<MeshVertex>,
}

impl TableMesh {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(4096),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Unroll indexed geometry into the flat triangle list.
    fn flush(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillCtor { color }),
        );
        match result {
            Ok(_) => self.flush(),
            Err(e) => log::debug!("fill tessellation failed: {:?}", e),
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor { color }),
        );
        match result {
            Ok(_) => self.flush(),
            Err(e) => log::debug!("stroke tessellation failed: {:?}", e),
        }
    }
}

impl Default for TableMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TableMesh {
    /// The GPU pass clears its target itself, so a clear only drops
    /// geometry already collected for this frame.
    fn clear_rect(&mut self, _origin: Vec2, _width: f32, _height: f32) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Color) {
        let mut builder = Path::builder();
        builder.begin(point(origin.x, origin.y));
        builder.line_to(point(origin.x + width, origin.y));
        builder.line_to(point(origin.x + width, origin.y + height));
        builder.line_to(point(origin.x, origin.y + height));
        builder.close();
        self.fill_path(&builder.build(), color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.line_to(point(to.x, to.y));
        builder.end(false);
        self.stroke_path(&builder.build(), width, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), MeshVertex::STRIDE_BYTES);
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut mesh = TableMesh::new();
        mesh.fill_rect(Vec2::ZERO, 800.0, 400.0, Color::FELT);
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn circle_and_line_produce_triangles() {
        let mut mesh = TableMesh::new();
        mesh.fill_circle(Vec2::new(50.0, 50.0), 10.0, Color::WHITE);
        let after_circle = mesh.vertex_count();
        assert!(after_circle > 0);

        mesh.stroke_line(Vec2::ZERO, Vec2::new(100.0, 0.0), 4.0, Color::CUE_STICK);
        assert!(mesh.vertex_count() > after_circle);
        assert_eq!(mesh.vertex_count() % 3, 0);
    }

    #[test]
    fn clear_drops_collected_geometry() {
        let mut mesh = TableMesh::new();
        mesh.fill_rect(Vec2::ZERO, 10.0, 10.0, Color::RAIL);
        mesh.clear_rect(Vec2::ZERO, 10.0, 10.0);
        assert_eq!(mesh.vertex_count(), 0);
    }
}
