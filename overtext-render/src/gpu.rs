//! The GPU geometry seam.
//!
//! A backend turns a unit quad plus a composited [`GlyphImage`] into an
//! owned, drawable handle and draws it at a screen position. Screen
//! coordinates put the origin at the viewport's top-left corner with y
//! growing upward, so on-screen y values are zero or negative; the quad's
//! bottom-left corner lands on `(x, y)` and it spans the image's pixel size.

use crate::error::RenderError;
use crate::glyph_image::GlyphImage;

/// One quad corner: position then texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// Vertex and index arrays for a textured mesh drawn as a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl QuadMesh {
    /// The 0..1 square with texture v flipped so image row 0 sits at the top.
    pub fn unit() -> Self {
        let vertex = |x: f32, y: f32, u: f32, v: f32| Vertex {
            position: [x, y, 0.0],
            tex_coords: [u, v],
        };
        Self {
            vertices: vec![
                vertex(0.0, 0.0, 0.0, 1.0),
                vertex(0.0, 1.0, 0.0, 0.0),
                vertex(1.0, 1.0, 1.0, 0.0),
                vertex(1.0, 0.0, 1.0, 1.0),
            ],
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    /// Number of triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Creates and draws per-glyph geometry.
///
/// Geometry is exclusively owned by the glyph that created it and released
/// when dropped.
pub trait GpuBackend {
    type Geometry;

    /// Upload `image` as the texture of `mesh`.
    fn create_geometry(
        &mut self,
        mesh: &QuadMesh,
        image: &GlyphImage,
    ) -> Result<Self::Geometry, RenderError>;

    /// Draw `geometry` with its bottom-left corner at `(x, y)` in a
    /// `viewport_width` x `viewport_height` viewport.
    fn draw(
        &mut self,
        geometry: &Self::Geometry,
        x: f32,
        y: f32,
        viewport_width: u32,
        viewport_height: u32,
    );
}
