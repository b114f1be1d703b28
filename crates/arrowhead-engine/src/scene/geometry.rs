use bytemuck::{Pod, Zeroable};

/// A point in normalized device space.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex2D {
    pub x: f32,
    pub y: f32,
}

impl Vertex2D {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    /// Vertex buffer layout: one `vec2<f32>` position at location 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex2D>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles forming an arrow-like shape.
pub const ARROW: [Vertex2D; 6] = [
    Vertex2D::new(-0.5, -0.5),
    Vertex2D::new(0.5, 0.5),
    Vertex2D::new(0.5, -0.5),
    Vertex2D::new(0.5, 0.5),
    Vertex2D::new(-0.5, -0.5),
    Vertex2D::new(-0.75, 0.25),
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry has no vertices")]
    Empty,
    #[error("{0} vertices do not form whole triangles")]
    PartialTriangle(usize),
    #[error("{0} floats do not form whole (x, y) pairs")]
    OddCoordinateCount(usize),
}

/// Immutable triangle list.
///
/// Invariant: non-empty and the vertex count is a multiple of 3.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryStore {
    vertices: Vec<Vertex2D>,
}

impl GeometryStore {
    /// The reference arrow.
    pub fn arrow() -> Self {
        Self {
            vertices: ARROW.to_vec(),
        }
    }

    pub fn from_vertices(vertices: Vec<Vertex2D>) -> Result<Self, GeometryError> {
        if vertices.is_empty() {
            return Err(GeometryError::Empty);
        }
        if vertices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle(vertices.len()));
        }
        Ok(Self { vertices })
    }

    /// Builds geometry from a flat `[x0, y0, x1, y1, ...]` array.
    pub fn from_flat(coords: &[f32]) -> Result<Self, GeometryError> {
        if coords.len() % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount(coords.len()));
        }
        let vertices = coords
            .chunks_exact(2)
            .map(|c| Vertex2D::new(c[0], c[1]))
            .collect();
        Self::from_vertices(vertices)
    }

    pub fn vertices(&self) -> &[Vertex2D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.vertex_count() / 3
    }

    /// Raw bytes for upload into a vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::arrow()
    }
}
