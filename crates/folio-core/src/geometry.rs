//! Procedural meshes for the hero scene.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Flat grid in the XZ plane centred on the origin, facing +Y.
pub fn plane_grid(width: f32, depth: f32, segments: u32) -> Mesh {
    let segs = segments.max(1);
    let row = segs + 1;
    let mut vertices = Vec::with_capacity((row * row) as usize);
    for iz in 0..row {
        let v = iz as f32 / segs as f32;
        for ix in 0..row {
            let u = ix as f32 / segs as f32;
            vertices.push(Vertex {
                position: [(u - 0.5) * width, 0.0, (v - 0.5) * depth],
                normal: [0.0, 1.0, 0.0],
                uv: [u, 1.0 - v],
            });
        }
    }
    let mut indices = Vec::with_capacity((segs * segs * 6) as usize);
    for iz in 0..segs {
        for ix in 0..segs {
            let a = iz * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    Mesh { vertices, indices }
}

const PHI: f32 = 1.618_034;

fn icosahedron_corners(radius: f32) -> [[f32; 3]; 12] {
    let raw = [
        [-1.0, PHI, 0.0],
        [1.0, PHI, 0.0],
        [-1.0, -PHI, 0.0],
        [1.0, -PHI, 0.0],
        [0.0, -1.0, PHI],
        [0.0, 1.0, PHI],
        [0.0, -1.0, -PHI],
        [0.0, 1.0, -PHI],
        [PHI, 0.0, -1.0],
        [PHI, 0.0, 1.0],
        [-PHI, 0.0, -1.0],
        [-PHI, 0.0, 1.0],
    ];
    raw.map(|p| {
        let v = glam::Vec3::from(p).normalize() * radius;
        v.to_array()
    })
}

// Counter-clockwise seen from outside.
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Low-poly icosahedron with per-face normals (unshared vertices).
pub fn icosahedron(radius: f32) -> Mesh {
    let corners = icosahedron_corners(radius);
    let mut vertices = Vec::with_capacity(60);
    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| glam::Vec3::from(corners[i]));
        let normal = (b - a).cross(c - a).normalize().to_array();
        for p in [a, b, c] {
            vertices.push(Vertex {
                position: p.to_array(),
                normal,
                uv: [0.0, 0.0],
            });
        }
    }
    let indices = (0..vertices.len() as u32).collect();
    Mesh { vertices, indices }
}

/// Unique icosahedron edges as a line list (two points per edge).
pub fn icosahedron_edges(radius: f32) -> Vec<[f32; 3]> {
    let corners = icosahedron_corners(radius);
    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(30);
    for face in ICOSAHEDRON_FACES {
        for k in 0..3 {
            let (i, j) = (face[k], face[(k + 1) % 3]);
            let edge = (i.min(j), i.max(j));
            if !pairs.contains(&edge) {
                pairs.push(edge);
            }
        }
    }
    pairs
        .into_iter()
        .flat_map(|(i, j)| [corners[i], corners[j]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_grid_counts() {
        let m = plane_grid(30.0, 20.0, 4);
        assert_eq!(m.vertices.len(), 25);
        assert_eq!(m.triangle_count(), 32);
        let xs: Vec<f32> = m.vertices.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -15.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 15.0);
    }

    #[test]
    fn icosahedron_is_closed_and_outward() {
        let m = icosahedron(1.0);
        assert_eq!(m.triangle_count(), 20);
        for tri in m.vertices.chunks(3) {
            let centroid = tri
                .iter()
                .map(|v| glam::Vec3::from(v.position))
                .sum::<glam::Vec3>()
                / 3.0;
            let n = glam::Vec3::from(tri[0].normal);
            assert!(centroid.dot(n) > 0.0, "face normal points inward");
        }
        for v in &m.vertices {
            assert!((glam::Vec3::from(v.position).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn icosahedron_has_thirty_edges() {
        assert_eq!(icosahedron_edges(1.5).len(), 60);
    }
}
