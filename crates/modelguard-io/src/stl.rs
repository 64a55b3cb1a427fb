//! STL (Stereolithography) decoding.
//!
//! Supports both ASCII and binary STL, auto-detected from the buffer:
//! ASCII buffers start with "solid" (after optional whitespace); binary
//! buffers have an 80-byte header followed by a triangle count. Some binary
//! exporters write "solid" into the header, so detection also checks for
//! null bytes in the header region.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       ...
//!     endloop
//!   endfacet
//! endsolid name
//! ```
//!
//! An ASCII buffer may contain several `solid` blocks; each becomes its own
//! mesh so the caller can select among them.
//!
//! STL stores a triangle soup. Decoding welds bit-identical vertex positions
//! back into shared indices, so edge topology (watertightness, winding) is
//! meaningful on the result.

use hashbrown::HashMap;
use modelguard_types::{Point3, TriMesh};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Decode STL from a byte buffer, auto-detecting ASCII vs binary.
///
/// Returns one mesh per `solid` block for ASCII input; binary input always
/// yields a single mesh.
///
/// # Errors
///
/// Returns an error if the buffer is too small to be STL, a binary buffer
/// ends before its declared triangle count, or an ASCII buffer contains
/// unparseable coordinates.
pub fn decode_stl(bytes: &[u8]) -> IoResult<Vec<TriMesh>> {
    if bytes.len() < 6 {
        return Err(IoError::invalid_content("buffer too small to be valid STL"));
    }

    let prefix = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)]);
    if prefix.trim_start().starts_with("solid") && !is_binary_stl_header(bytes) {
        decode_stl_ascii(bytes)
    } else {
        decode_stl_binary(bytes).map(|mesh| vec![mesh])
    }
}

/// Check if the header suggests binary STL despite starting with "solid".
///
/// Binary headers often contain null bytes; ASCII never does.
fn is_binary_stl_header(bytes: &[u8]) -> bool {
    if bytes.len() < HEADER_SIZE + 4 {
        return false;
    }
    bytes[..HEADER_SIZE].contains(&0)
}

/// Decode a binary STL buffer.
#[allow(clippy::cast_possible_truncation)]
fn decode_stl_binary(bytes: &[u8]) -> IoResult<TriMesh> {
    if bytes.len() < HEADER_SIZE + 4 {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got: bytes.len(),
        });
    }

    // Triangle count is stored after the 80-byte header
    let face_count = u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ]);

    let payload = &bytes[HEADER_SIZE + 4..];
    let available = (payload.len() / TRIANGLE_SIZE) as u32;
    if available < face_count {
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: available,
        });
    }

    let mut welder = VertexWelder::with_capacity(face_count as usize);
    for record in payload.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        // Skip the 12-byte normal; vertices follow
        let v0 = read_point(&record[12..24]);
        let v1 = read_point(&record[24..36]);
        let v2 = read_point(&record[36..48]);
        welder.push_triangle(v0, v1, v2);
    }

    Ok(welder.into_mesh())
}

/// Read a point from 12 bytes (3 little-endian f32s).
fn read_point(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Decode an ASCII STL buffer, one mesh per `solid` block.
fn decode_stl_ascii(bytes: &[u8]) -> IoResult<Vec<TriMesh>> {
    let text = std::str::from_utf8(bytes)?;

    let mut solids = Vec::new();
    let mut welder = VertexWelder::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "solid" => {
                // A new solid; finalize any unterminated previous one
                if !welder.is_empty() {
                    solids.push(std::mem::take(&mut welder).into_mesh());
                }
            }
            "facet" => {
                in_facet = true;
            }
            "outer" => {
                if parts.len() >= 2 && parts[1].eq_ignore_ascii_case("loop") {
                    in_loop = true;
                    corners.clear();
                }
            }
            "vertex" => {
                if in_loop && parts.len() >= 4 {
                    let x: f64 = parts[1].parse()?;
                    let y: f64 = parts[2].parse()?;
                    let z: f64 = parts[3].parse()?;
                    corners.push(Point3::new(x, y, z));
                }
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if in_facet && corners.len() == 3 {
                    welder.push_triangle(corners[0], corners[1], corners[2]);
                }
                in_facet = false;
            }
            "endsolid" => {
                if !welder.is_empty() {
                    solids.push(std::mem::take(&mut welder).into_mesh());
                }
            }
            _ => {
                // Ignore unknown lines
            }
        }
    }

    // Tolerate a missing trailing endsolid
    if !welder.is_empty() {
        solids.push(welder.into_mesh());
    }

    Ok(solids)
}

/// Builds an indexed mesh from a triangle soup, merging bit-identical
/// vertex positions into shared indices.
#[derive(Default)]
struct VertexWelder {
    mesh: TriMesh,
    seen: HashMap<[u64; 3], u32>,
}

impl VertexWelder {
    fn new() -> Self {
        Self::default()
    }

    fn with_capacity(face_count: usize) -> Self {
        Self {
            mesh: TriMesh::with_capacity(face_count * 3, face_count),
            seen: HashMap::with_capacity(face_count * 3),
        }
    }

    fn is_empty(&self) -> bool {
        self.mesh.faces.is_empty()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_vertex(&mut self, point: Point3<f64>) -> u32 {
        let key = [point.x.to_bits(), point.y.to_bits(), point.z.to_bits()];
        if let Some(&index) = self.seen.get(&key) {
            return index;
        }
        let index = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(point);
        self.seen.insert(key, index);
        index
    }

    fn push_triangle(&mut self, v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) {
        let face = [self.add_vertex(v0), self.add_vertex(v1), self.add_vertex(v2)];
        self.mesh.faces.push(face);
    }

    fn into_mesh(self) -> TriMesh {
        self.mesh
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode a mesh as binary STL for decode tests.
    #[allow(clippy::cast_possible_truncation)]
    fn binary_stl_bytes(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            bytes.extend_from_slice(&[0u8; 12]); // normal, ignored
            for corner in tri {
                for coord in corner {
                    bytes.extend_from_slice(&coord.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&0u16.to_le_bytes()); // attribute count
        }
        bytes
    }

    #[test]
    fn binary_single_triangle() {
        let bytes = binary_stl_bytes(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        let meshes = decode_stl(&bytes).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertex_count(), 3);
        assert_eq!(meshes[0].face_count(), 1);
    }

    #[test]
    fn binary_welds_shared_vertices() {
        // Two triangles sharing the edge (1,0,0)-(0,1,0)
        let bytes = binary_stl_bytes(&[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ]);
        let meshes = decode_stl(&bytes).unwrap();
        assert_eq!(meshes[0].vertex_count(), 4);
        assert_eq!(meshes[0].face_count(), 2);
        assert!(meshes[0].indices_in_bounds());
    }

    #[test]
    fn binary_truncated_payload() {
        let mut bytes = binary_stl_bytes(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        bytes.truncate(HEADER_SIZE + 4 + 20);
        let result = decode_stl(&bytes);
        assert!(matches!(
            result,
            Err(IoError::InvalidFaceCount {
                expected: 1,
                got: 0
            })
        ));
    }

    #[test]
    fn buffer_too_small() {
        assert!(decode_stl(b"junk").is_err());
    }

    #[test]
    fn garbage_buffer_is_rejected() {
        // Not "solid"-prefixed and shorter than a binary header
        let result = decode_stl(b"Invalid STL content");
        assert!(result.is_err());
    }

    #[test]
    fn ascii_single_solid() {
        let ascii = br"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test";

        let meshes = decode_stl(ascii).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].face_count(), 1);
        assert_eq!(meshes[0].vertex_count(), 3);
    }

    #[test]
    fn ascii_welds_across_facets() {
        let ascii = br"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 1 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test";

        let meshes = decode_stl(ascii).unwrap();
        assert_eq!(meshes[0].vertex_count(), 4);
        assert_eq!(meshes[0].face_count(), 2);
    }

    #[test]
    fn ascii_multiple_solids() {
        let ascii = br"solid small
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid small
solid big
  facet normal 0 0 1
    outer loop
      vertex 0 0 5
      vertex 1 0 5
      vertex 0 1 5
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 1 0 5
      vertex 1 1 5
      vertex 0 1 5
    endloop
  endfacet
endsolid big";

        let meshes = decode_stl(ascii).unwrap();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].vertex_count(), 3);
        assert_eq!(meshes[1].vertex_count(), 4);
    }

    #[test]
    fn ascii_without_facets() {
        let meshes = decode_stl(b"solid empty\nendsolid empty\n").unwrap();
        assert!(meshes.is_empty());
    }

    #[test]
    fn ascii_missing_endsolid() {
        let ascii = br"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet";

        let meshes = decode_stl(ascii).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].face_count(), 1);
    }

    #[test]
    fn ascii_bad_coordinate() {
        let ascii = br"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 zero
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test";

        assert!(matches!(decode_stl(ascii), Err(IoError::ParseFloat(_))));
    }
}
