//! Wavefront OBJ decoding.
//!
//! Supports `v` (position) and `f` (face) records. Faces may use the
//! `i`, `i/t`, `i//n`, and `i/t/n` forms; only the position index is used.
//! Indices are 1-based; negative indices count back from the most recently
//! declared vertex. Polygons with more than three corners are
//! fan-triangulated.
//!
//! `o` and `g` records split the buffer into objects. Vertex indices are
//! global across the whole buffer, so each object is extracted with its own
//! re-indexed copy of the vertices it references.

use hashbrown::HashMap;
use modelguard_types::{Point3, TriMesh};

use crate::error::{IoError, IoResult};

/// Decode OBJ from a byte buffer, one mesh per `o`/`g` object.
///
/// A buffer without object records yields a single mesh. Objects with no
/// faces are dropped.
///
/// # Errors
///
/// Returns an error if the buffer is not UTF-8, a coordinate fails to
/// parse, or a face references an out-of-range vertex index.
pub fn decode_obj(bytes: &[u8]) -> IoResult<Vec<TriMesh>> {
    let text = std::str::from_utf8(bytes)?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut objects: Vec<Vec<[u32; 3]>> = Vec::new();
    let mut current: Vec<[u32; 3]> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(IoError::invalid_content("vertex record with fewer than 3 coordinates"));
                }
                let x: f64 = parts[1].parse()?;
                let y: f64 = parts[2].parse()?;
                let z: f64 = parts[3].parse()?;
                vertices.push(Point3::new(x, y, z));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(IoError::invalid_content("face record with fewer than 3 vertices"));
                }
                let mut polygon: Vec<u32> = Vec::with_capacity(parts.len() - 1);
                for token in &parts[1..] {
                    polygon.push(resolve_index(token, vertices.len())?);
                }
                // Fan triangulation for quads and larger polygons
                for i in 1..polygon.len() - 1 {
                    current.push([polygon[0], polygon[i], polygon[i + 1]]);
                }
            }
            "o" | "g" => {
                if !current.is_empty() {
                    objects.push(std::mem::take(&mut current));
                }
            }
            _ => {
                // vn, vt, s, usemtl, mtllib and friends are irrelevant here
            }
        }
    }

    if !current.is_empty() {
        objects.push(current);
    }

    Ok(objects
        .iter()
        .map(|faces| extract_object(&vertices, faces))
        .collect())
}

/// Resolve one face token (`i`, `i/t`, `i//n`, `i/t/n`) to a 0-based index.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn resolve_index(token: &str, vertex_count: usize) -> IoResult<u32> {
    let index_part = token.split('/').next().unwrap_or(token);
    let value: i64 = index_part.parse()?;

    let resolved = if value > 0 {
        value - 1
    } else if value < 0 {
        // Negative indices count back from the last declared vertex
        vertex_count as i64 + value
    } else {
        return Err(IoError::invalid_content("face index 0 is not valid in OBJ"));
    };

    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(IoError::invalid_content(format!(
            "face index {value} out of range for {vertex_count} vertices"
        )));
    }

    Ok(resolved as u32)
}

/// Build a standalone mesh for one object, re-indexing the global vertices
/// it references in first-use order.
#[allow(clippy::cast_possible_truncation)]
fn extract_object(vertices: &[Point3<f64>], faces: &[[u32; 3]]) -> TriMesh {
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut mesh = TriMesh::with_capacity(faces.len() * 2, faces.len());

    for face in faces {
        let mut local = [0u32; 3];
        for (slot, &global) in local.iter_mut().zip(face) {
            *slot = *remap.entry(global).or_insert_with(|| {
                let index = mesh.vertices.len() as u32;
                mesh.vertices.push(vertices[global as usize]);
                index
            });
        }
        mesh.faces.push(local);
    }

    mesh
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_triangle() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let meshes = decode_obj(obj).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertex_count(), 3);
        assert_eq!(meshes[0].face_count(), 1);
        assert_eq!(meshes[0].faces[0], [0, 1, 2]);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let meshes = decode_obj(obj).unwrap();
        assert_eq!(meshes[0].face_count(), 2);
        assert_eq!(meshes[0].faces[0], [0, 1, 2]);
        assert_eq!(meshes[0].faces[1], [0, 2, 3]);
    }

    #[test]
    fn slashed_and_negative_indices() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 -1\n";
        let meshes = decode_obj(obj).unwrap();
        assert_eq!(meshes[0].faces[0], [0, 1, 2]);
    }

    #[test]
    fn comments_and_attributes_ignored() {
        let obj = b"# a comment\nvn 0 0 1\nvt 0 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\ns off\nf 1 2 3\n";
        let meshes = decode_obj(obj).unwrap();
        assert_eq!(meshes[0].face_count(), 1);
    }

    #[test]
    fn objects_are_split_and_reindexed() {
        let obj = b"o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 5 0 0
v 6 0 0
v 5 1 0
v 6 1 0
f 4 5 6
f 5 7 6
";
        let meshes = decode_obj(obj).unwrap();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].vertex_count(), 3);
        assert_eq!(meshes[1].vertex_count(), 4);
        assert_eq!(meshes[1].face_count(), 2);
        // Re-indexed into the object's own vertex list
        assert!(meshes[1].indices_in_bounds());
        assert_relative_eq!(meshes[1].vertices[0].x, 5.0);
    }

    #[test]
    fn out_of_range_index() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n";
        assert!(matches!(
            decode_obj(obj),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn zero_index_is_invalid() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(
            decode_obj(obj),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn vertices_without_faces() {
        let meshes = decode_obj(b"v 0 0 0\nv 1 0 0\n").unwrap();
        assert!(meshes.is_empty());
    }
}
