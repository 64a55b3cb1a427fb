//! PLY (Polygon File Format) decoding via `ply-rs`.
//!
//! Vertices must carry `x`/`y`/`z` properties as floats or doubles. Faces
//! are read from the `vertex_indices` (or legacy `vertex_index`) list and
//! fan-triangulated when they have more than three corners.

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use modelguard_types::{Point3, TriMesh};

use crate::error::{IoError, IoResult};

/// Decode a PLY buffer into a single mesh.
///
/// Both ASCII and binary PLY are handled by the parser. PLY has no object
/// grouping, so the whole buffer is one mesh.
///
/// # Errors
///
/// Returns an error if the header or payload is malformed, a vertex lacks
/// `x`/`y`/`z`, or a face references an out-of-range vertex index.
pub fn decode_ply(bytes: &[u8]) -> IoResult<TriMesh> {
    let parser = Parser::<DefaultElement>::new();
    let mut reader = bytes;

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("malformed PLY header: {e}")))?;
    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("malformed PLY payload: {e}")))?;

    let mut mesh = TriMesh::new();

    if let Some(elements) = payload.get("vertex") {
        mesh.vertices.reserve(elements.len());
        for element in elements {
            let x = coordinate(element, "x")?;
            let y = coordinate(element, "y")?;
            let z = coordinate(element, "z")?;
            mesh.vertices.push(Point3::new(x, y, z));
        }
    }

    if let Some(elements) = payload.get("face") {
        mesh.faces.reserve(elements.len());
        for element in elements {
            let indices = index_list(element).ok_or_else(|| {
                IoError::invalid_content("face element missing vertex_indices list")
            })?;
            push_face(&mut mesh, &indices)?;
        }
    }

    Ok(mesh)
}

/// Read one named coordinate off a vertex element, keeping double precision.
fn coordinate(element: &DefaultElement, name: &str) -> IoResult<f64> {
    match element.get(name) {
        Some(Property::Float(v)) => Ok(f64::from(*v)),
        Some(Property::Double(v)) => Ok(*v),
        _ => Err(IoError::invalid_content(format!(
            "vertex element missing {name} coordinate"
        ))),
    }
}

/// Extract the vertex index list from a face element, whichever integer
/// width the file declared it with.
#[allow(clippy::cast_sign_loss)]
fn index_list(element: &DefaultElement) -> Option<Vec<usize>> {
    for key in ["vertex_indices", "vertex_index"] {
        match element.get(key) {
            Some(Property::ListUChar(list)) => {
                return Some(list.iter().map(|&i| usize::from(i)).collect());
            }
            Some(Property::ListUShort(list)) => {
                return Some(list.iter().map(|&i| usize::from(i)).collect());
            }
            Some(Property::ListUInt(list)) => {
                return Some(list.iter().map(|&i| i as usize).collect());
            }
            Some(Property::ListInt(list)) => {
                return Some(list.iter().map(|&i| i as usize).collect());
            }
            _ => {}
        }
    }
    None
}

/// Fan-triangulate one polygon into the mesh. Faces with fewer than three
/// corners carry no surface and are skipped.
#[allow(clippy::cast_possible_truncation)]
fn push_face(mesh: &mut TriMesh, indices: &[usize]) -> IoResult<()> {
    for &index in indices {
        if index >= mesh.vertices.len() {
            return Err(IoError::invalid_content(format!(
                "face index {index} out of range for {} vertices",
                mesh.vertices.len()
            )));
        }
    }
    if indices.len() < 3 {
        return Ok(());
    }
    for i in 1..indices.len() - 1 {
        mesh.faces
            .push([indices[0] as u32, indices[i] as u32, indices[i + 1] as u32]);
    }
    Ok(())
}
