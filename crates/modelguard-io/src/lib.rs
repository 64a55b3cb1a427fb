//! Mesh decoding for the validation pipeline.
//!
//! Decoders for the three upload formats the service accepts: STL (binary
//! and ASCII), Wavefront OBJ, and PLY. All decoders work on byte slices
//! because uploads arrive as in-memory buffers, never as paths.
//!
//! Formats that can carry several objects in one buffer (multi-solid STL,
//! OBJ with `o`/`g` records) decode into a list; [`decode_mesh`] picks the
//! largest object by vertex count, which is the part a customer actually
//! wants printed when a file also carries stray construction geometry.
//!
//! # Example
//!
//! ```
//! use modelguard_io::{decode_mesh, MeshFormat};
//!
//! let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//! let format = MeshFormat::from_hint("part.obj").unwrap();
//! let mesh = decode_mesh(obj, format)?;
//! assert_eq!(mesh.face_count(), 1);
//! # Ok::<(), modelguard_io::IoError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;
mod ply;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::decode_obj;
pub use ply::decode_ply;
pub use stl::decode_stl;

use modelguard_types::TriMesh;

/// Mesh file formats the decoders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Stereolithography, binary or ASCII.
    Stl,
    /// Wavefront OBJ.
    Obj,
    /// Polygon File Format.
    Ply,
}

impl MeshFormat {
    /// Resolve a format from a hint: a bare extension (`"stl"`), a dotted
    /// extension (`".stl"`), or a full file name (`"bracket.stl"`).
    /// Case-insensitive. Returns `None` for anything unrecognized.
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        let tail = hint.rsplit('.').next().unwrap_or(hint);
        match tail.trim().to_ascii_lowercase().as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Canonical lowercase extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Ply => "ply",
        }
    }
}

impl std::fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decode every object in the buffer.
///
/// STL and OBJ buffers may hold several objects; PLY always holds one.
/// The result can be empty for buffers that parse but define no geometry.
///
/// # Errors
///
/// Returns an error when the buffer is not a valid instance of `format`.
pub fn decode_objects(bytes: &[u8], format: MeshFormat) -> IoResult<Vec<TriMesh>> {
    match format {
        MeshFormat::Stl => decode_stl(bytes),
        MeshFormat::Obj => decode_obj(bytes),
        MeshFormat::Ply => decode_ply(bytes).map(|mesh| vec![mesh]),
    }
}

/// Decode the buffer and select the largest object by vertex count.
///
/// Ties keep the earliest object in file order.
///
/// # Errors
///
/// Returns an error when the buffer is not a valid instance of `format`,
/// or [`IoError::EmptyMesh`] when no object carries any triangles.
pub fn decode_mesh(bytes: &[u8], format: MeshFormat) -> IoResult<TriMesh> {
    let mut best: Option<TriMesh> = None;
    for mesh in decode_objects(bytes, format)? {
        let larger = best
            .as_ref()
            .is_none_or(|current| mesh.vertex_count() > current.vertex_count());
        if larger {
            best = Some(mesh);
        }
    }

    match best {
        Some(mesh) if !mesh.is_empty() => Ok(mesh),
        _ => Err(IoError::EmptyMesh),
    }
}
