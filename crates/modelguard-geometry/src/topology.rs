//! Edge topology queries.
//!
//! Everything the checks need to know about a mesh's edges comes from one
//! pass over the faces: how many faces touch each undirected edge, and in
//! which directions they traverse it.

use hashbrown::HashMap;
use modelguard_types::TriMesh;

/// Per-edge usage tally.
#[derive(Debug, Clone, Copy, Default)]
struct EdgeUse {
    /// Faces touching this edge.
    faces: u32,
    /// Traversals that run from the lower vertex index to the higher one.
    forward: u32,
}

/// Undirected edge usage for a triangle mesh.
///
/// Built once, queried for watertightness, winding consistency, and open
/// boundary counting. Edge keys are vertex index pairs ordered low-to-high,
/// so the two directed half-edges of a shared edge land on the same entry.
#[derive(Debug, Clone)]
pub struct EdgeTopology {
    edges: HashMap<(u32, u32), EdgeUse>,
}

impl EdgeTopology {
    /// Tally edge usage over every face of the mesh.
    #[must_use]
    pub fn from_mesh(mesh: &TriMesh) -> Self {
        let mut edges: HashMap<(u32, u32), EdgeUse> =
            HashMap::with_capacity(mesh.face_count() * 3 / 2);

        for face in &mesh.faces {
            for (from, to) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                let key = if from <= to { (from, to) } else { (to, from) };
                let entry = edges.entry(key).or_default();
                entry.faces += 1;
                if from < to {
                    entry.forward += 1;
                }
            }
        }

        Self { edges }
    }

    /// Distinct undirected edges in the mesh.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when every edge is shared by exactly two faces.
    ///
    /// A mesh with no faces has no edges and trivially passes.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edges.values().all(|edge| edge.faces == 2)
    }

    /// True when no edge is over-shared and every interior edge is
    /// traversed once in each direction.
    ///
    /// An edge touched by more than two faces is non-manifold. An edge
    /// touched by two faces running the same way means one of the faces is
    /// flipped. Boundary edges (one face) do not violate consistency.
    #[must_use]
    pub fn is_winding_consistent(&self) -> bool {
        self.edges.values().all(|edge| {
            edge.faces < 2 || (edge.faces == 2 && edge.forward == 1)
        })
    }

    /// Number of boundary edges, each touched by exactly one face.
    #[must_use]
    pub fn open_boundary_count(&self) -> usize {
        self.edges.values().filter(|edge| edge.faces == 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelguard_types::cuboid;

    #[test]
    fn closed_cuboid_is_watertight() {
        let topology = EdgeTopology::from_mesh(&cuboid(10.0, 10.0, 10.0));
        assert!(topology.is_watertight());
        assert!(topology.is_winding_consistent());
        assert_eq!(topology.open_boundary_count(), 0);
        // 8 vertices, 12 faces: Euler's formula gives 18 edges
        assert_eq!(topology.edge_count(), 18);
    }

    #[test]
    fn missing_face_opens_a_boundary() {
        let mut mesh = cuboid(10.0, 10.0, 10.0);
        mesh.faces.pop();

        let topology = EdgeTopology::from_mesh(&mesh);
        assert!(!topology.is_watertight());
        assert_eq!(topology.open_boundary_count(), 3);
        // A hole alone does not break winding
        assert!(topology.is_winding_consistent());
    }

    #[test]
    fn flipped_face_breaks_winding() {
        let mut mesh = cuboid(10.0, 10.0, 10.0);
        mesh.faces[0].swap(0, 2);

        let topology = EdgeTopology::from_mesh(&mesh);
        assert!(!topology.is_winding_consistent());
        // Edge counts alone still look closed
        assert!(topology.is_watertight());
    }

    #[test]
    fn over_shared_edge_is_non_manifold() {
        // Three triangles fanning off the same edge (0, 1)
        let mesh = TriMesh::from_raw(
            &[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, -1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
            &[0, 1, 2, 0, 1, 3, 0, 1, 4],
        );

        let topology = EdgeTopology::from_mesh(&mesh);
        assert!(!topology.is_winding_consistent());
        assert!(!topology.is_watertight());
    }

    #[test]
    fn empty_mesh_has_no_edges() {
        let topology = EdgeTopology::from_mesh(&TriMesh::new());
        assert_eq!(topology.edge_count(), 0);
        assert!(topology.is_watertight());
        assert_eq!(topology.open_boundary_count(), 0);
    }
}
