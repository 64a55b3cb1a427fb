//! Connected component splitting.
//!
//! Faces are connected when they share an undirected edge. Sharing a single
//! vertex is not enough; two cubes touching at a corner are two components.

use hashbrown::HashMap;
use modelguard_types::TriMesh;

/// Union-find over face indices with path halving and union by size.
struct FaceSets {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl FaceSets {
    fn new(count: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let parent = (0..count as u32).collect();
        Self {
            parent,
            size: vec![1; count],
        }
    }

    fn find(&mut self, mut index: u32) -> u32 {
        while self.parent[index as usize] != index {
            let grandparent = self.parent[self.parent[index as usize] as usize];
            self.parent[index as usize] = grandparent;
            index = grandparent;
        }
        index
    }

    fn union(&mut self, a: u32, b: u32) {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        if self.size[root_a as usize] < self.size[root_b as usize] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b as usize] = root_a;
        self.size[root_a as usize] += self.size[root_b as usize];
    }
}

/// Split a mesh into edge-connected components.
///
/// Each component is a standalone mesh with its own re-indexed vertex list.
/// Components come out in order of their first face in the original mesh,
/// so the result is deterministic. Vertices referenced by no face are
/// dropped. A mesh with no faces yields no components.
#[must_use]
pub fn split_components(mesh: &TriMesh) -> Vec<TriMesh> {
    if mesh.faces.is_empty() {
        return Vec::new();
    }

    let mut sets = FaceSets::new(mesh.face_count());
    let mut edge_owner: HashMap<(u32, u32), u32> = HashMap::new();

    #[allow(clippy::cast_possible_truncation)]
    for (index, face) in mesh.faces.iter().enumerate() {
        let face_index = index as u32;
        for (from, to) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
            let key = if from <= to { (from, to) } else { (to, from) };
            match edge_owner.entry(key) {
                hashbrown::hash_map::Entry::Occupied(owner) => {
                    sets.union(face_index, *owner.get());
                }
                hashbrown::hash_map::Entry::Vacant(slot) => {
                    slot.insert(face_index);
                }
            }
        }
    }

    // Assign component slots in order of first appearance
    let mut slot_of_root: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<TriMesh> = Vec::new();
    let mut remaps: Vec<HashMap<u32, u32>> = Vec::new();

    #[allow(clippy::cast_possible_truncation)]
    for (index, face) in mesh.faces.iter().enumerate() {
        let root = sets.find(index as u32);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(TriMesh::new());
            remaps.push(HashMap::new());
            components.len() - 1
        });

        let component = &mut components[slot];
        let remap = &mut remaps[slot];

        let mut local = [0u32; 3];
        for (corner, &global) in local.iter_mut().zip(face) {
            *corner = *remap.entry(global).or_insert_with(|| {
                let next = component.vertices.len() as u32;
                component.vertices.push(mesh.vertices[global as usize]);
                next
            });
        }
        component.faces.push(local);
    }

    components
}
