//! Per-vertex normal slots.
//!
//! Every original vertex owns a primary slot that keeps the vertex's own
//! index. The first smoothing group to touch the vertex claims that slot;
//! each further group gets a duplicate slot with a freshly numbered output
//! vertex. The slots of one vertex form a chain through `next`.

use nalgebra::Vector3;

use crate::mesh::{GroupId, SlotId};

#[derive(Debug, Clone)]
struct Slot {
    normal: Vector3<f64>,
    group: GroupId,
    next: SlotId,
    original: usize,
    output: usize,
}

impl Slot {
    fn new(original: usize, output: usize, group: GroupId) -> Self {
        Self {
            normal: Vector3::zeros(),
            group,
            next: SlotId::invalid(),
            original,
            output,
        }
    }
}

/// A vertex of the generated mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalVertex {
    /// Index of the vertex in the generated mesh.
    pub index: usize,

    /// Index of the input vertex whose position it shares.
    pub original: usize,

    /// Unit normal, or zero when every contribution cancelled out.
    pub normal: Vector3<f64>,
}

/// Arena of normal slots, one chain per original vertex.
#[derive(Debug)]
pub(crate) struct SlotArena {
    slots: Vec<Slot>,
    num_primary: usize,
    next_output: usize,
}

impl SlotArena {
    /// Create primary slots for `num_vertices` vertices; duplicates are
    /// numbered from `first_new_index`.
    pub(crate) fn new(num_vertices: usize, first_new_index: usize) -> Self {
        Self {
            slots: (0..num_vertices)
                .map(|v| Slot::new(v, v, GroupId::invalid()))
                .collect(),
            num_primary: num_vertices,
            next_output: first_new_index,
        }
    }

    /// Number of duplicate slots created so far.
    pub(crate) fn num_created(&self) -> usize {
        self.slots.len() - self.num_primary
    }

    /// Find or create the slot of `vertex` for smoothing group `group`.
    pub(crate) fn resolve(&mut self, vertex: usize, group: GroupId) -> SlotId {
        let primary = &mut self.slots[vertex];
        if !primary.group.is_valid() {
            primary.group = group;
            return SlotId::new(vertex);
        }

        let mut current = SlotId::new(vertex);
        loop {
            let slot = &self.slots[current.index()];
            if slot.group == group {
                return current;
            }
            if !slot.next.is_valid() {
                break;
            }
            current = slot.next;
        }

        let id = SlotId::new(self.slots.len());
        self.slots.push(Slot::new(vertex, self.next_output, group));
        self.next_output += 1;
        self.slots[current.index()].next = id;
        id
    }

    /// Add a weighted face normal to a slot.
    #[inline]
    pub(crate) fn accumulate(&mut self, id: SlotId, contribution: Vector3<f64>) {
        self.slots[id.index()].normal += contribution;
    }

    /// Output vertex index of a slot.
    #[inline]
    pub(crate) fn output(&self, id: SlotId) -> usize {
        self.slots[id.index()].output
    }

    /// Normalize every slot and hand out the used ones.
    ///
    /// Primaries come first in original vertex order, then duplicates in
    /// creation order. Vertices no face touched are skipped.
    pub(crate) fn finish(mut self) -> impl Iterator<Item = NormalVertex> {
        for slot in &mut self.slots {
            slot.normal = slot
                .normal
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros);
        }

        self.slots
            .into_iter()
            .filter(|slot| slot.group.is_valid())
            .map(|slot| NormalVertex {
                index: slot.output,
                original: slot.original,
                normal: slot.normal,
            })
    }
}
