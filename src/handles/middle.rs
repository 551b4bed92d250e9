use super::{Draggable, HandleSet};
use crate::geometry_utilities::midpoint;
use crate::ring::{CoordinateId, Ring};

/// Handle halfway between two adjacent vertices. Pressing it inserts a vertex there.
#[derive(Clone, Debug)]
pub struct MiddleHandle {
    pub(crate) left: CoordinateId,
    pub(crate) right: CoordinateId,
    pub(crate) ring: usize,
    pub(crate) handle: Draggable,
}

impl MiddleHandle {
    pub fn left(&self) -> CoordinateId {
        self.left
    }

    pub fn right(&self) -> CoordinateId {
        self.right
    }

    pub fn ring(&self) -> usize {
        self.ring
    }

    pub fn handle(&self) -> &Draggable {
        &self.handle
    }

    /// Ring index a promoted coordinate is inserted at, before the right neighbour.
    pub fn index(&self, ring: &Ring) -> Option<usize> {
        ring.index_of(self.right)
    }

    pub(crate) fn update_position(&mut self, ring: &Ring) {
        if let (Some(left), Some(right)) = (ring.position_of(self.left), ring.position_of(self.right)) {
            self.handle.position = midpoint(left, right);
        }
    }
}

impl HandleSet {
    /// Gives `right` a middle handle towards `left` unless it already has one.
    pub(crate) fn add_middle(&mut self, ring: &Ring, left: CoordinateId, right: CoordinateId) {
        let (left_pos, right_pos) = match (ring.position_of(left), ring.position_of(right)) {
            (Some(l), Some(r)) => (l, r),
            _ => return,
        };
        let handle = self.build_middle(midpoint(left_pos, right_pos));
        if let Some(vertex) = self.vertices.get_mut(&right) {
            if vertex.middle.is_none() {
                vertex.middle = Some(MiddleHandle {
                    left,
                    right,
                    ring: vertex.ring,
                    handle,
                });
            }
        }
    }

    /// Rebuilds the middle handle of `id` from its current previous neighbour.
    pub(crate) fn reset_middle(&mut self, ring: &Ring, id: CoordinateId) {
        self.remove_middle(id);
        if let Some(previous) = self.previous_vertex(ring, id) {
            self.add_middle(ring, previous, id);
        }
    }

    pub(crate) fn remove_middle(&mut self, right: CoordinateId) -> Option<MiddleHandle> {
        self.vertices.get_mut(&right)?.middle.take()
    }
}
