use super::{Draggable, HandleSet, MiddleHandle};
use crate::geometry_utilities::types::*;
use crate::ring::{Coordinate, CoordinateId, Ring};
use log::trace;

/// Handle bound to one coordinate of one ring.
#[derive(Clone, Debug)]
pub struct VertexHandle {
    pub(crate) coordinate: CoordinateId,
    pub(crate) ring: usize,
    pub(crate) handle: Draggable,
    /// Middle handle between this vertex and the previous one.
    pub(crate) middle: Option<MiddleHandle>,
}

impl VertexHandle {
    pub fn coordinate(&self) -> CoordinateId {
        self.coordinate
    }

    pub fn ring(&self) -> usize {
        self.ring
    }

    pub fn handle(&self) -> &Draggable {
        &self.handle
    }

    pub fn middle(&self) -> Option<&MiddleHandle> {
        self.middle.as_ref()
    }
}

impl HandleSet {
    /// Ring neighbour before `id`, if it has a handle.
    pub fn previous_vertex(&self, ring: &Ring, id: CoordinateId) -> Option<CoordinateId> {
        ring.previous(id).filter(|p| self.vertices.contains_key(p))
    }

    /// Ring neighbour after `id`, if it has a handle.
    pub fn next_vertex(&self, ring: &Ring, id: CoordinateId) -> Option<CoordinateId> {
        ring.next(id).filter(|n| self.vertices.contains_key(n))
    }

    /// Creates the handle for a coordinate already present in `ring`.
    ///
    /// Adds the middle handle on its previous side and rebuilds the one of its successor,
    /// which now sits between a different pair.
    pub(crate) fn add_vertex(&mut self, ring_index: usize, ring: &Ring, id: CoordinateId) -> bool {
        let position = match ring.position_of(id) {
            Some(p) => p,
            None => return false,
        };
        let handle = self.build_vertex(position);
        self.vertices.insert(
            id,
            VertexHandle {
                coordinate: id,
                ring: ring_index,
                handle,
                middle: None,
            },
        );
        if let Some(previous) = self.previous_vertex(ring, id) {
            self.add_middle(ring, previous, id);
        }
        if let Some(next) = self.next_vertex(ring, id) {
            self.reset_middle(ring, next);
        }
        true
    }

    /// Adds handles for every coordinate of a ring, in ring order.
    pub(crate) fn add_ring(&mut self, ring_index: usize, ring: &Ring) {
        let ids: Vec<_> = ring.iter().map(|c| c.id).collect();
        for id in ids {
            self.add_vertex(ring_index, ring, id);
        }
    }

    /// Deletes the coordinate and its handle together with the middle handle it owns.
    ///
    /// The successor's middle handle is rebuilt for its new neighbour.
    pub(crate) fn remove_vertex(&mut self, ring: &mut Ring, id: CoordinateId) -> Option<Coordinate> {
        let next = self.next_vertex(ring, id);
        self.vertices.remove(&id)?;
        let removed = ring.remove(id);
        debug_assert!(removed.is_some(), "vertex handle without a coordinate");
        if let Some(next) = next {
            self.reset_middle(ring, next);
        } else {
            trace!("no successor to reset after removing {:?}", id);
        }
        removed
    }

    /// Moves a coordinate and the middle handles on both of its sides.
    pub(crate) fn drag_vertex(&mut self, ring: &mut Ring, id: CoordinateId, position: MapPoint) -> bool {
        if !ring.set_position(id, position) {
            return false;
        }
        let next = self.next_vertex(ring, id);
        if let Some(vertex) = self.vertices.get_mut(&id) {
            vertex.handle.position = position;
            if let Some(middle) = &mut vertex.middle {
                middle.update_position(ring);
            }
        }
        if let Some(middle) = next
            .and_then(|next| self.vertices.get_mut(&next))
            .and_then(|v| v.middle.as_mut())
        {
            middle.update_position(ring);
        }
        true
    }
}
