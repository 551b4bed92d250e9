mod middle;
mod vertex;

pub use middle::MiddleHandle;
pub use vertex::VertexHandle;

use crate::geometry_utilities::types::*;
use crate::input::CircleShape;
use crate::ring::CoordinateId;
use crate::surface::MapSurface;
use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandleStyle {
    pub opacity: f64,
    pub z_index: i32,
    /// Icon size in pixels.
    pub size: f64,
}

/// Builds the primitive behind a new vertex or middle handle.
pub type HandleFactory = fn(MapPoint, HandleStyle) -> Draggable;

/// A point primitive the user can press and drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Draggable {
    pub position: MapPoint,
    pub style: HandleStyle,
}

impl Draggable {
    pub fn new(position: MapPoint, style: HandleStyle) -> Draggable {
        Draggable { position, style }
    }

    pub fn shape(&self, surface: &dyn MapSurface) -> CircleShape {
        CircleShape {
            center: surface.project(self.position),
            radius: self.style.size * 0.5,
        }
    }
}

/// Every vertex handle of one editor, keyed by the coordinate it is bound to.
///
/// Middle handles are owned by the vertex on their right side.
pub struct HandleSet {
    vertices: BTreeMap<CoordinateId, VertexHandle>,
    vertex_style: HandleStyle,
    middle_style: HandleStyle,
    vertex_factory: HandleFactory,
    middle_factory: HandleFactory,
}

impl HandleSet {
    pub fn new(vertex_style: HandleStyle, middle_style: HandleStyle) -> HandleSet {
        HandleSet {
            vertices: BTreeMap::new(),
            vertex_style,
            middle_style,
            vertex_factory: Draggable::new,
            middle_factory: Draggable::new,
        }
    }

    pub fn with_factories(mut self, vertex_factory: HandleFactory, middle_factory: HandleFactory) -> HandleSet {
        self.vertex_factory = vertex_factory;
        self.middle_factory = middle_factory;
        self
    }

    pub(crate) fn build_vertex(&self, position: MapPoint) -> Draggable {
        (self.vertex_factory)(position, self.vertex_style)
    }

    pub(crate) fn build_middle(&self, position: MapPoint) -> Draggable {
        (self.middle_factory)(position, self.middle_style)
    }

    pub fn vertex(&self, id: CoordinateId) -> Option<&VertexHandle> {
        self.vertices.get(&id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &VertexHandle> {
        self.vertices.values()
    }

    pub fn middles(&self) -> impl Iterator<Item = &MiddleHandle> {
        self.vertices.values().filter_map(|v| v.middle.as_ref())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn middle_count(&self) -> usize {
        self.middles().count()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_style(&self) -> HandleStyle {
        self.vertex_style
    }

    pub fn middle_style(&self) -> HandleStyle {
        self.middle_style
    }

    pub fn restyle(&mut self, vertex_style: HandleStyle, middle_style: HandleStyle) {
        self.vertex_style = vertex_style;
        self.middle_style = middle_style;
        let (vertex_factory, middle_factory) = (self.vertex_factory, self.middle_factory);
        for vertex in self.vertices.values_mut() {
            vertex.handle = vertex_factory(vertex.handle.position, vertex_style);
            if let Some(middle) = &mut vertex.middle {
                middle.handle = middle_factory(middle.handle.position, middle_style);
            }
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Checks that handles mirror the coordinates of `rings` exactly.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self, rings: &[(usize, &crate::ring::Ring)]) -> bool {
        use crate::geometry_utilities::midpoint;

        let mut expected = 0;
        for &(ring_index, ring) in rings {
            for coordinate in ring.iter() {
                expected += 1;
                let vertex = match self.vertices.get(&coordinate.id) {
                    Some(v) => v,
                    None => return false,
                };
                if vertex.ring != ring_index || vertex.handle.position != coordinate.position {
                    return false;
                }
                match (ring.previous(coordinate.id), &vertex.middle) {
                    (None, None) => {}
                    (Some(previous), Some(middle)) => {
                        let left = match ring.position_of(previous) {
                            Some(p) => p,
                            None => return false,
                        };
                        if middle.left != previous
                            || middle.right != coordinate.id
                            || middle.handle.position != midpoint(left, coordinate.position)
                        {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
        }
        expected == self.vertices.len()
    }
}
