use super::DrawConstraint;
use crate::geometry::{Geometry, GeometryKind, PRIMARY_RING};
use crate::geometry_utilities::types::*;
use crate::surface::MapSurface;
use log::debug;

/// What differs between editing paths, rings and points.
pub trait GeometryPolicy {
    fn kind(&self) -> GeometryKind;

    /// Closed rings wrap around when looking up neighbours.
    fn is_closed(&self) -> bool;

    /// Rings that get vertex handles, in the order they are built.
    fn ring_groups(&self, geometry: &Geometry) -> Vec<usize>;

    /// Ring a drawing session adds to when it has no active ring yet.
    fn target_ring(
        &self,
        _geometry: &mut Geometry,
        _surface: &dyn MapSurface,
        _location: MapPoint,
        _tolerance: f64,
    ) -> usize {
        PRIMARY_RING
    }

    /// False if the session's constraint rejects a new point at `location`.
    fn check_draw_constraint(
        &self,
        constraint: Option<&DrawConstraint>,
        geometry: &Geometry,
        surface: &dyn MapSurface,
        location: MapPoint,
        active_ring: Option<usize>,
        tolerance: f64,
    ) -> bool {
        match constraint {
            None => true,
            Some(DrawConstraint::Custom(check)) => check(location),
            Some(DrawConstraint::InsideFilledArea) => {
                geometry.contains_point_excluding(surface, surface.project(location), tolerance, active_ring)
            }
        }
    }

    /// The geometry is one position that follows the pointer while drawing.
    fn draws_single_point(&self) -> bool {
        false
    }

    /// The whole feature is dragged instead of individual vertices.
    fn draggable_feature(&self) -> bool {
        false
    }

    /// Forward drawing also shows the backward guide, previewing the closing edge.
    fn previews_closing_edge(&self) -> bool {
        self.is_closed()
    }
}

pub struct PathPolicy;

impl GeometryPolicy for PathPolicy {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Path
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn ring_groups(&self, _geometry: &Geometry) -> Vec<usize> {
        vec![PRIMARY_RING]
    }
}

pub struct RingPolicy;

impl GeometryPolicy for RingPolicy {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Ring
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn ring_groups(&self, geometry: &Geometry) -> Vec<usize> {
        (0..geometry.ring_count()).collect()
    }

    /// Clicking inside a ring that already has holes starts another hole.
    fn target_ring(&self, geometry: &mut Geometry, surface: &dyn MapSurface, location: MapPoint, tolerance: f64) -> usize {
        if geometry.hole_count() > 0
            && !geometry.primary_ring().is_empty()
            && geometry.contains_point(surface, surface.project(location), tolerance)
        {
            let hole = geometry.add_hole();
            debug!("starting hole {} in {:?}", hole, geometry.reference());
            hole
        } else {
            PRIMARY_RING
        }
    }
}

pub struct PointPolicy;

impl GeometryPolicy for PointPolicy {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Point
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn ring_groups(&self, _geometry: &Geometry) -> Vec<usize> {
        vec![]
    }

    fn draws_single_point(&self) -> bool {
        true
    }

    fn draggable_feature(&self) -> bool {
        true
    }
}
