use crate::geometry_utilities::types::*;
use crate::geometry_utilities::{border_contains, ray_cast_contains};
use crate::multi::MultiReference;
use crate::ring::{Coordinate, CoordinateId, Ring};
use crate::surface::MapSurface;
use lyon::math::point;
use lyon::path::Path;

/// Index of the path of a path geometry, or the outer ring of a ring geometry.
/// Holes follow it.
pub const PRIMARY_RING: usize = 0;

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum GeometryKind {
    Path,
    Ring,
    Point,
}

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct GeometryReference {
    geometry_index: u32,
}

impl GeometryReference {
    pub fn index(&self) -> usize {
        self.geometry_index as usize
    }
}

pub struct Geometry {
    kind: GeometryKind,
    /// [primary, hole1, hole2, ...]
    rings: Vec<Ring>,
    pub stroke_weight: f64,
    pub(crate) multi: Option<MultiReference>,
    geometry_index: u32,
    version: u32,
    next_coordinate: u32,
}

impl Geometry {
    fn new(kind: GeometryKind, stroke_weight: f64) -> Geometry {
        let primary = match kind {
            GeometryKind::Ring => Ring::closed(),
            GeometryKind::Path | GeometryKind::Point => Ring::open(),
        };
        Geometry {
            kind,
            rings: vec![primary],
            stroke_weight,
            multi: None,
            geometry_index: 0,
            version: 0,
            next_coordinate: 0,
        }
    }

    fn with_positions(kind: GeometryKind, stroke_weight: f64, positions: impl IntoIterator<Item = MapPoint>) -> Geometry {
        let mut geometry = Geometry::new(kind, stroke_weight);
        for position in positions {
            let coordinate = geometry.allocate(position);
            geometry.rings[PRIMARY_RING].push(coordinate);
        }
        geometry
    }

    pub fn path(positions: impl IntoIterator<Item = MapPoint>, stroke_weight: f64) -> Geometry {
        Geometry::with_positions(GeometryKind::Path, stroke_weight, positions)
    }

    pub fn polygon(positions: impl IntoIterator<Item = MapPoint>, stroke_weight: f64) -> Geometry {
        Geometry::with_positions(GeometryKind::Ring, stroke_weight, positions)
    }

    pub fn point(position: MapPoint, stroke_weight: f64) -> Geometry {
        Geometry::with_positions(GeometryKind::Point, stroke_weight, Some(position))
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.kind == GeometryKind::Ring
    }

    pub fn multi(&self) -> Option<MultiReference> {
        self.multi
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn ring(&self, index: usize) -> Option<&Ring> {
        self.rings.get(index)
    }

    pub(crate) fn ring_mut(&mut self, index: usize) -> Option<&mut Ring> {
        self.rings.get_mut(index)
    }

    pub fn primary_ring(&self) -> &Ring {
        &self.rings[PRIMARY_RING]
    }

    pub fn holes(&self) -> &[Ring] {
        &self.rings[PRIMARY_RING + 1..]
    }

    pub fn hole_count(&self) -> usize {
        self.rings.len() - 1
    }

    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Position of a point geometry.
    pub fn position(&self) -> Option<MapPoint> {
        match self.kind {
            GeometryKind::Point => self.primary_ring().first().map(|c| c.position),
            _ => None,
        }
    }

    /// Moves a point geometry. Other kinds are left untouched.
    pub(crate) fn set_position(&mut self, position: MapPoint) -> bool {
        if self.kind != GeometryKind::Point {
            return false;
        }
        let ring = &mut self.rings[PRIMARY_RING];
        match ring.first().map(|c| c.id) {
            Some(id) => ring.set_position(id, position),
            None => {
                let coordinate = Coordinate {
                    id: CoordinateId::new(self.next_coordinate),
                    position,
                };
                self.next_coordinate += 1;
                self.rings[PRIMARY_RING].push(coordinate);
                true
            }
        }
    }

    pub(crate) fn allocate(&mut self, position: MapPoint) -> Coordinate {
        let id = CoordinateId::new(self.next_coordinate);
        self.next_coordinate += 1;
        Coordinate { id, position }
    }

    pub(crate) fn add_hole(&mut self) -> usize {
        self.rings.push(Ring::closed());
        self.rings.len() - 1
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn dirty(&mut self) {
        self.version += 1;
    }

    fn project_parts(&self, surface: &dyn MapSurface, skip_ring: Option<usize>) -> Vec<Vec<LayerPoint>> {
        self.rings
            .iter()
            .enumerate()
            .filter(|(i, ring)| Some(*i) != skip_ring && !ring.is_empty())
            .map(|(_, ring)| ring.positions().map(|p| surface.project(p)).collect())
            .collect()
    }

    /// Hit test against the rendered shape.
    ///
    /// A point within half the stroke weight (plus `tolerance`) of an edge is
    /// always inside. Ring geometries additionally contain their filled area.
    pub fn contains_point(&self, surface: &dyn MapSurface, point: LayerPoint, tolerance: f64) -> bool {
        self.contains_point_excluding(surface, point, tolerance, None)
    }

    /// Like `contains_point`, ignoring one ring (typically a hole still being drawn).
    pub fn contains_point_excluding(
        &self,
        surface: &dyn MapSurface,
        point: LayerPoint,
        tolerance: f64,
        skip_ring: Option<usize>,
    ) -> bool {
        let parts = self.project_parts(surface, skip_ring);
        let half_width = self.stroke_weight / 2.0 + tolerance;
        if border_contains(&parts, point, self.is_closed(), half_width) {
            return true;
        }
        match self.kind {
            GeometryKind::Ring => ray_cast_contains(&parts, point),
            GeometryKind::Path | GeometryKind::Point => false,
        }
    }

    /// Outline for the host's tessellator, one sub path per non-empty ring.
    pub fn to_path(&self) -> Path {
        let mut builder = Path::builder();
        for ring in &self.rings {
            let mut positions = ring.positions();
            if let Some(first) = positions.next() {
                builder.begin(point(first.x as f32, first.y as f32));
                for p in positions {
                    builder.line_to(point(p.x as f32, p.y as f32));
                }
                builder.end(ring.is_closed());
            }
        }
        builder.build()
    }
}

#[derive(Default)]
pub struct GeometryCollection {
    pub(crate) geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, mut item: Geometry) -> GeometryReference {
        item.geometry_index = self.len() as u32;
        self.geometries.push(item);
        GeometryReference {
            geometry_index: self.geometries.len() as u32 - 1,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (GeometryReference, &Geometry)> {
        self.geometries.iter().map(|g| (g.reference(), g))
    }

    pub fn resolve(&self, reference: &GeometryReference) -> Option<&Geometry> {
        self.geometries.get(reference.index())
    }

    pub fn resolve_mut(&mut self, reference: &GeometryReference) -> Option<&mut Geometry> {
        self.geometries.get_mut(reference.index())
    }
}

impl Geometry {
    pub fn reference(&self) -> GeometryReference {
        GeometryReference {
            geometry_index: self.geometry_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_utilities::map_point;
    use crate::surface::PlanarView;
    use lyon::path::Event;

    fn square(min: f64, max: f64) -> Vec<MapPoint> {
        vec![
            map_point(min, min),
            map_point(max, min),
            map_point(max, max),
            map_point(min, max),
        ]
    }

    #[test]
    fn test_ring_contains_filled_area() {
        let view = PlanarView::with_zoom(10.0);
        let ring = Geometry::polygon(square(0.0, 10.0), 4.0);
        assert!(ring.contains_point(&view, view.project(map_point(5.0, 5.0)), 0.0));
        assert!(!ring.contains_point(&view, view.project(map_point(12.0, 5.0)), 0.0));
        // 1 px away from the border with a 4 px stroke
        let near_border = view.project(map_point(10.0, 5.0)) + LayerVector::new(1.0, 0.0);
        assert!(ring.contains_point(&view, near_border, 0.0));
    }

    #[test]
    fn test_constructors_set_kind_and_rings() {
        let polygon = Geometry::polygon(square(0.0, 10.0), 1.0);
        assert_eq!(polygon.kind(), GeometryKind::Ring);
        assert!(polygon.is_closed());
        assert_eq!(polygon.ring(PRIMARY_RING).map(Ring::len), Some(4));
        assert!(polygon.ring(1).is_none());

        let path = Geometry::path(square(0.0, 10.0), 1.0);
        assert_eq!(path.kind(), GeometryKind::Path);
        assert!(!path.ring(PRIMARY_RING).map_or(true, Ring::is_closed));
    }

    #[test]
    fn test_path_contains_only_its_border() {
        let view = PlanarView::with_zoom(10.0);
        let path = Geometry::path(square(0.0, 10.0), 4.0);
        assert!(!path.contains_point(&view, view.project(map_point(5.0, 5.0)), 0.0));
        assert!(path.contains_point(&view, view.project(map_point(5.0, 0.0)), 0.0));
        // Closing edge is not part of an open path
        assert!(!path.contains_point(&view, view.project(map_point(0.0, 5.0)), 0.0));
    }

    #[test]
    fn test_touch_tolerance_widens_border() {
        let view = PlanarView::with_zoom(10.0);
        let path = Geometry::path(vec![map_point(0.0, 0.0), map_point(10.0, 0.0)], 2.0);
        let beside = view.project(map_point(5.0, 0.0)) + LayerVector::new(0.0, 8.0);
        assert!(!path.contains_point(&view, beside, 0.0));
        assert!(path.contains_point(&view, beside, 10.0));
    }

    #[test]
    fn test_holes_are_not_filled() {
        let view = PlanarView::with_zoom(10.0);
        let mut ring = Geometry::polygon(square(0.0, 10.0), 1.0);
        let hole = ring.add_hole();
        for p in square(3.0, 7.0) {
            let c = ring.allocate(p);
            ring.ring_mut(hole).unwrap().push(c);
        }
        let center = view.project(map_point(5.0, 5.0));
        assert!(!ring.contains_point(&view, center, 0.0));
        assert!(ring.contains_point_excluding(&view, center, 0.0, Some(hole)));
    }

    #[test]
    fn test_point_geometry_position() {
        let mut point = Geometry::point(map_point(1.0, 2.0), 1.0);
        assert_eq!(point.position(), Some(map_point(1.0, 2.0)));
        assert!(point.set_position(map_point(3.0, 4.0)));
        assert_eq!(point.position(), Some(map_point(3.0, 4.0)));
        assert_eq!(point.point_count(), 1);
        let mut path = Geometry::path(vec![], 1.0);
        assert!(!path.set_position(map_point(0.0, 0.0)));
        assert!(path.is_empty());
    }

    #[test]
    fn test_outline_has_one_sub_path_per_ring() {
        let mut ring = Geometry::polygon(square(0.0, 10.0), 1.0);
        ring.add_hole();
        let hole = ring.add_hole();
        for p in square(3.0, 7.0) {
            let c = ring.allocate(p);
            ring.ring_mut(hole).unwrap().push(c);
        }
        let outline = ring.to_path();
        let begins = outline.iter().filter(|e| matches!(e, Event::Begin { .. })).count();
        let closes = outline.iter().filter(|e| matches!(e, Event::End { close: true, .. })).count();
        assert_eq!(begins, 2);
        assert_eq!(closes, 2);
    }

    #[test]
    fn test_collection_references() {
        let mut collection = GeometryCollection::default();
        let a = collection.push(Geometry::path(vec![], 1.0));
        let b = collection.push(Geometry::polygon(vec![], 1.0));
        assert_ne!(a, b);
        assert_eq!(collection.resolve(&b).map(Geometry::kind), Some(GeometryKind::Ring));
        assert_eq!(collection.resolve(&b).map(Geometry::reference), Some(b));
        assert_eq!(collection.len(), 2);
    }
}
