use crate::geometry::GeometryReference;
use crate::geometry_utilities::types::*;
use euclid::default::Size2D;

/// The host map, as seen by the editing engine.
///
/// Projection is only used for pixel based decisions (containment, handle
/// hit testing and drag tolerance). Everything else stays in map space.
pub trait MapSurface {
    fn project(&self, position: MapPoint) -> LayerPoint;

    /// Map position shown at the centre of the viewport.
    fn center(&self) -> MapPoint;

    /// Called after every mutation of a geometry's coordinates.
    fn request_redraw(&mut self, geometry: GeometryReference);
}

/// Linear projection of a planar map onto a pixel viewport.
///
/// Records redraw requests so the host (or a test) can pick them up.
#[derive(Clone, Debug)]
pub struct PlanarView {
    pub zoom: f64,
    pub scroll: MapVector,
    pub resolution: Size2D<u32>,
    redraws: Vec<GeometryReference>,
}

impl PlanarView {
    pub fn new(zoom: f64, resolution: Size2D<u32>) -> PlanarView {
        PlanarView {
            zoom,
            scroll: MapVector::new(0.0, 0.0),
            resolution,
            redraws: vec![],
        }
    }

    pub fn with_zoom(zoom: f64) -> PlanarView {
        PlanarView::new(zoom, Size2D::new(800, 600))
    }

    fn half_resolution(&self) -> LayerVector {
        LayerVector::new(self.resolution.width as f64, self.resolution.height as f64) * 0.5
    }

    pub fn map_to_layer_scale(&self) -> euclid::Scale<f64, MapSpace, LayerSpace> {
        euclid::Scale::new(self.zoom)
    }

    pub fn layer_to_map_scale(&self) -> euclid::Scale<f64, LayerSpace, MapSpace> {
        euclid::Scale::new(1.0 / self.zoom)
    }

    pub fn unproject(&self, point: LayerPoint) -> MapPoint {
        (point - self.half_resolution()) * self.layer_to_map_scale() + self.scroll
    }

    pub fn redraw_requests(&self) -> &[GeometryReference] {
        &self.redraws
    }

    pub fn take_redraw_requests(&mut self) -> Vec<GeometryReference> {
        std::mem::take(&mut self.redraws)
    }
}

impl MapSurface for PlanarView {
    fn project(&self, position: MapPoint) -> LayerPoint {
        (position - self.scroll) * self.map_to_layer_scale() + self.half_resolution()
    }

    fn center(&self) -> MapPoint {
        self.scroll.to_point()
    }

    fn request_redraw(&mut self, geometry: GeometryReference) {
        self.redraws.push(geometry);
    }
}
