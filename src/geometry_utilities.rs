use euclid::Point2D;
use types::*;

pub mod types {
    /// Map coordinates, either latitude/longitude or planar map units.
    pub struct MapSpace;
    /// Pixel coordinates on the rendered map layer.
    pub struct LayerSpace;
    pub type MapPoint = euclid::Point2D<f64, MapSpace>;
    pub type MapVector = euclid::Vector2D<f64, MapSpace>;
    pub type LayerPoint = euclid::Point2D<f64, LayerSpace>;
    pub type LayerVector = euclid::Vector2D<f64, LayerSpace>;
    pub type LayerLength = euclid::Length<f64, LayerSpace>;
}

pub fn map_point(x: f64, y: f64) -> MapPoint {
    MapPoint::new(x, y)
}

pub fn layer_point(x: f64, y: f64) -> LayerPoint {
    LayerPoint::new(x, y)
}

pub fn midpoint<U>(a: Point2D<f64, U>, b: Point2D<f64, U>) -> Point2D<f64, U> {
    a.lerp(b, 0.5)
}

pub fn closest_point_on_segment<U>(start: Point2D<f64, U>, end: Point2D<f64, U>, point: Point2D<f64, U>) -> Point2D<f64, U> {
    let dir = end - start;
    let sqr_length = dir.square_length();

    if sqr_length <= 0.000001 {
        start
    } else {
        let factor = (point - start).dot(dir) / sqr_length;
        start + dir * factor.max(0.0).min(1.0)
    }
}

pub fn square_distance_segment_point<U>(a: Point2D<f64, U>, b: Point2D<f64, U>, p: Point2D<f64, U>) -> f64 {
    (closest_point_on_segment(a, b, p) - p).square_length()
}

pub fn distance_segment_point<U>(a: Point2D<f64, U>, b: Point2D<f64, U>, p: Point2D<f64, U>) -> f64 {
    square_distance_segment_point(a, b, p).sqrt()
}

/// True if `point` lies within `half_width` of any edge of any part.
///
/// Open parts skip the edge from their last point back to the first.
/// A part with a single point is treated as a zero length segment.
pub fn border_contains<U>(parts: &[Vec<Point2D<f64, U>>], point: Point2D<f64, U>, closed: bool, half_width: f64) -> bool {
    for part in parts {
        if part.len() == 1 {
            if (part[0] - point).length() <= half_width {
                return true;
            }
            continue;
        }

        let mut k = part.len().wrapping_sub(1);
        for j in 0..part.len() {
            if closed || j != 0 {
                if distance_segment_point(part[k], part[j], point) <= half_width {
                    return true;
                }
            }
            k = j;
        }
    }
    false
}

/// Even-odd ray casting over every edge of every part.
pub fn ray_cast_contains<U>(parts: &[Vec<Point2D<f64, U>>], point: Point2D<f64, U>) -> bool {
    let mut inside = false;
    for part in parts {
        if part.is_empty() {
            continue;
        }

        let mut k = part.len() - 1;
        for j in 0..part.len() {
            let p1 = part[j];
            let p2 = part[k];
            if (p1.y > point.y) != (p2.y > point.y) && point.x < (p2.x - p1.x) * (point.y - p1.y) / (p2.y - p1.y) + p1.x {
                inside = !inside;
            }
            k = j;
        }
    }
    inside
}
