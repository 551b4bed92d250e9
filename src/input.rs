use crate::geometry_utilities::types::*;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Modifiers {
        Modifiers::default()
    }

    pub fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Modifiers {
        Modifiers {
            alt: true,
            ..Default::default()
        }
    }

    pub fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Default::default()
        }
    }

    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerSource {
    Mouse,
    /// Touch input has no hover, so presses arrive without preceding moves.
    Touch,
}

/// A normalized pointer event in map coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: MapPoint,
    pub modifiers: Modifiers,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(position: MapPoint) -> PointerEvent {
        PointerEvent {
            position,
            modifiers: Modifiers::none(),
            source: PointerSource::Mouse,
        }
    }

    pub fn touch(position: MapPoint) -> PointerEvent {
        PointerEvent {
            position,
            modifiers: Modifiers::none(),
            source: PointerSource::Touch,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> PointerEvent {
        self.modifiers = modifiers;
        self
    }

    pub fn is_touch(&self) -> bool {
        self.source == PointerSource::Touch
    }
}

pub trait Shape {
    fn score(&self, point: LayerPoint) -> f64;
}

pub struct CircleShape {
    pub center: LayerPoint,
    pub radius: f64,
}

impl Shape for CircleShape {
    fn score(&self, point: LayerPoint) -> f64 {
        let dist = (point - self.center).square_length();
        if dist <= self.radius * self.radius {
            1.0 / self.radius
        } else {
            0.0
        }
    }
}

/// Picks the best candidate under the pointer.
///
/// Higher z-index wins, then the higher shape score. Ties keep the first candidate added.
pub struct BatchedCapture<T> {
    point: LayerPoint,
    best: Option<T>,
    best_rank: (i32, f64),
}

impl<T> BatchedCapture<T> {
    pub fn new(point: LayerPoint) -> BatchedCapture<T> {
        BatchedCapture {
            point,
            best: None,
            best_rank: (i32::MIN, 0.0),
        }
    }

    pub fn add(&mut self, shape: impl Shape, z_index: i32, value: T) {
        let score = shape.score(self.point);
        if score <= 0.0 {
            return;
        }
        let (best_z, best_score) = self.best_rank;
        if self.best.is_none() || z_index > best_z || (z_index == best_z && score > best_score) {
            self.best = Some(value);
            self.best_rank = (z_index, score);
        }
    }

    pub fn finish(self) -> Option<T> {
        self.best
    }
}

/// A press that may turn into a drag.
#[derive(Copy, Clone, Debug)]
pub struct CapturedDrag<T: Copy> {
    pub target: T,
    pub start: LayerPoint,
    pub dragging: bool,
    /// Set once the gesture has done something that must not also count as a click.
    pub suppress_click: bool,
}

impl<T: Copy> CapturedDrag<T> {
    pub fn new(target: T, start: LayerPoint) -> CapturedDrag<T> {
        CapturedDrag {
            target,
            start,
            dragging: false,
            suppress_click: false,
        }
    }

    /// Hands the ongoing gesture to another target. The pointer stays down.
    pub fn transfer(&mut self, target: T) {
        self.target = target;
        self.dragging = true;
        self.suppress_click = true;
    }

    pub fn exceeds(&self, point: LayerPoint, tolerance: f64) -> bool {
        (point - self.start).square_length() > tolerance * tolerance
    }
}
