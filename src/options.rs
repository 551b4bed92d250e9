use crate::editor::policy::{GeometryPolicy, PathPolicy, PointPolicy, RingPolicy};
use crate::geometry::GeometryKind;
use crate::handles::{Draggable, HandleFactory, HandleStyle};
use std::collections::BTreeMap;

pub type PolicyFactory = fn() -> Box<dyn GeometryPolicy>;

fn path_policy() -> Box<dyn GeometryPolicy> {
    Box::new(PathPolicy)
}

fn ring_policy() -> Box<dyn GeometryPolicy> {
    Box::new(RingPolicy)
}

fn point_policy() -> Box<dyn GeometryPolicy> {
    Box::new(PointPolicy)
}

#[derive(Clone, Debug)]
pub struct EditableOptions {
    /// Touch first device. Selects the larger handles and the wider hit tolerance.
    pub touch: bool,
    pub handle_size: f64,
    pub touch_handle_size: f64,
    pub guide_z_index: i32,
    pub vertex_z_index: i32,
    pub middle_z_index: i32,
    pub vertex_opacity: f64,
    pub vertex_secondary_opacity: f64,
    pub middle_opacity: f64,
    pub middle_secondary_opacity: f64,
    /// Stroke weight of geometries created by the controller, in pixels.
    pub stroke_weight: f64,
    pub touch_tolerance: f64,
    /// Pointer travel in pixels before a press turns into a drag.
    pub drag_tolerance: f64,
    pub guide_dash_array: [f64; 2],
    pub guide_weight: f64,
    /// Builds vertex handles for new editors.
    pub vertex_handle: HandleFactory,
    pub middle_handle: HandleFactory,
    policies: BTreeMap<GeometryKind, PolicyFactory>,
}

impl Default for EditableOptions {
    fn default() -> Self {
        let mut policies: BTreeMap<GeometryKind, PolicyFactory> = BTreeMap::new();
        policies.insert(GeometryKind::Path, path_policy);
        policies.insert(GeometryKind::Ring, ring_policy);
        policies.insert(GeometryKind::Point, point_policy);
        EditableOptions {
            touch: false,
            handle_size: 8.0,
            touch_handle_size: 20.0,
            guide_z_index: 10000,
            vertex_z_index: 10001,
            middle_z_index: 10000,
            vertex_opacity: 1.0,
            vertex_secondary_opacity: 0.3,
            middle_opacity: 0.5,
            middle_secondary_opacity: 0.2,
            stroke_weight: 5.0,
            touch_tolerance: 10.0,
            drag_tolerance: 3.0,
            guide_dash_array: [5.0, 10.0],
            guide_weight: 1.0,
            vertex_handle: Draggable::new,
            middle_handle: Draggable::new,
            policies,
        }
    }
}

impl EditableOptions {
    pub fn touch() -> EditableOptions {
        EditableOptions {
            touch: true,
            ..Default::default()
        }
    }

    /// Replaces the policy used for new editors of the given kind.
    pub fn with_policy(mut self, kind: GeometryKind, factory: PolicyFactory) -> EditableOptions {
        self.policies.insert(kind, factory);
        self
    }

    /// Replaces how vertex and middle handles are built.
    pub fn with_handles(mut self, vertex_handle: HandleFactory, middle_handle: HandleFactory) -> EditableOptions {
        self.vertex_handle = vertex_handle;
        self.middle_handle = middle_handle;
        self
    }

    pub fn policy_for(&self, kind: GeometryKind) -> Box<dyn GeometryPolicy> {
        match self.policies.get(&kind) {
            Some(factory) => factory(),
            None => match kind {
                GeometryKind::Path => path_policy(),
                GeometryKind::Ring => ring_policy(),
                GeometryKind::Point => point_policy(),
            },
        }
    }

    pub fn handle_size(&self) -> f64 {
        if self.touch {
            self.touch_handle_size
        } else {
            self.handle_size
        }
    }

    /// Added to half the stroke weight when testing containment.
    pub fn containment_tolerance(&self) -> f64 {
        if self.touch {
            self.touch_tolerance
        } else {
            0.0
        }
    }

    pub fn vertex_style(&self, secondary: bool) -> HandleStyle {
        HandleStyle {
            opacity: if secondary {
                self.vertex_secondary_opacity
            } else {
                self.vertex_opacity
            },
            z_index: self.vertex_z_index,
            size: self.handle_size(),
        }
    }

    pub fn middle_style(&self, secondary: bool) -> HandleStyle {
        HandleStyle {
            opacity: if secondary {
                self.middle_secondary_opacity
            } else {
                self.middle_opacity
            },
            z_index: self.middle_z_index,
            size: self.handle_size(),
        }
    }
}
