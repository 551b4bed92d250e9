pub mod clicks;
pub mod policy;

use crate::events::{EditEvent, EventQueue, VertexClick};
use crate::geometry::{Geometry, GeometryReference};
use crate::geometry_utilities::types::*;
use crate::handles::HandleSet;
use crate::input::Modifiers;
use crate::options::EditableOptions;
use crate::ring::CoordinateId;
use crate::surface::MapSurface;
use crate::tools::{DrawingTools, EditLayerItem};
use clicks::VertexClickContext;
use log::{debug, trace};
use policy::GeometryPolicy;
use std::fmt;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DrawingDirection {
    Forward,
    Backward,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DrawingState {
    Idle,
    DrawingForward,
    DrawingBackward,
}

impl From<DrawingDirection> for DrawingState {
    fn from(direction: DrawingDirection) -> Self {
        match direction {
            DrawingDirection::Forward => DrawingState::DrawingForward,
            DrawingDirection::Backward => DrawingState::DrawingBackward,
        }
    }
}

impl DrawingState {
    pub fn direction(&self) -> Option<DrawingDirection> {
        match self {
            DrawingState::Idle => None,
            DrawingState::DrawingForward => Some(DrawingDirection::Forward),
            DrawingState::DrawingBackward => Some(DrawingDirection::Backward),
        }
    }
}

/// Limits where new points may be placed during one drawing session.
#[derive(Clone)]
pub enum DrawConstraint {
    /// Inside the filled area of the geometry, ignoring the ring being drawn.
    InsideFilledArea,
    Custom(Rc<dyn Fn(MapPoint) -> bool>),
}

impl fmt::Debug for DrawConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawConstraint::InsideFilledArea => write!(f, "InsideFilledArea"),
            DrawConstraint::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NewClickOutcome {
    Ignored,
    Added(CoordinateId),
    /// Single point geometries are done after one click.
    Finish,
}

/// Everything an editor may touch besides itself.
pub struct EditorContext<'a> {
    pub geometry: &'a mut Geometry,
    pub tools: &'a mut DrawingTools,
    pub events: &'a mut EventQueue,
    pub surface: &'a mut dyn MapSurface,
    pub options: &'a EditableOptions,
}

impl<'a> EditorContext<'a> {
    fn refresh(&mut self) {
        self.geometry.dirty();
        self.surface.request_redraw(self.geometry.reference());
    }
}

/// Per geometry editing state: drawing session and handle set.
pub struct GeometryEditor {
    geometry: GeometryReference,
    policy: Box<dyn GeometryPolicy>,
    drawing: DrawingState,
    active_ring: Option<usize>,
    secondary: bool,
    constraint: Option<DrawConstraint>,
    handles: HandleSet,
    feature_dragging: bool,
}

impl GeometryEditor {
    pub fn new(
        geometry: GeometryReference,
        policy: Box<dyn GeometryPolicy>,
        options: &EditableOptions,
        secondary: bool,
    ) -> GeometryEditor {
        GeometryEditor {
            geometry,
            policy,
            drawing: DrawingState::Idle,
            active_ring: None,
            secondary,
            constraint: None,
            handles: HandleSet::new(options.vertex_style(secondary), options.middle_style(secondary))
                .with_factories(options.vertex_handle, options.middle_handle),
            feature_dragging: false,
        }
    }

    pub fn geometry(&self) -> GeometryReference {
        self.geometry
    }

    pub fn policy(&self) -> &dyn GeometryPolicy {
        self.policy.as_ref()
    }

    pub fn drawing(&self) -> DrawingState {
        self.drawing
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing != DrawingState::Idle
    }

    pub fn active_ring(&self) -> Option<usize> {
        self.active_ring
    }

    pub fn is_secondary(&self) -> bool {
        self.secondary
    }

    pub fn constraint(&self) -> Option<&DrawConstraint> {
        self.constraint.as_ref()
    }

    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    pub(crate) fn enable(&mut self, cx: &mut EditorContext) {
        cx.tools.edit_layer.add(EditLayerItem::Handles(self.geometry));
        cx.events.emit(EditEvent::Enabled { geometry: self.geometry });
        for ring_index in self.policy.ring_groups(cx.geometry) {
            if let Some(ring) = cx.geometry.ring(ring_index) {
                self.handles.add_ring(ring_index, ring);
            }
        }
        debug!(
            "enabled {:?} editor for {:?} with {} vertex handles",
            self.policy.kind(),
            self.geometry,
            self.handles.vertex_count()
        );
    }

    pub(crate) fn disable(&mut self, cx: &mut EditorContext) {
        self.handles.clear();
        cx.tools.edit_layer.remove(&EditLayerItem::Handles(self.geometry));
        cx.events.emit(EditEvent::Disabled { geometry: self.geometry });
    }

    pub(crate) fn set_drawing(&mut self, state: DrawingState) {
        self.drawing = state;
    }

    pub(crate) fn set_active_ring(&mut self, ring: Option<usize>) {
        self.active_ring = ring;
    }

    pub(crate) fn set_constraint(&mut self, constraint: Option<DrawConstraint>) {
        self.constraint = constraint;
    }

    /// Detaches the guides and forgets the session's ring and constraint.
    pub(crate) fn end_session(&mut self, cx: &mut EditorContext) {
        cx.tools.detach_forward_guide();
        cx.tools.detach_backward_guide();
        self.active_ring = None;
        self.constraint = None;
    }

    pub(crate) fn set_primary(&mut self, options: &EditableOptions) {
        self.secondary = false;
        self.handles.restyle(options.vertex_style(false), options.middle_style(false));
    }

    pub(crate) fn set_secondary(&mut self, options: &EditableOptions) {
        self.secondary = true;
        self.handles.restyle(options.vertex_style(true), options.middle_style(true));
    }

    /// Allocates an empty hole to draw into, constrained to the filled area.
    pub(crate) fn prepare_for_new_hole(&mut self, cx: &mut EditorContext) -> Option<usize> {
        if !self.policy.is_closed() {
            return None;
        }
        let hole = cx.geometry.add_hole();
        self.active_ring = Some(hole);
        self.constraint = Some(DrawConstraint::InsideFilledArea);
        debug!("prepared hole {} on {:?}", hole, self.geometry);
        Some(hole)
    }

    pub(crate) fn on_pointer_move(&mut self, cx: &mut EditorContext, position: MapPoint) {
        if !self.is_drawing() {
            return;
        }
        cx.tools.new_click_handler.position = position;
        if self.policy.draws_single_point() {
            if cx.geometry.set_position(position) {
                cx.refresh();
            }
        } else {
            cx.tools.move_forward_guide(position);
            cx.tools.move_backward_guide(position);
        }
    }

    pub(crate) fn on_new_click(&mut self, cx: &mut EditorContext, position: MapPoint) -> NewClickOutcome {
        if !self.is_drawing() {
            return NewClickOutcome::Ignored;
        }
        let tolerance = cx.options.containment_tolerance();
        if !self.policy.check_draw_constraint(
            self.constraint.as_ref(),
            cx.geometry,
            &*cx.surface,
            position,
            self.active_ring,
            tolerance,
        ) {
            trace!("new point at {:?} rejected by {:?}", position, self.constraint);
            return NewClickOutcome::Ignored;
        }

        if self.policy.draws_single_point() {
            if cx.geometry.set_position(position) {
                cx.refresh();
            }
            cx.events.emit(EditEvent::NewClick {
                geometry: self.geometry,
                position,
            });
            return NewClickOutcome::Finish;
        }

        let ring_index = match self.active_ring {
            Some(ring) => ring,
            None => {
                let ring = self.policy.target_ring(cx.geometry, &*cx.surface, position, tolerance);
                self.active_ring = Some(ring);
                ring
            }
        };
        let coordinate = cx.geometry.allocate(position);
        let ring = match cx.geometry.ring_mut(ring_index) {
            Some(ring) => ring,
            None => return NewClickOutcome::Ignored,
        };
        if self.drawing == DrawingState::DrawingBackward {
            ring.unshift(coordinate);
        } else {
            ring.push(coordinate);
        }
        self.handles.add_vertex(ring_index, ring, coordinate.id);
        cx.refresh();

        match self.drawing {
            DrawingState::DrawingBackward => {
                cx.tools.anchor_backward_guide(position);
                if !cx.tools.forward_guide.is_anchored() {
                    cx.tools.anchor_forward_guide(position);
                }
            }
            _ => {
                cx.tools.anchor_forward_guide(position);
                if !cx.tools.backward_guide.is_anchored() {
                    cx.tools.anchor_backward_guide(position);
                }
            }
        }
        cx.events.emit(EditEvent::NewClick {
            geometry: self.geometry,
            position,
        });
        NewClickOutcome::Added(coordinate.id)
    }

    pub(crate) fn vertex_click_context(
        &self,
        geometry: &Geometry,
        vertex: CoordinateId,
        modifiers: Modifiers,
    ) -> Option<(VertexClickContext, VertexClick)> {
        let handle = self.handles.vertex(vertex)?;
        let ring = geometry.ring(handle.ring())?;
        let index = ring.index_of(vertex)?;
        let context = VertexClickContext {
            modifiers,
            drawing: self.drawing,
            index,
            ring_len: ring.len(),
            active_ring_len: self.active_ring.and_then(|r| geometry.ring(r)).map(|r| r.len()),
        };
        let click = VertexClick {
            geometry: self.geometry,
            vertex,
            index,
            position: handle.handle().position,
        };
        Some((context, click))
    }

    pub(crate) fn remove_vertex(&mut self, cx: &mut EditorContext, vertex: CoordinateId) -> bool {
        let ring_index = match self.handles.vertex(vertex) {
            Some(handle) => handle.ring(),
            None => return false,
        };
        let removed = match cx.geometry.ring_mut(ring_index) {
            Some(ring) => self.handles.remove_vertex(ring, vertex).is_some(),
            None => false,
        };
        if removed {
            cx.refresh();
        }
        removed
    }

    /// Inserts a coordinate where the middle handle owned by `right` sits.
    ///
    /// The handle set is not touched yet, see `bind_inserted`.
    pub(crate) fn insert_at_middle(
        &mut self,
        cx: &mut EditorContext,
        right: CoordinateId,
        position: MapPoint,
    ) -> Option<CoordinateId> {
        let vertex = self.handles.vertex(right)?;
        let ring_index = vertex.ring();
        let index = vertex.middle()?.index(cx.geometry.ring(ring_index)?)?;
        let coordinate = cx.geometry.allocate(position);
        cx.geometry.ring_mut(ring_index)?.insert(index, coordinate);
        cx.refresh();
        Some(coordinate.id)
    }

    /// Replaces the middle handle owned by `right` with a vertex handle for `inserted`.
    pub(crate) fn bind_inserted(&mut self, cx: &mut EditorContext, right: CoordinateId, inserted: CoordinateId) {
        let ring_index = match self.handles.vertex(right) {
            Some(vertex) => vertex.ring(),
            None => return,
        };
        self.handles.remove_middle(right);
        if let Some(ring) = cx.geometry.ring(ring_index) {
            self.handles.add_vertex(ring_index, ring, inserted);
        }
    }

    pub(crate) fn drag_vertex(&mut self, cx: &mut EditorContext, vertex: CoordinateId, position: MapPoint) -> bool {
        let ring_index = match self.handles.vertex(vertex) {
            Some(handle) => handle.ring(),
            None => return false,
        };
        let moved = match cx.geometry.ring_mut(ring_index) {
            Some(ring) => self.handles.drag_vertex(ring, vertex, position),
            None => false,
        };
        if moved {
            cx.refresh();
        }
        moved
    }

    pub(crate) fn drag_feature(&mut self, cx: &mut EditorContext, position: MapPoint) {
        if !self.policy.draggable_feature() {
            return;
        }
        if !self.feature_dragging {
            self.feature_dragging = true;
            cx.events.emit(EditEvent::Editing { geometry: self.geometry });
        }
        if cx.geometry.set_position(position) {
            cx.refresh();
        }
    }

    pub(crate) fn end_feature_drag(&mut self) {
        self.feature_dragging = false;
    }
}
