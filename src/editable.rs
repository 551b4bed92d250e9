use crate::editor::{DrawConstraint, DrawingDirection, DrawingState, EditorContext, GeometryEditor, NewClickOutcome};
use crate::events::{EditEvent, EventQueue};
use crate::geometry::{Geometry, GeometryCollection, GeometryKind, GeometryReference, PRIMARY_RING};
use crate::geometry_utilities::types::*;
use crate::input::CapturedDrag;
use crate::multi::MultiGroup;
use crate::options::EditableOptions;
use crate::pointer::DragTarget;
use crate::surface::MapSurface;
use crate::tools::DrawingTools;
use log::{debug, trace};
use std::collections::BTreeMap;

/// Editing session of one map.
///
/// Owns the geometries, their editors and the shared drawing tools. At most one
/// editor draws at any time.
pub struct Editable<S: MapSurface> {
    pub(crate) options: EditableOptions,
    pub(crate) surface: S,
    pub(crate) geometries: GeometryCollection,
    pub(crate) editors: BTreeMap<GeometryReference, GeometryEditor>,
    pub(crate) multis: Vec<MultiGroup>,
    pub(crate) tools: DrawingTools,
    pub(crate) events: EventQueue,
    pub(crate) gesture: Option<CapturedDrag<DragTarget>>,
    pub(crate) click_target: Option<DragTarget>,
    pub(crate) suppress_click: bool,
}

impl<S: MapSurface> Editable<S> {
    pub fn new(surface: S, options: EditableOptions) -> Editable<S> {
        let tools = DrawingTools::new(&options, surface.center());
        Editable {
            options,
            surface,
            geometries: GeometryCollection::default(),
            editors: BTreeMap::new(),
            multis: vec![],
            tools,
            events: EventQueue::default(),
            gesture: None,
            click_target: None,
            suppress_click: false,
        }
    }

    pub fn options(&self) -> &EditableOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn tools(&self) -> &DrawingTools {
        &self.tools
    }

    pub fn geometries(&self) -> &GeometryCollection {
        &self.geometries
    }

    pub fn geometry(&self, geometry: GeometryReference) -> Option<&Geometry> {
        self.geometries.resolve(&geometry)
    }

    pub fn editor(&self, geometry: GeometryReference) -> Option<&GeometryEditor> {
        self.editors.get(&geometry)
    }

    pub fn drawing_editor(&self) -> Option<GeometryReference> {
        self.tools.drawing_editor()
    }

    pub fn pending_events(&self) -> &[EditEvent] {
        self.events.pending()
    }

    pub fn drain_events(&mut self) -> Vec<EditEvent> {
        self.events.drain()
    }

    /// Splits the borrow of `self` into one editor and the context it works in.
    pub(crate) fn split(&mut self, geometry: GeometryReference) -> Option<(&mut GeometryEditor, EditorContext<'_>)> {
        let editor = self.editors.get_mut(&geometry)?;
        let cx = EditorContext {
            geometry: self.geometries.resolve_mut(&geometry)?,
            tools: &mut self.tools,
            events: &mut self.events,
            surface: &mut self.surface,
            options: &self.options,
        };
        Some((editor, cx))
    }

    fn push_created(&mut self, geometry: Geometry) -> GeometryReference {
        let reference = self.geometries.push(geometry);
        self.events.emit(EditEvent::Created { geometry: reference });
        reference
    }

    pub fn create_path(&mut self, positions: impl IntoIterator<Item = MapPoint>) -> GeometryReference {
        self.push_created(Geometry::path(positions, self.options.stroke_weight))
    }

    pub fn create_ring(&mut self, positions: impl IntoIterator<Item = MapPoint>) -> GeometryReference {
        self.push_created(Geometry::polygon(positions, self.options.stroke_weight))
    }

    pub fn create_point(&mut self, position: MapPoint) -> GeometryReference {
        self.push_created(Geometry::point(position, self.options.stroke_weight))
    }

    /// Creates an empty path and starts drawing it forward.
    pub fn start_path(&mut self) -> GeometryReference {
        let geometry = self.create_path(vec![]);
        self.edit(geometry, false);
        self.start_drawing_forward(geometry);
        geometry
    }

    pub fn start_ring(&mut self) -> GeometryReference {
        let geometry = self.create_ring(vec![]);
        self.edit(geometry, false);
        self.start_drawing_forward(geometry);
        geometry
    }

    /// Creates a point at `position` (or the centre of the map) that follows the
    /// pointer until the next click.
    pub fn start_point(&mut self, position: Option<MapPoint>) -> GeometryReference {
        let position = position.unwrap_or_else(|| self.surface.center());
        let geometry = self.create_point(position);
        self.edit(geometry, false);
        self.start_drawing(geometry);
        geometry
    }

    /// Starts drawing a new hole in a ring that is being edited.
    ///
    /// Returns the index of the hole. Points outside the filled area are ignored.
    pub fn start_hole(&mut self, geometry: GeometryReference) -> Option<usize> {
        if self.editor(geometry)?.is_drawing() {
            self.finish_drawing(geometry);
        }
        let hole = {
            let (editor, mut cx) = self.split(geometry)?;
            editor.prepare_for_new_hole(&mut cx)?
        };
        self.start_drawing_forward(geometry);
        Some(hole)
    }

    pub fn edit(&mut self, geometry: GeometryReference, secondary: bool) -> bool {
        let kind = match self.geometries.resolve(&geometry) {
            Some(g) => g.kind(),
            None => return false,
        };
        if self.editors.contains_key(&geometry) {
            self.end_edit(geometry);
        }
        let editor = GeometryEditor::new(geometry, self.options.policy_for(kind), &self.options, secondary);
        self.editors.insert(geometry, editor);
        if let Some((editor, mut cx)) = self.split(geometry) {
            editor.enable(&mut cx);
        }
        true
    }

    /// Stops editing, finishing an ongoing drawing session first.
    pub fn end_edit(&mut self, geometry: GeometryReference) {
        if self.editor(geometry).map_or(false, GeometryEditor::is_drawing) {
            self.finish_drawing(geometry);
        }
        if let Some((editor, mut cx)) = self.split(geometry) {
            editor.disable(&mut cx);
        }
        self.editors.remove(&geometry);
    }

    pub fn toggle_edit(&mut self, geometry: GeometryReference) {
        if self.editors.contains_key(&geometry) {
            self.end_edit(geometry);
        } else {
            self.edit(geometry, false);
        }
    }

    /// Starts drawing in the current direction, forward if idle.
    pub fn start_drawing(&mut self, geometry: GeometryReference) -> bool {
        let direction = match self.editor(geometry) {
            Some(editor) => editor.drawing().direction().unwrap_or(DrawingDirection::Forward),
            None => return false,
        };
        self.begin_drawing(geometry, direction)
    }

    fn begin_drawing(&mut self, geometry: GeometryReference, direction: DrawingDirection) -> bool {
        match self.editors.get_mut(&geometry) {
            Some(editor) => editor.set_drawing(DrawingState::from(direction)),
            None => return false,
        }
        debug!("{:?} starts drawing {:?}", geometry, direction);
        self.register_for_drawing(geometry);
        self.events.emit(EditEvent::Editing { geometry });
        true
    }

    pub fn start_drawing_forward(&mut self, geometry: GeometryReference) -> bool {
        if !self.begin_drawing(geometry, DrawingDirection::Forward) {
            return false;
        }
        if let Some(editor) = self.editors.get(&geometry) {
            if !editor.policy().draws_single_point() {
                self.tools.attach_forward_guide();
                if editor.policy().previews_closing_edge() {
                    self.tools.attach_backward_guide();
                }
            }
        }
        true
    }

    /// Only open paths can be drawn backward.
    pub fn start_drawing_backward(&mut self, geometry: GeometryReference) -> bool {
        if !self.can_extend_path(geometry) {
            trace!("{:?} cannot be drawn backward", geometry);
            return false;
        }
        self.begin_drawing(geometry, DrawingDirection::Backward);
        self.tools.attach_backward_guide();
        true
    }

    fn can_extend_path(&self, geometry: GeometryReference) -> bool {
        self.editor(geometry)
            .map_or(false, |e| e.policy().kind() == GeometryKind::Path && !e.policy().draws_single_point())
    }

    /// Resumes drawing after the last point of a path.
    pub fn continue_forward(&mut self, geometry: GeometryReference) -> bool {
        if !self.can_extend_path(geometry) {
            return false;
        }
        self.start_drawing_forward(geometry);
        self.resume_primary(geometry, DrawingDirection::Forward);
        true
    }

    /// Resumes drawing before the first point of a path.
    pub fn continue_backward(&mut self, geometry: GeometryReference) -> bool {
        if !self.start_drawing_backward(geometry) {
            return false;
        }
        self.resume_primary(geometry, DrawingDirection::Backward);
        true
    }

    fn resume_primary(&mut self, geometry: GeometryReference, direction: DrawingDirection) {
        let ring = match self.geometries.resolve(&geometry) {
            Some(g) => g.primary_ring(),
            None => return,
        };
        let end = match direction {
            DrawingDirection::Forward => ring.last(),
            DrawingDirection::Backward => ring.first(),
        };
        match (direction, end.map(|c| c.position)) {
            (DrawingDirection::Forward, Some(position)) => self.tools.anchor_forward_guide(position),
            (DrawingDirection::Backward, Some(position)) => self.tools.anchor_backward_guide(position),
            (_, None) => {}
        }
        if let Some(editor) = self.editors.get_mut(&geometry) {
            editor.set_active_ring(Some(PRIMARY_RING));
        }
    }

    /// Ends the drawing session. Does nothing if the editor is idle.
    pub fn finish_drawing(&mut self, geometry: GeometryReference) {
        match self.editors.get_mut(&geometry) {
            Some(editor) if editor.is_drawing() => {
                self.events.emit(EditEvent::Edited { geometry });
                editor.set_drawing(DrawingState::Idle);
            }
            _ => {
                trace!("finish_drawing on idle {:?}", geometry);
                return;
            }
        }
        self.unregister_for_drawing(geometry);
        if let Some((editor, mut cx)) = self.split(geometry) {
            editor.end_session(&mut cx);
        }
        debug!("{:?} finished drawing", geometry);
    }

    /// Routes pointer moves and new point clicks to `geometry`'s editor.
    ///
    /// A previously registered editor is unregistered first, which finishes it.
    pub fn register_for_drawing(&mut self, geometry: GeometryReference) {
        match self.tools.drawing_editor() {
            Some(current) if current == geometry => return,
            Some(current) => self.unregister_for_drawing(current),
            None => {}
        }
        self.tools.bind(geometry);
        self.events.emit(EditEvent::RegisteredEditor { geometry });
    }

    pub fn unregister_for_drawing(&mut self, geometry: GeometryReference) {
        if self.tools.drawing_editor() != Some(geometry) {
            trace!("{:?} is not the drawing editor", geometry);
            return;
        }
        self.tools.unbind();
        self.events.emit(EditEvent::UnregisteredEditor { geometry });
        if self.editor(geometry).map_or(false, GeometryEditor::is_drawing) {
            self.finish_drawing(geometry);
        }
    }

    /// Restricts new points of the current drawing session.
    pub fn set_draw_constraint(&mut self, geometry: GeometryReference, constraint: Option<DrawConstraint>) {
        if let Some(editor) = self.editors.get_mut(&geometry) {
            editor.set_constraint(constraint);
        }
    }

    pub fn set_primary(&mut self, geometry: GeometryReference) {
        let multi = self.geometries.resolve(&geometry).and_then(Geometry::multi);
        if let Some(multi) = multi {
            self.multi_set_secondary(multi, geometry);
        }
        if let Some(editor) = self.editors.get_mut(&geometry) {
            editor.set_primary(&self.options);
        }
    }

    pub fn set_secondary(&mut self, geometry: GeometryReference) {
        if let Some(editor) = self.editors.get_mut(&geometry) {
            editor.set_secondary(&self.options);
        }
    }

    /// Places a new point for the drawing editor, as if its floating handle was clicked.
    pub fn new_click(&mut self, position: MapPoint) -> NewClickOutcome {
        let geometry = match self.tools.drawing_editor() {
            Some(g) => g,
            None => return NewClickOutcome::Ignored,
        };
        let outcome = match self.split(geometry) {
            Some((editor, mut cx)) => editor.on_new_click(&mut cx, position),
            None => NewClickOutcome::Ignored,
        };
        if outcome == NewClickOutcome::Finish {
            self.finish_drawing(geometry);
        }
        outcome
    }

    /// Top-most geometry whose rendered shape contains `position`.
    pub fn geometry_at(&self, position: MapPoint) -> Option<GeometryReference> {
        let point = self.surface.project(position);
        let tolerance = self.options.containment_tolerance();
        self.geometries
            .iter()
            .rev()
            .find(|(_, g)| g.contains_point(&self.surface, point, tolerance))
            .map(|(reference, _)| reference)
    }
}
