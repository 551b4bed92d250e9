use crate::editable::Editable;
use crate::editor::clicks::{classify_vertex_click, VertexClickAction};
use crate::editor::NewClickOutcome;
use crate::events::EditEvent;
use crate::geometry::GeometryReference;
use crate::geometry_utilities::types::*;
use crate::handles::Draggable;
use crate::input::{BatchedCapture, CapturedDrag, Modifiers, PointerEvent};
use crate::ring::CoordinateId;
use crate::surface::MapSurface;
use log::trace;

/// Something under the pointer that reacts to presses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DragTarget {
    Vertex {
        geometry: GeometryReference,
        vertex: CoordinateId,
    },
    /// Identified by the vertex that owns it.
    Middle {
        geometry: GeometryReference,
        right: CoordinateId,
    },
    /// A point geometry dragged as a whole.
    Feature { geometry: GeometryReference },
}

impl<S: MapSurface> Editable<S> {
    /// Best handle under `point`, vertices above middles.
    pub fn hit_test(&self, point: LayerPoint) -> Option<DragTarget> {
        let mut capture = BatchedCapture::new(point);
        // Newest geometry first so ties go to the one drawn on top
        for (&geometry, editor) in self.editors.iter().rev() {
            for vertex in editor.handles().vertices() {
                let handle = vertex.handle();
                capture.add(
                    handle.shape(&self.surface),
                    handle.style.z_index,
                    DragTarget::Vertex {
                        geometry,
                        vertex: vertex.coordinate(),
                    },
                );
                if let Some(middle) = vertex.middle() {
                    let handle = middle.handle();
                    capture.add(
                        handle.shape(&self.surface),
                        handle.style.z_index,
                        DragTarget::Middle {
                            geometry,
                            right: middle.right(),
                        },
                    );
                }
            }

            // A point being drawn sits under the pointer and must not swallow the click
            if editor.policy().draggable_feature() && !editor.is_drawing() {
                if let Some(position) = self.geometries.resolve(&geometry).and_then(|g| g.position()) {
                    let handle = Draggable::new(position, self.options.vertex_style(false));
                    capture.add(handle.shape(&self.surface), handle.style.z_index, DragTarget::Feature { geometry });
                }
            }
        }
        capture.finish()
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        let point = self.surface.project(event.position);
        self.click_target = None;
        self.suppress_click = false;
        let target = match self.hit_test(point) {
            Some(target) => target,
            None => {
                self.gesture = None;
                return;
            }
        };

        let mut drag = CapturedDrag::new(target, point);
        match target {
            DragTarget::Vertex { geometry, .. } => {
                if self.editor(geometry).map_or(false, |e| e.is_secondary()) {
                    self.set_primary(geometry);
                }
            }
            DragTarget::Middle { geometry, right } => {
                if let Some(vertex) = self.press_middle(geometry, right, event.position) {
                    drag.transfer(DragTarget::Vertex { geometry, vertex });
                }
            }
            DragTarget::Feature { .. } => {}
        }
        self.gesture = Some(drag);
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        if let Some(geometry) = self.tools.drawing_editor() {
            if let Some((editor, mut cx)) = self.split(geometry) {
                editor.on_pointer_move(&mut cx, event.position);
            }
        }

        let point = self.surface.project(event.position);
        self.gesture = match self.gesture.take() {
            Some(mut drag) => {
                if !drag.dragging && drag.exceeds(point, self.options.drag_tolerance) {
                    drag.dragging = true;
                    drag.suppress_click = true;
                }
                if drag.dragging {
                    match drag.target {
                        DragTarget::Vertex { geometry, vertex } => {
                            self.drag_vertex(geometry, vertex, event.position);
                        }
                        DragTarget::Feature { geometry } => {
                            if let Some((editor, mut cx)) = self.split(geometry) {
                                editor.drag_feature(&mut cx, event.position);
                            }
                        }
                        DragTarget::Middle { .. } => {}
                    }
                }
                Some(drag)
            }
            None => None,
        };
    }

    pub fn pointer_up(&mut self, _event: PointerEvent) {
        if let Some(drag) = self.gesture.take() {
            if let DragTarget::Feature { geometry } = drag.target {
                if let Some(editor) = self.editors.get_mut(&geometry) {
                    editor.end_feature_drag();
                }
            }
            self.suppress_click = drag.suppress_click;
            self.click_target = if drag.suppress_click { None } else { Some(drag.target) };
        }
    }

    /// A click that was not part of a drag.
    ///
    /// Vertex handles get the vertex click protocol. Anything else goes to the
    /// drawing editor's floating handle.
    pub fn click(&mut self, event: PointerEvent) {
        if std::mem::replace(&mut self.suppress_click, false) {
            trace!("click after drag suppressed");
            self.click_target = None;
            return;
        }
        let point = self.surface.project(event.position);
        let target = self.click_target.take().or_else(|| self.hit_test(point));
        match target {
            Some(DragTarget::Vertex { geometry, vertex }) => self.click_vertex(geometry, vertex, event.modifiers),
            Some(DragTarget::Middle { .. }) => {}
            Some(DragTarget::Feature { .. }) | None => {
                let geometry = match self.tools.drawing_editor() {
                    Some(geometry) => geometry,
                    None => return,
                };
                if event.is_touch() {
                    if let Some((editor, mut cx)) = self.split(geometry) {
                        editor.on_pointer_move(&mut cx, event.position);
                    }
                }
                let outcome = self.new_click(event.position);
                if outcome == NewClickOutcome::Ignored {
                    trace!("click at {:?} ignored by {:?}", event.position, geometry);
                }
            }
        }
    }

    /// Runs the vertex click protocol on a vertex handle.
    pub fn click_vertex(&mut self, geometry: GeometryReference, vertex: CoordinateId, modifiers: Modifiers) {
        let (context, click) = match (self.editors.get(&geometry), self.geometries.resolve(&geometry)) {
            (Some(editor), Some(g)) => match editor.vertex_click_context(g, vertex, modifiers) {
                Some(found) => found,
                None => return,
            },
            _ => return,
        };
        match classify_vertex_click(&context) {
            VertexClickAction::CtrlClick => self.events.emit(EditEvent::VertexCtrlClick(click)),
            VertexClickAction::AltClick => self.events.emit(EditEvent::VertexAltClick(click)),
            VertexClickAction::ShiftClick => self.events.emit(EditEvent::VertexShiftClick(click)),
            VertexClickAction::FinishDrawing => self.finish_drawing(geometry),
            VertexClickAction::Remove => {
                if let Some((editor, mut cx)) = self.split(geometry) {
                    editor.remove_vertex(&mut cx, vertex);
                }
            }
        }
    }

    /// Turns the middle handle owned by `right` into a vertex at `position`.
    ///
    /// Returns the new vertex, which takes over the ongoing drag.
    pub fn press_middle(
        &mut self,
        geometry: GeometryReference,
        right: CoordinateId,
        position: MapPoint,
    ) -> Option<CoordinateId> {
        let inserted = {
            let (editor, mut cx) = self.split(geometry)?;
            editor.insert_at_middle(&mut cx, right, position)?
        };
        self.set_primary(geometry);
        let (editor, mut cx) = self.split(geometry)?;
        editor.bind_inserted(&mut cx, right, inserted);
        trace!("middle handle of {:?} promoted to {:?}", right, inserted);
        Some(inserted)
    }

    pub fn drag_vertex(&mut self, geometry: GeometryReference, vertex: CoordinateId, position: MapPoint) -> bool {
        match self.split(geometry) {
            Some((editor, mut cx)) => editor.drag_vertex(&mut cx, vertex, position),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::DrawingState;
    use crate::geometry_utilities::map_point;
    use crate::handles::VertexHandle;
    use crate::options::EditableOptions;
    use crate::surface::PlanarView;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn editable() -> Editable<PlanarView> {
        Editable::new(PlanarView::with_zoom(100.0), EditableOptions::default())
    }

    fn tap(editable: &mut Editable<PlanarView>, event: PointerEvent) {
        editable.pointer_move(event);
        editable.pointer_down(event);
        editable.pointer_up(event);
        editable.click(event);
    }

    fn positions(editable: &Editable<PlanarView>, geometry: GeometryReference) -> Vec<MapPoint> {
        editable.geometry(geometry).unwrap().primary_ring().positions().collect()
    }

    fn assert_consistent(editable: &Editable<PlanarView>, geometry: GeometryReference) {
        let g = editable.geometry(geometry).unwrap();
        let rings: Vec<_> = g.rings().iter().enumerate().collect();
        assert!(editable.editor(geometry).unwrap().handles().is_consistent(&rings));
    }

    #[test]
    fn test_click_last_vertex_finishes_path() {
        let mut editable = editable();
        let path = editable.start_path();
        for x in [0.0, 1.0, 2.0] {
            tap(&mut editable, PointerEvent::mouse(map_point(x, 0.0)));
        }
        tap(&mut editable, PointerEvent::mouse(map_point(2.0, 0.0)));
        assert_eq!(
            positions(&editable, path),
            vec![map_point(0.0, 0.0), map_point(1.0, 0.0), map_point(2.0, 0.0)]
        );
        assert_eq!(editable.editor(path).unwrap().drawing(), DrawingState::Idle);
        assert_eq!(editable.drawing_editor(), None);
    }

    #[test]
    fn test_click_inner_vertex_removes_it() {
        let mut editable = editable();
        let path = editable.create_path(vec![map_point(0.0, 0.0), map_point(1.0, 0.0), map_point(2.0, 0.0)]);
        editable.edit(path, false);
        tap(&mut editable, PointerEvent::mouse(map_point(1.0, 0.0)));
        assert_eq!(positions(&editable, path), vec![map_point(0.0, 0.0), map_point(2.0, 0.0)]);
        let handles = editable.editor(path).unwrap().handles();
        assert_eq!(handles.vertex_count(), 2);
        assert_eq!(handles.middle_count(), 1);
        assert_consistent(&editable, path);
    }

    #[test]
    fn test_modifier_clicks_only_notify() {
        let mut editable = editable();
        let path = editable.create_path(vec![map_point(0.0, 0.0), map_point(1.0, 0.0)]);
        editable.edit(path, false);
        editable.drain_events();
        let event = PointerEvent::mouse(map_point(1.0, 0.0)).with_modifiers(Modifiers::alt());
        tap(&mut editable, event);
        let events = editable.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            EditEvent::VertexAltClick(click) => {
                assert_eq!(click.index, 1);
                assert_eq!(click.position, map_point(1.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(positions(&editable, path).len(), 2);
    }

    #[test]
    fn test_middle_press_drag_moves_new_vertex() {
        let mut editable = editable();
        let path = editable.create_path(vec![map_point(0.0, 0.0), map_point(2.0, 0.0), map_point(4.0, 0.0)]);
        editable.edit(path, false);

        let press = PointerEvent::mouse(map_point(1.0, 0.0));
        editable.pointer_down(press);
        assert_eq!(positions(&editable, path).len(), 4);
        assert_eq!(positions(&editable, path)[1], map_point(1.0, 0.0));

        editable.pointer_move(PointerEvent::mouse(map_point(1.0, 1.0)));
        editable.pointer_up(PointerEvent::mouse(map_point(1.0, 1.0)));
        editable.click(PointerEvent::mouse(map_point(1.0, 1.0)));

        assert_eq!(
            positions(&editable, path),
            vec![map_point(0.0, 0.0), map_point(1.0, 1.0), map_point(2.0, 0.0), map_point(4.0, 0.0)]
        );
        let handles = editable.editor(path).unwrap().handles();
        assert_eq!(handles.vertex_count(), 4);
        assert_eq!(handles.middle_count(), 3);
        assert_consistent(&editable, path);
    }

    #[test]
    fn test_vertex_drag_does_not_click() {
        let mut editable = editable();
        let ring = editable.create_ring(vec![map_point(0.0, 0.0), map_point(2.0, 0.0), map_point(2.0, 2.0)]);
        editable.edit(ring, false);
        editable.pointer_down(PointerEvent::mouse(map_point(2.0, 2.0)));
        editable.pointer_move(PointerEvent::mouse(map_point(3.0, 3.0)));
        editable.pointer_up(PointerEvent::mouse(map_point(3.0, 3.0)));
        editable.click(PointerEvent::mouse(map_point(3.0, 3.0)));
        assert_eq!(positions(&editable, ring)[2], map_point(3.0, 3.0));
        assert_eq!(positions(&editable, ring).len(), 3);
        let middle = editable
            .editor(ring)
            .unwrap()
            .handles()
            .vertex(editable.geometry(ring).unwrap().primary_ring().get(0).unwrap().id)
            .and_then(VertexHandle::middle)
            .unwrap();
        assert_eq!(middle.handle().position, map_point(1.5, 1.5));
        assert_consistent(&editable, ring);
    }

    #[test]
    fn test_overlapping_vertices_pick_top_most_geometry() {
        let mut editable = editable();
        let below = editable.create_path(vec![map_point(0.0, 0.0), map_point(2.0, 0.0)]);
        let above = editable.create_path(vec![map_point(0.0, 0.0), map_point(0.0, 2.0)]);
        editable.edit(below, false);
        editable.edit(above, false);
        let point = editable.surface().project(map_point(0.0, 0.0));
        match editable.hit_test(point) {
            Some(DragTarget::Vertex { geometry, .. }) => assert_eq!(geometry, above),
            other => panic!("unexpected target {:?}", other),
        }
        assert_eq!(editable.geometry_at(map_point(0.0, 0.0)), Some(above));
    }

    #[test]
    fn test_small_jitter_is_still_a_click() {
        let mut editable = editable();
        let path = editable.create_path(vec![map_point(0.0, 0.0), map_point(1.0, 0.0), map_point(2.0, 0.0)]);
        editable.edit(path, false);
        editable.pointer_down(PointerEvent::mouse(map_point(1.0, 0.0)));
        editable.pointer_move(PointerEvent::mouse(map_point(1.01, 0.0)));
        editable.pointer_up(PointerEvent::mouse(map_point(1.01, 0.0)));
        editable.click(PointerEvent::mouse(map_point(1.01, 0.0)));
        assert_eq!(positions(&editable, path).len(), 2);
    }

    #[test]
    fn test_secondary_press_promotes() {
        let mut editable = editable();
        let a = editable.create_path(vec![map_point(0.0, 0.0), map_point(1.0, 0.0)]);
        let b = editable.create_path(vec![map_point(0.0, 3.0), map_point(1.0, 3.0)]);
        let multi = editable.create_multi(&[a, b]);
        editable.edit_multi(multi, a);
        assert!(editable.editor(b).unwrap().is_secondary());
        let vertex = editable.editor(b).unwrap().handles().vertices().next().unwrap();
        assert_eq!(vertex.handle().style.opacity, 0.3);

        editable.pointer_down(PointerEvent::mouse(map_point(0.0, 3.0)));
        assert!(!editable.editor(b).unwrap().is_secondary());
        assert!(editable.editor(a).unwrap().is_secondary());
        let vertex = editable.editor(b).unwrap().handles().vertices().next().unwrap();
        assert_eq!(vertex.handle().style.opacity, 1.0);
    }

    #[test]
    fn test_touch_tap_places_point_without_hover() {
        let mut editable = Editable::new(PlanarView::with_zoom(100.0), EditableOptions::touch());
        let path = editable.start_path();
        let event = PointerEvent::touch(map_point(1.0, 1.0));
        editable.pointer_down(event);
        editable.pointer_up(event);
        editable.click(event);
        assert_eq!(positions(&editable, path), vec![map_point(1.0, 1.0)]);
        assert_eq!(editable.tools().new_click_handler.position, map_point(1.0, 1.0));
    }

    #[test]
    fn test_pointer_move_updates_guides_while_drawing() {
        let mut editable = editable();
        editable.start_path();
        editable.pointer_move(PointerEvent::mouse(map_point(0.5, 0.5)));
        assert!(editable.tools().forward_guide.points().is_empty());
        tap(&mut editable, PointerEvent::mouse(map_point(0.0, 0.0)));
        editable.pointer_move(PointerEvent::mouse(map_point(3.0, 0.0)));
        assert_eq!(editable.tools().forward_guide.cursor(), Some(map_point(3.0, 0.0)));
        assert_eq!(editable.tools().backward_guide.cursor(), Some(map_point(3.0, 0.0)));
    }

    #[test]
    fn test_point_drag_emits_editing_once() {
        let mut editable = editable();
        let point = editable.create_point(map_point(1.0, 1.0));
        editable.edit(point, false);
        editable.drain_events();
        editable.pointer_down(PointerEvent::mouse(map_point(1.0, 1.0)));
        editable.pointer_move(PointerEvent::mouse(map_point(2.0, 1.0)));
        editable.pointer_move(PointerEvent::mouse(map_point(3.0, 1.0)));
        editable.pointer_up(PointerEvent::mouse(map_point(3.0, 1.0)));
        assert_eq!(editable.geometry(point).unwrap().position(), Some(map_point(3.0, 1.0)));
        assert_eq!(editable.drain_events(), vec![EditEvent::Editing { geometry: point }]);
    }

    #[test]
    fn test_random_edits_keep_handles_consistent() {
        let mut rng = StdRng::seed_from_u64(0);
        for closed in [false, true] {
            let mut editable = editable();
            let initial: Vec<_> = (0..6).map(|i| map_point(i as f64 * 2.0, 0.0)).collect();
            let geometry = if closed {
                editable.create_ring(initial)
            } else {
                editable.create_path(initial)
            };
            editable.edit(geometry, false);

            for _ in 0..200 {
                let ring = editable.geometry(geometry).unwrap().primary_ring().clone();
                if ring.is_empty() {
                    break;
                }
                let pick = ring.get(rng.gen_range(0..ring.len())).unwrap().id;
                let len = ring.len();
                match rng.gen_range(0..3) {
                    0 => {
                        editable.click_vertex(geometry, pick, Modifiers::none());
                        assert_eq!(editable.geometry(geometry).unwrap().primary_ring().len(), len - 1);
                    }
                    1 => {
                        let at = map_point(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
                        assert!(editable.drag_vertex(geometry, pick, at));
                    }
                    _ => {
                        let has_middle = editable
                            .editor(geometry)
                            .unwrap()
                            .handles()
                            .vertex(pick)
                            .and_then(VertexHandle::middle)
                            .is_some();
                        let pressed = editable.press_middle(geometry, pick, map_point(0.0, 0.0));
                        assert_eq!(pressed.is_some(), has_middle);
                        if has_middle {
                            assert_eq!(editable.geometry(geometry).unwrap().primary_ring().len(), len + 1);
                        }
                    }
                }
                assert_consistent(&editable, geometry);
            }
        }
    }
}
