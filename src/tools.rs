use crate::geometry::GeometryReference;
use crate::geometry_utilities::types::*;
use crate::handles::{Draggable, HandleStyle};
use crate::layer::LayerGroup;
use crate::options::EditableOptions;
use arrayvec::ArrayVec;
use log::trace;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GuideStyle {
    pub weight: f64,
    pub dash_array: [f64; 2],
    pub z_index: i32,
}

/// Dashed preview segment from the last placed point to the pointer.
#[derive(Clone, Debug)]
pub struct GuideLine {
    anchor: Option<MapPoint>,
    cursor: Option<MapPoint>,
    pub style: GuideStyle,
}

impl GuideLine {
    pub fn new(style: GuideStyle) -> GuideLine {
        GuideLine {
            anchor: None,
            cursor: None,
            style,
        }
    }

    pub fn anchor(&self) -> Option<MapPoint> {
        self.anchor
    }

    pub fn cursor(&self) -> Option<MapPoint> {
        self.cursor
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn set_anchor(&mut self, position: MapPoint) {
        self.anchor = Some(position);
    }

    /// Moves the live endpoint. Does nothing until the guide is anchored.
    pub fn move_to(&mut self, position: MapPoint) {
        if self.anchor.is_some() {
            self.cursor = Some(position);
        }
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.cursor = None;
    }

    pub fn points(&self) -> ArrayVec<MapPoint, 2> {
        self.anchor.into_iter().chain(self.cursor).collect()
    }
}

/// Things the controller shows on its edit layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EditLayerItem {
    ForwardGuide,
    BackwardGuide,
    NewClickHandler,
    /// The handle layer of one geometry's editor.
    Handles(GeometryReference),
}

/// Shared drawing state of a map session.
///
/// Only one editor draws at a time. It owns the invisible handle that follows the
/// pointer and receives clicks, and the two guide lines.
pub struct DrawingTools {
    drawing_editor: Option<GeometryReference>,
    pub forward_guide: GuideLine,
    pub backward_guide: GuideLine,
    pub new_click_handler: Draggable,
    pub edit_layer: LayerGroup<EditLayerItem>,
}

impl DrawingTools {
    pub fn new(options: &EditableOptions, center: MapPoint) -> DrawingTools {
        let guide_style = GuideStyle {
            weight: options.guide_weight,
            dash_array: options.guide_dash_array,
            z_index: options.guide_z_index,
        };
        DrawingTools {
            drawing_editor: None,
            forward_guide: GuideLine::new(guide_style),
            backward_guide: GuideLine::new(guide_style),
            new_click_handler: Draggable::new(
                center,
                HandleStyle {
                    opacity: 0.0,
                    z_index: options.guide_z_index,
                    size: options.handle_size(),
                },
            ),
            edit_layer: LayerGroup::default(),
        }
    }

    pub fn drawing_editor(&self) -> Option<GeometryReference> {
        self.drawing_editor
    }

    pub fn anchor_forward_guide(&mut self, position: MapPoint) {
        self.forward_guide.set_anchor(position);
    }

    pub fn anchor_backward_guide(&mut self, position: MapPoint) {
        self.backward_guide.set_anchor(position);
    }

    pub fn move_forward_guide(&mut self, position: MapPoint) {
        self.forward_guide.move_to(position);
    }

    pub fn move_backward_guide(&mut self, position: MapPoint) {
        self.backward_guide.move_to(position);
    }

    pub fn attach_forward_guide(&mut self) {
        self.edit_layer.add(EditLayerItem::ForwardGuide);
    }

    pub fn attach_backward_guide(&mut self) {
        self.edit_layer.add(EditLayerItem::BackwardGuide);
    }

    pub fn detach_forward_guide(&mut self) {
        self.forward_guide.clear();
        self.edit_layer.remove(&EditLayerItem::ForwardGuide);
    }

    pub fn detach_backward_guide(&mut self) {
        self.backward_guide.clear();
        self.edit_layer.remove(&EditLayerItem::BackwardGuide);
    }

    pub fn is_attached(&self, item: EditLayerItem) -> bool {
        self.edit_layer.contains(&item)
    }

    pub(crate) fn bind(&mut self, editor: GeometryReference) {
        trace!("binding drawing input to {:?}", editor);
        self.drawing_editor = Some(editor);
        self.edit_layer.add(EditLayerItem::NewClickHandler);
    }

    pub(crate) fn unbind(&mut self) {
        self.drawing_editor = None;
        self.edit_layer.remove(&EditLayerItem::NewClickHandler);
    }
}
