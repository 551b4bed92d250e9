use super::DrawingState;
use crate::input::Modifiers;
use log::trace;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VertexClickAction {
    CtrlClick,
    AltClick,
    ShiftClick,
    FinishDrawing,
    Remove,
}

/// Everything the click rules look at.
#[derive(Copy, Clone, Debug)]
pub struct VertexClickContext {
    pub modifiers: Modifiers,
    pub drawing: DrawingState,
    /// Index of the clicked vertex in its ring.
    pub index: usize,
    pub ring_len: usize,
    /// Length of the ring being drawn, if any.
    pub active_ring_len: Option<usize>,
}

impl VertexClickContext {
    fn is_last(&self) -> bool {
        self.index + 1 == self.ring_len
    }
}

pub struct VertexClickRule {
    pub name: &'static str,
    pub applies: fn(&VertexClickContext) -> bool,
    pub action: VertexClickAction,
}

/// Checked in order. The first rule that applies decides.
pub const VERTEX_CLICK_RULES: &[VertexClickRule] = &[
    VertexClickRule {
        name: "ctrl",
        applies: |cx| cx.modifiers.ctrl,
        action: VertexClickAction::CtrlClick,
    },
    VertexClickRule {
        name: "alt",
        applies: |cx| cx.modifiers.alt,
        action: VertexClickAction::AltClick,
    },
    VertexClickRule {
        name: "shift",
        applies: |cx| cx.modifiers.shift,
        action: VertexClickAction::ShiftClick,
    },
    VertexClickRule {
        name: "finish forward at last vertex",
        applies: |cx| cx.drawing == DrawingState::DrawingForward && cx.index >= 1 && cx.is_last(),
        action: VertexClickAction::FinishDrawing,
    },
    VertexClickRule {
        name: "finish backward at first vertex",
        applies: |cx| {
            cx.drawing == DrawingState::DrawingBackward && cx.index == 0 && cx.active_ring_len.unwrap_or(cx.ring_len) >= 2
        },
        action: VertexClickAction::FinishDrawing,
    },
];

pub fn matching_rule(cx: &VertexClickContext) -> Option<&'static VertexClickRule> {
    VERTEX_CLICK_RULES.iter().find(|rule| (rule.applies)(cx))
}

pub fn classify_vertex_click(cx: &VertexClickContext) -> VertexClickAction {
    match matching_rule(cx) {
        Some(rule) => {
            trace!("vertex click matched rule '{}'", rule.name);
            rule.action
        }
        None => VertexClickAction::Remove,
    }
}
