use crate::geometry::GeometryReference;
use crate::geometry_utilities::types::*;
use crate::ring::CoordinateId;
use log::debug;

/// Payload of the vertex click notifications.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexClick {
    pub geometry: GeometryReference,
    pub vertex: CoordinateId,
    /// Index of the vertex within its ring at the time of the click.
    pub index: usize,
    pub position: MapPoint,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditEvent {
    Created { geometry: GeometryReference },
    Enabled { geometry: GeometryReference },
    Disabled { geometry: GeometryReference },
    Editing { geometry: GeometryReference },
    Edited { geometry: GeometryReference },
    RegisteredEditor { geometry: GeometryReference },
    UnregisteredEditor { geometry: GeometryReference },
    VertexCtrlClick(VertexClick),
    VertexAltClick(VertexClick),
    VertexShiftClick(VertexClick),
    NewClick { geometry: GeometryReference, position: MapPoint },
}

impl EditEvent {
    pub fn geometry(&self) -> GeometryReference {
        match self {
            EditEvent::Created { geometry }
            | EditEvent::Enabled { geometry }
            | EditEvent::Disabled { geometry }
            | EditEvent::Editing { geometry }
            | EditEvent::Edited { geometry }
            | EditEvent::RegisteredEditor { geometry }
            | EditEvent::UnregisteredEditor { geometry }
            | EditEvent::NewClick { geometry, .. } => *geometry,
            EditEvent::VertexCtrlClick(click) | EditEvent::VertexAltClick(click) | EditEvent::VertexShiftClick(click) => {
                click.geometry
            }
        }
    }
}

/// Notifications waiting for the host, in emission order.
#[derive(Default, Debug)]
pub struct EventQueue {
    events: Vec<EditEvent>,
}

impl EventQueue {
    pub fn emit(&mut self, event: EditEvent) {
        debug!("{:?}", event);
        self.events.push(event);
    }

    pub fn pending(&self) -> &[EditEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<EditEvent> {
        std::mem::take(&mut self.events)
    }
}
