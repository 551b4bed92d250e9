pub mod editable;
pub mod editor;
pub mod events;
pub mod geometry;
pub mod geometry_utilities;
pub mod handles;
pub mod input;
pub mod layer;
pub mod multi;
pub mod options;
pub mod pointer;
pub mod ring;
pub mod surface;
pub mod tools;

pub use editable::Editable;
pub use editor::{DrawConstraint, DrawingState, GeometryEditor};
pub use events::EditEvent;
pub use geometry::{Geometry, GeometryKind, GeometryReference};
pub use options::EditableOptions;
pub use surface::{MapSurface, PlanarView};
