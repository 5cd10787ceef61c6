//! Operator customization of the dashboard canvas: where widgets sit, which
//! are visible, how large they render and what their labels say.

pub mod labels;
pub mod position;
pub mod sizing;
pub mod visibility;

pub use labels::LabelState;
pub use position::{CanvasRect, Position, PositionMap};
pub use sizing::SizeState;
pub use visibility::VisibilityMap;
