//! Pointer arbitration and selection state.
//!
//! The arbiter only decodes intents; applying them to the picker window or
//! the selected sample is the controller's job.

mod gesture;
mod pointer;
mod selection;

pub use gesture::{
    GestureArbiter, GestureConfig, GestureContext, GestureIntent, GestureResponse, GestureState,
};
pub use pointer::{PointerEvent, PointerId, PointerPhase};
pub use selection::{SelectionSnapshot, SelectionState};
