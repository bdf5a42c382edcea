//! Host-facing observation hooks.

mod listeners;

pub use listeners::{ChartEvent, ChartListener, ListenerContext};
