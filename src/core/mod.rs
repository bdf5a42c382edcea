pub mod animation;
pub mod clock;
pub mod gridlines;
pub mod layout;
pub mod picker;
pub mod primitives;
pub mod range_index;
pub mod series;
pub mod types;
pub mod viewport;

pub use animation::{Easing, Tween};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use gridlines::{GridLines, nice_step};
pub use layout::ChartLayout;
pub use picker::{PickerWindow, min_distance};
pub use primitives::{format_day_label, format_selection_date};
pub use range_index::RangeIndex;
pub use series::{DAY_MS, Series, SeriesId, Timeline};
pub use types::Rect;
pub use viewport::ChartViewport;
