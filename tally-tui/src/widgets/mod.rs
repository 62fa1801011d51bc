//! Reusable widget components.

pub mod detail;
pub mod rows;
pub mod status;

pub use detail::DetailPanel;
pub use rows::{RowList, RowListStyle};
pub use status::StatusIndicator;
