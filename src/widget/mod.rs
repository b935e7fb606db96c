pub mod aggregator;
pub mod query;
pub mod render;

pub use aggregator::TrackAggregator;
pub use query::{RawQuery, WidgetQuery};
