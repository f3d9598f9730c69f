//! per-hour reach of a road's impact and the matching trimmed geometry.
mod extent_config;
mod segment_extent;
mod trim_ops;

pub use extent_config::{BaseDistances, ExtentConfig, HourRange, SeverityBand};
pub use segment_extent::{ExtentClass, SegmentExtentCalculator};
pub use trim_ops::{trim, DirectionMode, TrimParams, TrimmedPath};
