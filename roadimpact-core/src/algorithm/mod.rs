pub mod classification;
pub mod color;
pub mod extent;
pub mod geometry_ops;
