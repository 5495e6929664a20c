//! Per-table readers and builders

pub mod cmap;
pub mod glyf;
pub mod hmtx;
pub mod name;
pub mod post;
