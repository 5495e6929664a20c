//! stripfont CLI library.

pub mod cli;
