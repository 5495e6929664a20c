//! stripfont core - strip unused icons from a web build's icon font and stylesheet.

pub mod assets;
pub mod config;
mod error;
pub mod io;
mod options;
pub mod pipeline;
pub mod stylesheet;
pub mod usage;

pub use error::{Result, StripError};
pub use options::Options;
pub use pipeline::{
    AssetReport, Outcome, RewriteReport, rewrite_output, scan_output, strip_output, strip_outputs,
};
pub use stripfont_font_container::{ContainerKind, decode as decode_font, encode as encode_font};
pub use stripfont_font_subsetter::{DecodedFont, NOTDEF_SENTINEL};
pub use stylesheet::{Pruned, prune};
pub use usage::{UsageCollector, UsageSet};
