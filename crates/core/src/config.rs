//! Build constants for icon font stripping.

/// Class prefix marking an icon identifier, e.g. `bi-house`.
pub const ICON_PREFIX: &str = "bi-";

/// File stem shared by the icon font assets (`bootstrap-icons.woff2`,
/// `bootstrap-icons-3f2a1c.woff`, ...).
pub const FONT_STEM: &str = "bootstrap-icons";

/// Extensions of generated code scanned for class attributes.
pub const CODE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "html", "htm"];

/// Extensions of stylesheets pruned of unused icon rules.
pub const STYLESHEET_EXTENSIONS: &[&str] = &["css"];

/// Extensions of font assets that are subset.
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2"];
