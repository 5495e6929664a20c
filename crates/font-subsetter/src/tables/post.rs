//! post table (glyph names)

use font_types::Version16Dot16;
use log::warn;
use read_fonts::{FontRef, TableProvider, types::GlyphId16};
use write_fonts::{from_obj::ToOwnedTable, tables::post::Post};

use crate::Result;

/// Reads the glyph name of every glyph.
///
/// Glyphs the post table cannot name get a positional `glyphNNNNN` name.
pub(crate) fn read_glyph_names(font: &FontRef, num_glyphs: u16) -> Result<(Post, Vec<String>)> {
    let post = font.post()?;

    let names: Vec<String> = (0..num_glyphs)
        .map(|gid| {
            post.glyph_name(GlyphId16::new(gid))
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("glyph{gid:05}"))
        })
        .collect();

    if post.version() == Version16Dot16::VERSION_3_0 {
        warn!("post table version 3.0 carries no glyph names; using positional names");
    }

    Ok((post.to_owned_table(), names))
}

/// Builds a version 2.0 post table naming glyphs in order.
///
/// Metric fields are carried over from `source`.
pub(crate) fn build_post<'a>(source: &Post, names: impl IntoIterator<Item = &'a str>) -> Post {
    let mut post = Post::new_v2(names);
    post.italic_angle = source.italic_angle;
    post.underline_position = source.underline_position;
    post.underline_thickness = source.underline_thickness;
    post.is_fixed_pitch = source.is_fixed_pitch;
    post.min_mem_type42 = source.min_mem_type42;
    post.max_mem_type42 = source.max_mem_type42;
    post.min_mem_type1 = source.min_mem_type1;
    post.max_mem_type1 = source.max_mem_type1;
    post
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_post_keeps_metrics() {
        let mut source = Post::new_v2([".notdef"]);
        source.is_fixed_pitch = 1;
        source.underline_thickness = font_types::FWord::new(42);

        let post = build_post(&source, ["", "home"]);
        assert_eq!(post.is_fixed_pitch, 1);
        assert_eq!(post.underline_thickness, font_types::FWord::new(42));
        assert_eq!(post.num_glyphs, Some(2));
    }
}
