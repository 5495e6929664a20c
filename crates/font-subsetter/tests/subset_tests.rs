use read_fonts::{FontRef, TableProvider, types::Tag};
use stripfont_font_subsetter::{
    Codepoint, DecodedFont, GlyphIndex, NOTDEF_SENTINEL, Outline, SubsetError, subset_font_bytes,
};
use stripfont_test_fonts::{IconFontBuilder, PUA_START, advance_width, sample_icon_font, square_size};

fn decode(data: &[u8]) -> DecodedFont {
    DecodedFont::from_sfnt(data).unwrap()
}

fn names(font: &DecodedFont) -> Vec<&str> {
    font.glyph_names().iter().map(String::as_str).collect()
}

/// Side length of a square outline, used to identify the source glyph.
fn outline_size(font: &DecodedFont, index: u16) -> i16 {
    match font.glyph(GlyphIndex::new(index)).unwrap().outline() {
        Outline::Simple(simple) => simple.bbox.x_max,
        other => panic!("expected simple outline, got {other:?}"),
    }
}

#[test]
fn test_decode_sample_font() {
    let font = decode(&sample_icon_font());
    assert_eq!(font.num_glyphs(), 7);
    assert_eq!(names(&font), [".notdef", "alarm", "bell", "house", "search", "person", "x"]);
    assert_eq!(font.full_name(), "Test Icons Regular");

    let house = font.glyph_by_name("house").unwrap();
    assert_eq!(house.index(), GlyphIndex::new(3));
    assert_eq!(house.codepoints(), &[Codepoint::new(PUA_START + 2)]);
    assert_eq!(house.metrics().advance_width, advance_width(3));
    assert!(font.glyph_by_name(".notdef").unwrap().codepoints().is_empty());
}

#[test]
fn test_subset_renumbers_in_request_order() {
    let _ = env_logger::builder().is_test(true).try_init();

    let font = decode(&sample_icon_font());
    let subset = font.subset([NOTDEF_SENTINEL, "search", "house", "person"]).unwrap();

    assert_eq!(subset.num_glyphs(), 4);
    assert_eq!(names(&subset), ["", "search", "house", "person"]);

    // Outlines travel with their names
    assert_eq!(outline_size(&subset, 0), square_size(0));
    assert_eq!(outline_size(&subset, 1), square_size(4));
    assert_eq!(outline_size(&subset, 2), square_size(3));
    assert_eq!(outline_size(&subset, 3), square_size(5));

    let search = subset.glyph(GlyphIndex::new(1)).unwrap();
    assert_eq!(search.name(), "search");
    assert_eq!(search.metrics().advance_width, advance_width(4));
    assert_eq!(search.codepoints(), &[Codepoint::new(PUA_START + 3)]);

    subset.validate().unwrap();
}

#[test]
fn test_subset_end_to_end_through_bytes() {
    let data = subset_font_bytes(&sample_icon_font(), [".notdef", "house", "search", "person"]).unwrap();
    let font = FontRef::new(&data).unwrap();

    assert_eq!(font.maxp().unwrap().num_glyphs(), 4);
    assert_eq!(font.hhea().unwrap().number_of_h_metrics(), 4);
    assert_eq!(font.hmtx().unwrap().h_metrics().len(), 4);

    let post = font.post().unwrap();
    let glyph_names: Vec<String> = (0..4)
        .map(|gid| post.glyph_name(read_fonts::types::GlyphId16::new(gid)).unwrap().to_string())
        .collect();
    assert_eq!(glyph_names, [".notdef", "house", "search", "person"]);

    let cmap = font.cmap().unwrap();
    assert_eq!(cmap.map_codepoint(PUA_START + 2).map(|g| g.to_u32()), Some(1));
    assert_eq!(cmap.map_codepoint(PUA_START + 3).map(|g| g.to_u32()), Some(2));
    assert_eq!(cmap.map_codepoint(PUA_START + 4).map(|g| g.to_u32()), Some(3));
    assert_eq!(cmap.map_codepoint(PUA_START), None);
}

#[test]
fn test_subset_result_round_trips() {
    let subset = decode(&sample_icon_font()).subset(["", "x", "alarm"]).unwrap();
    let redecoded = decode(&subset.to_sfnt().unwrap());

    assert_eq!(names(&redecoded), ["", "x", "alarm"]);
    assert_eq!(outline_size(&redecoded, 1), square_size(6));
    assert_eq!(outline_size(&redecoded, 2), square_size(1));
    assert_eq!(redecoded.full_name(), "Test Icons Regular");
}

#[test]
fn test_missing_glyph_is_an_error() {
    let font = decode(&sample_icon_font());
    let err = font.subset(["", "house", "does-not-exist"]).unwrap_err();
    assert!(matches!(&err, SubsetError::MissingGlyph { identifier } if identifier == "does-not-exist"));
    assert_eq!(err.to_string(), "Glyph \"does-not-exist\" not found");
}

#[test]
fn test_empty_selection_yields_empty_font() {
    let subset = decode(&sample_icon_font()).subset(Vec::<String>::new()).unwrap();
    assert_eq!(subset.num_glyphs(), 0);
    subset.validate().unwrap();
}

#[test]
fn test_repeated_identifiers_are_ignored() {
    let subset = decode(&sample_icon_font()).subset(["", "bell", "bell", "x"]).unwrap();
    assert_eq!(names(&subset), ["", "bell", "x"]);
}

#[test]
fn test_sentinel_prefers_glyph_named_empty() {
    let data = IconFontBuilder::new().empty_glyph("").glyph("house", PUA_START).build();
    let subset = decode(&data).subset(["", "house"]).unwrap();

    assert_eq!(names(&subset), ["", "house"]);
    assert_eq!(subset.glyph(GlyphIndex::NOTDEF).unwrap().outline(), &Outline::Empty);
}

#[test]
fn test_sentinel_falls_back_to_first_glyph() {
    let data = IconFontBuilder::new().rename_first("missing").glyph("house", PUA_START).build();
    let subset = decode(&data).subset(["", "house"]).unwrap();
    assert_eq!(outline_size(&subset, 0), square_size(0));
}

#[test]
fn test_sentinel_cannot_reuse_claimed_notdef() {
    let font = decode(&sample_icon_font());
    let err = font.subset([".notdef", ""]).unwrap_err();
    assert!(matches!(err, SubsetError::MissingGlyph { identifier } if identifier.is_empty()));
}

#[test]
fn test_duplicate_glyph_names_resolve_to_first() {
    let data = IconFontBuilder::new()
        .glyph("house", PUA_START)
        .glyph("house", PUA_START + 1)
        .build();
    let font = decode(&data);
    assert_eq!(font.glyph_by_name("house").unwrap().index(), GlyphIndex::new(1));

    let subset = font.subset(["", "house"]).unwrap();
    assert_eq!(outline_size(&subset, 1), square_size(1));
}

#[test]
fn test_composite_components_are_remapped() {
    let data = IconFontBuilder::new()
        .unmapped_glyph("dot")
        .glyph("house", PUA_START)
        .composite("house-dot", Some(PUA_START + 1), &[1, 2])
        .build();
    let subset = decode(&data).subset(["", "house-dot", "house", "dot"]).unwrap();

    let composite = subset.glyph(GlyphIndex::new(1)).unwrap();
    let components: Vec<_> = composite.outline().component_indices().collect();
    assert_eq!(components, [GlyphIndex::new(3), GlyphIndex::new(2)]);

    let redecoded = decode(&subset.to_sfnt().unwrap());
    let components: Vec<_> = redecoded
        .glyph_by_name("house-dot")
        .unwrap()
        .outline()
        .component_indices()
        .collect();
    assert_eq!(components, [GlyphIndex::new(3), GlyphIndex::new(2)]);
}

#[test]
fn test_composite_with_unselected_component_is_rejected() {
    let data = IconFontBuilder::new()
        .unmapped_glyph("dot")
        .composite("dotted", Some(PUA_START), &[1])
        .build();
    let err = decode(&data).subset(["", "dotted"]).unwrap_err();
    assert!(matches!(
        err,
        SubsetError::DanglingComponent { glyph, component } if glyph == "dotted" && component == GlyphIndex::new(1)
    ));
}

#[test]
fn test_glyph_indexed_tables_are_dropped_and_others_kept() {
    let data = IconFontBuilder::new()
        .glyph("house", PUA_START)
        .table(b"GSUB", &[0, 1, 0, 0])
        .table(b"FFTM", &[0, 0, 0, 1, 2, 3, 4, 5])
        .build();
    let font = decode(&data);

    let tags: Vec<Tag> = font.extra_table_tags().collect();
    assert!(tags.contains(&Tag::new(b"FFTM")));
    assert!(tags.contains(&Tag::new(b"name")));
    assert!(!tags.contains(&Tag::new(b"GSUB")));

    let subset = font.subset(["", "house"]).unwrap();
    let out = subset.to_sfnt().unwrap();
    let out = FontRef::new(&out).unwrap();
    assert!(out.table_data(Tag::new(b"GSUB")).is_none());
    assert_eq!(
        out.table_data(Tag::new(b"FFTM")).unwrap().as_bytes(),
        &[0, 0, 0, 1, 2, 3, 4, 5]
    );
}

#[test]
fn test_cff_fonts_are_rejected() {
    let data = IconFontBuilder::new().table(b"CFF ", &[1, 0, 4, 4]).build();
    let err = DecodedFont::from_sfnt(&data).unwrap_err();
    assert!(matches!(err, SubsetError::UnsupportedOutlines("CFF ")));
}

#[test]
fn test_post_v3_uses_positional_names() {
    let data = IconFontBuilder::new().glyph("house", PUA_START).without_glyph_names().build();
    let font = decode(&data);
    assert_eq!(names(&font), ["glyph00000", "glyph00001"]);
    assert!(font.subset(["", "glyph00001"]).is_ok());
}

#[test]
fn test_unnamed_font() {
    let data = IconFontBuilder::new().full_name(None).build();
    assert_eq!(decode(&data).full_name(), stripfont_font_subsetter::UNNAMED_FONT);
}

#[test]
fn test_advance_width_max_tracks_survivors() {
    let subset_bytes = subset_font_bytes(&sample_icon_font(), ["", "alarm"]).unwrap();
    let font = FontRef::new(&subset_bytes).unwrap();
    assert_eq!(font.hhea().unwrap().advance_width_max().to_u16(), advance_width(1));
}
