//! Synthetic icon fonts for tests
//!
//! [`IconFontBuilder`] assembles a small TrueType font where every glyph is
//! distinguishable: glyph `i` is a square of side `100 + 10 * i` with an
//! advance width of `500 + i`. Tests can therefore tell which source glyph
//! ended up at which position after a subset.

use read_fonts::{tables::glyf::CurvePoint, types::GlyphId};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{Anchor, Bbox, Component, CompositeGlyph, Contour, GlyfLocaBuilder, Glyph, SimpleGlyph, Transform},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        name::{Name, NameRecord},
        post::Post,
    },
    types::{GlyphId16, NameId, Tag},
};

/// First codepoint of the Private Use Area, where icon fonts map their glyphs.
pub const PUA_START: u32 = 0xF101;

/// Icon names used by [`sample_icon_font`], after `.notdef`.
pub const SAMPLE_ICONS: &[&str] = &["alarm", "bell", "house", "search", "person", "x"];

/// Side length of the square outline drawn for glyph `index`.
pub fn square_size(index: u16) -> i16 {
    100 + 10 * index as i16
}

/// Advance width assigned to glyph `index`.
pub fn advance_width(index: u16) -> u16 {
    500 + index
}

enum Shape {
    Square,
    Empty,
    Composite(Vec<u16>),
}

struct TestGlyph {
    name: String,
    codepoint: Option<u32>,
    shape: Shape,
}

/// Builder for synthetic TrueType icon fonts.
pub struct IconFontBuilder {
    glyphs: Vec<TestGlyph>,
    full_name: Option<String>,
    glyph_names: bool,
    extra_tables: Vec<(Tag, Vec<u8>)>,
}

impl Default for IconFontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IconFontBuilder {
    /// A font containing only `.notdef`.
    pub fn new() -> Self {
        Self {
            glyphs: vec![TestGlyph {
                name: ".notdef".to_string(),
                codepoint: None,
                shape: Shape::Square,
            }],
            full_name: Some("Test Icons Regular".to_string()),
            glyph_names: true,
            extra_tables: Vec::new(),
        }
    }

    /// Adds a square glyph mapped to `codepoint`.
    pub fn glyph(mut self, name: &str, codepoint: u32) -> Self {
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            codepoint: Some(codepoint),
            shape: Shape::Square,
        });
        self
    }

    /// Adds a square glyph with no cmap entry.
    pub fn unmapped_glyph(mut self, name: &str) -> Self {
        self.glyphs.push(TestGlyph { name: name.to_string(), codepoint: None, shape: Shape::Square });
        self
    }

    /// Adds a glyph with no outline.
    pub fn empty_glyph(mut self, name: &str) -> Self {
        self.glyphs.push(TestGlyph { name: name.to_string(), codepoint: None, shape: Shape::Empty });
        self
    }

    /// Adds a composite glyph built from the glyphs at `components`.
    pub fn composite(mut self, name: &str, codepoint: Option<u32>, components: &[u16]) -> Self {
        self.glyphs.push(TestGlyph {
            name: name.to_string(),
            codepoint,
            shape: Shape::Composite(components.to_vec()),
        });
        self
    }

    /// Replaces `.notdef` with a glyph of a different name.
    pub fn rename_first(mut self, name: &str) -> Self {
        if let Some(first) = self.glyphs.first_mut() {
            first.name = name.to_string();
        }
        self
    }

    /// Sets the full name (name ID 4), or omits the name table with `None`.
    pub fn full_name(mut self, name: Option<&str>) -> Self {
        self.full_name = name.map(str::to_string);
        self
    }

    /// Writes a version 3.0 post table, which carries no glyph names.
    pub fn without_glyph_names(mut self) -> Self {
        self.glyph_names = false;
        self
    }

    /// Adds an opaque table copied verbatim into the font.
    pub fn table(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.extra_tables.push((Tag::new(tag), data.to_vec()));
        self
    }

    /// Serializes the font.
    ///
    /// # Panics
    ///
    /// Panics if two glyphs claim the same codepoint or a table fails to
    /// serialize.
    pub fn build(&self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16;
        let max_size = square_size(num_glyphs.saturating_sub(1));

        let mut glyf_builder = GlyfLocaBuilder::new();
        for (gid, glyph) in self.glyphs.iter().enumerate() {
            let outline = match &glyph.shape {
                Shape::Square => Glyph::Simple(square(square_size(gid as u16))),
                Shape::Empty => Glyph::Empty,
                Shape::Composite(components) => composite(components, max_size),
            };
            glyf_builder.add_glyph(&outline).expect("glyph");
        }
        let (glyf, loca, loca_format) = glyf_builder.build();

        let mappings: Vec<(char, GlyphId)> = self
            .glyphs
            .iter()
            .enumerate()
            .filter_map(|(gid, glyph)| {
                let ch = char::from_u32(glyph.codepoint?)?;
                Some((ch, GlyphId::new(gid as u32)))
            })
            .collect();
        let cmap = Cmap::from_mappings(mappings).expect("cmap");

        let head = Head {
            font_revision: font_types::Fixed::from_f64(1.0),
            checksum_adjustment: 0,
            magic_number: 0x5F0F3CF5,
            flags: write_fonts::tables::head::Flags::empty(),
            units_per_em: 1000,
            created: font_types::LongDateTime::new(0),
            modified: font_types::LongDateTime::new(0),
            x_min: 0,
            y_min: 0,
            x_max: max_size,
            y_max: max_size,
            mac_style: write_fonts::tables::head::MacStyle::empty(),
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: match loca_format {
                LocaFormat::Short => 0,
                LocaFormat::Long => 1,
            },
        };

        let hhea = Hhea {
            ascender: font_types::FWord::new(800),
            descender: font_types::FWord::new(-200),
            line_gap: font_types::FWord::new(0),
            advance_width_max: font_types::UfWord::new(advance_width(num_glyphs.saturating_sub(1))),
            min_left_side_bearing: font_types::FWord::new(0),
            min_right_side_bearing: font_types::FWord::new(0),
            x_max_extent: font_types::FWord::new(max_size),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: num_glyphs,
        };

        let hmtx = Hmtx {
            h_metrics: (0..num_glyphs)
                .map(|gid| LongMetric { advance: advance_width(gid), side_bearing: 0 })
                .collect(),
            left_side_bearings: vec![],
        };

        let maxp = Maxp {
            num_glyphs,
            max_points: Some(4),
            max_contours: Some(1),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(1),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        };

        let mut post = if self.glyph_names {
            Post::new_v2(self.glyphs.iter().map(|g| g.name.as_str()))
        } else {
            Post {
                version: font_types::Version16Dot16::VERSION_3_0,
                num_glyphs: None,
                glyph_name_index: None,
                string_data: None,
                ..Post::new_v2([".notdef"])
            }
        };
        post.underline_position = font_types::FWord::new(-100);
        post.underline_thickness = font_types::FWord::new(50);

        let mut builder = FontBuilder::new();
        builder.add_table(&head).expect("head");
        builder.add_table(&hhea).expect("hhea");
        builder.add_table(&hmtx).expect("hmtx");
        builder.add_table(&maxp).expect("maxp");
        builder.add_table(&cmap).expect("cmap");
        builder.add_table(&post).expect("post");
        builder.add_table(&glyf).expect("glyf");
        builder.add_table(&loca).expect("loca");

        if let Some(full_name) = &self.full_name {
            let record = NameRecord::new(3, 1, 0x409, NameId::new(4), full_name.clone().into());
            builder.add_table(&Name::new(vec![record])).expect("name");
        }

        for (tag, data) in &self.extra_tables {
            builder.add_raw(*tag, data.clone());
        }

        builder.build()
    }
}

/// `.notdef` followed by [`SAMPLE_ICONS`], mapped from [`PUA_START`] upwards.
pub fn sample_icon_font() -> Vec<u8> {
    SAMPLE_ICONS
        .iter()
        .enumerate()
        .fold(IconFontBuilder::new(), |builder, (i, name)| builder.glyph(name, PUA_START + i as u32))
        .build()
}

fn square(size: i16) -> SimpleGlyph {
    let points = vec![
        CurvePoint { x: 0, y: 0, on_curve: true },
        CurvePoint { x: size, y: 0, on_curve: true },
        CurvePoint { x: size, y: size, on_curve: true },
        CurvePoint { x: 0, y: size, on_curve: true },
    ];
    SimpleGlyph {
        bbox: Bbox { x_min: 0, y_min: 0, x_max: size, y_max: size },
        contours: vec![Contour::from(points)],
        instructions: vec![],
    }
}

fn composite(components: &[u16], size: i16) -> Glyph {
    let bbox = Bbox { x_min: 0, y_min: 0, x_max: size, y_max: size };
    let mut components = components.iter().map(|gid| Component {
        glyph: GlyphId16::new(*gid),
        anchor: Anchor::Offset { x: 0, y: 0 },
        transform: Transform::default(),
        flags: Default::default(),
    });
    let Some(first) = components.next() else {
        return Glyph::Empty;
    };
    let mut glyph = CompositeGlyph::new(first, bbox);
    for component in components {
        glyph.add_component(component, bbox);
    }
    Glyph::Composite(glyph)
}
