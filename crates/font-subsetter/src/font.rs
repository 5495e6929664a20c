//! The decoded, in-memory font
//!
//! A [`DecodedFont`] owns one [`GlyphRecord`] per glyph plus the tables
//! needed to serialize it again. Tables that are derived from the glyph
//! records (`glyf`, `loca`, `hmtx`, `cmap`, `post`) are rebuilt on encode;
//! tables that index glyphs but are not rewritten are dropped on decode.

use std::collections::{BTreeMap, HashSet};

use log::{debug, warn};
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{head::Head, hhea::Hhea, loca::LocaFormat, maxp::Maxp, post::Post},
};

use crate::{
    Result, SubsetError,
    tables::{
        cmap, glyf,
        glyf::Outline,
        hmtx,
        hmtx::HorizontalMetrics,
        name, post,
    },
    types::{Codepoint, GlyphIndex},
};

/// Tables regenerated from the glyph records.
const REBUILT_TABLES: &[[u8; 4]] = &[
    *b"head", *b"hhea", *b"maxp", *b"hmtx", *b"post", *b"cmap", *b"glyf", *b"loca",
];

/// Glyph-indexed tables that are not rewritten.
///
/// Keeping them after renumbering would leave them pointing at the wrong glyphs.
pub const DROPPED_TABLES: &[[u8; 4]] = &[
    *b"GSUB", *b"GPOS", *b"GDEF", *b"BASE", *b"JSTF", *b"MATH", *b"kern", *b"hdmx", *b"LTSH",
    *b"VDMX", *b"vhea", *b"vmtx", *b"COLR", *b"CPAL", *b"SVG ", *b"sbix", *b"CBDT", *b"CBLC",
    *b"EBDT", *b"EBLC", *b"EBSC", *b"gvar", *b"HVAR", *b"VVAR", *b"DSIG",
];

/// One glyph: its name, position, outline, metrics and mapped codepoints.
#[derive(Debug)]
pub struct GlyphRecord {
    pub(crate) name: String,
    pub(crate) index: GlyphIndex,
    pub(crate) outline: Outline,
    pub(crate) metrics: HorizontalMetrics,
    pub(crate) codepoints: Vec<Codepoint>,
}

impl GlyphRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> GlyphIndex {
        self.index
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn metrics(&self) -> HorizontalMetrics {
        self.metrics
    }

    /// Codepoints mapped to this glyph, in ascending order.
    pub fn codepoints(&self) -> &[Codepoint] {
        &self.codepoints
    }
}

/// A TrueType font decoded into glyph records.
///
/// Invariant: the glyph mapping, the naming table and the declared glyph
/// count agree, and indices are exactly `0..num_glyphs`.
#[derive(Debug)]
pub struct DecodedFont {
    pub(crate) glyphs: BTreeMap<GlyphIndex, GlyphRecord>,
    pub(crate) names: Vec<String>,
    pub(crate) num_glyphs: u16,
    pub(crate) head: Head,
    pub(crate) hhea: Hhea,
    pub(crate) maxp: Maxp,
    pub(crate) post: Post,
    extra_tables: Vec<(Tag, Vec<u8>)>,
    full_name: String,
}

impl DecodedFont {
    /// Decodes an uncompressed sfnt (TrueType) font.
    pub fn from_sfnt(data: &[u8]) -> Result<Self> {
        let font = FontRef::new(data)?;

        if font.table_data(Tag::new(b"CFF ")).is_some() {
            return Err(SubsetError::UnsupportedOutlines("CFF "));
        }
        if font.table_data(Tag::new(b"CFF2")).is_some() {
            return Err(SubsetError::UnsupportedOutlines("CFF2"));
        }

        let mut head: Head = font.head()?.to_owned_table();
        head.checksum_adjustment = 0; // Will be recomputed on write
        let maxp: Maxp = font.maxp()?.to_owned_table();
        let num_glyphs = maxp.num_glyphs;
        // Every glyph gets a long metric on encode
        let mut hhea: Hhea = font.hhea()?.to_owned_table();
        hhea.number_of_h_metrics = num_glyphs;

        let (post, names) = post::read_glyph_names(&font, num_glyphs)?;
        let metrics = hmtx::read_metrics(&font, num_glyphs)?;
        let outlines = glyf::read_outlines(&font, num_glyphs)?;
        let mut codepoints = cmap::read_codepoints(&font)?;

        warn_duplicate_names(&names);

        let glyphs: BTreeMap<GlyphIndex, GlyphRecord> = names
            .iter()
            .cloned()
            .zip(outlines)
            .zip(metrics)
            .enumerate()
            .map(|(gid, ((name, outline), metrics))| {
                let index = GlyphIndex::new(gid as u16);
                let codepoints = codepoints.remove(&index).unwrap_or_default();
                (index, GlyphRecord { name, index, outline, metrics, codepoints })
            })
            .collect();

        if !codepoints.is_empty() {
            debug!("Ignoring cmap entries for {} out-of-range glyphs", codepoints.len());
        }

        let rebuilt: HashSet<Tag> = REBUILT_TABLES.iter().map(Tag::new).collect();
        let dropped: HashSet<Tag> = DROPPED_TABLES.iter().map(Tag::new).collect();

        let mut extra_tables = Vec::new();
        for record in font.table_directory.table_records() {
            let tag = record.tag();
            if rebuilt.contains(&tag) {
                continue;
            }
            if dropped.contains(&tag) {
                debug!("Dropping glyph-indexed table '{tag}'");
                continue;
            }
            if let Some(data) = font.table_data(tag) {
                extra_tables.push((tag, data.as_bytes().to_vec()));
            }
        }

        Ok(Self {
            glyphs,
            names,
            num_glyphs,
            head,
            hhea,
            maxp,
            post,
            extra_tables,
            full_name: name::declared_name(&font),
        })
    }

    /// Serializes the font as an uncompressed sfnt.
    ///
    /// Fails without producing output if the glyph tables are inconsistent.
    pub fn to_sfnt(&self) -> Result<Vec<u8>> {
        self.validate()?;

        let (glyf, loca, loca_format) =
            glyf::build_glyf_loca(self.glyphs.values().map(|g| &g.outline))?;

        let mut head = self.head.clone();
        head.index_to_loc_format = match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        };

        let hmtx = hmtx::build_hmtx(self.glyphs.values().map(|g| &g.metrics));
        let post = post::build_post(&self.post, self.names.iter().map(String::as_str));
        let cmap = cmap::build_cmap(
            self.glyphs
                .values()
                .flat_map(|g| g.codepoints.iter().map(move |cp| (*cp, g.index))),
        )?;

        let mut builder = FontBuilder::new();
        builder.add_table(&head)?;
        builder.add_table(&self.maxp)?;
        builder.add_table(&self.hhea)?;
        builder.add_table(&hmtx)?;
        builder.add_table(&post)?;
        builder.add_table(&cmap)?;
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;

        for (tag, data) in &self.extra_tables {
            builder.add_raw(*tag, data.as_slice());
        }

        Ok(builder.build())
    }

    /// Checks the cross-table invariants.
    pub fn validate(&self) -> Result<()> {
        let count = self.num_glyphs as usize;

        if self.glyphs.len() != count || self.names.len() != count {
            return Err(SubsetError::Inconsistent(format!(
                "declared {count} glyphs but have {} glyph records and {} names",
                self.glyphs.len(),
                self.names.len()
            )));
        }
        if self.maxp.num_glyphs != self.num_glyphs {
            return Err(SubsetError::Inconsistent(format!(
                "maxp declares {} glyphs, expected {count}",
                self.maxp.num_glyphs
            )));
        }
        if self.hhea.number_of_h_metrics != self.num_glyphs {
            return Err(SubsetError::Inconsistent(format!(
                "hhea declares {} metrics, expected {count}",
                self.hhea.number_of_h_metrics
            )));
        }

        for (position, ((index, record), name)) in self.glyphs.iter().zip(&self.names).enumerate() {
            if index.to_usize() != position || record.index != *index {
                return Err(SubsetError::Inconsistent(format!(
                    "glyph index space is not contiguous at position {position}"
                )));
            }
            if record.name != *name {
                return Err(SubsetError::Inconsistent(format!(
                    "glyph {index} is named {:?} but the naming table says {name:?}",
                    record.name
                )));
            }
            if let Some(component) = record.outline.component_indices().find(|c| c.to_usize() >= count)
            {
                return Err(SubsetError::DanglingComponent { glyph: record.name.clone(), component });
            }
        }

        Ok(())
    }

    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    /// The naming table, one name per glyph index.
    pub fn glyph_names(&self) -> &[String] {
        &self.names
    }

    /// Glyph records in index order.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphRecord> {
        self.glyphs.values()
    }

    pub fn glyph(&self, index: GlyphIndex) -> Option<&GlyphRecord> {
        self.glyphs.get(&index)
    }

    /// The lowest-indexed glyph with the given name.
    pub fn glyph_by_name(&self, name: &str) -> Option<&GlyphRecord> {
        self.glyphs.values().find(|g| g.name == name)
    }

    /// The declared full name (name ID 4), or the family name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Tags of the tables copied through unchanged.
    pub fn extra_table_tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.extra_tables.iter().map(|(tag, _)| *tag)
    }

    pub fn extra_table(&self, tag: Tag) -> Option<&[u8]> {
        self.extra_tables
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, data)| data.as_slice())
    }
}

fn warn_duplicate_names(names: &[String]) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            warn!("Glyph name {name:?} is used by more than one glyph; lookups use the first");
        }
    }
}
