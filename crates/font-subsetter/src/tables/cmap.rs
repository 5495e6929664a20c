//! cmap table
//!
//! The source cmap is inverted into per-glyph codepoint lists so that a
//! rebuilt cmap only ever points at glyphs that survived the subset.

use std::collections::HashMap;

use read_fonts::{
    FontRef, TableProvider,
    tables::cmap::{Cmap as ReadCmap, CmapSubtable, PlatformId},
    types::GlyphId,
};
use write_fonts::tables::cmap::Cmap;

use crate::{
    Result, SubsetError,
    types::{Codepoint, GlyphIndex},
};

/// Reads the font's best Unicode subtable as glyph → codepoints.
///
/// A font without a cmap yields an empty map.
pub(crate) fn read_codepoints(font: &FontRef) -> Result<HashMap<GlyphIndex, Vec<Codepoint>>> {
    let mut by_glyph: HashMap<GlyphIndex, Vec<Codepoint>> = HashMap::new();

    let Ok(cmap) = font.cmap() else {
        return Ok(by_glyph);
    };

    if let Some(subtable) = find_best_subtable(&cmap) {
        for (codepoint, glyph) in iter_cmap_subtable(&subtable) {
            by_glyph.entry(glyph).or_default().push(codepoint);
        }
    }

    for codepoints in by_glyph.values_mut() {
        codepoints.sort();
        codepoints.dedup();
    }

    Ok(by_glyph)
}

/// Builds a cmap from `(codepoint, glyph)` pairs.
///
/// Codepoints that are not Unicode scalar values are skipped.
pub(crate) fn build_cmap(mappings: impl IntoIterator<Item = (Codepoint, GlyphIndex)>) -> Result<Cmap> {
    let mut mappings: Vec<(char, GlyphId)> = mappings
        .into_iter()
        .filter_map(|(cp, glyph)| Some((cp.to_char()?, GlyphId::new(glyph.to_u16() as u32))))
        .collect();
    mappings.sort();

    Cmap::from_mappings(mappings).map_err(|_| SubsetError::CmapBuild)
}

fn find_best_subtable<'a>(cmap: &'a ReadCmap<'a>) -> Option<CmapSubtable<'a>> {
    let records = cmap.encoding_records();

    // Format 12 (full Unicode) first
    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 10))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format12(_))
        {
            return Some(subtable);
        }
    }

    // Then format 4 (BMP), including symbol-encoded icon fonts
    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows
                && matches!(record.encoding_id(), 0 | 1)))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format4(_))
        {
            return Some(subtable);
        }
    }

    records.iter().find_map(|r| r.subtable(cmap.offset_data()).ok())
}

fn iter_cmap_subtable(subtable: &CmapSubtable) -> Vec<(Codepoint, GlyphIndex)> {
    let mut mappings = Vec::new();

    match subtable {
        CmapSubtable::Format4(f4) => {
            let end_codes = f4.end_code();
            let start_codes = f4.start_code();
            let id_deltas = f4.id_delta();
            let id_range_offsets = f4.id_range_offsets();
            let glyph_id_array = f4.glyph_id_array();

            let seg_count = f4.seg_count_x2() as usize / 2;
            for seg in 0..seg_count {
                let end_code = end_codes.get(seg).map(|v| v.get()).unwrap_or(0xFFFF);
                let start_code = start_codes.get(seg).map(|v| v.get()).unwrap_or(0);
                let id_delta = id_deltas.get(seg).map(|v| v.get()).unwrap_or(0);
                let id_range_offset = id_range_offsets.get(seg).map(|v| v.get()).unwrap_or(0);

                if start_code == 0xFFFF || start_code > end_code {
                    continue;
                }

                for cp in start_code..=end_code {
                    let gid = if id_range_offset == 0 {
                        ((cp as i32 + id_delta as i32) & 0xFFFF) as u16
                    } else {
                        let glyph_idx = (id_range_offset as usize / 2 + (cp - start_code) as usize)
                            .checked_sub(seg_count - seg);
                        match glyph_idx.and_then(|i| glyph_id_array.get(i)).map(|g| g.get()) {
                            Some(0) | None => 0,
                            Some(gid) => ((gid as i32 + id_delta as i32) & 0xFFFF) as u16,
                        }
                    };

                    if gid != 0 {
                        mappings.push((Codepoint::new(cp as u32), GlyphIndex::new(gid)));
                    }
                }
            }
        }
        CmapSubtable::Format12(f12) => {
            for group in f12.groups() {
                let start = group.start_char_code();
                let end = group.end_char_code();
                let mut gid = group.start_glyph_id();
                for cp in start..=end {
                    if gid != 0
                        && let Ok(gid) = u16::try_from(gid)
                    {
                        mappings.push((Codepoint::new(cp), GlyphIndex::new(gid)));
                    }
                    gid = gid.saturating_add(1);
                }
            }
        }
        CmapSubtable::Format6(f6) => {
            let first = f6.first_code() as u32;
            for (i, gid) in f6.glyph_id_array().iter().enumerate() {
                let gid = gid.get();
                if gid != 0 {
                    mappings.push((Codepoint::new(first + i as u32), GlyphIndex::new(gid)));
                }
            }
        }
        _ => {}
    }

    mappings
}
