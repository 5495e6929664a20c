//! Name-driven glyph subsetting

use std::collections::{BTreeMap, HashMap, HashSet};

use font_types::UfWord;
use log::{debug, info};

use crate::{DecodedFont, Result, SubsetError, types::GlyphIndex};

/// The identifier that selects the font's `.notdef` glyph.
///
/// It resolves to a glyph literally named `""` if the font has one, and to
/// glyph 0 otherwise.
pub const NOTDEF_SENTINEL: &str = "";

impl DecodedFont {
    /// Reduces the font to exactly the glyphs named in `used`.
    ///
    /// Surviving glyphs are renumbered densely in iteration order, so the
    /// first identifier becomes glyph 0. Each surviving glyph is renamed to
    /// the identifier that selected it. Repeated identifiers are ignored.
    ///
    /// Fails with [`SubsetError::MissingGlyph`] on the first identifier that
    /// names no glyph, and with [`SubsetError::DanglingComponent`] if a kept
    /// composite references a glyph that was not selected.
    pub fn subset<I, S>(mut self, used: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = self.select(used)?;
        let total = self.num_glyphs;

        // At most one entry per existing glyph, so positions fit in u16
        let remap: HashMap<GlyphIndex, GlyphIndex> = selection
            .iter()
            .enumerate()
            .map(|(position, (_, old))| (*old, GlyphIndex::new(position as u16)))
            .collect();

        let mut glyphs = BTreeMap::new();
        for (identifier, old) in selection {
            let mut record = self
                .glyphs
                .remove(&old)
                .ok_or_else(|| SubsetError::MissingGlyph { identifier: identifier.clone() })?;

            record
                .outline
                .remap_components(&remap)
                .map_err(|component| SubsetError::DanglingComponent {
                    glyph: identifier.clone(),
                    component,
                })?;

            let new = remap[&old];
            record.index = new;
            record.name = identifier;
            glyphs.insert(new, record);
        }

        let count = glyphs.len() as u16;
        self.names = glyphs.values().map(|g| g.name.clone()).collect();
        self.glyphs = glyphs;
        self.num_glyphs = count;
        self.maxp.num_glyphs = count;
        self.hhea.number_of_h_metrics = count;
        self.hhea.advance_width_max = UfWord::new(
            self.glyphs
                .values()
                .map(|g| g.metrics.advance_width)
                .max()
                .unwrap_or(0),
        );

        info!("Subset '{}': kept {count} of {total} glyphs", self.full_name());
        Ok(self)
    }

    /// Resolves identifiers to source glyph indices, in first-seen order.
    fn select<I, S>(&self, used: I) -> Result<Vec<(String, GlyphIndex)>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_name: HashMap<&str, GlyphIndex> = HashMap::new();
        for record in self.glyphs.values() {
            by_name.entry(record.name.as_str()).or_insert(record.index);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut claimed: HashSet<GlyphIndex> = HashSet::new();
        let mut selection = Vec::new();

        for identifier in used {
            let identifier = identifier.as_ref();
            if !seen.insert(identifier.to_string()) {
                debug!("Ignoring repeated glyph identifier {identifier:?}");
                continue;
            }

            let index = match by_name.get(identifier) {
                Some(index) => Some(*index),
                None if identifier == NOTDEF_SENTINEL => self
                    .glyphs
                    .contains_key(&GlyphIndex::NOTDEF)
                    .then_some(GlyphIndex::NOTDEF),
                None => None,
            };

            // A glyph can be selected once; .notdef claimed by name leaves nothing for the sentinel
            let Some(index) = index.filter(|index| !claimed.contains(index)) else {
                return Err(SubsetError::MissingGlyph { identifier: identifier.to_string() });
            };

            claimed.insert(index);
            selection.push((identifier.to_string(), index));
        }

        Ok(selection)
    }
}
