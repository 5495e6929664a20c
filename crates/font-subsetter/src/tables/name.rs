//! name table lookups

use read_fonts::{FontRef, TableProvider};

const NAME_ID_FAMILY: u16 = 1;
const NAME_ID_FULL_NAME: u16 = 4;

/// Name reported for fonts that carry neither a full nor a family name.
pub const UNNAMED_FONT: &str = "<unnamed>";

/// The font's declared full name, falling back to the family name.
pub(crate) fn declared_name(font: &FontRef) -> String {
    let Ok(name) = font.name() else {
        return UNNAMED_FONT.to_string();
    };

    let lookup = |name_id: u16| {
        name.name_record()
            .iter()
            .filter(|record| record.name_id().to_u16() == name_id)
            .find_map(|record| {
                record
                    .string(name.string_data())
                    .ok()
                    .map(|s| s.chars().collect::<String>())
            })
            .filter(|s| !s.is_empty())
    };

    lookup(NAME_ID_FULL_NAME)
        .or_else(|| lookup(NAME_ID_FAMILY))
        .unwrap_or_else(|| UNNAMED_FONT.to_string())
}
