//! WOFF 1.0
//!
//! A WOFF file is an sfnt whose tables are individually zlib-compressed,
//! behind a 44-byte header and a 20-byte-per-table directory. A table is
//! stored raw when compression does not make it smaller. Decoding is
//! delegated to `wuff`.

use std::io::Write;

use flate2::{Compression, write::ZlibEncoder};
use log::debug;
use read_fonts::{FontRef, types::Tag};

use crate::{ContainerError, Result};

const SIGNATURE: u32 = u32::from_be_bytes(*b"wOFF");
const HEADER_LEN: usize = 44;
const ENTRY_LEN: usize = 20;
const SFNT_HEADER_LEN: u32 = 12;
const SFNT_ENTRY_LEN: u32 = 16;

struct Entry {
    tag: Tag,
    checksum: u32,
    orig_length: u32,
    stored: Vec<u8>,
}

/// Unpacks a WOFF file into sfnt bytes.
pub(crate) fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    wuff::decompress_woff1(data).map_err(|e| ContainerError::Woff(format!("{e:?}")))
}

/// Packs sfnt bytes into a WOFF file.
pub(crate) fn compress(sfnt: &[u8]) -> Result<Vec<u8>> {
    let font = FontRef::new(sfnt).map_err(stripfont_font_subsetter::SubsetError::from)?;
    let flavor = font.table_directory.sfnt_version();

    let mut entries = Vec::new();
    for record in font.table_directory.table_records() {
        let tag = record.tag();
        let Some(table) = font.table_data(tag) else {
            continue;
        };
        let table = table.as_bytes();
        let compressed = deflate(tag, table)?;
        let stored = if compressed.len() < table.len() {
            compressed
        } else {
            debug!("Storing table '{tag}' uncompressed");
            table.to_vec()
        };
        entries.push(Entry {
            tag,
            checksum: record.checksum(),
            orig_length: table.len() as u32,
            stored,
        });
    }
    entries.sort_by_key(|entry| entry.tag);

    let num_tables = entries.len() as u32;
    let total_sfnt_size = SFNT_HEADER_LEN
        + SFNT_ENTRY_LEN * num_tables
        + entries.iter().map(|e| padded_len(e.orig_length as usize) as u32).sum::<u32>();

    let data_start = HEADER_LEN + ENTRY_LEN * entries.len();
    let total_len = data_start + entries.iter().map(|e| padded_len(e.stored.len())).sum::<usize>();

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&SIGNATURE.to_be_bytes());
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&(num_tables as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&total_sfnt_size.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    // No metadata or private block
    out.extend_from_slice(&[0u8; 20]);

    let mut offset = data_start;
    for entry in &entries {
        out.extend_from_slice(&entry.tag.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(entry.stored.len() as u32).to_be_bytes());
        out.extend_from_slice(&entry.orig_length.to_be_bytes());
        out.extend_from_slice(&entry.checksum.to_be_bytes());
        offset += padded_len(entry.stored.len());
    }

    for entry in &entries {
        out.extend_from_slice(&entry.stored);
        out.resize(padded_len(out.len()), 0);
    }

    debug_assert_eq!(out.len(), total_len);
    Ok(out)
}

fn deflate(tag: Tag, data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|source| ContainerError::Zlib { tag, source })?;
    encoder.finish().map_err(|source| ContainerError::Zlib { tag, source })
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}
