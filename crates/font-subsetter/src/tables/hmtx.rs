//! hmtx table

use read_fonts::{FontRef, TableProvider};
use write_fonts::tables::hmtx::{Hmtx, LongMetric};

use crate::Result;

/// Horizontal metrics of one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalMetrics {
    pub advance_width: u16,
    pub lsb: i16,
}

/// Reads per-glyph metrics, expanding the trailing lsb-only entries.
pub(crate) fn read_metrics(font: &FontRef, num_glyphs: u16) -> Result<Vec<HorizontalMetrics>> {
    let hmtx = font.hmtx()?;
    let h_metrics = hmtx.h_metrics();
    let left_side_bearings = hmtx.left_side_bearings();
    let last_advance = h_metrics.last().map(|m| m.advance.get()).unwrap_or(0);

    let metrics = (0..num_glyphs as usize)
        .map(|gid| match h_metrics.get(gid) {
            Some(metric) => HorizontalMetrics {
                advance_width: metric.advance.get(),
                lsb: metric.side_bearing.get(),
            },
            // Glyphs beyond numberOfHMetrics share the last advance width
            None => HorizontalMetrics {
                advance_width: last_advance,
                lsb: left_side_bearings
                    .get(gid - h_metrics.len())
                    .map(|b| b.get())
                    .unwrap_or(0),
            },
        })
        .collect();

    Ok(metrics)
}

/// Builds an hmtx table with one long metric per glyph.
pub(crate) fn build_hmtx<'a>(metrics: impl IntoIterator<Item = &'a HorizontalMetrics>) -> Hmtx {
    let h_metrics = metrics
        .into_iter()
        .map(|m| LongMetric { advance: m.advance_width, side_bearing: m.lsb })
        .collect();

    Hmtx { h_metrics, left_side_bearings: Vec::new() }
}
