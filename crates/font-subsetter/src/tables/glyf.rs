//! glyf/loca outlines
//!
//! Outlines are held as write-fonts values so they can be re-serialized
//! without going back to the source bytes. Composite glyphs keep their
//! component references as glyph indices of the font they were read from;
//! the rewriter remaps them.

use std::collections::HashMap;

use font_types::GlyphId16;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor as ReadAnchor, CurvePoint, Glyf as ReadGlyf, Glyph as ReadGlyph},
    tables::loca::Loca as ReadLoca,
    types::GlyphId,
};
use write_fonts::tables::{
    glyf::{
        Anchor, Bbox, Component, CompositeGlyph, Contour, Glyf, GlyfLocaBuilder, Glyph,
        SimpleGlyph, Transform,
    },
    loca::{Loca, LocaFormat},
};

use crate::{Result, SubsetError, types::GlyphIndex};

/// The outline of a single glyph.
#[derive(Debug, PartialEq)]
pub enum Outline {
    Empty,
    Simple(SimpleGlyph),
    Composite { bbox: Bbox, components: Vec<Component> },
}

impl Outline {
    /// Glyph indices referenced as components.
    pub fn component_indices(&self) -> impl Iterator<Item = GlyphIndex> + '_ {
        let components = match self {
            Outline::Composite { components, .. } => components.as_slice(),
            _ => &[],
        };
        components.iter().map(|c| GlyphIndex::from(c.glyph))
    }

    /// Rewrite component references through `remap`.
    ///
    /// Returns the first old index that has no entry in `remap`.
    pub(crate) fn remap_components(
        &mut self,
        remap: &HashMap<GlyphIndex, GlyphIndex>,
    ) -> std::result::Result<(), GlyphIndex> {
        if let Outline::Composite { components, .. } = self {
            for component in components.iter_mut() {
                let old = GlyphIndex::from(component.glyph);
                let new = remap.get(&old).ok_or(old)?;
                component.glyph = GlyphId16::from(*new);
            }
        }
        Ok(())
    }

    fn to_glyph(&self) -> Glyph {
        match self {
            Outline::Empty => Glyph::Empty,
            Outline::Simple(simple) => Glyph::Simple(simple.clone()),
            Outline::Composite { bbox, components } => {
                let mut components = components.iter().cloned();
                let Some(first) = components.next() else {
                    return Glyph::Empty;
                };
                let mut composite = CompositeGlyph::new(first, *bbox);
                for component in components {
                    composite.add_component(component, *bbox);
                }
                Glyph::Composite(composite)
            }
        }
    }
}

/// Reads every glyph outline in glyph order.
pub(crate) fn read_outlines(font: &FontRef, num_glyphs: u16) -> Result<Vec<Outline>> {
    let glyf = font.glyf().map_err(|_| SubsetError::MissingTable("glyf"))?;
    let loca = font.loca(None).map_err(|_| SubsetError::MissingTable("loca"))?;

    (0..num_glyphs)
        .map(|gid| read_outline(&loca, &glyf, GlyphIndex::new(gid)))
        .collect()
}

fn read_outline(loca: &ReadLoca, glyf: &ReadGlyf, index: GlyphIndex) -> Result<Outline> {
    let glyph = match loca.get_glyf(GlyphId::new(index.to_u16() as u32), glyf)? {
        Some(glyph) => glyph,
        None => return Ok(Outline::Empty),
    };

    match glyph {
        ReadGlyph::Simple(simple) => {
            let points: Vec<CurvePoint> = simple
                .points()
                .map(|pt| CurvePoint { x: pt.x, y: pt.y, on_curve: pt.on_curve })
                .collect();

            let mut contours: Vec<Contour> = Vec::new();
            let mut start = 0usize;
            for end_pt in simple.end_pts_of_contours() {
                let end = end_pt.get() as usize;
                let contour = points
                    .get(start..=end)
                    .ok_or(SubsetError::MalformedGlyph { index })?;
                contours.push(contour.to_vec().into());
                start = end + 1;
            }

            let bbox = Bbox {
                x_min: simple.x_min(),
                y_min: simple.y_min(),
                x_max: simple.x_max(),
                y_max: simple.y_max(),
            };

            Ok(Outline::Simple(SimpleGlyph {
                bbox,
                contours,
                instructions: simple.instructions().to_vec(),
            }))
        }
        ReadGlyph::Composite(composite) => {
            let components: Vec<Component> = composite
                .components()
                .map(|comp| {
                    let anchor = match comp.anchor {
                        ReadAnchor::Offset { x, y } => Anchor::Offset { x, y },
                        ReadAnchor::Point { base, component } => Anchor::Point { base, component },
                    };
                    let transform = Transform {
                        xx: comp.transform.xx,
                        yx: comp.transform.yx,
                        xy: comp.transform.xy,
                        yy: comp.transform.yy,
                    };
                    Component { glyph: comp.glyph, anchor, transform, flags: comp.flags.into() }
                })
                .collect();

            if components.is_empty() {
                return Ok(Outline::Empty);
            }

            let bbox = Bbox {
                x_min: composite.x_min(),
                y_min: composite.y_min(),
                x_max: composite.x_max(),
                y_max: composite.y_max(),
            };

            Ok(Outline::Composite { bbox, components })
        }
    }
}

/// Serializes outlines, in order, into new glyf and loca tables.
pub(crate) fn build_glyf_loca<'a>(
    outlines: impl IntoIterator<Item = &'a Outline>,
) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut builder = GlyfLocaBuilder::new();
    for outline in outlines {
        builder.add_glyph(&outline.to_glyph())?;
    }
    Ok(builder.build())
}
