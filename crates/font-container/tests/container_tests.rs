use read_fonts::{FontData, FontRef, types::Tag};
use stripfont_font_container::{ContainerError, ContainerKind, decode, encode, pack, unpack};
use stripfont_test_fonts::{IconFontBuilder, PUA_START, sample_icon_font};

fn names(data: &[u8], kind: ContainerKind) -> Vec<String> {
    decode(data, kind).unwrap().glyph_names().to_vec()
}

#[test]
fn test_sfnt_is_passed_through() {
    let data = sample_icon_font();
    assert_eq!(unpack(&data, ContainerKind::Sfnt).unwrap().as_ref(), data.as_slice());
    assert_eq!(pack(data.clone(), ContainerKind::Sfnt).unwrap(), data);
}

#[test]
fn test_round_trip_every_kind() {
    let source = decode(&sample_icon_font(), ContainerKind::Sfnt).unwrap();
    let subset = source.subset(["", "house", "search"]).unwrap();

    for kind in ContainerKind::ALL {
        let encoded = encode(&subset, kind).unwrap();
        assert_eq!(ContainerKind::sniff(&encoded), Some(kind), "{kind}");
        assert_eq!(names(&encoded, kind), ["", "house", "search"], "{kind}");
    }
}

#[test]
fn test_woff_header_and_directory() {
    let sfnt = sample_icon_font();
    let woff = pack(sfnt.clone(), ContainerKind::Woff).unwrap();
    let data = FontData::new(&woff);

    assert_eq!(data.read_at::<Tag>(0).unwrap(), Tag::new(b"wOFF"));
    assert_eq!(data.read_at::<u32>(4).unwrap(), 0x0001_0000);
    assert_eq!(data.read_at::<u32>(8).unwrap() as usize, woff.len());

    let num_tables = data.read_at::<u16>(12).unwrap() as usize;
    let source = FontRef::new(&sfnt).unwrap();
    assert_eq!(num_tables, source.table_directory.table_records().len());

    let tags: Vec<Tag> = (0..num_tables).map(|i| data.read_at::<Tag>(44 + i * 20).unwrap()).collect();
    let mut sorted = tags.clone();
    sorted.sort();
    assert_eq!(tags, sorted);

    for i in 0..num_tables {
        let offset = data.read_at::<u32>(44 + i * 20 + 4).unwrap();
        assert_eq!(offset % 4, 0);
    }
}

#[test]
fn test_woff_restores_table_bytes() {
    let sfnt = IconFontBuilder::new()
        .glyph("house", PUA_START)
        .table(b"FFTM", &[9; 64])
        .build();
    let woff = pack(sfnt.clone(), ContainerKind::Woff).unwrap();
    let restored = unpack(&woff, ContainerKind::Woff).unwrap();

    let before = FontRef::new(&sfnt).unwrap();
    let after = FontRef::new(&restored).unwrap();
    for record in before.table_directory.table_records() {
        let tag = record.tag();
        assert_eq!(
            before.table_data(tag).unwrap().as_bytes(),
            after.table_data(tag).unwrap().as_bytes(),
            "{tag}"
        );
    }
}

#[test]
fn test_wrong_signature_is_rejected() {
    let woff = pack(sample_icon_font(), ContainerKind::Woff).unwrap();
    let err = decode(&woff, ContainerKind::Woff2).unwrap_err();
    assert!(matches!(err, ContainerError::Signature { expected: ContainerKind::Woff2, .. }));
}

#[test]
fn test_truncated_woff_is_rejected() {
    let mut woff = pack(sample_icon_font(), ContainerKind::Woff).unwrap();
    woff.truncate(woff.len() / 2);
    assert!(decode(&woff, ContainerKind::Woff).is_err());
}

#[test]
fn test_composite_font_survives_woff() {
    let data = IconFontBuilder::new()
        .unmapped_glyph("dot")
        .composite("dotted", Some(PUA_START), &[1])
        .full_name(Some("Dotted Icons"))
        .build();
    let font = decode(&data, ContainerKind::Sfnt).unwrap();
    let woff = encode(&font, ContainerKind::Woff).unwrap();

    let restored = decode(&woff, ContainerKind::Woff).unwrap();
    assert_eq!(restored.full_name(), "Dotted Icons");
    assert_eq!(restored.glyph_by_name("dotted").unwrap().outline().component_indices().count(), 1);
}

#[test]
fn test_unmodified_font_round_trips_every_kind() {
    let composite = IconFontBuilder::new()
        .unmapped_glyph("dot")
        .glyph("square", PUA_START)
        .composite("dotted", Some(PUA_START + 1), &[1, 2])
        .build();

    for data in [sample_icon_font(), composite] {
        let source = decode(&data, ContainerKind::Sfnt).unwrap();

        for kind in ContainerKind::ALL {
            let restored = decode(&encode(&source, kind).unwrap(), kind).unwrap();
            assert_eq!(restored.num_glyphs(), source.num_glyphs(), "{kind}");
            assert_eq!(restored.glyph_names(), source.glyph_names(), "{kind}");

            for (before, after) in source.glyphs().zip(restored.glyphs()) {
                assert_eq!(after.name(), before.name(), "{kind}");
                assert_eq!(after.outline(), before.outline(), "{kind} {}", before.name());
                assert_eq!(after.metrics(), before.metrics(), "{kind} {}", before.name());
                assert_eq!(after.codepoints(), before.codepoints(), "{kind} {}", before.name());
            }
        }
    }
}
