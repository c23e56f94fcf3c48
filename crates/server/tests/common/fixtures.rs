//! Synthetic fonts and multipart bodies for server tests.

use ttf_parser::name_id;

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "glyphpress-test-boundary";

/// Build a `multipart/form-data` body with font file parts and repeated
/// `subsets` values, in that order.
pub fn multipart_body(fonts: &[(&str, &[u8])], subsets: &[&str]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, data) in fonts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"font\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    for subset in subsets {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"subsets\"\r\n\r\n");
        body.extend_from_slice(subset.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn head_table() -> Vec<u8> {
    let mut t = Vec::with_capacity(54);
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // fontRevision
    t.extend_from_slice(&0u32.to_be_bytes()); // checkSumAdjustment
    t.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    t.extend_from_slice(&0u16.to_be_bytes()); // flags
    t.extend_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    t.extend_from_slice(&[0u8; 16]); // created + modified
    t.extend_from_slice(&[0u8; 8]); // xMin..yMax
    t.extend_from_slice(&0u16.to_be_bytes()); // macStyle
    t.extend_from_slice(&8u16.to_be_bytes()); // lowestRecPPEM
    t.extend_from_slice(&2u16.to_be_bytes()); // fontDirectionHint
    t.extend_from_slice(&0u16.to_be_bytes()); // indexToLocFormat
    t.extend_from_slice(&0u16.to_be_bytes()); // glyphDataFormat
    t
}

fn hhea_table() -> Vec<u8> {
    let mut t = Vec::with_capacity(36);
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t.extend_from_slice(&800u16.to_be_bytes()); // ascender
    t.extend_from_slice(&(-200i16).to_be_bytes()); // descender
    t.extend_from_slice(&0u16.to_be_bytes()); // lineGap
    t.extend_from_slice(&500u16.to_be_bytes()); // advanceWidthMax
    t.extend_from_slice(&[0u8; 22]); // side bearings .. metricDataFormat
    t.extend_from_slice(&1u16.to_be_bytes()); // numberOfHMetrics
    t
}

fn maxp_table() -> Vec<u8> {
    let mut t = Vec::with_capacity(6);
    t.extend_from_slice(&0x0000_5000u32.to_be_bytes()); // version 0.5
    t.extend_from_slice(&1u16.to_be_bytes()); // numGlyphs
    t
}

fn name_table(names: &[(u16, &str)]) -> Vec<u8> {
    let mut records = Vec::new();
    let mut strings = Vec::new();
    for (id, value) in names {
        let encoded = utf16_be(value);
        // platform 3 (Windows), encoding 1 (Unicode BMP), en-US
        for field in [3u16, 1, 0x0409, *id, encoded.len() as u16, strings.len() as u16] {
            records.extend_from_slice(&field.to_be_bytes());
        }
        strings.extend_from_slice(&encoded);
    }

    let mut table = Vec::new();
    table.extend_from_slice(&0u16.to_be_bytes()); // format
    table.extend_from_slice(&(names.len() as u16).to_be_bytes());
    table.extend_from_slice(&((6 + 12 * names.len()) as u16).to_be_bytes());
    table.extend_from_slice(&records);
    table.extend_from_slice(&strings);
    table
}

/// A minimal parseable TTF carrying the given family/subfamily records.
pub fn build_test_font(family: Option<&str>, subfamily: Option<&str>) -> Vec<u8> {
    let mut names = Vec::new();
    if let Some(family) = family {
        names.push((name_id::FAMILY, family));
    }
    if let Some(subfamily) = subfamily {
        names.push((name_id::SUBFAMILY, subfamily));
    }

    let tables: [(&[u8; 4], Vec<u8>); 4] = [
        (b"head", head_table()),
        (b"hhea", hhea_table()),
        (b"maxp", maxp_table()),
        (b"name", name_table(&names)),
    ];

    let mut font = Vec::new();
    font.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    font.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    font.extend_from_slice(&64u16.to_be_bytes()); // searchRange
    font.extend_from_slice(&2u16.to_be_bytes()); // entrySelector
    font.extend_from_slice(&0u16.to_be_bytes()); // rangeShift

    let mut offset = 12 + 16 * tables.len();
    let mut data = Vec::new();
    for (tag, table) in &tables {
        font.extend_from_slice(*tag);
        font.extend_from_slice(&0u32.to_be_bytes()); // checksum unchecked
        font.extend_from_slice(&(offset as u32).to_be_bytes());
        font.extend_from_slice(&(table.len() as u32).to_be_bytes());
        offset += table.len();
        data.extend_from_slice(table);
    }
    font.extend_from_slice(&data);
    font
}
