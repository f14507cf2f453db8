use pretty_assertions::assert_eq;
use shopcrawl_core::{to_csv, to_json, CsvLayout, ImageRef, Record};

fn image(src: &str) -> ImageRef {
    ImageRef {
        src: src.to_string(),
        alt: None,
        title: None,
    }
}

fn record(name: &str, url: &str, sources: &[&str]) -> Record {
    Record {
        name: name.to_string(),
        url: url.to_string(),
        images: sources.iter().map(|src| image(src)).collect(),
    }
}

fn sample_records() -> Vec<Record> {
    vec![
        record(
            "Astro Tee",
            "https://shop.example/products/astro-tee",
            &["front-mockup.jpg", "back-mockup.jpg"],
        ),
        record(
            "Plain Tee",
            "https://shop.example/products/plain-tee",
            &["plain-mockup.jpg"],
        ),
    ]
}

#[test]
fn joined_layout_quotes_every_value_and_joins_sources() {
    let bytes = to_csv(&sample_records(), CsvLayout::Joined).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(
        text,
        "\"Name\",\"Image URLs\"\n\
         \"Astro Tee\",\"front-mockup.jpg;back-mockup.jpg\"\n\
         \"Plain Tee\",\"plain-mockup.jpg\"\n"
    );
}

#[test]
fn joined_layout_with_no_records_is_just_the_header() {
    let bytes = to_csv(&[], CsvLayout::Joined).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(text, "\"Name\",\"Image URLs\"\n");
}

#[test]
fn image_columns_layout_pads_every_row_to_the_widest_record() {
    let bytes = to_csv(&sample_records(), CsvLayout::ImageColumns).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.split(',').count(), 4, "row not padded: {row}");
    }
    assert_eq!(rows[0], "Product Name,Product URL,Image URL 1,Image URL 2");
    assert_eq!(
        rows[2],
        "Plain Tee,https://shop.example/products/plain-tee,plain-mockup.jpg,"
    );
}

#[test]
fn image_columns_layout_writes_unquoted_values() {
    let bytes = to_csv(&sample_records(), CsvLayout::ImageColumns).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(!text.contains('"'), "unexpected quoting in: {text}");
}

#[test]
fn image_columns_layout_with_no_records_has_only_fixed_columns() {
    let bytes = to_csv(&[], CsvLayout::ImageColumns).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(text, "Product Name,Product URL\n");
}

#[test]
fn json_export_round_trips_the_collection() {
    let records = sample_records();
    let bytes = to_json(&records).unwrap();

    let decoded: Vec<Record> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn json_export_is_pretty_printed() {
    let bytes = to_json(&sample_records()).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("[\n"), "not pretty printed: {text}");
    assert!(text.contains("  \"name\""));
}

#[test]
fn json_export_of_nothing_is_an_empty_array() {
    let bytes = to_json(&[]).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "[]");
}
