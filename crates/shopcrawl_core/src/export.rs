use csv::{QuoteStyle, WriterBuilder};

use crate::record::Record;

/// Separator between image sources inside the joined layout's single
/// image column. Distinct from the CSV field separator by construction.
pub const IMAGE_DELIMITER: &str = ";";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encode error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Column layout for the CSV export. Fixed per export call, never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvLayout {
    /// `Name`,`Image URLs`: sources joined with [`IMAGE_DELIMITER`],
    /// every value quoted.
    #[default]
    Joined,
    /// `Product Name`,`Product URL`, then one `Image URL {i}` column per
    /// slot up to the widest record; shorter records pad with empty cells;
    /// values unquoted.
    ImageColumns,
}

/// Encodes the collection as CSV bytes in the requested layout.
pub fn to_csv(records: &[Record], layout: CsvLayout) -> Result<Vec<u8>, ExportError> {
    match layout {
        CsvLayout::Joined => joined_csv(records),
        CsvLayout::ImageColumns => image_columns_csv(records),
    }
}

/// Encodes the collection as pretty-printed JSON bytes.
///
/// This is the lossless export: decoding it reconstructs an equivalent
/// collection, field for field, image order included.
pub fn to_json(records: &[Record]) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(records)?)
}

fn joined_csv(records: &[Record]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);

    writer.write_record(["Name", "Image URLs"])?;
    for record in records {
        let sources = record
            .images
            .iter()
            .map(|image| image.src.as_str())
            .collect::<Vec<_>>()
            .join(IMAGE_DELIMITER);
        writer.write_record([record.name.as_str(), sources.as_str()])?;
    }

    finish(writer)
}

fn image_columns_csv(records: &[Record]) -> Result<Vec<u8>, ExportError> {
    let max_images = records
        .iter()
        .map(|record| record.images.len())
        .max()
        .unwrap_or(0);

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(vec![]);

    let mut header = vec!["Product Name".to_string(), "Product URL".to_string()];
    header.extend((1..=max_images).map(|slot| format!("Image URL {slot}")));
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.name.clone(), record.url.clone()];
        // Every row carries the full slot width; missing slots stay empty.
        row.extend((0..max_images).map(|slot| {
            record
                .images
                .get(slot)
                .map(|image| image.src.clone())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ExportError> {
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}
