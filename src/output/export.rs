use failure::Error;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::samples::SourcePoint;

// Everything `encodeURIComponent` leaves alone stays unescaped, so the
// generated links match what the portal produced historically.
const DATA_URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The portal page of the dataset a point belongs to.
pub fn dataset_url(landing_page_url: &str, code: &str) -> String {
    format!("{}/{}", landing_page_url.trim_end_matches('/'), code)
}

/// Render a single point as a `data:` URI holding a one-row CSV file,
/// used by the portal's per-point download link.
pub fn single_point_data_uri(point: &SourcePoint) -> Result<String, Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record([
        "id",
        "longitude",
        "latitude",
        "depth",
        "log_clay_sand",
        "log_silt_sand",
    ])?;
    writer.write_record([
        &point.id,
        &point.longitude.to_string(),
        &point.latitude.to_string(),
        &optional_field(point.depth),
        &optional_field(point.log_clay_sand),
        &optional_field(point.log_silt_sand),
    ])?;

    let csv_bytes = writer.into_inner()?;
    let csv_text = String::from_utf8(csv_bytes)?;

    Ok(format!(
        "data:text/csv;charset=utf-8,{}",
        utf8_percent_encode(&csv_text, DATA_URI_SET)
    ))
}

fn optional_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
