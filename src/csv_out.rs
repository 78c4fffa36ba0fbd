use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::error::ScrapeError;
use crate::model::Sheet;

/// Writes one sheet to `<out_dir>/<sheet name>.csv` and returns the path.
pub(crate) fn write_sheet(
    out_dir: &Path,
    sheet: &Sheet,
    delimiter: u8,
) -> Result<PathBuf, ScrapeError> {
    let path = out_dir.join(format!("{}.csv", sheet.name));
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
fn write_sheet_to_string(sheet: &Sheet, delimiter: u8) -> Result<String, ScrapeError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ScrapeError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| ScrapeError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}
