use serde::Serialize;

use super::ExportError;

/// One data row, cells aligned with the sheet's column labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SheetRow(pub Vec<String>);

impl SheetRow {
    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

/// Single-sheet dataset: a header row and one row per registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spreadsheet {
    pub sheet_name: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<SheetRow>,
}

impl Spreadsheet {
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.cells())?;
        }
        writer
            .into_inner()
            .map_err(|err| ExportError::Io(err.into_error()))
    }
}
