//! Spreadsheet and tabular-document reports over registration listings.

pub mod columns;
pub mod document;
pub mod format;
pub mod metrics;
pub mod render;
pub mod scope;
pub mod spreadsheet;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveDate};
use tracing::info;

use crate::config::ExportConfig;
use crate::registrations::Registration;

pub use columns::{Destination, Field, ReportKind, Rgb};
pub use document::{TableColumn, TableLayout, TabularDocument, TextLine};
pub use scope::{verified_only, DateRange, ExportScope};
pub use spreadsheet::{SheetRow, Spreadsheet};

use document::{
    BODY_FONT_PT, CELL_PADDING_MM, FIRST_LINE_Y_MM, HEADER_LINE_FONT_PT, LEFT_MARGIN_MM,
    RANGED_TABLE_START_Y_MM, SECOND_LINE_Y_MM, TABLE_START_Y_MM, TITLE_FONT_PT, TITLE_Y_MM,
};
use format::{calendar_date, file_name, locale_date};

/// A finished report artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write the artifact into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Tabular report: the layout that was rendered plus the rendered file.
#[derive(Debug, Clone)]
pub struct DocumentExport {
    pub layout: TabularDocument,
    pub file: ExportFile,
}

/// Builds reports of one kind with dates shown in a fixed display offset.
#[derive(Debug, Clone, Copy)]
pub struct ReportExporter {
    kind: ReportKind,
    offset: FixedOffset,
}

impl ReportExporter {
    pub fn new(kind: ReportKind, offset: FixedOffset) -> Self {
        Self { kind, offset }
    }

    pub fn from_config(kind: ReportKind, config: &ExportConfig) -> Self {
        Self::new(kind, config.utc_offset)
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// One row per record, in input order, cells in the sheet's column order.
    pub fn to_rows(&self, records: &[Registration]) -> Vec<SheetRow> {
        let columns = self.kind.spreadsheet_columns();
        records
            .iter()
            .map(|record| {
                SheetRow(
                    columns
                        .iter()
                        .map(|column| {
                            column
                                .field
                                .render(record, Destination::Spreadsheet, self.offset)
                        })
                        .collect(),
                )
            })
            .collect()
    }

    pub fn spreadsheet(&self, records: &[Registration]) -> Spreadsheet {
        Spreadsheet {
            sheet_name: self.kind.sheet_name(),
            columns: self
                .kind
                .spreadsheet_columns()
                .iter()
                .map(|column| column.label)
                .collect(),
            rows: self.to_rows(records),
        }
    }

    /// CSV spreadsheet export. An empty listing produces no file and no error.
    pub fn to_spreadsheet(
        &self,
        records: &[Registration],
        scope: &ExportScope,
    ) -> Result<Option<ExportFile>, ExportError> {
        if records.is_empty() {
            return Ok(None);
        }

        let bytes = self.spreadsheet(records).to_csv()?;
        let file = ExportFile {
            file_name: self.file_name(scope, "csv"),
            bytes,
        };
        info!(file = %file.file_name, rows = records.len(), "spreadsheet export ready");
        Ok(Some(file))
    }

    /// Lay out the tabular report. Fails on an empty listing.
    pub fn layout(
        &self,
        records: &[Registration],
        scope: &ExportScope,
    ) -> Result<TabularDocument, ExportError> {
        if records.is_empty() {
            return Err(ExportError::Empty { kind: self.kind });
        }

        let title = self.kind.title().to_string();
        let mut lines = vec![TextLine {
            text: title.clone(),
            font_size: TITLE_FONT_PT,
            x_mm: LEFT_MARGIN_MM,
            y_mm: TITLE_Y_MM,
        }];

        let generated_y = match &scope.date_range {
            Some(range) => {
                lines.push(TextLine {
                    text: format!(
                        "Date Range: {} to {}",
                        calendar_date(range.start()),
                        calendar_date(range.end())
                    ),
                    font_size: HEADER_LINE_FONT_PT,
                    x_mm: LEFT_MARGIN_MM,
                    y_mm: FIRST_LINE_Y_MM,
                });
                SECOND_LINE_Y_MM
            }
            None => FIRST_LINE_Y_MM,
        };
        lines.push(TextLine {
            text: format!(
                "Generated on: {}",
                locale_date(scope.generated_at, self.offset)
            ),
            font_size: HEADER_LINE_FONT_PT,
            x_mm: LEFT_MARGIN_MM,
            y_mm: generated_y,
        });

        let columns = self.kind.document_columns();
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| column.field.render(record, Destination::Document, self.offset))
                    .collect()
            })
            .collect();

        let table = TableLayout {
            start_y_mm: if scope.date_range.is_some() {
                RANGED_TABLE_START_Y_MM
            } else {
                TABLE_START_Y_MM
            },
            columns: columns
                .iter()
                .map(|column| TableColumn {
                    label: column.label,
                    width_mm: column.width_mm,
                })
                .collect(),
            header_fill: self.kind.header_fill(),
            font_size: BODY_FONT_PT,
            cell_padding_mm: CELL_PADDING_MM,
            rows,
        };

        Ok(TabularDocument {
            title,
            lines,
            table,
        })
    }

    /// Tabular PDF export. Fails with [`ExportError::Empty`] on an empty listing.
    pub fn to_document(
        &self,
        records: &[Registration],
        scope: &ExportScope,
    ) -> Result<DocumentExport, ExportError> {
        let layout = self.layout(records, scope)?;
        let bytes = render::render_pdf(&layout)?;
        let file = ExportFile {
            file_name: self.file_name(scope, "pdf"),
            bytes,
        };
        info!(file = %file.file_name, rows = records.len(), "document export ready");
        Ok(DocumentExport { layout, file })
    }

    fn file_name(&self, scope: &ExportScope, extension: &str) -> String {
        file_name(
            self.kind.file_stem(),
            scope.date_range.as_ref(),
            scope.generated_at.date_naive(),
            extension,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no {} available to export", .kind.sheet_name().to_lowercase())]
    Empty { kind: ReportKind },
    #[error("date range starts {start} after it ends {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("spreadsheet encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("document rendering failed: {0}")]
    Render(String),
}
