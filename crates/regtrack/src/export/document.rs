//! Page geometry for the tabular report. All positions are millimetres from
//! the top-left corner of a landscape A4 page.

use std::ops::Range;

use super::columns::Rgb;
use super::metrics::{wrap, Face, POINT_MM};

pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;
pub const LEFT_MARGIN_MM: f32 = 14.0;

pub const TITLE_FONT_PT: f32 = 16.0;
pub const HEADER_LINE_FONT_PT: f32 = 10.0;
pub const BODY_FONT_PT: f32 = 7.0;
pub const CELL_PADDING_MM: f32 = 1.5;

pub const TITLE_Y_MM: f32 = 15.0;
pub const FIRST_LINE_Y_MM: f32 = 25.0;
pub const SECOND_LINE_Y_MM: f32 = 32.0;
pub const TABLE_START_Y_MM: f32 = 35.0;
pub const RANGED_TABLE_START_Y_MM: f32 = 40.0;

/// Top edge of the table on continuation pages, and the bottom margin.
pub const PAGE_MARGIN_MM: f32 = 14.0;

const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// A positioned line of header text. `y_mm` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font_size: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub label: &'static str,
    pub width_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub start_y_mm: f32,
    pub columns: Vec<TableColumn>,
    pub header_fill: Rgb,
    pub font_size: f32,
    pub cell_padding_mm: f32,
    pub rows: Vec<Vec<String>>,
}

impl TableLayout {
    pub fn line_height_mm(&self) -> f32 {
        self.font_size * POINT_MM * LINE_HEIGHT_FACTOR
    }

    pub fn width_mm(&self) -> f32 {
        self.columns.iter().map(|column| column.width_mm).sum()
    }

    /// Cell text wrapped to each column's inner width.
    pub fn wrap_cells<S: AsRef<str>>(&self, cells: &[S], face: Face) -> Vec<Vec<String>> {
        self.columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| {
                let inner = column.width_mm - 2.0 * self.cell_padding_mm;
                wrap(cell.as_ref(), inner, self.font_size, face)
            })
            .collect()
    }

    fn height_for(&self, wrapped: &[Vec<String>]) -> f32 {
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * self.line_height_mm() + 2.0 * self.cell_padding_mm
    }

    pub fn header_height_mm(&self) -> f32 {
        let labels: Vec<&str> = self.columns.iter().map(|column| column.label).collect();
        self.height_for(&self.wrap_cells(&labels, Face::Bold))
    }

    /// Height of body row `index`, tall enough for its most-wrapped cell.
    pub fn row_height_mm(&self, index: usize) -> f32 {
        match self.rows.get(index) {
            Some(row) => self.height_for(&self.wrap_cells(row, Face::Regular)),
            None => 0.0,
        }
    }

    /// Split body rows across pages. The header row is repeated on every
    /// page; the first page starts at `start_y_mm`, later ones at the margin.
    /// A page always takes at least one row.
    pub fn paginate(&self) -> Vec<Range<usize>> {
        let header = self.header_height_mm();
        let bottom = PAGE_HEIGHT_MM - PAGE_MARGIN_MM;

        let mut pages = Vec::new();
        let mut start = 0;
        let mut top = self.start_y_mm;
        while start < self.rows.len() {
            let mut cursor = top + header;
            let mut end = start;
            while end < self.rows.len() {
                let height = self.row_height_mm(end);
                if end > start && cursor + height > bottom {
                    break;
                }
                cursor += height;
                end += 1;
            }
            pages.push(start..end);
            start = end;
            top = PAGE_MARGIN_MM;
        }
        pages
    }
}

/// Complete layout of a tabular report, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDocument {
    pub title: String,
    pub lines: Vec<TextLine>,
    pub table: TableLayout,
}

impl TabularDocument {
    /// Baseline of the lowest header line.
    pub fn last_line_y_mm(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| line.y_mm)
            .fold(0.0, f32::max)
    }
}
