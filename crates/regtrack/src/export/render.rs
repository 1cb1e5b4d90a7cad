use std::borrow::Cow;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb as PdfRgb,
};

use super::columns::Rgb;
use super::document::{
    TableLayout, TabularDocument, LEFT_MARGIN_MM, PAGE_HEIGHT_MM, PAGE_MARGIN_MM, PAGE_WIDTH_MM,
};
use super::metrics::Face;
use super::ExportError;

const LAYER_NAME: &str = "Report";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the layout as a landscape A4 PDF.
pub fn render_pdf(document: &TabularDocument) -> Result<Vec<u8>, ExportError> {
    let (pdf, first_page, first_layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let fonts = Fonts {
        regular: builtin_font(&pdf, BuiltinFont::Helvetica)?,
        bold: builtin_font(&pdf, BuiltinFont::HelveticaBold)?,
    };

    let mut layer = pdf.get_page(first_page).get_layer(first_layer);
    for line in &document.lines {
        set_fill(&layer, Rgb(0, 0, 0));
        layer.use_text(
            pdf_text(&line.text),
            line.font_size,
            Mm(line.x_mm),
            from_top(line.y_mm),
            &fonts.regular,
        );
    }

    let table = &document.table;
    for (page_index, rows) in table.paginate().into_iter().enumerate() {
        let top = if page_index == 0 {
            table.start_y_mm
        } else {
            let (page, page_layer) =
                pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            layer = pdf.get_page(page).get_layer(page_layer);
            PAGE_MARGIN_MM
        };

        let mut row_top = top + draw_header_row(&layer, table, top, &fonts);
        for index in rows {
            let cells = table.wrap_cells(&table.rows[index], Face::Regular);
            draw_text_cells(&layer, table, &cells, row_top, &fonts.regular);
            row_top += table.row_height_mm(index);
        }
    }

    pdf.save_to_bytes()
        .map_err(|err| ExportError::Render(format!("{err:?}")))
}

fn builtin_font(
    pdf: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, ExportError> {
    pdf.add_builtin_font(font)
        .map_err(|err| ExportError::Render(format!("{err:?}")))
}

/// Draws the filled header row and returns its height.
fn draw_header_row(
    layer: &PdfLayerReference,
    table: &TableLayout,
    top: f32,
    fonts: &Fonts,
) -> f32 {
    let height = table.header_height_mm();
    set_fill(layer, table.header_fill);
    layer.add_rect(Rect::new(
        Mm(LEFT_MARGIN_MM),
        from_top(top + height),
        Mm(LEFT_MARGIN_MM + table.width_mm()),
        from_top(top),
    ));

    let labels: Vec<&str> = table.columns.iter().map(|column| column.label).collect();
    set_fill(layer, Rgb(255, 255, 255));
    let wrapped = table.wrap_cells(&labels, Face::Bold);
    draw_text_cells(layer, table, &wrapped, top, &fonts.bold);
    set_fill(layer, Rgb(0, 0, 0));
    height
}

fn draw_text_cells(
    layer: &PdfLayerReference,
    table: &TableLayout,
    cells: &[Vec<String>],
    top: f32,
    font: &IndirectFontRef,
) {
    let line_height = table.line_height_mm();
    let mut x = LEFT_MARGIN_MM;
    for (column, lines) in table.columns.iter().zip(cells) {
        for (line_index, line) in lines.iter().enumerate() {
            let baseline =
                top + table.cell_padding_mm + line_height * (line_index + 1) as f32 - 0.8;
            layer.use_text(
                pdf_text(line),
                table.font_size,
                Mm(x + table.cell_padding_mm),
                from_top(baseline),
                font,
            );
        }
        x += column.width_mm;
    }
}

fn set_fill(layer: &PdfLayerReference, color: Rgb) {
    let Rgb(r, g, b) = color;
    layer.set_fill_color(Color::Rgb(PdfRgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    )));
}

fn from_top(y_mm: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y_mm)
}

/// The builtin Helvetica faces only cover Latin-1; the rupee sign is spelled
/// out and anything else outside that range is replaced.
fn pdf_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(|ch| u32::from(ch) <= 0xFF) {
        return Cow::Borrowed(text);
    }
    let mut sanitized = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '₹' => sanitized.push_str("Rs."),
            ch if u32::from(ch) <= 0xFF => sanitized.push(ch),
            _ => sanitized.push('?'),
        }
    }
    Cow::Owned(sanitized)
}
