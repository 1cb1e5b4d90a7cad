//! Text measurement against the builtin Helvetica face, used to wrap table
//! cells to their column width.

/// Millimetres per typographic point.
pub const POINT_MM: f32 = 25.4 / 72.0;

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

/// Helvetica-Bold runs roughly this much wider than the regular face.
const BOLD_WIDTH_FACTOR: f32 = 1.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

fn char_width(ch: char) -> u16 {
    match u32::from(ch) {
        code @ 0x20..=0x7E => HELVETICA_WIDTHS[(code - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` at `font_size` points.
pub fn text_width_mm(text: &str, font_size: f32, face: Face) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(ch))).sum();
    let width = units as f32 / 1000.0 * font_size * POINT_MM;
    match face {
        Face::Regular => width,
        Face::Bold => width * BOLD_WIDTH_FACTOR,
    }
}

/// Greedy word wrap to `max_width_mm`. Words wider than a whole line are
/// broken between characters. Always yields at least one line.
pub fn wrap(text: &str, max_width_mm: f32, font_size: f32, face: Face) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, font_size, face) <= max_width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
