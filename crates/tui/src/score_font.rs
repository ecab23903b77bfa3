//! Block-digit rendering for the composite score display.

use std::collections::HashMap;

use once_cell::sync::Lazy;

const FONT_HEIGHT: usize = 7;
const FONT_WIDTH: usize = 5;
const FILL_CHAR: char = '█';

type Glyph = [&'static str; FONT_HEIGHT];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        (
            '0',
            [
                " 111 ", "1   1", "1  11", "1 1 1", "11  1", "1   1", " 111 ",
            ],
        ),
        (
            '1',
            [
                "  1  ", " 11  ", "  1  ", "  1  ", "  1  ", "  1  ", " 111 ",
            ],
        ),
        (
            '2',
            [
                " 111 ", "1   1", "    1", "   1 ", "  1  ", " 1   ", "11111",
            ],
        ),
        (
            '3',
            [
                " 111 ", "1   1", "    1", "  11 ", "    1", "1   1", " 111 ",
            ],
        ),
        (
            '4',
            [
                "   1 ", "  11 ", " 1 1 ", "1  1 ", "11111", "   1 ", "   1 ",
            ],
        ),
        (
            '5',
            [
                "11111", "1    ", "1111 ", "    1", "    1", "1   1", " 111 ",
            ],
        ),
        (
            '6',
            [
                " 111 ", "1    ", "1    ", "1111 ", "1   1", "1   1", " 111 ",
            ],
        ),
        (
            '7',
            [
                "11111", "    1", "   1 ", "  1  ", " 1   ", " 1   ", " 1   ",
            ],
        ),
        (
            '8',
            [
                " 111 ", "1   1", "1   1", " 111 ", "1   1", "1   1", " 111 ",
            ],
        ),
        (
            '9',
            [
                " 111 ", "1   1", "1   1", " 1111", "    1", "    1", " 111 ",
            ],
        ),
        (
            '/',
            [
                "    1", "    1", "   1 ", "  1  ", " 1   ", "1    ", "1    ",
            ],
        ),
    ])
});

/// Render a short string of digits (and `/`) as block glyph lines.
/// Unknown characters render as blanks.
pub fn render(text: &str) -> Vec<String> {
    let mut lines = vec![String::new(); FONT_HEIGHT];
    for (idx, ch) in text.chars().enumerate() {
        let glyph = GLYPHS.get(&ch);
        for (row, line) in lines.iter_mut().enumerate() {
            if idx > 0 {
                line.push(' ');
            }
            match glyph {
                Some(glyph) => {
                    for cell in glyph[row].chars() {
                        line.push(if cell == '1' { FILL_CHAR } else { ' ' });
                    }
                }
                None => line.push_str(&" ".repeat(FONT_WIDTH)),
            }
        }
    }
    lines
}

/// Rendered height in terminal cells.
pub fn height() -> usize {
    FONT_HEIGHT
}
