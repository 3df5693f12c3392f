//! Built-in 5x7 bitmap glyphs for captions when no font is available.
//!
//! Covers the characters that survive label cleaning in ASCII: digits,
//! letters (lowercase drawn as uppercase), space, hyphen and underscore.
//! Anything else is drawn as a hollow box.

/// Glyph cell width in font units.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph cell height in font units.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance between glyph origins in font units.
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// One row per entry, bit 4 is the leftmost column.
type Glyph = [u8; 7];

const SPACE: Glyph = [0x00; 7];
const HYPHEN: Glyph = [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00];
const UNDERSCORE: Glyph = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F];
const MISSING: Glyph = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

const DIGITS: [Glyph; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
];

const LETTERS: [Glyph; 26] = [
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

fn glyph_for(c: char) -> &'static Glyph {
    match c {
        ' ' => &SPACE,
        '-' => &HYPHEN,
        '_' => &UNDERSCORE,
        '0'..='9' => &DIGITS[(c as u8 - b'0') as usize],
        'A'..='Z' => &LETTERS[(c as u8 - b'A') as usize],
        'a'..='z' => &LETTERS[(c as u8 - b'a') as usize],
        _ => &MISSING,
    }
}

/// Whether the glyph for `c` has a lit cell at (col, row) in font units.
pub fn is_set(c: char, col: u32, row: u32) -> bool {
    if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
        return false;
    }
    let bits = glyph_for(c)[row as usize];
    bits & (0x10 >> col) != 0
}

/// Whether `c` has a dedicated glyph (as opposed to the missing-glyph box).
pub fn has_glyph(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_')
}

/// Width of `text` in font units (no trailing gap).
pub fn text_width_units(text: &str) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        0
    } else {
        count * GLYPH_ADVANCE - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphen_is_middle_bar() {
        for col in 0..GLYPH_WIDTH {
            assert!(is_set('-', col, 3));
            assert!(!is_set('-', col, 0));
        }
    }

    #[test]
    fn test_space_is_blank() {
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                assert!(!is_set(' ', col, row));
            }
        }
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        for (lower, upper) in ('a'..='z').zip('A'..='Z') {
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    assert_eq!(is_set(lower, col, row), is_set(upper, col, row));
                }
            }
        }
    }

    #[test]
    fn test_unknown_char_draws_box() {
        assert!(!has_glyph('é'));
        assert!(is_set('é', 0, 0));
        assert!(is_set('é', 4, 6));
        assert!(!is_set('é', 2, 3));
    }

    #[test]
    fn test_out_of_cell_is_unset() {
        assert!(!is_set('H', GLYPH_WIDTH, 0));
        assert!(!is_set('H', 0, GLYPH_HEIGHT));
    }

    #[test]
    fn test_text_width_units() {
        assert_eq!(text_width_units(""), 0);
        assert_eq!(text_width_units("A"), 5);
        assert_eq!(text_width_units("AB"), 11);
    }
}
