//! 5 x 7 bitmap glyphs for robot labels.
//!
//! Each glyph is seven rows, top to bottom; bit 4 is the leftmost column.

pub(crate) const COLUMNS: u32 = 5;
pub(crate) const ROWS: u32 = 7;

const MISSING: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

const LETTERS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
];

const DIGITS: [[u8; 7]; 10] = [
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

/// Bitmap for `character`; `None` for whitespace.
///
/// Lowercase letters share the uppercase glyphs and anything else renders as
/// a hollow box.
pub(crate) fn glyph(character: char) -> Option<&'static [u8; 7]> {
    let upper = character.to_ascii_uppercase();
    match upper {
        'A'..='Z' => Some(&LETTERS[usize::from(upper as u8 - b'A')]),
        '0'..='9' => Some(&DIGITS[usize::from(upper as u8 - b'0')]),
        _ if character.is_whitespace() => None,
        _ => Some(&MISSING),
    }
}

/// Whether the glyph pixel at `column`, `row` is set.
pub(crate) fn is_set(rows: &[u8; 7], column: u32, row: u32) -> bool {
    rows.get(row as usize)
        .is_some_and(|bits| bits & (1 << (COLUMNS - 1 - column)) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_have_distinct_glyphs() {
        let mut seen = std::collections::HashSet::new();
        for character in ('A'..='Z').chain('0'..='9') {
            let rows = glyph(character).expect("glyph exists");
            assert!(seen.insert(*rows), "{character} duplicates another glyph");
            assert!(rows.iter().all(|bits| *bits < 1 << COLUMNS));
        }
    }

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph('s'), glyph('S'));
        assert_eq!(glyph(' '), None);
        assert_eq!(glyph('?'), Some(&MISSING));
    }

    #[test]
    fn leftmost_column_is_the_high_bit() {
        let l = glyph('L').expect("glyph exists");
        assert!(is_set(l, 0, 0));
        assert!(!is_set(l, 4, 0));
        assert!(is_set(l, 4, ROWS - 1));
    }
}
