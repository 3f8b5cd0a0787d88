//! 4×5 pixel bitmaps for the digits 0-9.
//!
//! Each glyph is stored row-major as 20 cells: index `row * 4 + col`. The
//! table is the single source of truth for the pixel clock; nothing else
//! knows the bit patterns.

use crate::error::WidgetError;

/// Glyph width in cells.
pub const GLYPH_COLS: usize = 4;

/// Glyph height in cells.
pub const GLYPH_ROWS: usize = 5;

const GLYPH_CELLS: usize = GLYPH_COLS * GLYPH_ROWS;

#[rustfmt::skip]
const DIGIT_MATRIX: [[u8; GLYPH_CELLS]; 10] = [
    [1,1,1,1, 1,0,0,1, 1,0,0,1, 1,0,0,1, 1,1,1,1], // 0
    [0,0,0,1, 0,0,1,1, 0,0,0,1, 0,0,0,1, 0,0,0,1], // 1
    [1,1,1,1, 0,0,0,1, 1,1,1,1, 1,0,0,0, 1,1,1,1], // 2
    [1,1,1,1, 0,0,0,1, 1,1,1,1, 0,0,0,1, 1,1,1,1], // 3
    [1,0,0,1, 1,0,0,1, 1,1,1,1, 0,0,0,1, 0,0,0,1], // 4
    [1,1,1,1, 1,0,0,0, 1,1,1,1, 0,0,0,1, 1,1,1,1], // 5
    [1,1,1,1, 1,0,0,0, 1,1,1,1, 1,0,0,1, 1,1,1,1], // 6
    [1,1,1,1, 0,0,0,1, 0,0,1,0, 0,1,0,0, 1,0,0,0], // 7
    [1,1,1,1, 1,0,0,1, 1,1,1,1, 1,0,0,1, 1,1,1,1], // 8
    [1,1,1,1, 1,0,0,1, 1,1,1,1, 0,0,0,1, 1,1,1,1], // 9
];

/// Whether cell (`row`, `col`) of `digit`'s glyph is lit.
///
/// Fails with `OutOfRange` for a digit outside 0-9, a row outside 0-4 or a
/// column outside 0-3.
pub fn digit_glyph_cell(
    digit: u8,
    row: usize,
    col: usize,
) -> Result<bool, WidgetError> {
    if digit > 9 {
        return Err(WidgetError::OutOfRange { what: "digit", value: i32::from(digit), limit: 9 });
    }
    if row >= GLYPH_ROWS {
        return Err(WidgetError::OutOfRange { what: "glyph row", value: row as i32, limit: GLYPH_ROWS as i32 - 1 });
    }
    if col >= GLYPH_COLS {
        return Err(WidgetError::OutOfRange { what: "glyph column", value: col as i32, limit: GLYPH_COLS as i32 - 1 });
    }
    Ok(DIGIT_MATRIX[usize::from(digit)][row * GLYPH_COLS + col] == 1)
}

/// Iterate the lit cells of `digit` as `(row, col)` pairs. Empty for digits above 9.
pub fn lit_cells(digit: u8) -> impl Iterator<Item = (usize, usize)> {
    (0..GLYPH_CELLS)
        .map(|i| (i / GLYPH_COLS, i % GLYPH_COLS))
        .filter(move |&(row, col)| digit_glyph_cell(digit, row, col).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(digit: u8) -> [[bool; GLYPH_COLS]; GLYPH_ROWS] {
        let mut out = [[false; GLYPH_COLS]; GLYPH_ROWS];
        for (row, line) in out.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = digit_glyph_cell(digit, row, col).unwrap();
            }
        }
        out
    }

    #[test]
    fn test_eight_is_fully_enclosed() {
        let eight = render(8);
        assert!(eight[0].iter().all(|&c| c), "Top row of 8 is solid");
        assert!(eight[2].iter().all(|&c| c), "Middle row of 8 is solid");
        assert!(eight[4].iter().all(|&c| c), "Bottom row of 8 is solid");
        for row in [1, 3] {
            assert_eq!(eight[row], [true, false, false, true], "Row {row} of 8 has both sides lit");
        }
    }

    #[test]
    fn test_one_is_right_aligned() {
        let one = render(1);
        for (row, line) in one.iter().enumerate() {
            assert!(line[3], "Right column of 1 lit on row {row}");
            assert!(!line[0], "Left column of 1 dark on row {row}");
        }
    }

    #[test]
    fn test_every_digit_has_distinct_pattern() {
        for a in 0..10u8 {
            for b in (a + 1)..10u8 {
                assert_ne!(render(a), render(b), "Digits {a} and {b} render the same");
            }
        }
    }

    #[test]
    fn test_lit_cell_counts() {
        assert_eq!(lit_cells(8).count(), 16);
        assert_eq!(lit_cells(1).count(), 6);
        assert_eq!(lit_cells(7).count(), 8);
        assert_eq!(lit_cells(10).count(), 0, "Invalid digit yields nothing");
    }

    #[test]
    fn test_out_of_range_lookups() {
        assert_eq!(
            digit_glyph_cell(10, 0, 0),
            Err(WidgetError::OutOfRange { what: "digit", value: 10, limit: 9 })
        );
        assert!(digit_glyph_cell(3, 5, 0).is_err(), "Row 5 is outside the glyph");
        assert!(digit_glyph_cell(3, 0, 4).is_err(), "Column 4 is outside the glyph");
    }
}
