//! The published sizing constants and their sheet-format hand-off

use crate::column::ColumnSizing;
use crate::constants::DEFAULT_COLUMN_CHARACTERS;
use crate::row::RowSizing;

/// Default sizing for one font on one device.
///
/// Immutable once computed; callers cache one per (font, device) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    pub max_digit_width: u32,
    pub column_width_characters: f64,
    /// `column_step_table.len() == max_digit_width`
    pub column_step_table: Vec<f64>,
    pub column_width_emu: u64,
    pub row_height_points: f64,
    pub row_height_emu: u64,
}

impl SizingResult {
    pub(crate) fn from_parts(column: ColumnSizing, row: RowSizing) -> Self {
        Self {
            max_digit_width: column.max_digit_width,
            column_width_characters: column.width_characters,
            column_step_table: column.step_table,
            column_width_emu: column.width_emu,
            row_height_points: row.height_points,
            row_height_emu: row.height_emu,
        }
    }

    /// Values for a worksheet's sheet format properties
    pub fn sheet_format(&self) -> SheetFormatDefaults {
        SheetFormatDefaults {
            base_col_width: DEFAULT_COLUMN_CHARACTERS,
            default_col_width: self.column_width_characters,
            default_row_height: self.row_height_points,
        }
    }
}

/// `baseColWidth`, `defaultColWidth` and `defaultRowHeight` of a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFormatDefaults {
    pub base_col_width: u32,
    pub default_col_width: f64,
    pub default_row_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::derive_column_sizing;
    use crate::font::FontSpec;
    use crate::row::{RowHeightTable, derive_row_sizing};
    use crate::units::DeviceContext;

    #[test]
    fn test_sheet_format_from_result() {
        let ctx = DeviceContext::default();
        let column = derive_column_sizing(7, &ctx).unwrap();
        let row = derive_row_sizing(&FontSpec::body("Calibri"), &ctx, &RowHeightTable::default())
            .unwrap();
        let result = SizingResult::from_parts(column, row);

        assert_eq!(result.column_step_table.len(), result.max_digit_width as usize);
        let format = result.sheet_format();
        assert_eq!(format.base_col_width, 8);
        assert_eq!(format.default_col_width, result.column_width_characters);
        assert_eq!(format.default_row_height, 15.0);
    }
}
