//! Core view-state newtypes

use thiserror::Error;

/// Conversion between terminal cells and logical pixels.
///
/// The engine reasons in logical pixels (the 768px breakpoint, the 150px
/// spy offset). The terminal only has cells, so every measurement the host
/// hands to the engine goes through this scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PxScale {
    px_per_column: u32,
    px_per_row: u32,
}

/// Error returned when a scale factor is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pixel scale factors must be >= 1 (got {px_per_column}x{px_per_row})")]
pub struct InvalidScale {
    /// Rejected column width.
    pub px_per_column: u32,
    /// Rejected row height.
    pub px_per_row: u32,
}

impl PxScale {
    /// Default column width: 96 columns make exactly 768px.
    pub const DEFAULT_PX_PER_COLUMN: u32 = 8;

    /// Default row height.
    pub const DEFAULT_PX_PER_ROW: u32 = 16;

    /// Smart constructor rejecting zero factors.
    pub fn new(px_per_column: u32, px_per_row: u32) -> Result<Self, InvalidScale> {
        if px_per_column == 0 || px_per_row == 0 {
            return Err(InvalidScale {
                px_per_column,
                px_per_row,
            });
        }
        Ok(Self {
            px_per_column,
            px_per_row,
        })
    }

    /// Logical width of one column.
    pub fn px_per_column(&self) -> u32 {
        self.px_per_column
    }

    /// Logical height of one row.
    pub fn px_per_row(&self) -> u32 {
        self.px_per_row
    }

    /// Logical width of `columns` cells.
    pub fn width_px(&self, columns: u16) -> u32 {
        u32::from(columns) * self.px_per_column
    }

    /// Whole columns that fit in `width_px`.
    pub fn columns(&self, width_px: u32) -> u16 {
        u16::try_from(width_px / self.px_per_column).unwrap_or(u16::MAX)
    }

    /// Logical height of `rows` cells.
    pub fn height_px(&self, rows: u16) -> u32 {
        u32::from(rows) * self.px_per_row
    }

    /// Row containing the logical offset `y_px`.
    pub fn row_of(&self, y_px: u32) -> usize {
        (y_px / self.px_per_row) as usize
    }
}

impl Default for PxScale {
    fn default() -> Self {
        Self {
            px_per_column: Self::DEFAULT_PX_PER_COLUMN,
            px_per_row: Self::DEFAULT_PX_PER_ROW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_factors_are_rejected() {
        assert!(PxScale::new(0, 16).is_err());
        assert!(PxScale::new(8, 0).is_err());
        assert!(PxScale::new(1, 1).is_ok());
    }

    #[test]
    fn ninety_six_columns_hit_the_breakpoint() {
        let scale = PxScale::default();
        assert_eq!(scale.width_px(96), 768);
        assert_eq!(scale.width_px(95), 760);
        assert_eq!(scale.columns(768), 96);
        assert_eq!(scale.columns(775), 96);
    }

    #[test]
    fn rows_round_down() {
        let scale = PxScale::default();
        assert_eq!(scale.height_px(3), 48);
        assert_eq!(scale.row_of(47), 2);
        assert_eq!(scale.row_of(48), 3);
    }

    #[test]
    fn columns_saturate_at_u16_max() {
        let scale = PxScale::new(1, 1).unwrap();
        assert_eq!(scale.columns(u32::MAX), u16::MAX);
    }
}
