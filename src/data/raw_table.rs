use ndarray::{Array3, ArrayView2, ArrayView3};

use super::labels::IncomeGroup;
use crate::error::{GrowthError, Result};

/// (income groups, growth scenarios, warming scenarios)
pub const TABLE_SHAPE: (usize, usize, usize) = (4, 6, 5);

/// Per-capita GDP in 2100 for every group/scenario combination.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    values: Array3<f64>,
}

impl RawTable {
    /// Wraps an already-built array, rejecting anything but the 4x6x5 shape.
    pub fn from_array(values: Array3<f64>) -> Result<Self> {
        if values.dim() != TABLE_SHAPE {
            return Err(GrowthError::Shape(format!(
                "expected {:?}, got {:?}",
                TABLE_SHAPE,
                values.dim()
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    pub fn group(&self, group: IncomeGroup) -> ArrayView2<'_, f64> {
        self.values.index_axis(ndarray::Axis(0), group.index())
    }

    /// The "No growth" / "No warming" reference cell of `group`.
    pub fn baseline(&self, group: IncomeGroup) -> f64 {
        self.values[[group.index(), 0, 0]]
    }
}
