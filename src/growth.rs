use ndarray::{s, Array2, Array3, ArrayView2, ArrayView3, Axis, Zip};
use tracing::debug;

use crate::data::{IncomeGroup, RawTable};
use crate::error::{GrowthError, Result};

/// Years between the base year and the 2100 projections.
pub const DEFAULT_YEARS: u32 = 80;

/// Average annual growth rates, fractional (0.01 == 1 %/yr).
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthRateTable {
    rates: Array3<f64>,
    years: u32,
}

impl GrowthRateTable {
    pub fn rates(&self) -> ArrayView3<'_, f64> {
        self.rates.view()
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn group(&self, group: IncomeGroup) -> ArrayView2<'_, f64> {
        self.rates.index_axis(Axis(0), group.index())
    }

    /// Rates of `group` in %/yr.
    pub fn percent(&self, group: IncomeGroup) -> Array2<f64> {
        self.group(group).mapv(|r| r * 100.0)
    }

    /// SSP1..SSP5 x the four warming levels of `group`, in %/yr.
    pub fn scenario_percent(&self, group: IncomeGroup) -> Array2<f64> {
        self.rates
            .slice(s![group.index(), 1.., 1..])
            .mapv(|r| r * 100.0)
    }
}

/// `(x / baseline)^(1/years) - 1` for every cell, where `baseline` is the
/// group's "No growth" / "No warming" cell.
///
/// Evaluated in log space so a tiny baseline cannot overflow the ratio; any
/// rate that still comes out non-finite is a [`GrowthError::Value`].
#[tracing::instrument(level = "info", skip(raw))]
pub fn compute_growth_rates(raw: &RawTable, years: u32) -> Result<GrowthRateTable> {
    if years == 0 {
        return Err(GrowthError::value("horizon", "years must be positive"));
    }
    let exponent = 1.0 / f64::from(years);
    let mut rates = Array3::<f64>::zeros(raw.values().dim());

    for group in IncomeGroup::ALL {
        let baseline = raw.baseline(group);
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(GrowthError::value(
                group.heading(),
                format!("baseline must be positive and finite, got {}", baseline),
            ));
        }
        let values = raw.group(group);
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(GrowthError::value(
                group.heading(),
                format!("projection {} cannot be annualized", bad),
            ));
        }

        let log_base = baseline.ln();
        let mut out = rates.index_axis_mut(Axis(0), group.index());
        Zip::from(&mut out)
            .and(&values)
            .for_each(|r, &x| *r = ((x.ln() - log_base) * exponent).exp_m1());
        if let Some(bad) = out.iter().find(|r| !r.is_finite()) {
            return Err(GrowthError::value(
                group.heading(),
                format!("annual rate {} is not finite", bad),
            ));
        }
        debug!(group = %group, baseline, "annualized");
    }

    Ok(GrowthRateTable { rates, years })
}
