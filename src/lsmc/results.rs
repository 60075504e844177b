//! Module `lsmc::results`.
//!
//! Output of a least-squares Monte Carlo storage valuation: the NPV at the valuation date
//! and, per period of the valuation horizon, the inventory-space grid evaluated by the
//! backward induction together with the inject/withdraw decision candidates considered at
//! each grid point.
//!
//! Key types: [`LsmcValuationResult`] (immutable, validated on construction),
//! [`LsmcValuationResultBuilder`] (producer-side accumulation from a single loop over the
//! horizon), and [`PeriodDecisions`] (per-period read view).
//!
//! A result is either populated or expired. The distinction is carried by the data alone:
//! an expired result has NPV zero and no periods in either series.

use serde::de::{self, Deserialize, Deserializer};
use tracing::{debug, trace, warn};

use crate::core::ValuationError;
use crate::time::{TimePeriod, TimeSeries, TimeSeriesBuilder};

/// Inventory levels evaluated per period.
pub type InventorySpaceGrids<P> = TimeSeries<P, Vec<f64>>;

/// Decision candidates per period, one list per inventory grid point.
pub type InjectWithdrawDecisions<P> = TimeSeries<P, Vec<Vec<f64>>>;

/// Immutable LSMC storage valuation output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LsmcValuationResult<P: TimePeriod> {
    npv: f64,
    inventory_space_grids: InventorySpaceGrids<P>,
    inject_withdraw_decisions: InjectWithdrawDecisions<P>,
}

impl<P: TimePeriod> LsmcValuationResult<P> {
    /// Creates a result, validating that both series cover the same periods and that each
    /// period carries one decision list per inventory grid point.
    pub fn new(
        npv: f64,
        inventory_space_grids: InventorySpaceGrids<P>,
        inject_withdraw_decisions: InjectWithdrawDecisions<P>,
    ) -> Result<Self, ValuationError> {
        if let Err(err) = validate(npv, &inventory_space_grids, &inject_withdraw_decisions) {
            warn!(error = %err, "rejected lsmc valuation result");
            return Err(err);
        }
        debug!(
            npv,
            num_periods = inventory_space_grids.len(),
            start = ?inventory_space_grids.start(),
            end = ?inventory_space_grids.end(),
            "lsmc valuation result constructed"
        );
        Ok(Self {
            npv,
            inventory_space_grids,
            inject_withdraw_decisions,
        })
    }

    /// Canonical result for storage whose valuation horizon has fully elapsed.
    pub fn expired() -> Self {
        trace!("creating expired lsmc valuation result");
        Self {
            npv: 0.0,
            inventory_space_grids: TimeSeries::empty(),
            inject_withdraw_decisions: TimeSeries::empty(),
        }
    }

    /// Returns [`LsmcValuationResult::expired`] when `current_period` is after
    /// `storage_end`, otherwise runs `compute`.
    pub fn expired_or_else<F>(
        current_period: P,
        storage_end: P,
        compute: F,
    ) -> Result<Self, ValuationError>
    where
        F: FnOnce() -> Result<Self, ValuationError>,
    {
        if current_period > storage_end {
            trace!(
                current_period = %current_period,
                storage_end = %storage_end,
                "storage expired before current period, skipping valuation"
            );
            return Ok(Self::expired());
        }
        compute()
    }

    /// Net present value at the valuation date.
    #[inline]
    pub fn npv(&self) -> f64 {
        self.npv
    }

    #[inline]
    pub fn inventory_space_grids(&self) -> &InventorySpaceGrids<P> {
        &self.inventory_space_grids
    }

    #[inline]
    pub fn inject_withdraw_decisions(&self) -> &InjectWithdrawDecisions<P> {
        &self.inject_withdraw_decisions
    }

    /// True for the canonical expired shape produced by [`LsmcValuationResult::expired`]:
    /// NPV zero and no periods in either series.
    pub fn is_expired(&self) -> bool {
        self.npv == 0.0 && self.has_no_periods()
    }

    /// True when neither series carries a period, whatever the NPV.
    pub fn has_no_periods(&self) -> bool {
        self.inventory_space_grids.is_empty() && self.inject_withdraw_decisions.is_empty()
    }

    pub fn num_periods(&self) -> usize {
        self.inventory_space_grids.len()
    }

    /// Periods of the valuation horizon in chronological order.
    pub fn periods(&self) -> &[P] {
        self.inventory_space_grids.periods()
    }

    /// Inventory grid evaluated at `period`.
    pub fn inventory_grid(&self, period: &P) -> Option<&[f64]> {
        self.inventory_space_grids.get(period).map(Vec::as_slice)
    }

    /// Decision lists at `period`, aligned with [`LsmcValuationResult::inventory_grid`].
    pub fn decisions(&self, period: &P) -> Option<&[Vec<f64>]> {
        self.inject_withdraw_decisions
            .get(period)
            .map(Vec::as_slice)
    }

    /// Per-period views pairing each grid with its decisions.
    pub fn iter_periods(&self) -> impl ExactSizeIterator<Item = PeriodDecisions<'_, P>> + '_ {
        self.inventory_space_grids
            .iter()
            .zip(self.inject_withdraw_decisions.values())
            .map(|((period, grid), decisions)| PeriodDecisions {
                period: *period,
                inventory_grid: grid,
                decisions,
            })
    }

    /// Consumes the result, returning `(npv, inventory_space_grids, inject_withdraw_decisions)`.
    pub fn into_parts(self) -> (f64, InventorySpaceGrids<P>, InjectWithdrawDecisions<P>) {
        (
            self.npv,
            self.inventory_space_grids,
            self.inject_withdraw_decisions,
        )
    }
}

fn validate<P: TimePeriod>(
    npv: f64,
    grids: &InventorySpaceGrids<P>,
    decisions: &InjectWithdrawDecisions<P>,
) -> Result<(), ValuationError> {
    if !npv.is_finite() {
        return Err(ValuationError::NonFiniteNpv(npv));
    }

    if let Some(period) = grids.periods().iter().find(|p| !decisions.contains(p)) {
        return Err(ValuationError::PeriodMismatch {
            period: period.to_string(),
            present_in: "inventory_space_grids",
            missing_from: "inject_withdraw_decisions",
        });
    }
    if let Some(period) = decisions.periods().iter().find(|p| !grids.contains(p)) {
        return Err(ValuationError::PeriodMismatch {
            period: period.to_string(),
            present_in: "inject_withdraw_decisions",
            missing_from: "inventory_space_grids",
        });
    }

    // Both series are contiguous with equal period sets, so values align by index.
    for ((period, grid), period_decisions) in grids.iter().zip(decisions.values()) {
        if grid.len() != period_decisions.len() {
            return Err(ValuationError::DecisionCountMismatch {
                period: period.to_string(),
                grid_points: grid.len(),
                decision_lists: period_decisions.len(),
            });
        }
    }

    Ok(())
}

impl<'de, P> Deserialize<'de> for LsmcValuationResult<P>
where
    P: TimePeriod + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(bound(deserialize = "P: TimePeriod + Deserialize<'de>"))]
        struct Raw<P> {
            npv: f64,
            inventory_space_grids: TimeSeries<P, Vec<f64>>,
            inject_withdraw_decisions: TimeSeries<P, Vec<Vec<f64>>>,
        }

        let raw = Raw::<P>::deserialize(deserializer)?;
        Self::new(
            raw.npv,
            raw.inventory_space_grids,
            raw.inject_withdraw_decisions,
        )
        .map_err(de::Error::custom)
    }
}

/// Read view of one period: the inventory grid and the decisions at each grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodDecisions<'a, P> {
    pub period: P,
    pub inventory_grid: &'a [f64],
    /// `decisions[i]` holds the candidates evaluated at `inventory_grid[i]`.
    pub decisions: &'a [Vec<f64>],
}

impl<P> PeriodDecisions<'_, P> {
    /// `(inventory level, decision candidates)` pairs.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (f64, &[f64])> + '_ {
        self.inventory_grid
            .iter()
            .zip(self.decisions)
            .map(|(&inventory, candidates)| (inventory, candidates.as_slice()))
    }
}

/// Accumulates per-period grids and decisions, producing a validated result on `build`.
///
/// Intended for engines that fill both series from the same loop over the horizon.
#[derive(Debug, Clone)]
pub struct LsmcValuationResultBuilder<P> {
    npv: f64,
    periods: Vec<(P, Vec<f64>, Vec<Vec<f64>>)>,
}

impl<P: TimePeriod> LsmcValuationResultBuilder<P> {
    pub fn new(npv: f64) -> Self {
        Self {
            npv,
            periods: Vec::new(),
        }
    }

    /// Appends one period; periods must be added in chronological order without gaps.
    pub fn period(mut self, period: P, inventory_grid: Vec<f64>, decisions: Vec<Vec<f64>>) -> Self {
        self.periods.push((period, inventory_grid, decisions));
        self
    }

    /// Validates and builds a [`LsmcValuationResult`].
    pub fn build(self) -> Result<LsmcValuationResult<P>, ValuationError> {
        let mut grids = TimeSeriesBuilder::with_capacity(self.periods.len());
        let mut decisions = TimeSeriesBuilder::with_capacity(self.periods.len());
        for (period, grid, period_decisions) in self.periods {
            grids.add(period, grid)?;
            decisions.add(period, period_decisions)?;
        }
        LsmcValuationResult::new(self.npv, grids.build(), decisions.build())
    }
}
