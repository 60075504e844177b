//! Least-squares Monte Carlo storage valuation output.

pub mod results;

pub use results::{
    InjectWithdrawDecisions, InventorySpaceGrids, LsmcValuationResult,
    LsmcValuationResultBuilder, PeriodDecisions,
};
