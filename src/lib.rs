//! Ferric Storage holds the result data model of a least-squares Monte Carlo (LSMC)
//! valuation of physical commodity storage.
//!
//! A valuation run produces one [`lsmc::LsmcValuationResult`]: the net present value at
//! the valuation date plus, for every period of the valuation horizon, the inventory-space
//! grid evaluated by backward induction and the inject/withdraw decision candidates
//! considered at each grid point. Results are immutable and validated on construction, so
//! downstream consumers never observe misaligned grids and decisions.
//!
//! Price simulation, regression and the backward induction itself live in the valuation
//! engine that produces these values; this crate only defines what the engine delivers.
//!
//! # Quick Start
//! Build a result for a single delivery month:
//! ```rust
//! use ferric_storage::lsmc::LsmcValuationResultBuilder;
//! use ferric_storage::time::Month;
//!
//! let jan = Month::new(2026, 1).unwrap();
//! let result = LsmcValuationResultBuilder::new(12_345.67)
//!     .period(
//!         jan,
//!         vec![0.0, 500.0, 1000.0],
//!         vec![vec![-200.0], vec![0.0, 50.0], vec![-300.0]],
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(result.num_periods(), 1);
//! assert_eq!(result.inventory_grid(&jan), Some(&[0.0, 500.0, 1000.0][..]));
//! ```
//!
//! Short-circuit storage whose horizon has already elapsed:
//! ```rust
//! use chrono::NaiveDate;
//! use ferric_storage::lsmc::LsmcValuationResult;
//!
//! let storage_end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
//! let result = LsmcValuationResult::expired_or_else(today, storage_end, || {
//!     unreachable!("expired storage is never valued")
//! })
//! .unwrap();
//!
//! assert!(result.is_expired());
//! assert_eq!(result.npv(), 0.0);
//! ```

pub mod core;
pub mod lsmc;
pub mod time;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::lsmc::*;
    pub use crate::time::*;
}
