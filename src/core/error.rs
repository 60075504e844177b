use thiserror::Error;

/// Errors surfaced while building periods, series, and valuation results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Input validation error outside the structured cases below.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A period component (month, quarter) is out of range or unparsable.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
    /// Offsetting a period leaves the range its type can represent.
    #[error("period {steps} steps after {start} is out of range")]
    PeriodOutOfRange { start: String, steps: i64 },
    /// A series period is not strictly after its predecessor.
    #[error("period {next} is not after {previous}")]
    NonIncreasingPeriods { previous: String, next: String },
    /// A series skips one or more periods.
    #[error("period {next} does not follow {previous} contiguously")]
    NonContiguousPeriods { previous: String, next: String },
    /// Net present value is NaN or infinite.
    #[error("npv must be finite, got {0}")]
    NonFiniteNpv(f64),
    /// A period is present in one series but missing from the other.
    #[error("period {period} present in {present_in} but missing from {missing_from}")]
    PeriodMismatch {
        period: String,
        present_in: &'static str,
        missing_from: &'static str,
    },
    /// Number of decision lists differs from the number of inventory grid points.
    #[error(
        "period {period}: {decision_lists} decision lists for {grid_points} inventory grid points"
    )]
    DecisionCountMismatch {
        period: String,
        grid_points: usize,
        decision_lists: usize,
    },
}
