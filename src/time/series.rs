//! Contiguous period-indexed series.
//!
//! [`TimeSeries`] holds one value per period over an unbroken run of periods, ordered by
//! period. Lookup by period is O(1) through the step offset from the first period.
//! Instances are immutable; use [`TimeSeries::from_start`], [`TimeSeries::try_from_pairs`]
//! or [`TimeSeriesBuilder`] to create them.

use std::fmt;
use std::marker::PhantomData;
use std::slice;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::core::ValuationError;
use crate::time::period::TimePeriod;

/// Immutable series with exactly one value per period over a contiguous range.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<P, V> {
    periods: Vec<P>,
    values: Vec<V>,
}

impl<P, V> TimeSeries<P, V> {
    /// Series with no periods. Does not allocate.
    pub const fn empty() -> Self {
        Self {
            periods: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First period, `None` when empty.
    pub fn start(&self) -> Option<&P> {
        self.periods.first()
    }

    /// Last period, `None` when empty.
    pub fn end(&self) -> Option<&P> {
        self.periods.last()
    }

    /// Periods in chronological order.
    pub fn periods(&self) -> &[P] {
        &self.periods
    }

    /// Values aligned with [`TimeSeries::periods`].
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// `(period, value)` pairs in chronological order.
    pub fn iter(&self) -> Iter<'_, P, V> {
        Iter {
            inner: self.periods.iter().zip(self.values.iter()),
        }
    }

    /// Consumes the series, returning its periods and values.
    pub fn into_parts(self) -> (Vec<P>, Vec<V>) {
        (self.periods, self.values)
    }
}

impl<P: TimePeriod, V> TimeSeries<P, V> {
    /// Builds a series whose first period is `start`, one period per value.
    ///
    /// Fails when the last period would fall outside the range `P` can represent.
    pub fn from_start(start: P, values: Vec<V>) -> Result<Self, ValuationError> {
        let periods = (0..values.len() as i64)
            .map(|steps| {
                start
                    .offset(steps)
                    .ok_or_else(|| ValuationError::PeriodOutOfRange {
                        start: start.to_string(),
                        steps,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { periods, values })
    }

    /// Builds a series from `(period, value)` pairs given in chronological order.
    ///
    /// Fails when a period does not follow its predecessor by exactly one step.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, ValuationError>
    where
        I: IntoIterator<Item = (P, V)>,
    {
        let mut builder = TimeSeriesBuilder::new();
        for (period, value) in pairs {
            builder.add(period, value)?;
        }
        Ok(builder.build())
    }

    /// Value stored for `period`.
    pub fn get(&self, period: &P) -> Option<&V> {
        let start = *self.periods.first()?;
        let index = usize::try_from(period.offset_from(start)).ok()?;
        self.values.get(index)
    }

    pub fn contains(&self, period: &P) -> bool {
        self.get(period).is_some()
    }

    /// Whether `other` covers exactly the same periods, regardless of value type.
    pub fn has_same_periods<W>(&self, other: &TimeSeries<P, W>) -> bool {
        self.periods == other.periods
    }
}

impl<P, V> Default for TimeSeries<P, V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Iterator over `(period, value)` pairs of a [`TimeSeries`].
#[derive(Debug, Clone)]
pub struct Iter<'a, P, V> {
    inner: std::iter::Zip<slice::Iter<'a, P>, slice::Iter<'a, V>>,
}

impl<'a, P, V> Iterator for Iter<'a, P, V> {
    type Item = (&'a P, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<P, V> ExactSizeIterator for Iter<'_, P, V> {}

impl<P, V> DoubleEndedIterator for Iter<'_, P, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, P, V> IntoIterator for &'a TimeSeries<P, V> {
    type Item = (&'a P, &'a V);
    type IntoIter = Iter<'a, P, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Incremental builder enforcing chronological, gap-free insertion.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder<P, V> {
    periods: Vec<P>,
    values: Vec<V>,
}

impl<P: TimePeriod, V> TimeSeriesBuilder<P, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            periods: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends `value` for `period`, which must be the successor of the last added period.
    pub fn add(&mut self, period: P, value: V) -> Result<&mut Self, ValuationError> {
        if let Some(&previous) = self.periods.last() {
            if period <= previous {
                return Err(ValuationError::NonIncreasingPeriods {
                    previous: previous.to_string(),
                    next: period.to_string(),
                });
            }
            if period.offset_from(previous) != 1 {
                return Err(ValuationError::NonContiguousPeriods {
                    previous: previous.to_string(),
                    next: period.to_string(),
                });
            }
        }
        self.periods.push(period);
        self.values.push(value);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn build(self) -> TimeSeries<P, V> {
        TimeSeries {
            periods: self.periods,
            values: self.values,
        }
    }
}

impl<P: TimePeriod, V> Default for TimeSeriesBuilder<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V> Serialize for TimeSeries<P, V>
where
    P: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, P, V> Deserialize<'de> for TimeSeries<P, V>
where
    P: TimePeriod + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TimeSeriesVisitor(PhantomData))
    }
}

/// Feeds map entries to a [`TimeSeriesBuilder`] in payload order, so repeated,
/// out-of-order or gapped periods are rejected rather than merged.
struct TimeSeriesVisitor<P, V>(PhantomData<fn() -> (P, V)>);

impl<'de, P, V> Visitor<'de> for TimeSeriesVisitor<P, V>
where
    P: TimePeriod + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = TimeSeries<P, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of consecutive periods to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut builder = TimeSeriesBuilder::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some((period, value)) = map.next_entry::<P, V>()? {
            builder.add(period, value).map_err(de::Error::custom)?;
        }
        Ok(builder.build())
    }
}
