use time::Date;

use crate::ValidationError;
use crate::domain::PriceBar;

/// Ordered daily price series with strictly increasing dates.
///
/// Owned by the loader and passed by reference downstream; never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, ValidationError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ValidationError::NonIncreasingDates {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<Date> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Inclusive date-range subset. A subsequence of a valid series is
    /// still strictly increasing, so no re-validation is needed.
    pub fn filter_range(&self, start: Date, end: Date) -> Self {
        let bars = self
            .bars
            .iter()
            .filter(|bar| bar.date >= start && bar.date <= end)
            .copied()
            .collect();
        Self { bars }
    }
}
