//! Rating aggregation shared by every store implementation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round the exact stored value to one decimal place, halves away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

/// Average and count over a set of ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    /// Returns `None` for an empty set.
    pub fn from_ratings<I>(ratings: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0.0_f64, 0_u32), |(sum, count), rating| (sum + rating, count + 1));

        if count == 0 {
            return None;
        }

        Some(Self {
            average: round_to_tenth(sum / f64::from(count)),
            count,
        })
    }
}
