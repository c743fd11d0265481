/// Summary statistics over a set of shifts
///
/// Sums are exact. Averages are rounded to cents (midpoint away from zero).
/// An empty set yields zero everywhere rather than an error or a missing
/// value.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::shift::Shift;

/// Decimal places kept on averages
pub const CURRENCY_SCALE: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftStatistics {
    pub total_shifts: u64,
    pub total_hours: Decimal,
    pub total_cash_tips: Decimal,
    pub total_credit_tips: Decimal,

    /// Cash plus credit, summed per shift
    pub total_tips: Decimal,

    /// `hours * wage` per shift, then summed; wages differ between shifts
    pub total_wages: Decimal,

    /// Per-shift `total_earned`, summed
    pub total_earnings: Decimal,

    pub avg_tips_per_shift: Decimal,

    /// Mean of each shift's own tips/hours; zero-hour shifts are left out
    pub avg_tips_per_hour: Decimal,

    /// Largest tip amount on a single shift
    pub best_tips: Decimal,

    /// Smallest tip amount on a single shift
    pub worst_tips: Decimal,
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn mean(sum: Decimal, count: u64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    sum.checked_div(Decimal::from(count))
        .map(round_currency)
        .unwrap_or(Decimal::ZERO)
}

pub fn summarize(shifts: &[Shift]) -> ShiftStatistics {
    let mut stats = ShiftStatistics::default();
    let mut hourly_rate_sum = Decimal::ZERO;
    let mut hourly_rate_count = 0u64;
    let mut best_tips: Option<Decimal> = None;
    let mut worst_tips: Option<Decimal> = None;

    for shift in shifts {
        let tips = shift.tips();

        stats.total_shifts += 1;
        stats.total_hours += shift.hours_worked;
        stats.total_cash_tips += shift.cash_tips;
        stats.total_credit_tips += shift.credit_tips;
        stats.total_tips += tips;
        stats.total_wages += shift.wages();
        stats.total_earnings += shift.total_earned();

        if let Some(rate) = shift.tips_per_hour() {
            hourly_rate_sum += rate;
            hourly_rate_count += 1;
        }

        best_tips = Some(best_tips.map_or(tips, |best| best.max(tips)));
        worst_tips = Some(worst_tips.map_or(tips, |worst| worst.min(tips)));
    }

    stats.avg_tips_per_shift = mean(stats.total_tips, stats.total_shifts);
    stats.avg_tips_per_hour = mean(hourly_rate_sum, hourly_rate_count);
    stats.best_tips = best_tips.unwrap_or(Decimal::ZERO);
    stats.worst_tips = worst_tips.unwrap_or(Decimal::ZERO);

    stats
}
