/// Peer ranking of lifetime earnings
///
/// The population is every user owning at least one shift. The percentile
/// answers "what share of the *other* users earned strictly less than me":
///
/// ```text
/// percentile = round(users_below / (total_users - 1) * 100)   when total_users > 1
///            = 0                                             otherwise
/// ```
///
/// With two users the answer is therefore always 0 or 100. Users tied with
/// the caller count neither as below nor above.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::shift::OwnerTotal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileRank {
    /// Caller's lifetime earnings (zero without shifts)
    pub user_total: Decimal,

    /// Distinct users whose lifetime total is strictly lower
    pub users_below: u64,

    /// Distinct users with at least one shift
    pub total_users: u64,

    /// 0..=100
    pub percentile: u8,
}

/// Integer half-up rounding of `below * 100 / others`
fn percentile_of(below: u64, total_users: u64) -> u8 {
    if total_users <= 1 {
        return 0;
    }
    let others = total_users - 1;
    let rounded = (below * 200 + others) / (2 * others);
    rounded.min(100) as u8
}

/// Ranks `user_id` against per-owner lifetime totals
///
/// Rows for the same owner are summed first, so partial totals from a paged
/// scan can be passed straight in.
pub fn rank_against_peers<I>(user_id: Uuid, totals: I) -> PercentileRank
where
    I: IntoIterator<Item = OwnerTotal>,
{
    let mut by_owner: HashMap<Uuid, Decimal> = HashMap::new();
    for row in totals {
        *by_owner.entry(row.user_id).or_default() += row.total;
    }

    let user_total = by_owner.get(&user_id).copied().unwrap_or(Decimal::ZERO);
    let users_below = by_owner.values().filter(|total| **total < user_total).count() as u64;
    let total_users = by_owner.len() as u64;

    PercentileRank {
        user_total,
        users_below,
        total_users,
        percentile: percentile_of(users_below, total_users),
    }
}
