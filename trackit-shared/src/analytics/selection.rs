/// Picking individual shifts out of a set
///
/// Ties on the primary key are broken toward the most recent shift: later
/// `date`, then later `created_at`, then the greater `id`. The order is total,
/// so the same records always produce the same answer regardless of how the
/// store returned them.

use std::cmp::Ordering;

use crate::models::shift::Shift;

/// Recency order, newest greatest
fn recency(a: &Shift, b: &Shift) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Shift with the highest `total_earned`
pub fn best_shift(shifts: &[Shift]) -> Option<&Shift> {
    shifts.iter().max_by(|a, b| {
        a.total_earned()
            .cmp(&b.total_earned())
            .then_with(|| recency(a, b))
    })
}

/// Shift with the lowest `total_earned`
pub fn worst_shift(shifts: &[Shift]) -> Option<&Shift> {
    // min_by keeps the first minimum, so recency is reversed to make the
    // newest of several equal shifts win
    shifts.iter().min_by(|a, b| {
        a.total_earned()
            .cmp(&b.total_earned())
            .then_with(|| recency(b, a))
    })
}

/// Up to `limit` shifts, newest first
pub fn recent_shifts(shifts: &[Shift], limit: usize) -> Vec<Shift> {
    let mut sorted: Vec<&Shift> = shifts.iter().collect();
    sorted.sort_by(|a, b| recency(b, a));
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::ShiftBuilder;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_empty_set_has_no_best_or_worst() {
        assert!(best_shift(&[]).is_none());
        assert!(worst_shift(&[]).is_none());
        assert!(recent_shifts(&[], 5).is_empty());
    }

    #[test]
    fn test_single_record_is_both_best_and_worst() {
        let shift = ShiftBuilder::new(Uuid::new_v4(), "2024-06-01")
            .tips(dec!(10), dec!(5))
            .build();
        let shifts = vec![shift.clone()];

        assert_eq!(best_shift(&shifts), Some(&shift));
        assert_eq!(worst_shift(&shifts), Some(&shift));
    }

    #[test]
    fn test_best_and_worst_by_total_earned() {
        let user = Uuid::new_v4();
        // Most tips, but lowest total once wages are counted
        let tippy = ShiftBuilder::new(user, "2024-06-01")
            .hours(dec!(1), dec!(2))
            .tips(dec!(40), dec!(0))
            .build();
        let long = ShiftBuilder::new(user, "2024-06-02")
            .hours(dec!(10), dec!(15))
            .tips(dec!(5), dec!(5))
            .build();
        let middle = ShiftBuilder::new(user, "2024-06-03")
            .hours(dec!(4), dec!(10))
            .tips(dec!(10), dec!(10))
            .build();
        let shifts = vec![tippy.clone(), long.clone(), middle];

        assert_eq!(best_shift(&shifts).map(|s| s.id), Some(long.id));
        assert_eq!(worst_shift(&shifts).map(|s| s.id), Some(tippy.id));
    }

    #[test]
    fn test_ties_prefer_most_recent_date() {
        let user = Uuid::new_v4();
        let older = ShiftBuilder::new(user, "2024-01-01").tips(dec!(50), dec!(0)).build();
        let newer = ShiftBuilder::new(user, "2024-02-01").tips(dec!(0), dec!(50)).build();

        for shifts in [vec![older.clone(), newer.clone()], vec![newer.clone(), older.clone()]] {
            assert_eq!(best_shift(&shifts).map(|s| s.id), Some(newer.id));
            assert_eq!(worst_shift(&shifts).map(|s| s.id), Some(newer.id));
        }
    }

    #[test]
    fn test_same_day_ties_fall_back_to_created_at_then_id() {
        let user = Uuid::new_v4();
        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();

        let first = ShiftBuilder::new(user, "2024-03-01").created_at(morning).build();
        let second = ShiftBuilder::new(user, "2024-03-01").created_at(evening).build();
        let shifts = vec![second.clone(), first.clone()];
        assert_eq!(best_shift(&shifts).map(|s| s.id), Some(second.id));

        let low = ShiftBuilder::new(user, "2024-03-01")
            .created_at(morning)
            .id(Uuid::from_u128(1))
            .build();
        let high = ShiftBuilder::new(user, "2024-03-01")
            .created_at(morning)
            .id(Uuid::from_u128(2))
            .build();
        let shifts = vec![high, low];
        assert_eq!(worst_shift(&shifts).map(|s| s.id), Some(Uuid::from_u128(2)));
    }

    #[test]
    fn test_recent_shifts_newest_first_and_limited() {
        let user = Uuid::new_v4();
        let shifts: Vec<_> = ["2024-01-03", "2024-01-07", "2024-01-01", "2024-01-05", "2024-01-02", "2024-01-06"]
            .into_iter()
            .map(|day| ShiftBuilder::new(user, day).build())
            .collect();

        let dates: Vec<String> = recent_shifts(&shifts, 5)
            .iter()
            .map(|s| s.date.to_string())
            .collect();

        assert_eq!(
            dates,
            vec!["2024-01-07", "2024-01-06", "2024-01-05", "2024-01-03", "2024-01-02"]
        );
    }

    #[test]
    fn test_recent_shifts_returns_all_when_fewer_than_limit() {
        let user = Uuid::new_v4();
        let shifts = vec![
            ShiftBuilder::new(user, "2024-01-01").build(),
            ShiftBuilder::new(user, "2024-01-02").build(),
        ];

        let recent = recent_shifts(&shifts, 5);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date.to_string(), "2024-01-02");
        assert!(recent_shifts(&shifts, 0).is_empty());
    }
}
