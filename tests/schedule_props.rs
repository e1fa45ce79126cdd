//! Property-based tests for the scheduling window.
//!
//! These validate invariants that must hold for any reference date: the
//! window length, the Sunday exclusion and the ordering of the produced
//! dates.

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use turnero::schedule::{available_dates, format_date_card, is_bookable};

/// Generates arbitrary dates across several years. Days stop at 28 so
/// every (year, month, day) triple is valid.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2031, 1u32..13, 1u32..29)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    /// The window always holds exactly the requested number of dates,
    /// regardless of how many Sundays it has to skip.
    #[test]
    fn prop_window_length_is_exact(reference in arb_date(), count in 0usize..40) {
        let dates = available_dates(reference, count);
        prop_assert_eq!(dates.len(), count);
    }

    /// Sundays never appear in the window.
    #[test]
    fn prop_window_skips_sundays(reference in arb_date()) {
        for date in available_dates(reference, 14) {
            prop_assert_ne!(date.weekday(), Weekday::Sun);
        }
    }

    /// Dates are strictly ascending, start no earlier than the reference
    /// and never jump more than one skipped Sunday ahead.
    #[test]
    fn prop_window_is_ordered_and_dense(reference in arb_date()) {
        let dates = available_dates(reference, 14);

        prop_assert!(dates[0] >= reference);
        for pair in dates.windows(2) {
            let gap = pair[1].signed_duration_since(pair[0]).num_days();
            prop_assert!(gap == 1 || gap == 2);
            if gap == 2 {
                // The skipped day must have been a Sunday.
                let skipped = pair[0].succ_opt().unwrap();
                prop_assert_eq!(skipped.weekday(), Weekday::Sun);
            }
        }
    }

    /// Every date in the window is bookable relative to the reference.
    #[test]
    fn prop_window_dates_are_bookable(reference in arb_date()) {
        for date in available_dates(reference, 14) {
            prop_assert!(is_bookable(reference, date));
        }
    }

    /// Bookability is exactly the "not in the past" comparison.
    #[test]
    fn prop_bookable_matches_ordering(today in arb_date(), date in arb_date()) {
        prop_assert_eq!(is_bookable(today, date), date >= today);
    }

    /// Date cards carry the calendar day number and a Sunday label only
    /// for actual Sundays.
    #[test]
    fn prop_date_card_is_consistent(date in arb_date()) {
        let card = format_date_card(date);
        prop_assert_eq!(card.day_number, date.day());
        prop_assert_eq!(card.day_label == "Dom", date.weekday() == Weekday::Sun);
        prop_assert!(!card.month_label.is_empty());
    }
}
