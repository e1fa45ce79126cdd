//! Property-based tests for slot resolution.
//!
//! The union view across barbers must be a sorted, deduplicated merge
//! of every schedule, while a specific barber's view is their schedule
//! verbatim.

use proptest::prelude::*;
use turnero::availability::resolve_slots;
use turnero::models::{AvailabilityEntry, Barber};

fn arb_slot() -> impl Strategy<Value = String> {
    "([01][0-9]|2[0-3]):[0-5][0-9]"
}

fn arb_entry() -> impl Strategy<Value = AvailabilityEntry> {
    (1u32..6, prop::collection::vec(arb_slot(), 0..12)).prop_map(|(id, slots)| {
        AvailabilityEntry {
            barber_id: id,
            barber_name: format!("Barbero {id}"),
            available_slots: slots,
        }
    })
}

fn arb_entries() -> impl Strategy<Value = Vec<AvailabilityEntry>> {
    prop::collection::vec(arb_entry(), 0..5)
}

fn barber(id: u32) -> Barber {
    Barber {
        id,
        full_name: format!("Barbero {id}"),
        description: None,
        active: true,
    }
}

proptest! {
    /// The union of all schedules is sorted ascending with no
    /// duplicates.
    #[test]
    fn prop_union_is_sorted_and_deduped(entries in arb_entries()) {
        let slots = resolve_slots(None, &entries);
        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// The union holds exactly the slots that appear in some schedule.
    #[test]
    fn prop_union_matches_membership(entries in arb_entries()) {
        let slots = resolve_slots(None, &entries);

        for slot in &slots {
            prop_assert!(entries.iter().any(|e| e.available_slots.contains(slot)));
        }
        for entry in &entries {
            for slot in &entry.available_slots {
                prop_assert!(slots.contains(slot));
            }
        }
    }

    /// A barber with a schedule sees their own slots verbatim, order
    /// and duplicates included.
    #[test]
    fn prop_selected_barber_sees_own_schedule(entries in arb_entries(), id in 1u32..6) {
        let chosen = barber(id);
        let slots = resolve_slots(Some(&chosen), &entries);

        match entries.iter().find(|e| e.barber_id == id) {
            Some(entry) => prop_assert_eq!(slots, entry.available_slots.clone()),
            None => prop_assert!(slots.is_empty()),
        }
    }

    /// A barber outside every schedule resolves to no slots.
    #[test]
    fn prop_unknown_barber_sees_nothing(entries in arb_entries()) {
        let outsider = barber(99);
        prop_assert!(resolve_slots(Some(&outsider), &entries).is_empty());
    }

    /// Resolving twice gives the same answer; the inputs are not
    /// consumed or reordered.
    #[test]
    fn prop_resolution_is_pure(entries in arb_entries()) {
        let before = entries.clone();
        let first = resolve_slots(None, &entries);
        let second = resolve_slots(None, &entries);
        prop_assert_eq!(first, second);
        prop_assert_eq!(entries, before);
    }
}
