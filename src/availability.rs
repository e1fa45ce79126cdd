// Availability aggregation over the per-barber slot lists the backend
// returns for one date.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{AvailabilityEntry, Barber};

/// Identity of one availability query. Responses are only applied when
/// their key still matches the current selection, which is what protects
/// the UI from a slow response landing after the user changed their mind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub service_id: u32,
    /// `None` means "any barber": fetch every barber's slots for the date.
    pub barber_id: Option<u32>,
    pub date: NaiveDate,
}

impl FetchKey {
    pub fn new(service_id: u32, barber_id: Option<u32>, date: NaiveDate) -> Self {
        Self {
            service_id,
            barber_id,
            date,
        }
    }
}

/// Resolve the time slots to offer for the current barber selection.
///
/// With a specific barber selected, that barber's slot list is returned
/// verbatim (the backend owns its ordering). With no preference, the
/// lists of every barber are merged into a deduplicated, ascending union;
/// `HH:MM` strings sort lexicographically in time order.
pub fn resolve_slots(selected: Option<&Barber>, entries: &[AvailabilityEntry]) -> Vec<String> {
    match selected {
        Some(barber) => entries
            .iter()
            .find(|entry| entry.barber_id == barber.id)
            .map(|entry| entry.available_slots.clone())
            .unwrap_or_default(),
        None => entries
            .iter()
            .flat_map(|entry| entry.available_slots.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect(),
    }
}
