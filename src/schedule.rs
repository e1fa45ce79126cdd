// Scheduling clock: which calendar dates can be offered for booking
//
// The shop closes on Sundays, so the bookable window is "the next N
// non-Sunday days". Everything here is pure except upcoming_dates, which
// reads the local clock for the reference day.

use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Size of the date window the booking screen offers.
pub const DEFAULT_WINDOW_DAYS: usize = 14;

const ABBREV_DAYS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];
const ABBREV_MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];
const FULL_DAYS: [&str; 7] = [
    "domingo",
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
];
const FULL_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Produce the next `count` bookable dates starting at `reference`
/// (inclusive), skipping Sundays.
///
/// The result is strictly increasing, contains no Sundays, and has length
/// exactly `count`. Deterministic for a given `reference`.
pub fn available_dates(reference: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut current = reference;

    while dates.len() < count {
        if current.weekday() != Weekday::Sun {
            dates.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            // End of representable time; nothing further to walk.
            None => break,
        }
    }

    dates
}

/// The default booking window starting today.
pub fn upcoming_dates() -> Vec<NaiveDate> {
    available_dates(Local::now().date_naive(), DEFAULT_WINDOW_DAYS)
}

/// A booking may target today or any later date.
pub fn is_bookable(today: NaiveDate, date: NaiveDate) -> bool {
    date >= today
}

/// The three lines a date picker card shows for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCard {
    pub day_label: &'static str,
    pub day_number: u32,
    pub month_label: &'static str,
}

/// Abbreviated Spanish card form, e.g. Lun / 15 / Ene.
pub fn format_date_card(date: NaiveDate) -> DateCard {
    DateCard {
        day_label: ABBREV_DAYS[date.weekday().num_days_from_sunday() as usize],
        day_number: date.day(),
        month_label: ABBREV_MONTHS[date.month0() as usize],
    }
}

/// Long Spanish form used in booking summaries:
/// `"lunes, 15 de enero de 2024"`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        FULL_DAYS[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        FULL_MONTHS[date.month0() as usize],
        date.year()
    )
}
