// Domain and wire types for the booking API
//
// Field names are English; serde renames map them onto the Spanish wire
// contract (servicio/peluquero/turno vocabulary). Prices stay strings
// because the backend serializes decimals as strings ("1500.00").

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display label for the synthetic "no preference" barber option.
pub const ANY_BARBER_LABEL: &str = "Cualquier Barbero";

/// Summary wording used when the booking was made without a barber
/// preference.
pub const ANY_BARBER_SUMMARY: &str = "Cualquier barbero disponible";

/// A bookable service offered by the shop.
///
/// Immutable once fetched; the list is fetched once per wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "duracion_minutos")]
    pub duration_minutes: u32,
    #[serde(rename = "precio")]
    pub price: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A barber on staff.
///
/// "No preference" is not a Barber value: the wizard stores
/// `Option<Barber>` where `None` means any barber, and the presentation
/// layer renders that option with [`ANY_BARBER_LABEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: u32,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// One barber's free slots for a queried date, as returned by the
/// availability endpoint. Replaced wholesale on every query; never stored
/// beyond the current fetch key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    #[serde(rename = "peluquero_id")]
    pub barber_id: u32,
    #[serde(rename = "peluquero_nombre")]
    pub barber_name: String,
    #[serde(rename = "horarios_disponibles")]
    pub available_slots: Vec<String>,
}

/// POST body for creating a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "servicio_id")]
    pub service_id: u32,
    #[serde(rename = "peluquero_id", default, skip_serializing_if = "Option::is_none")]
    pub barber_id: Option<u32>,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "nombre_cliente")]
    pub customer_name: String,
    #[serde(rename = "telefono_cliente")]
    pub customer_phone: String,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The created booking echoed back by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub id: u32,
    #[serde(flatten)]
    pub details: BookingRequest,
}

/// Contact details collected on the final step. `notes` is free text and
/// optional; an empty or whitespace-only value is dropped from the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub notes: String,
}

impl ContactDetails {
    pub fn notes_or_none(&self) -> Option<String> {
        if self.notes.trim().is_empty() {
            None
        } else {
            Some(self.notes.clone())
        }
    }
}

/// Human-readable recap of a complete selection, shown above the contact
/// form and on the confirmation screen.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub service: String,
    /// `None` when the customer chose "any barber".
    pub barber: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub customer: String,
    pub phone: String,
    pub price: String,
}

impl BookingSummary {
    /// Barber line for display, falling back to the "any barber" wording.
    pub fn barber_display(&self) -> &str {
        self.barber.as_deref().unwrap_or(ANY_BARBER_SUMMARY)
    }

    /// Date line for display in the long Spanish form.
    pub fn date_display(&self) -> String {
        crate::schedule::format_long_date(self.date)
    }
}
