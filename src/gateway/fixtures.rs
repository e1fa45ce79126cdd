// Fixture implementation of the booking gateway.
//
// Serves a small static dataset so the whole flow can run without a
// backend (development, demos, integration tests). Selected via
// `TURNERO_USE_FIXTURES`; the flow cannot tell it apart from the HTTP
// adapter.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::BookingGateway;
use crate::error::Result;
use crate::models::{AvailabilityEntry, Barber, BookingConfirmation, BookingRequest, Service};

pub struct FixtureGateway {
    next_booking_id: AtomicU32,
}

impl FixtureGateway {
    pub fn new() -> Self {
        Self {
            next_booking_id: AtomicU32::new(1),
        }
    }
}

impl Default for FixtureGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn service(id: u32, name: &str, minutes: u32, price: &str, description: &str) -> Service {
    Service {
        id,
        name: name.to_string(),
        duration_minutes: minutes,
        price: price.to_string(),
        description: Some(description.to_string()),
    }
}

fn barber(id: u32, full_name: &str, description: &str) -> Barber {
    Barber {
        id,
        full_name: full_name.to_string(),
        description: Some(description.to_string()),
        active: true,
    }
}

fn catalog() -> Vec<Service> {
    vec![
        service(
            1,
            "Corte de Cabello",
            30,
            "1500.00",
            "Corte de cabello tradicional con máquina y tijera",
        ),
        service(2, "Barba", 20, "800.00", "Arreglo y diseño de barba"),
        service(
            3,
            "Corte + Barba",
            45,
            "2000.00",
            "Servicio completo de corte de cabello y barba",
        ),
        service(
            4,
            "Afeitado Clásico",
            25,
            "1200.00",
            "Afeitado tradicional con navaja y toallas calientes",
        ),
    ]
}

fn roster() -> Vec<Barber> {
    vec![
        barber(
            1,
            "Jack Rodriguez",
            "Barbero profesional con 15 años de experiencia",
        ),
        barber(2, "María García", "Especialista en cortes modernos y clásicos"),
        barber(
            3,
            "Carlos López",
            "Experto en afeitado tradicional y cuidado de barba",
        ),
    ]
}

/// The day's schedule. Barbers 1 and 2 work interleaved half-hour
/// grids; barber 3 has no slots, which exercises the empty-entry path.
fn schedule() -> Vec<AvailabilityEntry> {
    let slots = |times: &[&str]| times.iter().map(|t| t.to_string()).collect();

    vec![
        AvailabilityEntry {
            barber_id: 1,
            barber_name: "Jack Rodriguez".to_string(),
            available_slots: slots(&[
                "09:00", "09:30", "10:00", "10:30", "11:00", "14:00", "14:30", "15:00",
                "15:30", "16:00",
            ]),
        },
        AvailabilityEntry {
            barber_id: 2,
            barber_name: "María García".to_string(),
            available_slots: slots(&[
                "09:15", "09:45", "10:15", "10:45", "11:15", "14:15", "14:45", "15:15",
                "15:45", "16:15",
            ]),
        },
    ]
}

#[async_trait]
impl BookingGateway for FixtureGateway {
    async fn list_services(&self) -> Result<Vec<Service>> {
        Ok(catalog())
    }

    async fn list_barbers(&self) -> Result<Vec<Barber>> {
        Ok(roster())
    }

    async fn get_availability(
        &self,
        date: NaiveDate,
        service_id: u32,
        barber_id: Option<u32>,
    ) -> Result<Vec<AvailabilityEntry>> {
        tracing::debug!(%date, service_id, ?barber_id, "fixture availability");

        // Same schedule every day; a narrowed query returns only that
        // barber's entry, like the real backend does.
        let entries = schedule()
            .into_iter()
            .filter(|entry| barber_id.is_none() || barber_id == Some(entry.barber_id))
            .collect();
        Ok(entries)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation> {
        let id = self.next_booking_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(id, "fixture booking created");

        Ok(BookingConfirmation {
            id,
            details: request.clone(),
        })
    }
}
