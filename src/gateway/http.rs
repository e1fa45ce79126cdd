// HTTP implementation of the booking gateway.
//
// Wire quirks handled here so the rest of the crate never sees them:
// list endpoints answer either a raw array or a paginated
// `{"results": [...]}` envelope, the availability endpoint wraps its
// entries in a `disponibilidad` field, and slot strings may arrive as
// `HH:MM:SS` and are cut down to the canonical `HH:MM`.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use super::GatewayConfig;
use crate::error::{Result, TransportError};
use crate::models::{AvailabilityEntry, Barber, BookingConfirmation, BookingRequest, Service};

use super::BookingGateway;

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build the adapter with the configured timeout.
    ///
    /// # Errors
    /// - TLS backend initialization failure
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a `TransportError`, preferring
    /// the server's own `detail` message when the body carries one.
    async fn fail_from_response(response: reqwest::Response) -> TransportError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        TransportError::from_status(status, extract_detail(&body))
    }

    async fn get_list<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(path, "GET list");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(TransportError::from)?;

        if !response.status().is_success() {
            let err = Self::fail_from_response(response).await;
            tracing::warn!(path, error = %err, "list request failed");
            return Err(err.into());
        }

        let body = response.text().await.map_err(TransportError::from)?;
        let list: ListResponse<T> = decode(&body)?;
        Ok(list.into_items())
    }
}

#[async_trait]
impl BookingGateway for HttpGateway {
    async fn list_services(&self) -> Result<Vec<Service>> {
        self.get_list("/api/servicios/").await
    }

    async fn list_barbers(&self) -> Result<Vec<Barber>> {
        self.get_list("/api/peluqueros/").await
    }

    async fn get_availability(
        &self,
        date: NaiveDate,
        service_id: u32,
        barber_id: Option<u32>,
    ) -> Result<Vec<AvailabilityEntry>> {
        let mut params = vec![
            ("fecha", date.format("%Y-%m-%d").to_string()),
            ("servicio_id", service_id.to_string()),
        ];
        if let Some(id) = barber_id {
            params.push(("peluquero_id", id.to_string()));
        }

        tracing::debug!(%date, service_id, ?barber_id, "GET availability");
        let response = self
            .client
            .get(self.url("/api/turnos/disponibilidad/"))
            .query(&params)
            .send()
            .await
            .map_err(TransportError::from)?;

        if !response.status().is_success() {
            let err = Self::fail_from_response(response).await;
            tracing::warn!(%date, service_id, error = %err, "availability request failed");
            return Err(err.into());
        }

        let body = response.text().await.map_err(TransportError::from)?;
        let payload: AvailabilityResponse = decode(&body)?;
        Ok(payload
            .entries
            .into_iter()
            .map(normalize_entry)
            .collect())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation> {
        tracing::debug!(
            service_id = request.service_id,
            barber_id = ?request.barber_id,
            date = %request.date,
            time = %request.time,
            "POST booking"
        );
        let response = self
            .client
            .post(self.url("/api/turnos/"))
            .json(request)
            .send()
            .await
            .map_err(TransportError::from)?;

        if !response.status().is_success() {
            let err = Self::fail_from_response(response).await;
            tracing::warn!(error = %err, "booking request failed");
            return Err(err.into());
        }

        let body = response.text().await.map_err(TransportError::from)?;
        let confirmation = decode(&body)?;
        Ok(confirmation)
    }
}

/// Decode a success body. Malformed JSON is a `Serde` error, not a
/// transport failure; the request itself went through.
fn decode<T>(body: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    Ok(serde_json::from_str(body)?)
}

/// Pull the server's `detail` message out of an error body, if present.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .map(|detail| detail.to_string())
}

/// Canonicalize slot strings to `HH:MM`; backends sometimes answer with
/// seconds attached.
fn normalize_slot(slot: String) -> String {
    match slot.get(..5) {
        Some(prefix) if slot.len() > 5 => prefix.to_string(),
        _ => slot,
    }
}

fn normalize_entry(mut entry: AvailabilityEntry) -> AvailabilityEntry {
    entry.available_slots = entry
        .available_slots
        .into_iter()
        .map(normalize_slot)
        .collect();
    entry
}

// Internal wire types

/// List endpoints answer a raw array or a DRF-style paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Paginated { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { results } => results,
            ListResponse::Plain(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default, rename = "disponibilidad")]
    entries: Vec<AvailabilityEntry>,
}
