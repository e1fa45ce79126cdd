// Remote data gateway: everything the booking flow needs from the
// backend, behind one trait so the flow can be driven by the real HTTP
// adapter, the bundled fixtures or a mock in tests.
//
// Usage:
//     let config = GatewayConfig::from_env()?;
//     let gateway: Arc<dyn BookingGateway> = create_gateway(&config)?;
//     let services = gateway.list_services().await?;

pub mod config;
pub mod fixtures;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::models::{AvailabilityEntry, Barber, BookingConfirmation, BookingRequest, Service};

pub use config::GatewayConfig;
pub use fixtures::FixtureGateway;
pub use http::HttpGateway;

/// Backend operations consumed by the booking flow.
///
/// Every method fails with a `TransportError` carrying a displayable
/// Spanish message; no call is retried automatically.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Fetch the service catalog.
    async fn list_services(&self) -> Result<Vec<Service>>;

    /// Fetch the barber roster.
    async fn list_barbers(&self) -> Result<Vec<Barber>>;

    /// Fetch per-barber availability for one date. `barber_id` narrows
    /// the query to a single barber; `None` asks for everyone.
    async fn get_availability(
        &self,
        date: NaiveDate,
        service_id: u32,
        barber_id: Option<u32>,
    ) -> Result<Vec<AvailabilityEntry>>;

    /// Submit a booking and return the backend's confirmation.
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation>;
}

/// Build the gateway the configuration asks for: fixtures when
/// `use_fixtures` is set, the HTTP adapter otherwise.
pub fn create_gateway(config: &GatewayConfig) -> Result<Arc<dyn BookingGateway>> {
    if config.use_fixtures {
        tracing::info!("Using fixture gateway (no network calls)");
        Ok(Arc::new(FixtureGateway::new()))
    } else {
        tracing::info!(base_url = %config.base_url, "Using HTTP gateway");
        Ok(Arc::new(HttpGateway::new(config)?))
    }
}
