// Library interface for Turnero
// This exposes the booking flow as a library that can be:
// - Embedded into a UI shell (desktop or web frontend)
// - Driven programmatically from Rust code
// - Exercised from scripts and tests

pub mod availability;
pub mod error;
pub mod events;
pub mod flow;
pub mod gateway;  // REST data gateway (HTTP client + canned fixtures)
pub mod models;
pub mod schedule;
pub mod validation;
pub mod wizard;

// Re-export commonly used types for convenience
pub use availability::{resolve_slots, FetchKey};
pub use error::{BookingError, Result, TransportError, TransportKind};
pub use events::{Event, EventBus, EventKind};
pub use flow::{BookingFlow, BookingFlowBuilder, FetchStatus, StepData};
pub use gateway::{create_gateway, BookingGateway, FixtureGateway, GatewayConfig, HttpGateway};
pub use models::{
    AvailabilityEntry, Barber, BookingConfirmation, BookingRequest, BookingSummary,
    ContactDetails, Service,
};
pub use schedule::{available_dates, upcoming_dates, DateCard};
pub use validation::{validate_contact, ValidationErrors};
pub use wizard::{BackAction, BarberChoice, BookingWizard, WizardStep};
