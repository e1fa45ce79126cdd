// Booking flow orchestrator.
//
// Wraps the pure wizard with the gateway and the event bus: transition
// methods mutate the wizard first, then run the reactive fetch checks
// (barber roster when a service is in place and the roster is empty,
// availability when the fetch key changed). Gateway failures never
// escape as panics or stray errors; they are written into step-scoped
// state so the embedding shell can render them inline, and retrying is
// a matter of repeating the same selection.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::availability::FetchKey;
use crate::error::{BookingError, Result};
use crate::events::{Event, EventBus, EventKind};
use crate::gateway::{create_gateway, BookingGateway, GatewayConfig};
use crate::models::{Barber, BookingConfirmation, Service};
use crate::wizard::{BackAction, BookingWizard, WizardStep};

/// Load state of one step's remote collection.
///
/// `is_empty_loaded` distinguishes "the backend has nothing to offer"
/// from a failed fetch; the two render differently.
#[derive(Debug, Clone, PartialEq)]
pub struct StepData<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    loaded: bool,
}

impl<T> Default for StepData<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            loaded: false,
        }
    }
}

impl<T> StepData<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A fetch completed successfully and returned nothing.
    pub fn is_empty_loaded(&self) -> bool {
        self.loaded && self.error.is_none() && self.items.is_empty()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn succeed(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.loaded = true;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Load state of the availability fetch; the entries themselves live in
/// the wizard behind the stale-response guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    loading: bool,
    error: Option<String>,
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn succeed(&mut self) {
        self.loading = false;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The booking flow: wizard, data loading and event publishing in one
/// place. One instance per booking session.
pub struct BookingFlow {
    wizard: BookingWizard,
    gateway: Arc<dyn BookingGateway>,
    event_bus: Arc<EventBus>,
    services: StepData<Service>,
    barbers: StepData<Barber>,
    availability_status: FetchStatus,
    last_dispatched_key: Option<FetchKey>,
    submit_error: Option<String>,
}

impl BookingFlow {
    pub fn builder() -> BookingFlowBuilder {
        BookingFlowBuilder::new()
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    pub fn services(&self) -> &StepData<Service> {
        &self.services
    }

    pub fn barbers(&self) -> &StepData<Barber> {
        &self.barbers
    }

    pub fn availability_status(&self) -> &FetchStatus {
        &self.availability_status
    }

    /// Message from the last failed booking submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Subscribe to flow events (step changes, confirmations, errors).
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_bus.subscribe()
    }

    /// Events are optional notifications; nobody listening is fine.
    fn emit(&self, kind: EventKind) {
        let _ = self.event_bus.publish(Event::new("flow", kind));
    }

    /// Begin the session: loads the service catalog (once; calling again
    /// is a no-op unless the first load failed).
    pub async fn start(&mut self) {
        self.emit(EventKind::StepChanged(WizardStep::Service));

        if self.services.loaded {
            return;
        }

        self.services.begin();
        match self.gateway.list_services().await {
            Ok(items) => {
                tracing::info!(count = items.len(), "service catalog loaded");
                let count = items.len();
                self.services.succeed(items);
                self.emit(EventKind::ServicesLoaded { count });
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "service catalog failed to load");
                self.services.fail(message.clone());
                self.emit(EventKind::FetchFailed(message));
            }
        }
    }

    /// Record the chosen service and move to the barber step; fetches
    /// the roster when it is not loaded yet.
    pub async fn select_service(&mut self, service: Service) -> Result<()> {
        let step = self.wizard.select_service(service)?;
        self.emit(EventKind::StepChanged(step));
        self.react().await;
        Ok(())
    }

    /// Record the barber choice (`None` for "any barber") and move to
    /// the date step.
    pub async fn select_barber(&mut self, barber: Option<Barber>) -> Result<()> {
        let step = self.wizard.select_barber(barber)?;
        self.emit(EventKind::StepChanged(step));
        self.react().await;
        Ok(())
    }

    /// Record the chosen date and load availability for the new fetch
    /// key.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        self.wizard.select_date(date)?;
        self.react().await;
        Ok(())
    }

    /// Record the chosen time slot.
    pub fn select_time(&mut self, time: &str) -> Result<()> {
        self.wizard.select_time(time)
    }

    /// Advance from the date step to the contact step.
    pub fn go_next(&mut self) -> Result<()> {
        let step = self.wizard.go_next()?;
        self.emit(EventKind::StepChanged(step));
        Ok(())
    }

    /// Move back one step. At the first step the wizard stays put and a
    /// `ReturnToLanding` event asks the shell to leave the wizard.
    pub async fn go_back(&mut self) -> Result<()> {
        match self.wizard.go_back()? {
            BackAction::Step(step) => {
                self.emit(EventKind::StepChanged(step));
                // Revisiting a step whose data never loaded retries the
                // fetch.
                self.react().await;
            }
            BackAction::Landing => {
                self.emit(EventKind::ReturnToLanding);
            }
        }
        Ok(())
    }

    pub fn set_contact_name(&mut self, name: &str) {
        self.wizard.set_contact_name(name);
    }

    pub fn set_contact_phone(&mut self, phone: &str) {
        self.wizard.set_contact_phone(phone);
    }

    pub fn set_contact_notes(&mut self, notes: &str) {
        self.wizard.set_contact_notes(notes);
    }

    /// Validate the contact details and submit the booking.
    ///
    /// Validation failures come back as `BookingError::Validation` with
    /// the per-field messages also stored on the wizard. A gateway
    /// failure is stored in [`submit_error`](Self::submit_error) and
    /// returned; the contact step stays editable for another attempt.
    pub async fn submit(&mut self) -> Result<BookingConfirmation> {
        let request = match self.wizard.booking_request() {
            Ok(request) => request,
            Err(err) => {
                if let BookingError::Validation(errors) = &err {
                    self.emit(EventKind::ValidationFailed(errors.clone()));
                }
                return Err(err);
            }
        };

        self.submit_error = None;
        match self.gateway.create_booking(&request).await {
            Ok(confirmation) => {
                tracing::info!(id = confirmation.id, "booking confirmed");
                self.wizard.record_confirmation(confirmation.clone())?;
                self.emit(EventKind::BookingConfirmed(confirmation.clone()));
                Ok(confirmation)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "booking submission failed");
                self.submit_error = Some(message.clone());
                self.emit(EventKind::FetchFailed(message));
                Err(err)
            }
        }
    }

    /// Drop every selection and cached collection for a fresh session.
    /// Call [`start`](Self::start) afterwards to reload the catalog.
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.services.clear();
        self.barbers.clear();
        self.availability_status.clear();
        self.last_dispatched_key = None;
        self.submit_error = None;
    }

    /// Reactive fetch checks, run after each selection transition.
    async fn react(&mut self) {
        if self.wizard.selected_service().is_some()
            && self.barbers.items.is_empty()
            && !self.barbers.loading
        {
            self.fetch_barbers().await;
        }

        if let Some(key) = self.wizard.required_fetch_key() {
            if self.last_dispatched_key != Some(key) {
                self.fetch_availability(key).await;
            }
        }
    }

    async fn fetch_barbers(&mut self) {
        self.barbers.begin();
        match self.gateway.list_barbers().await {
            Ok(items) => {
                tracing::info!(count = items.len(), "barber roster loaded");
                let count = items.len();
                self.barbers.succeed(items);
                self.emit(EventKind::BarbersLoaded { count });
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "barber roster failed to load");
                self.barbers.fail(message.clone());
                self.emit(EventKind::FetchFailed(message));
            }
        }
    }

    async fn fetch_availability(&mut self, key: FetchKey) {
        self.last_dispatched_key = Some(key);
        self.availability_status.begin();

        match self
            .gateway
            .get_availability(key.date, key.service_id, key.barber_id)
            .await
        {
            Ok(entries) => {
                if self.wizard.apply_availability(key, entries) {
                    self.availability_status.succeed();
                    let slot_count = self.wizard.resolved_slots().len();
                    tracing::debug!(?key, slot_count, "availability applied");
                    self.emit(EventKind::AvailabilityLoaded { slot_count });
                } else {
                    // Selection moved on while the fetch was in flight.
                    tracing::warn!(?key, "stale availability discarded");
                    self.availability_status.succeed();
                    self.emit(EventKind::StaleAvailabilityDiscarded);
                }
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(?key, error = %message, "availability failed to load");
                self.availability_status.fail(message.clone());
                // Re-selecting the same date dispatches a fresh fetch.
                self.last_dispatched_key = None;
                self.emit(EventKind::FetchFailed(message));
            }
        }
    }
}

/// Builder for [`BookingFlow`].
///
/// Either inject a gateway directly (tests, embedding) or provide a
/// [`GatewayConfig`] and let the builder construct one; with neither,
/// the default config (local backend, no fixtures) is used.
pub struct BookingFlowBuilder {
    gateway: Option<Arc<dyn BookingGateway>>,
    event_bus: Option<Arc<EventBus>>,
    config: Option<GatewayConfig>,
}

impl BookingFlowBuilder {
    pub fn new() -> Self {
        Self {
            gateway: None,
            event_bus: None,
            config: None,
        }
    }

    /// Use this gateway instead of building one from config.
    pub fn gateway(mut self, gateway: Arc<dyn BookingGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Share an event bus with the embedding shell (optional - one is
    /// created if not provided).
    pub fn event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Gateway settings used when no gateway is injected.
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the flow.
    ///
    /// # Errors
    /// - HTTP client construction failure
    pub fn build(self) -> Result<BookingFlow> {
        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None => create_gateway(&self.config.unwrap_or_default())?,
        };
        let event_bus = self.event_bus.unwrap_or_else(|| Arc::new(EventBus::new()));

        Ok(BookingFlow {
            wizard: BookingWizard::new(),
            gateway,
            event_bus,
            services: StepData::default(),
            barbers: StepData::default(),
            availability_status: FetchStatus::default(),
            last_dispatched_key: None,
            submit_error: None,
        })
    }
}

impl Default for BookingFlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
