// Booking wizard state machine.
//
// Owns the step sequence, the selection state and the availability cache.
// Selections are only mutated through the transition methods below, and
// every transition validates its precondition instead of trusting the
// caller, so an out-of-order call surfaces as InvalidTransition rather
// than corrupted state. The wizard is synchronous and does no I/O itself;
// `BookingFlow` drives the gateway and feeds results back in.

use chrono::NaiveDate;

use crate::availability::{resolve_slots, FetchKey};
use crate::error::{BookingError, Result};
use crate::models::{
    AvailabilityEntry, Barber, BookingConfirmation, BookingRequest, BookingSummary,
    ContactDetails, Service,
};
use crate::validation::{validate_contact, ValidationErrors};

/// The four steps of the booking wizard, in visit order.
///
/// The derived `Ord` follows declaration order, which the transition
/// preconditions rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Service,
    Barber,
    DateTime,
    Contact,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Service,
        WizardStep::Barber,
        WizardStep::DateTime,
        WizardStep::Contact,
    ];

    /// One-based position for progress display.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Service => 1,
            WizardStep::Barber => 2,
            WizardStep::DateTime => 3,
            WizardStep::Contact => 4,
        }
    }

    /// Progress bar label.
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Service => "Servicio",
            WizardStep::Barber => "Barbero",
            WizardStep::DateTime => "Fecha/Hora",
            WizardStep::Contact => "Contacto",
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => None,
            WizardStep::Barber => Some(WizardStep::Service),
            WizardStep::DateTime => Some(WizardStep::Barber),
            WizardStep::Contact => Some(WizardStep::DateTime),
        }
    }
}

/// The barber selection recorded at the barber step. "Any" defers the
/// choice to availability resolution across every barber.
#[derive(Debug, Clone, PartialEq)]
pub enum BarberChoice {
    Any,
    Specific(Barber),
}

impl BarberChoice {
    /// Barber id for the fetch key and the booking payload; `None` for
    /// "any".
    pub fn id(&self) -> Option<u32> {
        match self {
            BarberChoice::Any => None,
            BarberChoice::Specific(barber) => Some(barber.id),
        }
    }

    pub fn barber(&self) -> Option<&Barber> {
        match self {
            BarberChoice::Any => None,
            BarberChoice::Specific(barber) => Some(barber),
        }
    }
}

/// Outcome of a back navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// The wizard moved back to this step.
    Step(WizardStep),
    /// Already at the first step; leaving the wizard is the caller's
    /// decision (the wizard itself does not change).
    Landing,
}

/// The booking wizard.
#[derive(Debug)]
pub struct BookingWizard {
    step: WizardStep,
    service: Option<Service>,
    barber_choice: Option<BarberChoice>,
    date: Option<NaiveDate>,
    time: Option<String>,
    contact: ContactDetails,
    validation: ValidationErrors,
    availability: Vec<AvailabilityEntry>,
    availability_key: Option<FetchKey>,
    confirmation: Option<BookingConfirmation>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Service,
            service: None,
            barber_choice: None,
            date: None,
            time: None,
            contact: ContactDetails::default(),
            validation: ValidationErrors::default(),
            availability: Vec::new(),
            availability_key: None,
            confirmation: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    /// Recorded barber choice, `None` until the barber step is answered.
    pub fn barber_choice(&self) -> Option<&BarberChoice> {
        self.barber_choice.as_ref()
    }

    /// The specifically chosen barber; `None` both before the barber step
    /// and when "any" was chosen.
    pub fn selected_barber(&self) -> Option<&Barber> {
        self.barber_choice.as_ref().and_then(|c| c.barber())
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn validation(&self) -> &ValidationErrors {
        &self.validation
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_some()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    /// Raw availability entries currently cached, regardless of whether
    /// they still match the selection.
    pub fn availability_entries(&self) -> &[AvailabilityEntry] {
        &self.availability
    }

    fn ensure_not_confirmed(&self, action: &str) -> Result<()> {
        if self.confirmation.is_some() {
            return Err(BookingError::InvalidTransition(format!(
                "cannot {action} after the booking was confirmed"
            )));
        }
        Ok(())
    }

    /// Record the chosen service and move to the barber step.
    ///
    /// Valid at any step before confirmation. Always clears the barber,
    /// date, time and availability cache, even when the same service is
    /// picked again.
    pub fn select_service(&mut self, service: Service) -> Result<WizardStep> {
        self.ensure_not_confirmed("change the service")?;

        self.service = Some(service);
        self.barber_choice = None;
        self.date = None;
        self.time = None;
        self.availability.clear();
        self.availability_key = None;
        self.step = WizardStep::Barber;
        Ok(WizardStep::Barber)
    }

    /// Record the barber choice (`None` meaning "any barber") and move to
    /// the date step. Clears date, time and availability cache.
    pub fn select_barber(&mut self, barber: Option<Barber>) -> Result<WizardStep> {
        self.ensure_not_confirmed("change the barber")?;
        if self.step() < WizardStep::Barber {
            return Err(BookingError::InvalidTransition(
                "a service must be selected before choosing a barber".to_string(),
            ));
        }

        self.barber_choice = Some(match barber {
            Some(barber) => BarberChoice::Specific(barber),
            None => BarberChoice::Any,
        });
        self.date = None;
        self.time = None;
        self.availability.clear();
        self.availability_key = None;
        self.step = WizardStep::DateTime;
        Ok(WizardStep::DateTime)
    }

    /// Record the chosen date, clearing only the time. Returns the fetch
    /// key the caller must load availability for; the cached entries stay
    /// in place but no longer resolve until a matching response arrives.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<FetchKey> {
        self.ensure_not_confirmed("change the date")?;
        if self.step() < WizardStep::DateTime {
            return Err(BookingError::InvalidTransition(
                "a barber choice is needed before picking a date".to_string(),
            ));
        }
        let service_id = self
            .service
            .as_ref()
            .map(|s| s.id)
            .ok_or_else(|| {
                BookingError::InvalidTransition("no service selected".to_string())
            })?;
        let barber_id = self
            .barber_choice
            .as_ref()
            .map(|c| c.id())
            .ok_or_else(|| {
                BookingError::InvalidTransition("no barber choice recorded".to_string())
            })?;

        self.date = Some(date);
        self.time = None;
        Ok(FetchKey::new(service_id, barber_id, date))
    }

    /// Record the chosen time slot. The slot must be offered by the
    /// currently resolved availability.
    pub fn select_time(&mut self, time: impl Into<String>) -> Result<()> {
        self.ensure_not_confirmed("change the time")?;
        if self.date.is_none() {
            return Err(BookingError::InvalidTransition(
                "a date must be selected before choosing a time".to_string(),
            ));
        }

        let time = time.into();
        if !self.resolved_slots().iter().any(|slot| *slot == time) {
            return Err(BookingError::SlotUnavailable(time));
        }

        self.time = Some(time);
        Ok(())
    }

    /// Whether the date step is complete and the wizard may advance.
    pub fn can_continue(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }

    /// Advance from the date step to the contact step.
    pub fn go_next(&mut self) -> Result<WizardStep> {
        if self.step() != WizardStep::DateTime || !self.can_continue() {
            return Err(BookingError::InvalidTransition(
                "continuing requires a selected date and time".to_string(),
            ));
        }

        self.step = WizardStep::Contact;
        Ok(WizardStep::Contact)
    }

    /// Move back one step, preserving every selection. At the first step
    /// nothing changes and `BackAction::Landing` tells the caller the
    /// user wants out of the wizard.
    pub fn go_back(&mut self) -> Result<BackAction> {
        self.ensure_not_confirmed("navigate")?;

        match self.step().previous() {
            Some(previous) => {
                self.step = previous;
                Ok(BackAction::Step(previous))
            }
            None => Ok(BackAction::Landing),
        }
    }

    /// Update the contact name, dropping any stale name error.
    pub fn set_contact_name(&mut self, name: impl Into<String>) {
        self.contact.name = name.into();
        self.validation.clear_name();
    }

    /// Update the contact phone, dropping any stale phone error.
    pub fn set_contact_phone(&mut self, phone: impl Into<String>) {
        self.contact.phone = phone.into();
        self.validation.clear_phone();
    }

    pub fn set_contact_notes(&mut self, notes: impl Into<String>) {
        self.contact.notes = notes.into();
    }

    /// The availability query the current selection requires, once the
    /// service, barber choice and date are all in place.
    pub fn required_fetch_key(&self) -> Option<FetchKey> {
        let service = self.service.as_ref()?;
        let choice = self.barber_choice.as_ref()?;
        let date = self.date?;
        Some(FetchKey::new(service.id, choice.id(), date))
    }

    /// Apply a completed availability fetch.
    ///
    /// The entries are stored only when `key` still matches the current
    /// selection; a stale response is discarded and `false` returned.
    pub fn apply_availability(&mut self, key: FetchKey, entries: Vec<AvailabilityEntry>) -> bool {
        if self.required_fetch_key() != Some(key) {
            return false;
        }

        self.availability = entries;
        self.availability_key = Some(key);
        true
    }

    /// Time slots to offer for the current selection. Empty whenever the
    /// cached availability does not belong to the current fetch key.
    pub fn resolved_slots(&self) -> Vec<String> {
        let required = match self.required_fetch_key() {
            Some(key) => key,
            None => return Vec::new(),
        };
        if self.availability_key != Some(required) {
            return Vec::new();
        }

        resolve_slots(self.selected_barber(), &self.availability)
    }

    /// Displayable summary of the selection, available once service, date
    /// and time are chosen.
    pub fn summary(&self) -> Option<BookingSummary> {
        let service = self.service.as_ref()?;
        let date = self.date?;
        let time = self.time.clone()?;

        Some(BookingSummary {
            service: service.name.clone(),
            barber: self.selected_barber().map(|b| b.full_name.clone()),
            date,
            time,
            customer: self.contact.name.trim().to_string(),
            phone: self.contact.phone.trim().to_string(),
            price: service.price.clone(),
        })
    }

    /// Validate the contact details and build the booking payload.
    ///
    /// On validation failure the per-field messages are stored (readable
    /// via [`validation`](Self::validation)) and the submission is
    /// rejected; the step stays editable.
    pub fn booking_request(&mut self) -> Result<BookingRequest> {
        self.ensure_not_confirmed("submit")?;
        if self.step() != WizardStep::Contact {
            return Err(BookingError::InvalidTransition(
                "contact details are submitted from the contact step".to_string(),
            ));
        }

        let errors = validate_contact(&self.contact.name, &self.contact.phone);
        self.validation = errors.clone();
        if !errors.is_empty() {
            return Err(BookingError::Validation(errors));
        }

        let service_id = self
            .service
            .as_ref()
            .map(|s| s.id)
            .ok_or_else(|| {
                BookingError::InvalidTransition("no service selected".to_string())
            })?;
        let barber_id = self.barber_choice.as_ref().and_then(|c| c.id());
        let date = self.date.ok_or_else(|| {
            BookingError::InvalidTransition("no date selected".to_string())
        })?;
        let time = self.time.clone().ok_or_else(|| {
            BookingError::InvalidTransition("no time selected".to_string())
        })?;

        Ok(BookingRequest {
            service_id,
            barber_id,
            date,
            time,
            customer_name: self.contact.name.trim().to_string(),
            customer_phone: self.contact.phone.trim().to_string(),
            notes: self.contact.notes_or_none(),
        })
    }

    /// Record the confirmation returned by the backend. The wizard
    /// becomes terminal; only [`reset`](Self::reset) leaves this state.
    pub fn record_confirmation(&mut self, confirmation: BookingConfirmation) -> Result<()> {
        self.ensure_not_confirmed("confirm again")?;
        if self.step() != WizardStep::Contact {
            return Err(BookingError::InvalidTransition(
                "a booking is confirmed from the contact step".to_string(),
            ));
        }

        self.confirmation = Some(confirmation);
        Ok(())
    }

    /// Start a fresh booking session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
