// Event system for notifying the embedding shell about booking progress
// Implements event bus pattern using tokio broadcast channels

use std::fmt;

use tokio::sync::broadcast;

use crate::models::BookingConfirmation;
use crate::validation::ValidationErrors;
use crate::wizard::WizardStep;

/// Maximum capacity for the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Main event structure containing all information about an event
#[derive(Debug, Clone)]
pub struct Event {
    /// Component that emitted the event, e.g. "flow" or "gateway".
    pub source: String,
    pub kind: EventKind,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl Event {
    /// Create a new event
    pub fn new(source: impl Into<String>, kind: EventKind) -> Self {
        Self {
            source: source.into(),
            kind,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Types of events that can be sent through the event bus
#[derive(Debug, Clone)]
pub enum EventKind {
    /// The wizard advanced or moved back to a step
    StepChanged(WizardStep),

    /// The service catalog finished loading
    ServicesLoaded { count: usize },

    /// The barber roster finished loading
    BarbersLoaded { count: usize },

    /// Availability finished loading for the active selection
    AvailabilityLoaded { slot_count: usize },

    /// An availability response arrived for a selection that is no
    /// longer current and was dropped
    StaleAvailabilityDiscarded,

    /// A backend call failed; the message is already user displayable
    FetchFailed(String),

    /// Contact details were rejected before submission
    ValidationFailed(ValidationErrors),

    /// The backend accepted the booking
    BookingConfirmed(BookingConfirmation),

    /// The user asked to leave the wizard for the landing screen
    ReturnToLanding,
}

/// Event bus for publishing and subscribing to events
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Create a new event bus with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events - returns a receiver
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Fails when nobody is subscribed, which callers that treat events
    /// as optional notifications simply ignore.
    pub fn publish(&self, event: Event) -> Result<usize, EventError> {
        self.tx.send(event).map_err(|_| EventError::SendFailed)
    }

    /// Get a clone of the sender for publishing from async tasks
    pub fn sender(&self) -> broadcast::Sender<Event> {
        self.tx.clone()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during event operations
#[derive(Debug, Clone)]
pub enum EventError {
    SendFailed,
    ChannelClosed,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::SendFailed => write!(f, "Failed to send event"),
            EventError::ChannelClosed => write!(f, "Event channel closed"),
        }
    }
}

impl std::error::Error for EventError {}
