// Centralized error handling using thiserror for type-safe error management
//
// Two layers: TransportError models a failed exchange with the booking API
// (classified by what the server or the connection did), and BookingError is
// the crate-wide enum the rest of the code returns. All transport kinds carry
// a user-facing message; the flow surfaces that message as-is and never
// retries on its own.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Display messages for transport failures.
///
/// One fixed Spanish string per failure class, replaced by the
/// server-provided `detail` only for bad requests and unclassified statuses.
pub const MSG_BAD_REQUEST: &str =
    "Datos inválidos. Por favor verifica la información ingresada.";
pub const MSG_NOT_FOUND: &str = "Recurso no encontrado.";
pub const MSG_SERVER_ERROR: &str =
    "Error interno del servidor. Por favor intenta más tarde.";
pub const MSG_UNEXPECTED: &str = "Ocurrió un error inesperado.";
pub const MSG_UNREACHABLE: &str =
    "No se pudo conectar con el servidor. Verifica tu conexión a internet.";
pub const MSG_REQUEST_SETUP: &str = "Error en la configuración de la petición.";

/// Classification of a failed exchange with the remote API.
///
/// The flow does not branch on the kind; every kind becomes the same
/// step-scoped display string. Gateways and tests still need to know
/// what actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Server rejected the request data (HTTP 400).
    BadRequest,
    /// Resource does not exist (HTTP 404).
    NotFound,
    /// Server-side failure (HTTP 500).
    ServerError,
    /// No response at all: connection refused, DNS failure, or timeout.
    NetworkUnreachable,
    /// Anything else, including unexpected statuses and malformed bodies.
    Unknown,
}

/// A failed request to the booking API, normalized to a displayable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify an HTTP error status the way the original client did:
    /// 400, 404 and 500 get dedicated kinds, everything else is `Unknown`.
    /// `detail` is the server's own explanation when the body carried one.
    pub fn from_status(status: reqwest::StatusCode, detail: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::BAD_REQUEST => Self::new(
                TransportKind::BadRequest,
                detail.unwrap_or_else(|| MSG_BAD_REQUEST.to_string()),
            ),
            reqwest::StatusCode::NOT_FOUND => {
                Self::new(TransportKind::NotFound, MSG_NOT_FOUND)
            }
            reqwest::StatusCode::INTERNAL_SERVER_ERROR => {
                Self::new(TransportKind::ServerError, MSG_SERVER_ERROR)
            }
            _ => Self::new(
                TransportKind::Unknown,
                detail.unwrap_or_else(|| MSG_UNEXPECTED.to_string()),
            ),
        }
    }
}

// A reqwest error at this level means no usable response: timeouts and
// connection failures surface as NetworkUnreachable, request-construction
// problems keep their own message, the rest is Unknown. Error statuses never
// reach this conversion; the gateway classifies those via from_status.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::new(TransportKind::NetworkUnreachable, MSG_UNREACHABLE)
        } else if err.is_builder() || err.is_request() {
            Self::new(TransportKind::Unknown, MSG_REQUEST_SETUP)
        } else {
            Self::new(TransportKind::Unknown, MSG_UNEXPECTED)
        }
    }
}

/// Main error type for the booking flow.
///
/// Gateway failures are represented by the `Transport` variant but are
/// normally caught inside `BookingFlow` and written into step-scoped state;
/// the variants that actually escape to callers are the contract errors
/// (`InvalidTransition`, `SlotUnavailable`) raised when a transition is
/// attempted out of order.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A wizard transition was attempted without its prerequisite
    /// selection, or after the booking was already confirmed.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A time was selected that the currently resolved slot list does not
    /// offer.
    #[error("slot not available: {0}")]
    SlotUnavailable(String),

    /// Contact details failed field validation; the map carries one
    /// message per offending field.
    #[error("contact details failed validation")]
    Validation(ValidationErrors),

    /// The remote API call failed. Displayable via the inner message.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Environment configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A response body did not have the expected shape.
    #[error("JSON deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Type alias for Result with BookingError.
pub type Result<T> = std::result::Result<T, BookingError>;
