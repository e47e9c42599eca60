//! Conversions from external infrastructure errors into domain errors.

use lbctl_domain::LbError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LbError);

impl From<InfraError> for LbError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LbError> for InfraError {
    fn from(value: LbError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoLbError {
    fn into_lb(self) -> LbError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LbError */
/* -------------------------------------------------------------------------- */

impl IntoLbError for HttpError {
    fn into_lb(self) -> LbError {
        if self.is_timeout() {
            return LbError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return LbError::Transport(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            return LbError::remote(
                code,
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status")),
            );
        }

        if self.is_decode() {
            return LbError::Decode(self.to_string());
        }

        if self.is_builder() {
            return LbError::Config(format!("could not build HTTP request: {self}"));
        }

        LbError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_lb())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → LbError */
/* -------------------------------------------------------------------------- */

impl IntoLbError for JsonError {
    fn into_lb(self) -> LbError {
        if self.is_data() || self.is_syntax() || self.is_eof() {
            LbError::Decode(format!("JSON decode failed: {self}"))
        } else {
            LbError::Encode(format!("JSON encode failed: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_lb())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
