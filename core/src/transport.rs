//! The seam between the controller and whatever performs the network I/O.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and hands back the raw response.
///
/// Implementations return non-2xx responses as data; only failures that
/// produce no response at all (refused connection, reset, unreadable body)
/// are reported as `ApiError::Transport`.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
