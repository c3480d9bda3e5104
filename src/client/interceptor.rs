use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use super::Access;
use crate::errors::ApiError;
use crate::session::{LogoutReason, SessionGuard};

/// Request pipeline hook shared by every call the client makes.
///
/// Outgoing, it attaches the stored token to protected requests. Incoming,
/// an authorization rejection ends the session before the caller sees the
/// error. There is no per-call opt-out.
#[derive(Clone)]
pub struct AuthInterceptor {
    guard: Arc<SessionGuard>,
}

impl AuthInterceptor {
    pub fn new(guard: Arc<SessionGuard>) -> Self {
        AuthInterceptor { guard }
    }

    pub fn guard(&self) -> &Arc<SessionGuard> {
        &self.guard
    }

    /// Attach `Authorization: Bearer <token>` to protected requests.
    ///
    /// Without a stored token the request is sent bare and the server's
    /// rejection takes the usual teardown path.
    pub fn authorize(&self, request: RequestBuilder, access: Access) -> RequestBuilder {
        if access == Access::Public {
            return request;
        }
        match self.guard.store().get_token() {
            Some(token) => request.bearer_auth(token),
            None => {
                debug!("No session token stored; sending protected request without credentials");
                request
            }
        }
    }

    /// Pass `response` through unless it is an authorization rejection.
    pub fn inspect(&self, response: Response) -> Result<Response, ApiError> {
        self.on_status(response.status(), response.url().path())?;
        Ok(response)
    }

    /// The status half of `inspect`, for responses already taken apart.
    pub fn on_status(&self, status: StatusCode, path: &str) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            warn!(
                event_name = "session.rejected",
                event_domain = "session",
                status = status.as_u16(),
                path,
                "authentication failed, logging out"
            );
            self.guard.logout_with(LogoutReason::Rejected);
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }
}
