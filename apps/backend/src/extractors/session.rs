use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::domain::id_gen::is_well_formed;
use crate::domain::session::Session;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Session resolved from the `{session_id}` path segment.
///
/// Rejects malformed ids with 400 before touching the registry and
/// unknown ids with 404.
#[derive(Debug, Clone)]
pub struct SessionHandle(pub Arc<Session>);

impl Deref for SessionHandle {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for SessionHandle {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

fn resolve(req: &HttpRequest) -> Result<SessionHandle, AppError> {
    let id = req.match_info().get("session_id").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidSessionId, "Missing session_id parameter")
    })?;

    if !is_well_formed(id) {
        return Err(AppError::bad_request(
            ErrorCode::InvalidSessionId,
            format!("Invalid session id: {id}"),
        ));
    }

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal(ErrorCode::Internal, "AppState not available"))?;

    let session = app_state.registry.find_by_id(id)?;
    Ok(SessionHandle(session))
}
