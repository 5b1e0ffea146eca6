//! Session HTTP routes.
//!
//! Mutations on a session's roster are restricted to the caller that
//! created it (compared by client address).

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::player::{Gender, Player};
use crate::domain::session::Session;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::caller::Caller;
use crate::extractors::optional_json::OptionalJson;
use crate::extractors::session::SessionHandle;
use crate::state::app_state::AppState;

/// Longest accepted player name, in characters.
const MAX_PLAYER_NAME_CHARS: usize = 64;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSessionRequest {
    pub difficulty: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddPlayerRequest {
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub preference: Gender,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundRequest {
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoundResponse {
    pub text: String,
}

/// POST /api/sessions
async fn create_session(
    caller: Caller,
    body: OptionalJson<CreateSessionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let difficulty = body.difficulty.unwrap_or(0);
    let session = app_state
        .registry
        .create_with_difficulty(caller.as_str(), difficulty)?;

    Ok(HttpResponse::Created().json(session.snapshot()))
}

/// GET /api/sessions/{session_id}
async fn get_session(session: SessionHandle) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(session.snapshot()))
}

/// POST /api/sessions/{session_id}/players/{name}
async fn add_player(
    session: SessionHandle,
    caller: Caller,
    path: web::Path<(String, String)>,
    body: OptionalJson<AddPlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_owner(&session, &caller)?;
    let (_, raw_name) = path.into_inner();
    let name = validate_player_name(&raw_name)?;
    let AddPlayerRequest { gender, preference } = body.into_inner();

    let player =
        Player::new(name, gender, preference).with_health(app_state.config.player_start_health);
    session.add_player(player)?;

    info!(session_id = %session.id(), player = %name, "player added");
    Ok(HttpResponse::Created().json(session.snapshot()))
}

/// DELETE /api/sessions/{session_id}/players/{name}
async fn remove_player(
    session: SessionHandle,
    caller: Caller,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    require_owner(&session, &caller)?;
    let (_, raw_name) = path.into_inner();
    let name = raw_name.trim();
    session.remove_player(name)?;

    info!(session_id = %session.id(), player = %name, "player removed");
    Ok(HttpResponse::Ok().json(session.snapshot()))
}

/// POST /api/sessions/{session_id}/rounds
///
/// Uses the request's `template` when given, otherwise a random line from
/// the loaded template store.
async fn generate_round(
    session: SessionHandle,
    body: OptionalJson<RoundRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let template = match body.into_inner().template {
        Some(t) => t,
        None => app_state.templates.random_line()?,
    };

    let text = session.generate_round(&template).map_err(|e| {
        warn!(session_id = %session.id(), error = %e, "round generation failed");
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(RoundResponse { text }))
}

fn require_owner(session: &Session, caller: &Caller) -> Result<(), AppError> {
    if session.is_owned_by(caller.as_str()) {
        return Ok(());
    }
    warn!(session_id = %session.id(), caller = %caller.as_str(), "mutation by non-owner rejected");
    Err(AppError::forbidden(
        ErrorCode::NotSessionOwner,
        "Only the session owner may change its players",
    ))
}

fn validate_player_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidPlayerName,
            "Player name must not be blank",
        ));
    }
    if name.chars().count() > MAX_PLAYER_NAME_CHARS {
        return Err(AppError::invalid(
            ErrorCode::InvalidPlayerName,
            format!("Player name exceeds {MAX_PLAYER_NAME_CHARS} characters"),
        ));
    }
    Ok(name)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_session))
        .route("/{session_id}", web::get().to(get_session))
        .route("/{session_id}/players/{name}", web::post().to(add_player))
        .route("/{session_id}/players/{name}", web::delete().to(remove_player))
        .route("/{session_id}/rounds", web::post().to(generate_round));
}
