//! Suggestion handler: a tenant writes to the owner of their booked property.
//!
//! ```text
//! POST /api/v1/suggestions {"message":"Please fix the hallway light."}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::domain::forms::SuggestionForm;
use crate::domain::{Error, Suggestion};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::form_error;

/// Send a suggestion to the owner of the booked property.
#[utoipa::path(
    post,
    path = "/api/v1/suggestions",
    request_body = SuggestionForm,
    responses(
        (status = 201, description = "Suggestion delivered", body = Suggestion),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not a student or no booked property", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "submitSuggestion"
)]
#[post("/suggestions")]
pub async fn submit_suggestion(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SuggestionForm>,
) -> ApiResult<HttpResponse> {
    let student = state.require_user(&session)?;
    let message = payload.validate().map_err(form_error)?;
    let suggestion = state.feedback.submit_suggestion(&student, message).await?;
    Ok(HttpResponse::Created().json(suggestion))
}
