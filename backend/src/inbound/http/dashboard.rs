//! Role-gated dashboard handler.
//!
//! ```text
//! GET /api/v1/dashboard?source=fixture
//! ```

use actix_web::{get, web};
use serde_json::json;

use crate::domain::{DashboardView, Error, LOGIN_PATH};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::session_role;
use crate::inbound::http::listings::SourceQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Student, owner or onboarding view for the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(SourceQuery),
    responses(
        (status = 200, description = "Dashboard for the session role", body = DashboardView),
        (status = 401, description = "Login required; details carry redirectTo", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SourceQuery>,
) -> ApiResult<web::Json<DashboardView>> {
    let Some(user_id) = state.signed_in_user(&session)? else {
        return Err(Error::unauthorized("login required")
            .with_details(json!({ "redirectTo": LOGIN_PATH })));
    };
    let source = query.resolve(&state)?;
    let role = session_role(&session, state.accounts.as_ref(), &user_id).await?;
    let view = state.dashboard.dashboard(&user_id, role, source).await?;
    Ok(web::Json(view))
}
