//! Account handlers: signup, login, logout and the current profile.
//!
//! ```text
//! POST /api/v1/signup {"name":"Asha","email":"asha@example.com","password":"...","role":"student"}
//! POST /api/v1/login {"email":"asha@example.com","password":"..."}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! PUT /api/v1/users/me/profile {"collegeName":"IIT Delhi"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::forms::{LoginForm, ProfileEditForm, SignupForm};
use crate::domain::ports::AccountService;
use crate::domain::{Error, ONBOARDING_PATH, Role, RoleResolution, UserId, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::form_error;

/// Outcome of a successful login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(format = "uuid")]
    pub user_id: String,
    /// Absent when the account has no usable profile.
    pub role: Option<Role>,
    /// Set when the client should send the user to onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Role for the signed-in user: the session copy when present, otherwise a
/// profile lookup whose result is stored back in the session.
pub(crate) async fn session_role(
    session: &SessionContext,
    accounts: &dyn AccountService,
    user_id: &UserId,
) -> Result<Option<Role>, Error> {
    if let Some(role) = session.role()? {
        return Ok(Some(role));
    }
    let role = accounts.resolve_role(user_id).await?.role();
    if let Some(role) = role {
        session.persist_role(role)?;
    }
    Ok(role)
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupForm,
    responses(
        (status = 201, description = "Account created", body = UserProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupForm>,
) -> ApiResult<HttpResponse> {
    let credentials = payload.validate().map_err(form_error)?;
    let profile = state.accounts.sign_up(&credentials).await?;
    session.persist_user(profile.id())?;
    session.persist_role(profile.role())?;
    Ok(HttpResponse::Created().json(profile))
}

/// Authenticate and resolve the account's role.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginForm>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = payload.validate().map_err(form_error)?;
    let signed_in = state.accounts.log_in(&credentials).await?;
    session.persist_user(&signed_in.user_id)?;
    let role = signed_in.resolution.role();
    if let Some(role) = role {
        session.persist_role(role)?;
    }
    Ok(web::Json(LoginResponse {
        user_id: signed_in.user_id.to_string(),
        role,
        redirect_to: role.is_none().then(|| ONBOARDING_PATH.to_owned()),
    }))
}

/// End the session. Signing out twice is harmless.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        state.accounts.log_out(&user_id).await?;
    }
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current profile", body = UserProfile),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No profile; onboarding required", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserProfile>> {
    let user_id = state.require_user(&session)?;
    match state.accounts.resolve_role(&user_id).await? {
        RoleResolution::Known(profile) => {
            session.persist_role(profile.role())?;
            Ok(web::Json(profile))
        }
        RoleResolution::Unknown => Err(onboarding_required()),
    }
}

/// Apply the role-specific profile edit.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/profile",
    request_body = ProfileEditForm,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No profile; onboarding required", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateProfile"
)]
#[put("/users/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileEditForm>,
) -> ApiResult<web::Json<UserProfile>> {
    let user_id = state.require_user(&session)?;
    let role = session_role(&session, state.accounts.as_ref(), &user_id)
        .await?
        .ok_or_else(onboarding_required)?;
    let edit = payload.validate(role).map_err(form_error)?;
    let profile = state.accounts.edit_profile(&user_id, edit).await?;
    Ok(web::Json(profile))
}

fn onboarding_required() -> Error {
    Error::not_found("profile not found").with_details(json!({ "redirectTo": ONBOARDING_PATH }))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
