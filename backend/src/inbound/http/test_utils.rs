//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use serde::Deserialize;

use crate::domain::ports::{
    MockAccountService, MockCatalogueCommand, MockCatalogueQuery, MockDashboardQuery,
    MockFeedbackCommand, MockRecommendationQuery,
};
use crate::domain::test_fixtures::{owner_id, student_id};
use crate::domain::{AuthPublisher, Error, Role, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Path of the test-only route that signs a user in.
pub const SIGN_IN_PATH: &str = "/test/sign-in";

/// Session middleware for tests: fresh key, cookie named `session`, no
/// `Secure` flag so plain-HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// One mock per driving port; set expectations, then call [`Self::into_state`].
///
/// The fixture student and owner count as signed in with the identity
/// provider; any other user id behaves like a cookie kept after logout.
#[derive(Default)]
pub struct MockPorts {
    pub catalogue: MockCatalogueQuery,
    pub listings: MockCatalogueCommand,
    pub accounts: MockAccountService,
    pub feedback: MockFeedbackCommand,
    pub dashboard: MockDashboardQuery,
    pub recommendations: MockRecommendationQuery,
    pub auth: AuthPublisher,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        self.auth.signed_in(student_id());
        self.auth.signed_in(owner_id());
        web::Data::new(HttpState::new(HttpStatePorts {
            catalogue: Arc::new(self.catalogue),
            listings: Arc::new(self.listings),
            accounts: Arc::new(self.accounts),
            feedback: Arc::new(self.feedback),
            dashboard: Arc::new(self.dashboard),
            recommendations: Arc::new(self.recommendations),
            auth: self.auth.context(),
        }))
    }
}

#[derive(Deserialize)]
struct SignInQuery {
    user: String,
    role: Option<Role>,
}

async fn sign_in_handler(
    session: SessionContext,
    query: web::Query<SignInQuery>,
) -> Result<HttpResponse, Error> {
    let user = UserId::new(&query.user).map_err(|error| Error::invalid_request(error.to_string()))?;
    session.persist_user(&user)?;
    if let Some(role) = query.role {
        session.persist_role(role)?;
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Register the test-only sign-in route.
pub fn sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route(SIGN_IN_PATH, web::post().to(sign_in_handler));
}

/// Sign `user` in through [`SIGN_IN_PATH`] and return the session cookie.
pub async fn sign_in<S, B>(app: &S, user: &str, role: Option<Role>) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let uri = match role {
        Some(role) => format!("{SIGN_IN_PATH}?user={user}&role={role}"),
        None => format!("{SIGN_IN_PATH}?user={user}"),
    };
    let response = test::call_service(app, test::TestRequest::post().uri(&uri).to_request()).await;
    assert!(response.status().is_success(), "test sign-in failed");
    session_cookie(&response)
}

/// App with test sessions, `state`, the sign-in route and `api` mounted
/// under `/api/v1`.
pub fn test_app<F>(
    state: web::Data<HttpState>,
    api: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    App::new()
        .app_data(state)
        .app_data(crate::inbound::http::error::json_config())
        .app_data(crate::inbound::http::error::query_config())
        .wrap(test_session_middleware())
        .configure(sign_in_route)
        .service(web::scope("/api/v1").configure(api))
}
