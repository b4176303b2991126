//! Bearer token extractor for protected handlers.
//!
//! Handlers that take an [`AuthenticatedUser`] argument never run unless the
//! `Authorization: Bearer <token>` header resolves to a live account, so no
//! repository is touched on behalf of an anonymous caller.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, NO_TOKEN_MESSAGE, User, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "Bearer";

/// Identity resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Identifier used to scope every task operation.
    pub fn id(&self) -> &UserId {
        self.0.id()
    }

    /// Unwrap the resolved account.
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let Some(token) = token else {
                debug!("request without bearer token rejected");
                return Err(Error::unauthorized(NO_TOKEN_MESSAGE));
            };
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            state.auth.validate(&token).await.map(Self)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, get, test as actix_test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{MockAuthenticator, MockTasksCommand, MockTasksQuery};
    use crate::domain::{EmailAddress, TOKEN_FAILED_MESSAGE, Username};
    use crate::inbound::http::test_utils::mock_state;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer abc", Some("abc"))]
    #[case("Bearer   abc  ", Some("abc"))]
    #[case("Bearer ", None)]
    #[case("Bearer", None)]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def.ghi", None)]
    fn bearer_token_parsing(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(value), expected);
    }

    fn ada() -> User {
        User::new(
            UserId::random(),
            Username::new("ada").expect("username"),
            EmailAddress::new("ada@example.com").expect("email"),
            Utc::now(),
        )
    }

    fn state_with(auth: MockAuthenticator) -> web::Data<HttpState> {
        mock_state(auth, MockTasksCommand::new(), MockTasksQuery::new())
    }

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.into_inner().username().to_string())
    }

    async fn call(
        auth: MockAuthenticator,
        authorization: Option<&str>,
    ) -> (StatusCode, web::Bytes) {
        let app =
            actix_test::init_service(App::new().app_data(state_with(auth)).service(whoami)).await;
        let mut request = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value.to_owned()));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        (status, actix_test::read_body(response).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_token_resolves_the_account() {
        let mut auth = MockAuthenticator::new();
        auth.expect_validate()
            .withf(|token| token == "good")
            .times(1)
            .return_once(|_| Ok(ada()));

        let (status, body) = call(auth, Some("Bearer good")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_ref(), b"ada");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Token good"))]
    #[case(Some("Bearer "))]
    #[actix_web::test]
    async fn missing_token_never_reaches_the_authenticator(#[case] authorization: Option<&str>) {
        let mut auth = MockAuthenticator::new();
        auth.expect_validate().never();

        let (status, body) = call(auth, authorization).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], NO_TOKEN_MESSAGE);
        assert_eq!(value["code"], "unauthorized");
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let mut auth = MockAuthenticator::new();
        auth.expect_validate()
            .return_once(|_| Err(Error::unauthorized(TOKEN_FAILED_MESSAGE)));

        let (status, body) = call(auth, Some("Bearer forged")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], TOKEN_FAILED_MESSAGE);
    }
}
