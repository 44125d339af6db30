//! [`Context`]-related definitions.

use std::sync::{
    atomic::{self, AtomicU16},
    Arc,
};

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::{datetime, DateTimeOf};
use derive_more::Debug;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use serde::Deserialize;
use service::domain::user;
use tokio::sync::OnceCell;

use crate::{config, define_error, AsError, Error, JuniperResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// [`Authenticator`] of the bearer tokens.
    authenticator: Arc<Authenticator>,

    /// Error status code.
    error_status_code: AtomicU16,

    /// Parts of the HTTP request.
    parts: http::request::Parts,

    /// Current [`Session`].
    current_session: OnceCell<Session>,

    /// Last authentication [`Error`].
    auth_error: OnceCell<Error>,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the error status code of this [`Context`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .expect("invalid status code")
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Returns the current [`Session`] for this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request is not authorized;
    /// - the provided authentication token is invalid.
    pub async fn current_session(&self) -> Result<Session, Error> {
        self.current_session
            .get_or_try_init(|| async {
                match self
                    .auth_error
                    .get_or_try_init(|| async {
                        match self.do_authentication().await {
                            Ok(s) => Err(s),
                            Err(e) => Ok(e),
                        }
                    })
                    .await
                {
                    Ok(e) => Err(e),
                    Err(s) => Ok(s),
                }
            })
            .await
            .copied()
            .map_err(Clone::clone)
    }

    /// Returns the current [`Session`] for this [`Context`], if it belongs to
    /// the theatre staff.
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request is not authorized;
    /// - the provided authentication token is invalid;
    /// - the authenticated user is not a staff member.
    pub async fn staff_session(&self) -> Result<Session, Error> {
        let session = self.current_session().await?;
        if session.staff {
            Ok(session)
        } else {
            Err(AuthError::StaffRequired.into()).map_err(self.error())
        }
    }

    /// Performs the [`Session`] authentication.
    ///
    /// # Errors
    ///
    /// Errors if the provided authentication token is invalid.
    async fn do_authentication(&self) -> Result<Session, Error> {
        let res = self
            .parts
            .clone()
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await;
        match res {
            Ok(TypedHeader(Authorization(bearer))) => {
                self.authenticator.authenticate(bearer.token())
            }
            Err(e) => {
                if e.is_missing() {
                    Err(AuthError::AuthorizationRequired.into())
                } else {
                    Err(e.into_error())
                }
            }
        }
        .map_err(self.error())
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let missing = |what: &str| JuniperResponse {
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            response: GraphQLBatchResponse::Single(GraphQLResponse::error(
                Error::internal(&format!("missing `{what}` extension"))
                    .into_field_error(),
            )),
        };
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| missing("Service"))?;
        let authenticator = parts
            .extensions
            .get::<Arc<Authenticator>>()
            .cloned()
            .ok_or_else(|| missing("Authenticator"))?;

        Ok(Self {
            service,
            authenticator,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            parts: parts.clone(),
            current_session: OnceCell::new(),
            auth_error: OnceCell::new(),
        })
    }
}

/// Verifier of the [JWT] bearer tokens.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Debug)]
pub struct Authenticator {
    /// Key to verify the token signatures with.
    #[debug(skip)]
    key: DecodingKey,

    /// Rules the decoded tokens must satisfy.
    validation: Validation,
}

impl Authenticator {
    /// Creates a new [`Authenticator`] out of the provided [`config::Auth`].
    #[must_use]
    pub fn new(conf: &config::Auth) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = conf.leeway.as_secs();
        Self {
            key: DecodingKey::from_secret(conf.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes the [`Session`] out of the provided bearer `token`.
    ///
    /// # Errors
    ///
    /// Errors if the `token` is malformed, expired or signed with another key.
    pub fn authenticate(&self, token: &str) -> Result<Session, Error> {
        jsonwebtoken::decode::<Session>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(AsError::into_error)
    }
}

/// Authenticated user session decoded from a bearer token.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Session {
    /// ID of the authenticated user.
    #[serde(rename = "sub")]
    pub user_id: user::Id,

    /// Indicator whether the user is a member of the theatre staff.
    #[serde(default)]
    pub staff: bool,

    /// [`DateTimeOf`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "datetime::serde::unix_timestamp")]
    pub expires_at: DateTimeOf<Session>,
}

impl AsError for jsonwebtoken::errors::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(AuthError::InvalidToken.into())
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_TOKEN"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization token is invalid or expired"]
        InvalidToken,

        #[code = "STAFF_REQUIRED"]
        #[status = FORBIDDEN]
        #[message = "Authenticated user must be a staff member"]
        StaffRequired,
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use jsonwebtoken::{EncodingKey, Header};
    use serde::Serialize;

    use crate::config;

    use super::Authenticator;

    const USER: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    const FAR_FUTURE: i64 = 4_102_444_800;

    #[derive(Serialize)]
    struct Claims {
        sub: &'static str,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        staff: Option<bool>,
    }

    fn auth() -> Authenticator {
        Authenticator::new(&config::Auth {
            jwt_secret: "theatre".to_owned(),
            leeway: time::Duration::ZERO,
        })
    }

    fn token(exp: i64, staff: Option<bool>, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &Claims {
                sub: USER,
                exp,
                staff,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn decodes_valid_token() {
        let session = auth()
            .authenticate(&token(FAR_FUTURE, None, "theatre"))
            .unwrap();

        assert_eq!(session.user_id.to_string(), USER);
        assert!(!session.staff);
        assert_eq!(session.expires_at.unix_timestamp(), FAR_FUTURE);
    }

    #[test]
    fn decodes_staff_claim() {
        let session = auth()
            .authenticate(&token(FAR_FUTURE, Some(true), "theatre"))
            .unwrap();

        assert!(session.staff);
    }

    #[test]
    fn rejects_bad_tokens() {
        for token in [
            token(1_000, None, "theatre"),
            token(FAR_FUTURE, None, "another"),
            "garbage".to_owned(),
        ] {
            let err = auth().authenticate(&token).unwrap_err();
            assert_eq!(err.code, "INVALID_TOKEN");
            assert_eq!(err.status_code, http::StatusCode::UNAUTHORIZED);
        }
    }
}
