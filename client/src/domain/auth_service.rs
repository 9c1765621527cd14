//! Authentication service: login, registration, and logout.
//!
//! Wraps the two `/auth` endpoints and keeps the session store aligned with
//! their outcomes. Passwords cross this module only inside request bodies;
//! nothing here persists them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ApiTransport, HttpMethod, decode_payload, encode_payload};
use crate::domain::{ApiResult, Credentials, Registration, SessionStore, UserAccount};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/registrar";

/// Token and user record issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginGrant {
    /// Bearer token to attach to authenticated requests.
    pub token: String,
    /// Account the token was issued for.
    #[serde(rename = "usuario")]
    pub user: UserAccount,
}

#[derive(Serialize)]
struct LoginRequestBody<'a> {
    email: &'a str,
    senha: &'a str,
}

#[derive(Serialize)]
struct RegisterRequestBody<'a> {
    nome: &'a str,
    email: &'a str,
    senha: &'a str,
}

/// Login, registration, and logout over a transport and session store.
pub struct AuthService<C> {
    transport: Arc<C>,
    session: Arc<SessionStore>,
}

impl<C> AuthService<C> {
    /// Create the service with its transport and session store.
    pub fn new(transport: Arc<C>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }
}

impl<C> AuthService<C>
where
    C: ApiTransport,
{
    /// Exchange credentials for a session.
    ///
    /// On success the issued token and user record are persisted through
    /// the session store, so later requests authenticate automatically. A
    /// storage failure surfaces after the server accepted the credentials;
    /// the caller is left signed out.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<UserAccount> {
        let body = encode_payload(
            &LoginRequestBody {
                email: credentials.email(),
                senha: credentials.password(),
            },
            "login",
        )?;
        let payload = self
            .transport
            .request(HttpMethod::Post, LOGIN_PATH, Some(body))
            .await?;
        let grant: LoginGrant = decode_payload(payload, "login")?;
        self.session.set_session(&grant.token, &grant.user)?;
        Ok(grant.user)
    }

    /// Create a new account.
    ///
    /// Registration does not sign the account in; callers follow up with
    /// [`login`](Self::login).
    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let body = encode_payload(
            &RegisterRequestBody {
                nome: registration.name(),
                email: registration.email(),
                senha: registration.password(),
            },
            "registration",
        )?;
        self.transport
            .request(HttpMethod::Post, REGISTER_PATH, Some(body))
            .await?;
        Ok(())
    }

    /// Drop the current session from memory and durable storage.
    pub fn logout(&self) -> ApiResult<()> {
        self.session.clear_session()
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
