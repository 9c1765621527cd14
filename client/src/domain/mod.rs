//! Domain layer: session state, roster records, and the services over them.
//!
//! Purpose: keep every behavioural contract of the client (validation,
//! session lifecycle, CRUD semantics, error classification) independent of
//! the HTTP and storage adapters behind the ports.
//!
//! Public surface:
//! - [`ApiError`] / [`ApiResult`] — the shared outcome classification.
//! - [`SessionStore`] — durable token and user cache.
//! - [`AuthService`] — login, registration, logout.
//! - [`ResourceService`] — generic CRUD facade per [`RosterResource`].

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod resource_service;
pub mod roster;
pub mod session;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError, Registration};
pub use self::auth_service::{AuthService, LoginGrant};
pub use self::error::ApiError;
pub use self::resource_service::ResourceService;
pub use self::roster::{
    PersonalTrainer, PersonalTrainerDraft, RosterDraft, RosterResource, RosterValidationError,
    Student, StudentDraft, Teacher, TeacherDraft,
};
pub use self::session::{Session, SessionStore, TOKEN_KEY, USER_KEY};
pub use self::user::UserAccount;

/// Convenient result alias for every client operation.
///
/// # Examples
/// ```
/// use client::domain::{ApiError, ApiResult};
///
/// fn guard(id: i64) -> ApiResult<i64> {
///     if id <= 0 {
///         return Err(ApiError::validation("id must be positive"));
///     }
///     Ok(id)
/// }
/// assert!(guard(-1).is_err());
/// ```
pub type ApiResult<T> = Result<T, ApiError>;
