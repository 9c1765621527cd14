//! Typed client for a gym management REST API.
//!
//! The crate wraps the remote service in three layers:
//!
//! - A durable [`SessionStore`] holding the bearer token and signed-in user
//! - An [`AuthService`] for login, registration, and logout
//! - A [`ResourceService`] per roster collection (students, teachers,
//!   personal trainers) sharing one transport and session
//!
//! [`GymClient`] assembles the layers against the production adapters: a
//! reqwest transport and a file-backed session cache.
//!
//! # Example
//!
//! ```no_run
//! use client::{ClientSettings, Credentials, GymClient};
//!
//! # async fn demo() -> Result<(), client::ApiError> {
//! let settings = ClientSettings {
//!     base_url: None,
//!     storage_dir: None,
//! };
//! let gym = GymClient::from_settings(&settings)?;
//!
//! let credentials = Credentials::try_from_parts("ana@fitgym.test", "s3cret")
//!     .expect("credentials are non-empty");
//! let user = gym.auth().login(&credentials).await?;
//! assert!(user.id > 0);
//!
//! let students = gym.students().list().await?;
//! assert!(students.is_empty() || students[0].id > 0);
//! # Ok(())
//! # }
//! ```

mod gym_client;

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::ClientSettings;
pub use domain::{
    ApiError, ApiResult, AuthService, Credentials, CredentialsValidationError, LoginGrant,
    PersonalTrainer, PersonalTrainerDraft, Registration, ResourceService, RosterDraft,
    RosterResource, RosterValidationError, Session, SessionStore, Student, StudentDraft, Teacher,
    TeacherDraft, UserAccount,
};
pub use gym_client::{GymClient, RosterRefresh};
