//! Facade wiring the session store, transport, and services together.
//!
//! [`GymClient`] is the assembly point: one shared [`SessionStore`], one
//! shared transport, and the services layered on top. Construction from
//! settings picks the production adapters; tests inject their own transport
//! through [`GymClient::with_transport`].

use std::sync::Arc;

use futures_util::future::join3;

use crate::config::ClientSettings;
use crate::domain::ports::ApiTransport;
use crate::domain::{
    ApiError, ApiResult, AuthService, PersonalTrainer, ResourceService, SessionStore, Student,
    Teacher,
};
use crate::outbound::{DirKeyValueStore, RestTransport};

/// Outcome of refreshing the three rosters in parallel.
///
/// Each roster carries its own result so one failing collection does not
/// hide the other two.
#[derive(Debug)]
pub struct RosterRefresh {
    pub students: ApiResult<Vec<Student>>,
    pub teachers: ApiResult<Vec<Teacher>>,
    pub personal_trainers: ApiResult<Vec<PersonalTrainer>>,
}

/// Entry point bundling authentication and the three roster services over
/// one shared transport and session store.
pub struct GymClient<C = RestTransport> {
    session: Arc<SessionStore>,
    auth: AuthService<C>,
    students: ResourceService<Student, C>,
    teachers: ResourceService<Teacher, C>,
    personal_trainers: ResourceService<PersonalTrainer, C>,
}

impl GymClient<RestTransport> {
    /// Build a client against the configured endpoint with a file-backed
    /// session cache.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the session directory cannot be opened
    /// and a network error when the HTTP client cannot be constructed.
    pub fn from_settings(settings: &ClientSettings) -> ApiResult<Self> {
        let storage = DirKeyValueStore::open(settings.storage_dir())
            .map_err(|error| ApiError::storage(format!("session directory unavailable: {error}")))?;
        let session = Arc::new(SessionStore::new(Arc::new(storage)));
        let transport = RestTransport::new(settings.base_url(), Arc::clone(&session))
            .map_err(|error| ApiError::network(format!("HTTP client unavailable: {error}")))?;
        Ok(Self::with_transport(session, transport))
    }
}

impl<C> GymClient<C>
where
    C: ApiTransport,
{
    /// Assemble a client from an explicit session store and transport.
    pub fn with_transport(session: Arc<SessionStore>, transport: C) -> Self {
        let transport = Arc::new(transport);
        Self {
            auth: AuthService::new(Arc::clone(&transport), Arc::clone(&session)),
            students: ResourceService::new(Arc::clone(&transport)),
            teachers: ResourceService::new(Arc::clone(&transport)),
            personal_trainers: ResourceService::new(transport),
            session,
        }
    }

    /// Shared session state.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Authentication operations.
    pub fn auth(&self) -> &AuthService<C> {
        &self.auth
    }

    /// CRUD over the student roster.
    pub fn students(&self) -> &ResourceService<Student, C> {
        &self.students
    }

    /// CRUD over the teacher roster.
    pub fn teachers(&self) -> &ResourceService<Teacher, C> {
        &self.teachers
    }

    /// CRUD over the personal trainer roster.
    pub fn personal_trainers(&self) -> &ResourceService<PersonalTrainer, C> {
        &self.personal_trainers
    }

    /// Confirm a restored session against the server.
    ///
    /// Lists the student roster as an authenticated probe; see
    /// [`SessionStore::restore_and_validate`] for the retention rules.
    pub async fn restore_session(&self) -> bool {
        self.session
            .restore_and_validate(|| async move { self.students.list().await.map(|_records| ()) })
            .await
    }

    /// Fetch all three rosters in parallel.
    pub async fn refresh_all(&self) -> RosterRefresh {
        let (students, teachers, personal_trainers) = join3(
            self.students.list(),
            self.teachers.list(),
            self.personal_trainers.list(),
        )
        .await;
        RosterRefresh {
            students,
            teachers,
            personal_trainers,
        }
    }
}

#[cfg(test)]
#[path = "gym_client_tests.rs"]
mod tests;
