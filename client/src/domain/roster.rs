//! Roster records managed through the gym API.
//!
//! Three resource kinds share one CRUD contract: students (`/alunos`),
//! teachers (`/professores`), and personal trainers (`/personais`). Each
//! record type pairs with a draft type carrying the create/update fields,
//! validated locally before any request is issued. Wire field names follow
//! the remote API (`nome`, `telefone`, `plano`, `especialidade`,
//! `valorHora`); the structs expose English names.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Domain error returned when a draft fails local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterValidationError {
    /// A required text field was missing or blank once trimmed.
    MissingField {
        /// English name of the offending field.
        field: &'static str,
    },
    /// The hourly rate was absent, non-finite, or not positive.
    InvalidHourlyRate,
}

impl fmt::Display for RosterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "required field '{field}' must not be empty")
            }
            Self::InvalidHourlyRate => write!(f, "hourly rate must be a positive number"),
        }
    }
}

impl std::error::Error for RosterValidationError {}

fn require_field(field: &'static str, value: &str) -> Result<(), RosterValidationError> {
    if value.trim().is_empty() {
        return Err(RosterValidationError::MissingField { field });
    }
    Ok(())
}

/// Server-owned record reachable through one collection endpoint.
///
/// Implementations bind a collection path and a draft type to the record,
/// which is all [`ResourceService`](crate::domain::ResourceService) needs to
/// provide list/get/create/update/remove for the resource.
pub trait RosterResource: DeserializeOwned + Send + Sync + 'static {
    /// Create/update payload for this resource.
    type Draft: RosterDraft;
    /// Collection path under the API base, e.g. `/alunos`.
    const COLLECTION_PATH: &'static str;
    /// Singular English label used in error messages.
    const LABEL: &'static str;
}

/// Create/update payload with local validation.
pub trait RosterDraft: Serialize + Send + Sync {
    /// Check the draft against the resource's required-field rules.
    fn validate(&self) -> Result<(), RosterValidationError>;
}

/// Student enrolled at the gym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Server-assigned identifier.
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Membership plan label, e.g. `"mensal"`.
    #[serde(rename = "plano")]
    pub plan: String,
}

/// Fields accepted when creating or updating a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDraft {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "plano")]
    pub plan: String,
}

impl RosterResource for Student {
    type Draft = StudentDraft;
    const COLLECTION_PATH: &'static str = "/alunos";
    const LABEL: &'static str = "student";
}

impl RosterDraft for StudentDraft {
    fn validate(&self) -> Result<(), RosterValidationError> {
        require_field("name", &self.name)?;
        require_field("email", &self.email)?;
        require_field("phone", &self.phone)?;
        require_field("plan", &self.plan)
    }
}

/// Teacher running group classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Server-assigned identifier.
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

/// Fields accepted when creating or updating a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherDraft {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl RosterResource for Teacher {
    type Draft = TeacherDraft;
    const COLLECTION_PATH: &'static str = "/professores";
    const LABEL: &'static str = "teacher";
}

impl RosterDraft for TeacherDraft {
    fn validate(&self) -> Result<(), RosterValidationError> {
        require_field("name", &self.name)?;
        require_field("email", &self.email)?;
        require_field("specialty", &self.specialty)?;
        require_field("phone", &self.phone)
    }
}

/// Personal trainer offering one-to-one sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalTrainer {
    /// Server-assigned identifier.
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Hourly rate in the gym's billing currency.
    #[serde(rename = "valorHora")]
    pub hourly_rate: f64,
}

/// Fields accepted when creating or updating a personal trainer.
///
/// `hourly_rate` must be finite and strictly positive; an absent form value
/// arrives here as `f64::NAN` and is rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalTrainerDraft {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "valorHora")]
    pub hourly_rate: f64,
}

impl RosterResource for PersonalTrainer {
    type Draft = PersonalTrainerDraft;
    const COLLECTION_PATH: &'static str = "/personais";
    const LABEL: &'static str = "personal trainer";
}

impl RosterDraft for PersonalTrainerDraft {
    fn validate(&self) -> Result<(), RosterValidationError> {
        require_field("name", &self.name)?;
        require_field("email", &self.email)?;
        require_field("specialty", &self.specialty)?;
        if !self.hourly_rate.is_finite() || self.hourly_rate <= 0.0 {
            return Err(RosterValidationError::InvalidHourlyRate);
        }
        Ok(())
    }
}
