//! Signed-in user record.

use serde::{Deserialize, Serialize};

/// Account record the server returns alongside an issued token.
///
/// The server owns this data; the client keeps a transient copy for display
/// and persists it verbatim in the session cache. Wire field names follow
/// the remote API (`nome`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Account email address.
    pub email: String,
}
