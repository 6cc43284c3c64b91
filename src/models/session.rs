//! Session record stored per user.

use serde::{Deserialize, Serialize};

/// The session payload kept in the store under `session:{user_id}`.
///
/// At most one record exists per user; writing a new one replaces the prior
/// record outright. Deleting it revokes session liveness without touching
/// the credential's own expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The currently valid credential for this user
    pub token: String,
    /// When this record was written (RFC3339)
    pub created_at: String,
}

impl SessionRecord {
    pub fn new(token: String, created_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            token,
            created_at: crate::time_utils::format_utc_rfc3339(created_at),
        }
    }
}
