use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{AuditAction, AuditLog};
use crate::store::Store;

/// Identity performing a mutation, passed explicitly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    username: Option<String>,
}

impl Actor {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    /// No authenticated identity; entries are recorded with a null user.
    pub fn anonymous() -> Self {
        Self { username: None }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub acting_user: Option<String>,
    pub action: AuditAction,
    pub details: String,
}

pub async fn record<S: Store>(
    store: &mut S,
    actor: &Actor,
    action: AuditAction,
    details: impl Into<String>,
) -> Result<AuditLog> {
    let entry = NewAuditEntry {
        acting_user: actor.username().map(str::to_string),
        action,
        details: details.into(),
    };

    let log = store.append_audit(&entry).await?;
    debug!(
        audit_id = log.audit_id,
        action = action.as_str(),
        user = ?entry.acting_user,
        "Audit entry recorded"
    );

    Ok(log)
}
