use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::dto::audit::AuditLogFilter;
use crate::error::Result;
use crate::models::AuditLog;
use crate::services::audit::NewAuditEntry;

/// Append-only access to the audit trail
pub struct AuditLogRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> AuditLogRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Newest entries first, filtered by exact action and acting user
    pub async fn list(&mut self, filter: &AuditLogFilter) -> Result<(Vec<AuditLog>, i64)> {
        let pagination = filter.pagination();

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM audit_logs WHERE 1=1");
        push_filters(&mut count_query, filter);
        let total_items = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.conn)
            .await?;

        let mut query = QueryBuilder::new(
            "SELECT audit_id, acting_user, action, details, created_at FROM audit_logs WHERE 1=1",
        );
        push_filters(&mut query, filter);
        query.push(" ORDER BY created_at DESC, audit_id DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let entries = query
            .build_query_as::<AuditLog>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok((entries, total_items))
    }

    pub(crate) async fn append(&mut self, entry: &NewAuditEntry) -> Result<AuditLog> {
        let log = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (acting_user, action, details)
            VALUES ($1, $2, $3)
            RETURNING audit_id, acting_user, action, details, created_at
            "#,
        )
        .bind(&entry.acting_user)
        .bind(entry.action.as_str())
        .bind(&entry.details)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(log)
    }
}

fn push_filters<'q>(query: &mut QueryBuilder<'q, Postgres>, filter: &'q AuditLogFilter) {
    if let Some(ref action) = filter.action {
        query.push(" AND action = ");
        query.push_bind(action);
    }

    if let Some(ref user) = filter.user {
        query.push(" AND acting_user = ");
        query.push_bind(user);
    }
}
