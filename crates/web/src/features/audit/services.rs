use sqlx::PgPool;
use storage::{
    dto::audit::AuditLogFilter, error::Result, models::AuditLog,
    repository::audit_log::AuditLogRepository,
};

/// Audit trail page, newest first, with the total matching count
pub async fn list_audit_logs(
    pool: &PgPool,
    filter: &AuditLogFilter,
) -> Result<(Vec<AuditLog>, i64)> {
    let mut conn = pool.acquire().await?;
    AuditLogRepository::new(&mut conn).list(filter).await
}
