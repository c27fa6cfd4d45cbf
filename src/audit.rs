use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Inserts one `audit_logs` row for an action performed by `actor`.
pub async fn log_audit(
    pool: &DbPool,
    actor: Uuid,
    action: &str,
    resource: &str,
    metadata: Value,
) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(actor)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Best-effort audit entry; failures are logged and never fail the request.
pub async fn record(pool: &DbPool, actor: Uuid, action: &str, resource: &str, metadata: Value) {
    match log_audit(pool, actor, action, resource, metadata).await {
        Ok(id) => tracing::trace!(%id, action, resource, "audit entry written"),
        Err(err) => tracing::warn!(error = %err, action, resource, "audit log failed"),
    }
}
