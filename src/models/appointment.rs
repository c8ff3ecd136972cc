use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub service_type: String,
    pub specifications: String,
    /// Formatted as `Jan 05, 2025 14:30`. Kept as text, never parsed back.
    pub date_time: String,
    pub created_at: DateTime<Utc>,
}

/// Row produced by a confirmed wizard, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub user_id: i64,
    pub user_name: String,
    pub service_type: String,
    pub specifications: String,
    pub date_time: String,
}
