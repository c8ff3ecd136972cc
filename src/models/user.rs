use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub telephone: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_barber: bool,
    pub created_at: DateTime<Utc>,
}
