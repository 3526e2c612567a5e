//! Append-only activity log.
//!
//! Each successful mutation writes one entry here for traceability. The log
//! is best-effort: a failed append is logged and never turns an already
//! committed mutation into a failure.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, entity::prelude::*};
use uuid::Uuid;

use crate::ResultLedger;

/// Activity class recorded by this module for every mutation.
pub const ACTIVITY_TYPE_TRANSACTION: &str = "transaction";

/// Append-only sink for audit entries.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn append(&self, owner: &str, description: &str) -> ResultLedger<()>;
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub activity_type: String,
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// [`ActivityLog`] backed by the `activity_log` table.
#[derive(Clone, Debug)]
pub struct DbActivityLog {
    database: DatabaseConnection,
}

impl DbActivityLog {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ActivityLog for DbActivityLog {
    async fn append(&self, owner: &str, description: &str) -> ResultLedger<()> {
        let entry = ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            owner: ActiveValue::Set(owner.to_string()),
            activity_type: ActiveValue::Set(ACTIVITY_TYPE_TRANSACTION.to_string()),
            description: ActiveValue::Set(description.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        };
        entry.insert(&self.database).await?;
        Ok(())
    }
}
