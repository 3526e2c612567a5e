pub use sea_orm_migration::prelude::*;

mod m20260715_000001_transactions;
mod m20260722_000002_activity_log;
mod m20260729_000003_preferences;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_transactions::Migration),
            Box::new(m20260722_000002_activity_log::Migration),
            Box::new(m20260729_000003_preferences::Migration),
        ]
    }
}
