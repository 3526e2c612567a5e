use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLog::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLog::Owner).string().not_null())
                    .col(
                        ColumnDef::new(ActivityLog::ActivityType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityLog::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityLog::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-activity_log-owner-created_at")
                    .table(ActivityLog::Table)
                    .col(ActivityLog::Owner)
                    .col(ActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ActivityLog {
    Table,
    Id,
    Owner,
    ActivityType,
    Description,
    CreatedAt,
}
