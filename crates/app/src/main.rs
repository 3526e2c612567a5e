use std::sync::Arc;

use ledger::{
    CurrencyEvents, DateRange, DbActivityLog, DbStore, LedgerSession, NoticeLevel, Notifier,
    preferences,
};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.database).await?;

    let display_currency = preferences::load_display_currency(&db).await?;
    let currency_events = CurrencyEvents::default();
    let (notifier, mut notices) = Notifier::channel();

    // Forward outcome notices to the log; a real UI would render them as
    // toasts instead.
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            match notice.level {
                NoticeLevel::Positive => tracing::info!("{}", notice.message),
                NoticeLevel::Negative => tracing::warn!("{}", notice.message),
            }
        }
    });

    let mut builder = LedgerSession::builder()
        .store(Arc::new(DbStore::new(db.clone())))
        .activity_log(Arc::new(DbActivityLog::new(db)))
        .notifier(notifier)
        .display_currency(display_currency)
        .currency_events(currency_events.subscribe());
    if let Some(user) = settings.app.user.clone() {
        builder = builder.identity(user);
    }
    let mut session = builder.build()?;

    session.fetch(&DateRange::default()).await;
    session.sync_display_currency();

    let entries = session.transactions().len();
    let summary = session.summary();
    tracing::info!(
        entries,
        income = %summary.income_display,
        expenses = %summary.expenses_display,
        balance = %summary.balance_display,
        "ledger ready"
    );

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
