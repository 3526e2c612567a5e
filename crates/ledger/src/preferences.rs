//! Persisted user display preferences.
//!
//! A single key/value table holds small serialized settings. The only key
//! this module owns is the display currency, read once at startup; currency
//! change events afterwards only touch in-memory state.

use sea_orm::{ActiveValue, DatabaseConnection, entity::prelude::*};

use crate::ResultLedger;
use crate::currency::DisplayCurrency;

pub const DISPLAY_CURRENCY_KEY: &str = "display_currency";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Loads the saved display currency, falling back to the default when no
/// preference has been stored yet.
pub async fn load_display_currency(
    database: &DatabaseConnection,
) -> ResultLedger<DisplayCurrency> {
    let model = Entity::find_by_id(DISPLAY_CURRENCY_KEY).one(database).await?;
    match model {
        Some(model) => Ok(serde_json::from_str(&model.value)?),
        None => Ok(DisplayCurrency::default()),
    }
}

/// Saves the display currency, replacing any previous value.
pub async fn save_display_currency(
    database: &DatabaseConnection,
    currency: &DisplayCurrency,
) -> ResultLedger<()> {
    let value = serde_json::to_string(currency)?;
    let existing = Entity::find_by_id(DISPLAY_CURRENCY_KEY).one(database).await?;

    match existing {
        Some(model) => {
            let mut active: ActiveModel = model.into();
            active.value = ActiveValue::Set(value);
            active.update(database).await?;
        }
        None => {
            let active = ActiveModel {
                key: ActiveValue::Set(DISPLAY_CURRENCY_KEY.to_string()),
                value: ActiveValue::Set(value),
            };
            active.insert(database).await?;
        }
    }
    Ok(())
}
