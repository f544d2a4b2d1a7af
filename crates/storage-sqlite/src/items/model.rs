//! Database models for the item catalog.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use skinfolio_core::items::{Item, NewItem};

use crate::utils::{format_timestamp, parse_timestamp};

/// Database model for items
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItemDB {
    pub id: String,
    pub market_hash_name: String,
    pub en_name: String,
    pub cn_name: String,
    pub name_id: i64,
    pub created_at: String,
}

impl From<ItemDB> for Item {
    fn from(db: ItemDB) -> Self {
        Item {
            created_at: parse_timestamp(&db.created_at, "items.created_at"),
            id: db.id,
            market_hash_name: db.market_hash_name,
            en_name: db.en_name,
            cn_name: db.cn_name,
            name_id: db.name_id,
        }
    }
}

impl ItemDB {
    /// Builds an insertable row from the input model, assigning the id and
    /// creation timestamp.
    pub fn new_row(new_item: NewItem) -> Self {
        ItemDB {
            id: uuid::Uuid::new_v4().to_string(),
            market_hash_name: new_item.market_hash_name,
            en_name: new_item.en_name,
            cn_name: new_item.cn_name,
            name_id: new_item.name_id,
            created_at: format_timestamp(chrono::Utc::now()),
        }
    }
}
