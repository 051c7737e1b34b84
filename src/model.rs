//! Restaurant entity and inbound request payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row in the restaurants table. Serializes with camelCase keys; a
/// non-null `deleted_at` marks the row as soft-deleted (tombstoned rows
/// never leave the store through the read paths).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub cuisine: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Field values for a create, with omitted fields zeroed to empty strings.
#[derive(Debug, Clone, Default)]
pub struct NewRestaurant {
    pub name: String,
    pub location: String,
    pub cuisine: String,
}

/// Inbound JSON body for create and update. All fields optional; `id` and
/// timestamps are not accepted from clients, so a body carrying them cannot
/// overwrite protected columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantDraft {
    pub name: Option<String>,
    pub location: Option<String>,
    pub cuisine: Option<String>,
}

impl RestaurantDraft {
    /// Resolve into create values, defaulting omitted fields.
    pub fn into_new(self) -> NewRestaurant {
        NewRestaurant {
            name: self.name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            cuisine: self.cuisine.unwrap_or_default(),
        }
    }

    /// Merge onto an existing record: only fields present in the body
    /// overwrite. Used by update before the record is saved wholesale.
    pub fn merge_into(self, restaurant: &mut Restaurant) {
        if let Some(name) = self.name {
            restaurant.name = name;
        }
        if let Some(location) = self.location {
            restaurant.location = location;
        }
        if let Some(cuisine) = self.cuisine {
            restaurant.cuisine = cuisine;
        }
    }
}
