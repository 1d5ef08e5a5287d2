//! Menu Item and Option Models
//!
//! The catalog side of the system. Prices here are the *current* catalog
//! prices; orders snapshot them at creation time and are never affected
//! by later catalog edits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Current base price (non-negative decimal)
    pub base_price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Menu item with its options fetched (item detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub options: Vec<MenuItemOption>,
}

/// Menu item option entity
///
/// Unique per (item, group_name, name); the database enforces this and a
/// duplicate create surfaces as a 409 conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemOption {
    pub id: i64,
    pub item_id: i64,
    /// Option group, e.g. "Size" or "Spice level"
    pub group_name: String,
    pub name: String,
    /// Non-negative surcharge added to the item base price
    pub additional_price: Decimal,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Partial update payload for a menu item
///
/// Every field is an explicit optional; omitted fields keep their stored
/// value. The merge against the current row happens inside the same
/// transaction as the write so concurrent edits cannot lose updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

impl MenuItemUpdate {
    /// Merge this patch over the current row: omitted fields keep their
    /// stored value. Pure, so callers can apply it inside whatever
    /// transaction fetched `current`.
    pub fn apply_to(self, current: MenuItem) -> MenuItem {
        MenuItem {
            id: current.id,
            category_id: self.category_id.or(current.category_id),
            name: self.name.unwrap_or(current.name),
            description: self.description.or(current.description),
            base_price: self.base_price.unwrap_or(current.base_price),
            image_url: self.image_url.or(current.image_url),
            is_available: self.is_available.unwrap_or(current.is_available),
        }
    }
}

/// Create option payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemOptionCreate {
    pub group_name: String,
    pub name: String,
    pub additional_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MenuItem {
        MenuItem {
            id: 1,
            category_id: Some(2),
            name: "Margherita".to_string(),
            description: Some("Classic".to_string()),
            base_price: Decimal::new(800, 2),
            image_url: None,
            is_available: true,
        }
    }

    #[test]
    fn empty_patch_keeps_every_field() {
        let merged = MenuItemUpdate::default().apply_to(item());
        assert_eq!(merged.name, "Margherita");
        assert_eq!(merged.base_price, Decimal::new(800, 2));
        assert_eq!(merged.description.as_deref(), Some("Classic"));
        assert!(merged.is_available);
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let patch = MenuItemUpdate {
            base_price: Some(Decimal::new(950, 2)),
            is_available: Some(false),
            ..Default::default()
        };
        let merged = patch.apply_to(item());
        assert_eq!(merged.base_price, Decimal::new(950, 2));
        assert!(!merged.is_available);
        assert_eq!(merged.name, "Margherita");
    }
}
