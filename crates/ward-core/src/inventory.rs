//! Ward stock inventory.
//!
//! Consumables are tracked by quantity only. The stock status shown to staff is always derived
//! from the quantity, so it can never disagree with it.

use crate::constants::LOW_STOCK_THRESHOLD;
use crate::error::{InventoryError, InventoryResult};
use std::fmt;
use std::str::FromStr;
use ward_types::NonEmptyText;
use ward_uuid::RecordUuid;

/// Stock level of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// `0` is out of stock, up to [`LOW_STOCK_THRESHOLD`] is low stock.
    pub fn for_quantity(quantity: u32) -> Self {
        match quantity {
            0 => StockStatus::OutOfStock,
            q if q <= LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    /// Accepts the display form and snake/kebab variants, ignoring case: `In Stock`,
    /// `in_stock`, `low-stock`, `OUT OF STOCK`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "instock" => Ok(StockStatus::InStock),
            "lowstock" => Ok(StockStatus::LowStock),
            "outofstock" => Ok(StockStatus::OutOfStock),
            _ => Err(format!("unknown stock status '{}'", s.trim())),
        }
    }
}

/// Details supplied when adding or editing an item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: NonEmptyText,
    pub name: NonEmptyText,
    pub description: String,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn status(&self) -> StockStatus {
        StockStatus::for_quantity(self.quantity)
    }
}

/// Items in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item under a fresh code.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::EmptyName`] if the name is blank.
    pub fn add(&mut self, details: NewItem) -> InventoryResult<InventoryItem> {
        let name = NonEmptyText::new(&details.name).map_err(|_| InventoryError::EmptyName)?;
        let item = InventoryItem {
            id: self.fresh_id(),
            name,
            description: details.description.trim().to_string(),
            quantity: details.quantity,
        };
        tracing::info!(item = %item.id, quantity = item.quantity, "inventory item added");
        self.items.push(item.clone());
        Ok(item)
    }

    fn fresh_id(&self) -> NonEmptyText {
        loop {
            if let Ok(id) = NonEmptyText::new(RecordUuid::short_code()) {
                if self.get(id.as_str()).is_err() {
                    return id;
                }
            }
        }
    }

    /// Replaces the name, description and quantity of an item, keeping its code.
    pub fn update(&mut self, id: &str, details: NewItem) -> InventoryResult<InventoryItem> {
        let name = NonEmptyText::new(&details.name).map_err(|_| InventoryError::EmptyName)?;
        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        item.name = name;
        item.description = details.description.trim().to_string();
        item.quantity = details.quantity;
        tracing::info!(item = %item.id, quantity = item.quantity, "inventory item updated");
        Ok(item.clone())
    }

    pub fn remove(&mut self, id: &str) -> InventoryResult<InventoryItem> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        tracing::info!(item = %item.id, "inventory item removed");
        Ok(item)
    }

    pub fn get(&self, id: &str) -> InventoryResult<&InventoryItem> {
        self.index_of(id).map(|i| &self.items[i])
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Items whose name or description contains `term` (ignoring case), optionally limited to
    /// one stock status. A blank term matches everything.
    pub fn search(&self, term: Option<&str>, status: Option<StockStatus>) -> Vec<&InventoryItem> {
        let term = term
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        self.items
            .iter()
            .filter(|item| status.map_or(true, |s| item.status() == s))
            .filter(|item| match &term {
                Some(t) => {
                    item.name.as_str().to_lowercase().contains(t)
                        || item.description.to_lowercase().contains(t)
                }
                None => true,
            })
            .collect()
    }

    fn index_of(&self, id: &str) -> InventoryResult<usize> {
        let id = id.trim();
        self.items
            .iter()
            .position(|item| item.id.as_str() == id)
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, description: &str, quantity: u32) -> NewItem {
        NewItem {
            name: name.into(),
            description: description.into(),
            quantity,
        }
    }

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory
            .add(item("Surgical Masks", "Disposable face masks", 500))
            .unwrap();
        inventory
            .add(item("Alcohol Swabs", "Sterile disinfecting wipes", 50))
            .unwrap();
        inventory
            .add(item("Bandages", "Assorted sizes for wound care", 0))
            .unwrap();
        inventory
    }

    #[test]
    fn status_follows_quantity() {
        assert_eq!(StockStatus::for_quantity(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_quantity(1), StockStatus::LowStock);
        assert_eq!(StockStatus::for_quantity(LOW_STOCK_THRESHOLD), StockStatus::LowStock);
        assert_eq!(
            StockStatus::for_quantity(LOW_STOCK_THRESHOLD + 1),
            StockStatus::InStock
        );
    }

    #[test]
    fn status_parses_display_and_snake_forms() {
        assert_eq!("In Stock".parse::<StockStatus>(), Ok(StockStatus::InStock));
        assert_eq!("low_stock".parse::<StockStatus>(), Ok(StockStatus::LowStock));
        assert_eq!("OUT-OF-STOCK".parse::<StockStatus>(), Ok(StockStatus::OutOfStock));
        assert!("plenty".parse::<StockStatus>().is_err());
    }

    #[test]
    fn add_assigns_unique_codes_and_rejects_blank_names() {
        let mut inventory = stocked();
        let codes: Vec<_> = inventory.items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(codes.len(), 3);
        assert!(codes.iter().all(|c| c.as_str().len() == 9));
        assert_ne!(codes[0], codes[1]);

        assert_eq!(
            inventory.add(item("  ", "", 3)).unwrap_err(),
            InventoryError::EmptyName
        );
        assert_eq!(inventory.items().len(), 3);
    }

    #[test]
    fn update_keeps_code_and_rederives_status() {
        let mut inventory = stocked();
        let id = inventory.items()[2].id.clone();

        let updated = inventory
            .update(id.as_str(), item("Bandages", "Restocked", 120))
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.status(), StockStatus::InStock);
        assert_eq!(inventory.get(id.as_str()).unwrap().description, "Restocked");
    }

    #[test]
    fn update_and_remove_unknown_item_fail() {
        let mut inventory = stocked();
        assert_eq!(
            inventory.update("NOPE", item("X", "", 1)).unwrap_err(),
            InventoryError::ItemNotFound("NOPE".into())
        );
        assert!(inventory.remove("NOPE").is_err());
        assert_eq!(inventory.items().len(), 3);
    }

    #[test]
    fn remove_returns_item() {
        let mut inventory = stocked();
        let id = inventory.items()[0].id.clone();
        let removed = inventory.remove(id.as_str()).unwrap();
        assert_eq!(removed.name.as_str(), "Surgical Masks");
        assert!(inventory.get(id.as_str()).is_err());
    }

    #[test]
    fn search_matches_name_or_description_and_status() {
        let inventory = stocked();

        let hits = inventory.search(Some("MASK"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name.as_str(), "Surgical Masks");

        assert_eq!(inventory.search(Some("wound"), None).len(), 1);
        assert_eq!(inventory.search(Some("  "), None).len(), 3);
        assert_eq!(inventory.search(None, Some(StockStatus::LowStock)).len(), 1);
        assert!(inventory
            .search(Some("mask"), Some(StockStatus::OutOfStock))
            .is_empty());
    }
}
