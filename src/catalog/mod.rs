//! # Store Catalog
//!
//! Static, read-only store data: name, pickup address, rating and menu.
//!
//! The catalog is configuration, not state. The session only ever looks stores
//! up by [`StoreId`] and passes menu entries straight through to the
//! presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Stores (the store's display name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub String);

impl From<&str> for StoreId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StoreId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One priced line on a store's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
}

/// Label/price pair handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub value: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub address: String,
    pub rating: f32,
    pub menu: Vec<MenuItem>,
}

impl Store {
    /// Creates a new Store instance.
    ///
    /// # Arguments
    /// * `name` - Display name, also used as the store id
    /// * `address` - Pickup address sent to the directions provider as origin
    /// * `rating` - Average customer rating
    /// * `menu` - `(item, price)` pairs in display order
    pub fn new(name: &str, address: &str, rating: f32, menu: &[(&str, f64)]) -> Self {
        Self {
            id: StoreId::from(name),
            address: address.to_string(),
            rating,
            menu: menu
                .iter()
                .map(|(item, price)| MenuItem {
                    name: item.to_string(),
                    price: *price,
                })
                .collect(),
        }
    }

    /// Dropdown label, e.g. `"Pizza Express - ⭐ 4.5"`.
    pub fn listing_label(&self) -> String {
        format!("{} - ⭐ {}", self.id, self.rating)
    }

    /// Confirmation shown after a successful selection.
    pub fn selected_label(&self) -> String {
        format!("Selected store: {} ⭐ {}", self.id, self.rating)
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.menu.iter().any(|m| m.name == item)
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.menu
            .iter()
            .map(|m| MenuEntry {
                label: format!("{} - R$ {:.2}", m.name, m.price),
                value: m.name.clone(),
                price: m.price,
            })
            .collect()
    }
}

/// The fixed set of stores a customer can order from.
#[derive(Debug, Clone)]
pub struct Catalog {
    stores: Vec<Store>,
}

impl Catalog {
    pub fn new(stores: Vec<Store>) -> Self {
        Self { stores }
    }

    pub fn get(&self, id: &StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| &s.id == id)
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Store::new(
                "Hamburgueria Top",
                "Rua José Raimundo de Freitas, Juiz de Fora, MG",
                4.8,
                &[
                    ("🍔 Hambúrguer", 22.00),
                    ("🍟 Batata Frita", 10.00),
                    ("🥤 Refrigerante", 7.00),
                    ("🥪 X-Burger", 25.00),
                    ("🍗 Frango Frito", 18.00),
                    ("🍕 Pizza Individual", 32.00),
                    ("🍺 Cerveja", 8.00),
                    ("🍩 Donuts", 12.00),
                ],
            ),
            Store::new(
                "Pizza Express",
                "Rua São Mateus, Juiz de Fora, MG",
                4.5,
                &[
                    ("🍕 Pizza", 38.00),
                    ("🧀 Queijo Extra", 5.00),
                    ("🥤 Suco", 8.00),
                    ("🍖 Carne de Sol", 28.00),
                    ("🍝 Lasanha", 35.00),
                    ("🍅 Salada Caprese", 22.00),
                    ("🍷 Vinho Tinto", 40.00),
                    ("🍮 Pudim", 14.00),
                ],
            ),
            Store::new(
                "Sushi Master",
                "Shopping Independência, Juiz de Fora, MG",
                4.7,
                &[
                    ("🍣 Sushi", 55.00),
                    ("🍤 Tempurá", 25.00),
                    ("🍶 Saquê", 30.00),
                    ("🍱 Box de Sushi", 80.00),
                    ("🍙 Onigiri", 15.00),
                    ("🍜 Ramen", 35.00),
                    ("🍚 Arroz de Sushi", 12.00),
                    ("🍥 Tamago", 18.00),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.stores().len(), 3);

        let store = catalog.get(&StoreId::from("Pizza Express")).unwrap();
        assert_eq!(store.address, "Rua São Mateus, Juiz de Fora, MG");
        assert_eq!(store.menu.len(), 8);
        assert!(catalog.get(&StoreId::from("Unknown")).is_none());
    }

    #[test]
    fn test_menu_labels_are_pass_through() {
        let catalog = Catalog::default();
        let store = catalog.get(&StoreId::from("Hamburgueria Top")).unwrap();
        let entries = store.menu_entries();

        assert_eq!(entries[0].label, "🍔 Hambúrguer - R$ 22.00");
        assert_eq!(entries[0].value, "🍔 Hambúrguer");
        assert_eq!(store.listing_label(), "Hamburgueria Top - ⭐ 4.8");
        assert!(store.has_item("🍩 Donuts"));
        assert!(!store.has_item("🍣 Sushi"));
    }
}
