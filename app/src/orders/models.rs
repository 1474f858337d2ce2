use serde::{Deserialize, Serialize};

use crate::menu::FoodItem;

/// A menu item as ordered. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(flatten)]
    pub item: FoodItem,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(item: FoodItem, quantity: u32) -> Self {
        let quantity = quantity.max(1);
        OrderItem { item, quantity }
    }

    pub fn total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}
