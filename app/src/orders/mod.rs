use log::*;

use crate::menu::FoodItem;

mod models;
mod whatsapp;

pub use self::models::OrderItem;
pub use self::whatsapp::{LinkError, WhatsApp, DEFAULT_PHONE};

/// The item a customer is about to order, and how many.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    item: FoodItem,
    quantity: u32,
}

/// Orders confirmed during this session. Nothing here is persisted, and
/// nothing flows back to the menu.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new(item: FoodItem) -> Self {
        OrderDraft { item, quantity: 1 }
    }

    pub fn item(&self) -> &FoodItem {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Never drops below one.
    pub fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.quantity).saturating_add(delta);
        self.quantity = next.max(1).min(i64::from(u32::MAX)) as u32;
    }

    pub fn total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }

    pub fn confirm(self) -> OrderItem {
        OrderItem::new(self.item, self.quantity)
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_order(&mut self, item: FoodItem, quantity: u32) -> &OrderItem {
        debug!("Ordered {} x {}", item.name, quantity);
        self.push(OrderItem::new(item, quantity))
    }

    pub fn push(&mut self, order: OrderItem) -> &OrderItem {
        self.items.push(order);
        &self.items[self.items.len() - 1]
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::total).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
