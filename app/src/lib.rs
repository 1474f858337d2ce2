use std::sync::Arc;

use anyhow::Result;
use err_derive::Error;
use log::*;

use infra::persistence::{Durability, FileStorage, Storage};

pub mod admin;
pub mod config;
pub mod menu;
pub mod orders;
pub mod routes;

#[cfg(test)]
mod test;

use crate::admin::AdminGate;
use crate::menu::{FoodItem, FormErrors, ItemForm, ItemId, MenuStore};
use crate::orders::{LinkError, OrderBook, OrderDraft, WhatsApp};

#[derive(Debug, Error)]
pub enum EditError {
    #[error(display = "no such menu item: {}", _0)]
    NoSuchItem(ItemId),
    #[error(display = "invalid menu item: {}", _0)]
    Invalid(#[error(source)] FormErrors),
}

/// One storefront session: the menu, the admin gate and the order book,
/// all backed by the same storage.
#[derive(Debug)]
pub struct Zaykaa<S> {
    menu: MenuStore<Arc<S>>,
    admin: AdminGate<Arc<S>>,
    orders: OrderBook,
    whatsapp: WhatsApp,
}

impl Zaykaa<FileStorage> {
    pub fn new(config: &config::Config) -> Result<Self> {
        let storage = config.storage.build()?;
        Ok(Self::with_storage(storage, config.whatsapp.clone()))
    }
}

impl<S: Storage> Zaykaa<S> {
    pub fn with_storage(storage: S, whatsapp: WhatsApp) -> Self {
        info!("Booting zaykaa");
        let storage = Arc::new(storage);
        let menu = MenuStore::open(storage.clone());
        let admin = AdminGate::open(storage);
        Zaykaa {
            menu,
            admin,
            orders: OrderBook::new(),
            whatsapp,
        }
    }

    pub fn menu(&self) -> &MenuStore<Arc<S>> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuStore<Arc<S>> {
        &mut self.menu
    }

    pub fn admin(&self) -> &AdminGate<Arc<S>> {
        &self.admin
    }

    pub fn admin_mut(&mut self) -> &mut AdminGate<Arc<S>> {
        &mut self.admin
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn whatsapp(&self) -> &WhatsApp {
        &self.whatsapp
    }

    /// Starts an order for a menu item, if it exists.
    pub fn select(&self, id: &ItemId) -> Option<OrderDraft> {
        self.menu.get(id).cloned().map(OrderDraft::new)
    }

    /// Records the order and returns the chat link to hand to the customer.
    pub fn place_order(&mut self, draft: OrderDraft) -> Result<url::Url, LinkError> {
        let order = draft.confirm();
        let link = self.whatsapp.order_link(&order)?;
        self.orders.push(order);
        Ok(link)
    }

    /// Edits an item through the admin form prefilled from the stored item,
    /// so an edit is validated exactly like a new item. Nothing is written
    /// unless the edited form validates.
    pub fn edit_item<F: FnOnce(&mut ItemForm)>(
        &mut self,
        id: &ItemId,
        edit: F,
    ) -> Result<Durability, EditError> {
        let mut form = self
            .menu
            .get(id)
            .map(ItemForm::from_item)
            .ok_or_else(|| EditError::NoSuchItem(id.clone()))?;
        edit(&mut form);
        let details = form.validate().map_err(EditError::Invalid)?;
        Ok(self.menu.update(id, &details.into()))
    }

    pub fn menu_items(&self, category: Option<&str>) -> Vec<&FoodItem> {
        self.menu.by_category(category)
    }
}
