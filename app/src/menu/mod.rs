use log::*;

use infra::documents::Documents;
use infra::ids::IdGen;
use infra::persistence::{Durability, Storage};

mod catalog;
mod form;
mod models;

pub use self::catalog::default_catalog;
pub use self::form::{Field, FormErrors, ItemForm, CATEGORIES};
pub use self::models::{FoodItem, FoodItemPatch, ItemId, NewFoodItem, MENU_KEY};

use self::models::MenuList;

/// Where the current menu came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Defaults,
}

/// Owns the menu. Every mutation rewrites the whole stored list.
///
/// Writes are best effort: a failed save is logged, the in-memory menu keeps
/// the change, and the caller gets `Durability::Volatile` back.
#[derive(Debug)]
pub struct MenuStore<S> {
    storage: S,
    idgen: IdGen,
    items: Vec<FoodItem>,
    loading: bool,
}

impl<S: Storage> MenuStore<S> {
    /// An unloaded store; see `load`.
    pub fn new(storage: S) -> Self {
        MenuStore {
            storage,
            idgen: IdGen::new(),
            items: Vec::new(),
            loading: true,
        }
    }

    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Falls back to the default catalog when nothing usable is stored. The
    /// fallback is not written back until the next mutation.
    pub fn load(&mut self) -> LoadSource {
        let (items, source) = match Documents::wrap(&self.storage).load::<MenuList>() {
            Ok(Some(list)) => {
                debug!("Loaded {} menu items from storage", list.items.len());
                (list.items, LoadSource::Persisted)
            }
            Ok(None) => {
                debug!("No saved menu; using defaults");
                (default_catalog(), LoadSource::Defaults)
            }
            Err(e) => {
                warn!("Error loading menu from storage: {:?}", e);
                (default_catalog(), LoadSource::Defaults)
            }
        };
        self.items = items;
        self.loading = false;
        source
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&FoodItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Distinct categories, in the order they first appear on the menu.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in self.items.iter() {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// `None` selects everything.
    pub fn by_category(&self, category: Option<&str>) -> Vec<&FoodItem> {
        self.items
            .iter()
            .filter(|item| category.map(|c| item.category == c).unwrap_or(true))
            .collect()
    }

    /// Appends `item` under a freshly generated id. Callers are expected to
    /// have validated it already.
    pub fn add(&mut self, item: NewFoodItem) -> (ItemId, Durability) {
        let id = ItemId::from(self.idgen.generate());
        let mut items = self.items.clone();
        items.push(FoodItem::with_id(id.clone(), item));
        info!("Adding menu item {}", id);
        (id, self.save(items))
    }

    /// An unknown id leaves the menu as it was, though it is still saved.
    pub fn update(&mut self, id: &ItemId, patch: &FoodItemPatch) -> Durability {
        let items = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                if &item.id == id {
                    item.apply(patch);
                }
                item
            })
            .collect();
        debug!("Update {} with {:?}", id, patch);
        self.save(items)
    }

    pub fn remove(&mut self, id: &ItemId) -> Durability {
        let items = self
            .items
            .iter()
            .filter(|item| &item.id != id)
            .cloned()
            .collect::<Vec<_>>();
        if items.len() == self.items.len() {
            debug!("Remove {}: no such item", id);
        }
        self.save(items)
    }

    pub fn reset_to_defaults(&mut self) -> Durability {
        info!("Resetting menu to defaults");
        self.save(default_catalog())
    }

    fn save(&mut self, items: Vec<FoodItem>) -> Durability {
        let list = MenuList { items };
        let durability = match Documents::wrap(&self.storage).save(&list) {
            Ok(()) => Durability::Durable,
            Err(e) => {
                error!("Error saving menu to storage: {:?}", e);
                Durability::Volatile
            }
        };
        self.items = list.items;
        durability
    }
}
