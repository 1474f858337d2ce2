use std::fmt;

use serde::{Deserialize, Serialize};

use infra::documents::Document;
use infra::ids::StampId;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ItemId(String);

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub is_veg: bool,
}

/// A menu entry that hasn't been given an id yet.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub is_veg: bool,
}

/// Fields to overwrite on an existing item. The id is not patchable.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub is_veg: Option<bool>,
}

/// The stored menu: every item, in display order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub(crate) struct MenuList {
    pub(crate) items: Vec<FoodItem>,
}

pub const MENU_KEY: &str = "zaykaaMenu";

impl ItemId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<StampId> for ItemId {
    fn from(id: StampId) -> Self {
        ItemId(id.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::convert::Infallible;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(ItemId::new(src))
    }
}

impl FoodItem {
    pub fn with_id(id: ItemId, item: NewFoodItem) -> Self {
        let NewFoodItem {
            name,
            description,
            price,
            image,
            category,
            rating,
            is_veg,
        } = item;
        FoodItem {
            id,
            name,
            description,
            price,
            image,
            category,
            rating,
            is_veg,
        }
    }

    pub fn apply(&mut self, patch: &FoodItemPatch) {
        let patch = patch.clone();
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if patch.rating.is_some() {
            self.rating = patch.rating;
        }
        if let Some(is_veg) = patch.is_veg {
            self.is_veg = is_veg;
        }
    }

    /// Everything but the id.
    pub fn details(&self) -> NewFoodItem {
        NewFoodItem {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.clone(),
            rating: self.rating,
            is_veg: self.is_veg,
        }
    }
}

/// Overwrites every field. An unrated item leaves the existing rating alone.
impl From<NewFoodItem> for FoodItemPatch {
    fn from(item: NewFoodItem) -> Self {
        FoodItemPatch {
            name: Some(item.name),
            description: Some(item.description),
            price: Some(item.price),
            image: Some(item.image),
            category: Some(item.category),
            rating: item.rating,
            is_veg: Some(item.is_veg),
        }
    }
}

impl Document for MenuList {
    const KEY: &'static str = MENU_KEY;
}
