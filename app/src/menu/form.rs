use std::collections::BTreeMap;
use std::fmt;

use super::models::{FoodItem, NewFoodItem};

pub const CATEGORIES: &[&str] = &[
    "Main Course",
    "Starter",
    "Rice",
    "Bread",
    "Dal",
    "Dessert",
    "Beverage",
];

const DEFAULT_RATING: &str = "4.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    Price,
    Image,
    Category,
    Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(BTreeMap<Field, &'static str>);

/// The admin item editor, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating: String,
    pub is_veg: bool,
}

impl Default for ItemForm {
    fn default() -> Self {
        ItemForm {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image: String::new(),
            category: String::new(),
            rating: DEFAULT_RATING.to_string(),
            is_veg: true,
        }
    }
}

impl ItemForm {
    /// Prefilled for editing `item`.
    pub fn from_item(item: &FoodItem) -> Self {
        ItemForm {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            image: item.image.clone(),
            category: item.category.clone(),
            rating: item
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| DEFAULT_RATING.to_string()),
            is_veg: item.is_veg,
        }
    }

    pub fn validate(&self) -> Result<NewFoodItem, FormErrors> {
        let mut errors = BTreeMap::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, "Name is required");
        }
        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(Field::Description, "Description is required");
        }

        let price = self.price.trim();
        let parsed_price = price.parse::<f64>().ok().filter(|p| p.is_finite() && *p > 0.0);
        if price.is_empty() {
            errors.insert(Field::Price, "Price is required");
        } else if parsed_price.is_none() {
            errors.insert(Field::Price, "Price must be a valid positive number");
        }

        let image = self.image.trim();
        if image.is_empty() {
            errors.insert(Field::Image, "Image URL is required");
        }
        let category = self.category.trim();
        if category.is_empty() {
            errors.insert(Field::Category, "Category is required");
        }

        let rating = self.rating.trim();
        let parsed_rating = if rating.is_empty() {
            None
        } else {
            match rating.parse::<f64>() {
                Ok(r) if r >= 1.0 && r <= 5.0 => Some(r),
                _ => {
                    errors.insert(Field::Rating, "Rating must be between 1 and 5");
                    None
                }
            }
        };

        match parsed_price {
            Some(price) if errors.is_empty() => Ok(NewFoodItem {
                name: name.to_string(),
                description: description.to_string(),
                price,
                image: image.to_string(),
                category: category.to_string(),
                rating: parsed_rating,
                is_veg: self.is_veg,
            }),
            _ => Err(FormErrors(errors)),
        }
    }
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let messages = self.0.values().cloned().collect::<Vec<_>>();
        write!(fmt, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}
