use lazy_static::lazy_static;

use super::models::{FoodItem, ItemId};

macro_rules! dish {
    ($id:expr, $name:expr, $desc:expr, $price:expr, $cat:expr, $rating:expr, $veg:expr, $img:expr) => {
        FoodItem {
            id: ItemId::new($id),
            name: $name.to_string(),
            description: $desc.to_string(),
            price: $price,
            image: $img.to_string(),
            category: $cat.to_string(),
            rating: Some($rating),
            is_veg: $veg,
        }
    };
}

lazy_static! {
    static ref DEFAULT_ITEMS: Vec<FoodItem> = vec![
        dish!(
            "1",
            "Butter Chicken",
            "Tandoori chicken simmered in a rich tomato and butter gravy",
            320.0,
            "Main Course",
            4.8,
            false,
            "https://images.unsplash.com/photo-1603894584373-5ac82b2ae398"
        ),
        dish!(
            "2",
            "Paneer Butter Masala",
            "Cottage cheese cubes in a creamy, mildly spiced tomato gravy",
            280.0,
            "Main Course",
            4.6,
            true,
            "https://images.unsplash.com/photo-1631452180519-c014fe946bc7"
        ),
        dish!(
            "3",
            "Chicken Biryani",
            "Fragrant basmati rice layered with marinated chicken and saffron",
            300.0,
            "Rice",
            4.7,
            false,
            "https://images.unsplash.com/photo-1563379091339-03246963d51a"
        ),
        dish!(
            "4",
            "Veg Biryani",
            "Basmati rice slow-cooked with seasonal vegetables and whole spices",
            240.0,
            "Rice",
            4.3,
            true,
            "https://images.unsplash.com/photo-1589302168068-964664d93dc0"
        ),
        dish!(
            "5",
            "Paneer Tikka",
            "Char-grilled cottage cheese marinated in yoghurt and spices",
            220.0,
            "Starter",
            4.5,
            true,
            "https://images.unsplash.com/photo-1599487488170-d11ec9c172f0"
        ),
        dish!(
            "6",
            "Chicken 65",
            "Crisp fried chicken tossed with curry leaves and red chilli",
            250.0,
            "Starter",
            4.4,
            false,
            "https://images.unsplash.com/photo-1610057099443-fde8c4d50f91"
        ),
        dish!(
            "7",
            "Dal Makhani",
            "Black lentils slow-cooked overnight with butter and cream",
            200.0,
            "Dal",
            4.6,
            true,
            "https://images.unsplash.com/photo-1546833999-b9f581a1996d"
        ),
        dish!(
            "8",
            "Butter Naan",
            "Soft leavened bread from the tandoor, brushed with butter",
            50.0,
            "Bread",
            4.5,
            true,
            "https://images.unsplash.com/photo-1565557623262-b51c2513a641"
        ),
        dish!(
            "9",
            "Gulab Jamun",
            "Milk dumplings soaked in cardamom sugar syrup",
            90.0,
            "Dessert",
            4.7,
            true,
            "https://images.unsplash.com/photo-1666190092159-3171cf0fbb12"
        ),
        dish!(
            "10",
            "Mango Lassi",
            "Chilled yoghurt drink blended with Alphonso mango",
            80.0,
            "Beverage",
            4.4,
            true,
            "https://images.unsplash.com/photo-1527661591475-527312dd65f5"
        ),
    ];
}

/// The built-in menu used before anything has been saved, and by a reset.
pub fn default_catalog() -> Vec<FoodItem> {
    DEFAULT_ITEMS.clone()
}
