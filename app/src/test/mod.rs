//! Guarded with `#[cfg(test)]` from `lib.rs`

use anyhow::Result;
use infra::persistence::Storage;

use crate::menu::{
    default_catalog, FoodItemPatch, ItemForm, ItemId, LoadSource, MenuStore, MENU_KEY,
};
use crate::orders::WhatsApp;
use crate::routes::{guard, Guarded, Route};
use crate::menu::Field;
use crate::{EditError, Zaykaa};

mod junk_drawer;

fn dosa_form() -> ItemForm {
    ItemForm {
        name: "Masala Dosa".to_string(),
        description: "Crisp rice crepe with spiced potato".to_string(),
        price: "140".to_string(),
        image: "https://example.com/dosa.jpg".to_string(),
        category: "Main Course".to_string(),
        is_veg: true,
        ..Default::default()
    }
}

#[test]
fn admin_adds_an_item_that_survives_a_reload() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let scratch = junk_drawer::ScratchFile::new("admin_adds_an_item");

    let added = {
        let mut app = Zaykaa::with_storage(scratch.storage(), WhatsApp::default());
        assert_eq!(app.menu().len(), default_catalog().len());

        assert!(app.admin_mut().login("wrong").is_err());
        let (next, durability) = app.admin_mut().login("zaykaaAdmin123")?;
        assert!(durability.is_durable());
        assert_eq!(guard(next, app.admin()), Guarded::Allow(Route::Admin));

        let item = dosa_form().validate()?;
        let (id, durability) = app.menu_mut().add(item.clone());
        assert!(durability.is_durable());
        (id, item)
    };

    let app = Zaykaa::with_storage(scratch.storage(), WhatsApp::default());
    assert!(app.admin().is_authenticated());
    assert_eq!(app.menu().len(), default_catalog().len() + 1);
    let (id, item) = added;
    let reloaded = app.menu().get(&id).expect("added item after reload");
    assert_eq!(reloaded.details(), item);
    Ok(())
}

#[test]
fn customer_orders_from_a_filtered_menu() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let scratch = junk_drawer::ScratchFile::new("customer_orders");
    let mut app = Zaykaa::with_storage(scratch.storage(), WhatsApp::default());

    assert_eq!(
        guard(Route::from_path("/admin"), app.admin()),
        Guarded::Redirect {
            to: Route::Home,
            alert: "Access denied. Admins only."
        }
    );

    let desserts = app.menu_items(Some("Dessert"));
    assert_eq!(desserts.len(), 1);
    let id = desserts[0].id.clone();

    let mut draft = app.select(&id).expect("dessert on the menu");
    draft.adjust(2);
    let link = app.place_order(draft)?;

    assert!(link.as_str().starts_with("https://wa.me/918639378049?text="));
    assert_eq!(app.orders().items().len(), 1);
    assert_eq!(app.orders().items()[0].quantity, 3);
    assert_eq!(app.orders().total(), 270.0);

    // Orders never touch storage.
    assert_eq!(scratch.storage().get_item(MENU_KEY)?, None);
    Ok(())
}

#[test]
fn corrupt_storage_file_falls_back_to_defaults() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let scratch = junk_drawer::ScratchFile::new("corrupt_storage_file");
    std::fs::write(&scratch.path, b"{ this is not json")?;

    let mut store = MenuStore::new(scratch.storage());
    assert_eq!(store.load(), LoadSource::Defaults);
    assert_eq!(store.items(), &default_catalog()[..]);

    // The file can't be read back, so writes can't merge into it either.
    let first = store.items()[0].id.clone();
    let durability = store.update(
        &first,
        &FoodItemPatch {
            price: Some(1.0),
            ..Default::default()
        },
    );
    assert!(!durability.is_durable());
    assert_eq!(store.items()[0].price, 1.0);
    Ok(())
}

#[test]
fn reset_after_edits_reloads_as_defaults() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let scratch = junk_drawer::ScratchFile::new("reset_after_edits");

    {
        let mut store = MenuStore::open(scratch.storage());
        let ids = store.items().iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        for id in ids.iter().take(3) {
            store.remove(id);
        }
        store.add(dosa_form().validate()?);
        assert!(store.reset_to_defaults().is_durable());
    }

    let mut store = MenuStore::new(scratch.storage());
    assert_eq!(store.load(), LoadSource::Persisted);
    assert_eq!(store.items(), &default_catalog()[..]);
    Ok(())
}

#[test]
fn invalid_edits_never_reach_the_saved_menu() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let scratch = junk_drawer::ScratchFile::new("invalid_edits");

    let id = {
        let mut app = Zaykaa::with_storage(scratch.storage(), WhatsApp::default());
        let (id, _) = app.menu_mut().add(dosa_form().validate()?);
        let saved = scratch.storage().get_item(MENU_KEY)?;

        for bad in &["NaN", "inf", "0", "-5"] {
            match app.edit_item(&id, |form| form.price = bad.to_string()) {
                Err(EditError::Invalid(errors)) => {
                    assert!(errors.get(Field::Price).is_some(), "price {:?}", bad)
                }
                other => panic!("price {:?} accepted: {:?}", bad, other),
            }
        }
        match app.edit_item(&id, |form| form.rating = "42".to_string()) {
            Err(EditError::Invalid(errors)) => assert!(errors.get(Field::Rating).is_some()),
            other => panic!("rating accepted: {:?}", other),
        }
        match app.edit_item(&id, |form| form.name = " ".to_string()) {
            Err(EditError::Invalid(errors)) => assert!(errors.get(Field::Name).is_some()),
            other => panic!("blank name accepted: {:?}", other),
        }
        match app.edit_item(&ItemId::new("nope"), |form| form.price = "1".to_string()) {
            Err(EditError::NoSuchItem(missing)) => assert_eq!(missing, ItemId::new("nope")),
            other => panic!("unknown item edited: {:?}", other),
        }

        assert_eq!(scratch.storage().get_item(MENU_KEY)?, saved);
        assert_eq!(app.menu().get(&id).map(|i| i.price), Some(140.0));

        let durability = app
            .edit_item(&id, |form| form.price = "150".to_string())
            .expect("valid edit");
        assert!(durability.is_durable());
        id
    };

    let mut store = MenuStore::new(scratch.storage());
    assert_eq!(store.load(), LoadSource::Persisted);
    assert_eq!(store.len(), default_catalog().len() + 1);
    let dosa = store.get(&id).expect("edited item after reload");
    assert_eq!(dosa.price, 150.0);
    assert_eq!(dosa.name, "Masala Dosa");
    Ok(())
}
