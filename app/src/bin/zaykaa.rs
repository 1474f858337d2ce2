use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use log::*;
use serde::Deserialize;
use structopt::StructOpt;

use infra::persistence::Durability;
use zaykaa::config::StorageConfig;
use zaykaa::menu::{FormErrors, ItemForm, ItemId, CATEGORIES};
use zaykaa::routes::{guard, Guarded, Route};
use zaykaa::EditError;

#[derive(Debug, StructOpt)]
#[structopt(name = "zaykaa", about = "Zaykaa storefront")]
struct Opt {
    /// Config file
    #[structopt(parse(from_os_str))]
    config: PathBuf,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "show-menu", about = "Show the menu")]
    ShowMenu {
        #[structopt(short = "c", long = "category")]
        category: Option<String>,
    },
    #[structopt(name = "categories", about = "List menu categories")]
    Categories,
    #[structopt(name = "order", about = "Compose a WhatsApp order")]
    Order {
        id: ItemId,
        #[structopt(short = "q", long = "quantity", default_value = "1")]
        quantity: u32,
    },
    #[structopt(name = "login", about = "Unlock admin commands")]
    Login { password: String },
    #[structopt(name = "logout", about = "Lock admin commands")]
    Logout,
    #[structopt(name = "status", about = "Show session status")]
    Status,
    #[structopt(name = "add", about = "Add a menu item (admin)")]
    Add(ItemArgs),
    #[structopt(name = "update", about = "Edit a menu item (admin)")]
    Update {
        id: ItemId,
        #[structopt(flatten)]
        fields: PatchArgs,
    },
    #[structopt(name = "remove", about = "Delete a menu item (admin)")]
    Remove {
        id: ItemId,
        /// Confirm the deletion; it cannot be undone
        #[structopt(long = "yes")]
        yes: bool,
    },
    #[structopt(name = "reset", about = "Restore the default menu (admin)")]
    Reset,
}

#[derive(Debug, StructOpt)]
struct ItemArgs {
    #[structopt(long = "name")]
    name: String,
    #[structopt(long = "description")]
    description: String,
    #[structopt(long = "price")]
    price: String,
    #[structopt(long = "image")]
    image: String,
    #[structopt(long = "category")]
    category: String,
    #[structopt(long = "rating", default_value = "4.0")]
    rating: String,
    #[structopt(long = "non-veg")]
    non_veg: bool,
}

#[derive(Debug, StructOpt)]
struct PatchArgs {
    #[structopt(long = "name")]
    name: Option<String>,
    #[structopt(long = "description")]
    description: Option<String>,
    #[structopt(long = "price")]
    price: Option<String>,
    #[structopt(long = "image")]
    image: Option<String>,
    #[structopt(long = "category")]
    category: Option<String>,
    #[structopt(long = "rating")]
    rating: Option<String>,
    #[structopt(long = "veg")]
    veg: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(flatten)]
    zaykaa: zaykaa::config::Config,
    #[serde(default)]
    env_logger: zaykaa::config::EnvLogger,
}

impl Commands {
    fn route(&self) -> Route {
        match self {
            Commands::Add(_)
            | Commands::Update { .. }
            | Commands::Remove { .. }
            | Commands::Reset => Route::Admin,
            _ => Route::Menu,
        }
    }
}

impl PatchArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.rating.is_none()
            && self.veg.is_none()
    }

    fn overlay(self, form: &mut ItemForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(image) = self.image {
            form.image = image;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(rating) = self.rating {
            form.rating = rating;
        }
        if let Some(veg) = self.veg {
            form.is_veg = veg;
        }
    }
}

fn invalid(errors: &FormErrors) -> anyhow::Error {
    let lines = errors
        .iter()
        .map(|(field, message)| format!("  {:?}: {}", field, message))
        .collect::<Vec<_>>();
    anyhow!("invalid menu item\n{}", lines.join("\n"))
}

fn warn_on_unknown_category(category: &str) {
    if !CATEGORIES.contains(&category) {
        warn!("Category {:?} is not one of {:?}", category, CATEGORIES);
    }
}

fn report(durability: Durability) {
    if !durability.is_durable() {
        eprintln!("warning: change applied but could not be saved");
    }
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let mut config_buf = String::new();
    File::open(&opt.config)
        .with_context(|| format!("open {:?}", opt.config))?
        .read_to_string(&mut config_buf)?;
    let mut config: Config = toml::from_str(&config_buf).context("parse config")?;

    config.env_logger.builder().init();
    debug!("Options: {:?}", opt);

    if let Ok(storage) = StorageConfig::from_env() {
        info!("Storage path from environment: {:?}", storage.path);
        config.zaykaa.storage = storage;
    }

    let mut app = zaykaa::Zaykaa::new(&config.zaykaa)?;

    if let Guarded::Redirect { to, alert } = guard(opt.command.route(), app.admin()) {
        debug!("Redirected to {}", to);
        bail!("{}", alert);
    }

    match opt.command {
        Commands::ShowMenu { category } => {
            for item in app.menu_items(category.as_deref()) {
                println!(
                    "{}: {} [{}{}] ₹{}{}",
                    item.id,
                    item.name,
                    item.category,
                    if item.is_veg { ", veg" } else { "" },
                    item.price,
                    item.rating
                        .map(|r| format!(" ★{}", r))
                        .unwrap_or_default()
                );
            }
        }
        Commands::Categories => {
            for category in app.menu().categories() {
                println!("{}", category);
            }
        }
        Commands::Order { id, quantity } => {
            let mut draft = match app.select(&id) {
                Some(draft) => draft,
                None => bail!("No such menu item: {}", id),
            };
            draft.adjust(i64::from(quantity) - 1);
            let link = app.place_order(draft)?;
            println!("{}", link);
        }
        Commands::Login { password } => match app.admin_mut().login(&password) {
            Ok((next, durability)) => {
                report(durability);
                println!("Logged in; admin commands unlocked ({})", next)
            }
            Err(e) => bail!("{}", e),
        },
        Commands::Logout => {
            let (next, durability) = app.admin_mut().logout();
            report(durability);
            println!("Logged out ({})", next);
        }
        Commands::Status => {
            println!("admin: {:?}", app.admin().session());
            println!("items: {}", app.menu().len());
        }
        Commands::Add(args) => {
            let form = ItemForm {
                name: args.name,
                description: args.description,
                price: args.price,
                image: args.image,
                category: args.category,
                rating: args.rating,
                is_veg: !args.non_veg,
            };
            let item = form.validate().map_err(|e| invalid(&e))?;
            warn_on_unknown_category(&item.category);
            let (id, durability) = app.menu_mut().add(item);
            report(durability);
            println!("{}", id);
        }
        Commands::Update { id, fields } => {
            if fields.is_empty() {
                bail!("Nothing to change for {}", id);
            }
            match app.edit_item(&id, |form| fields.overlay(form)) {
                Ok(durability) => report(durability),
                Err(EditError::Invalid(errors)) => return Err(invalid(&errors)),
                Err(e) => bail!("{}", e),
            }
            if let Some(item) = app.menu().get(&id) {
                warn_on_unknown_category(&item.category);
            }
        }
        Commands::Remove { id, yes } => {
            if !yes {
                bail!("Delete {}? This cannot be undone; pass --yes to confirm", id);
            }
            report(app.menu_mut().remove(&id));
        }
        Commands::Reset => {
            report(app.menu_mut().reset_to_defaults());
        }
    }

    Ok(())
}
