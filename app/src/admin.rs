use err_derive::Error;
use log::*;

use infra::persistence::{Durability, Storage};

use crate::routes::Route;

pub const ADMIN_SESSION_KEY: &str = "zaykaa_admin_session";

// Placeholder only: a plaintext secret compiled into the binary. A real
// deployment needs credentials verified and issued by a server.
const ADMIN_PASSWORD: &str = "zaykaaAdmin123";

const AUTHENTICATED: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "incorrect admin password")]
pub struct AccessDenied;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated,
}

/// Tracks whether the operator has unlocked the admin surface.
///
/// Only presentation code consults this; the menu store itself is never
/// gated.
#[derive(Debug)]
pub struct AdminGate<S> {
    storage: S,
    session: Session,
    login_modal_open: bool,
}

impl<S: Storage> AdminGate<S> {
    /// Restores the session flag from `storage`; anything but `"true"`,
    /// including a read failure, starts anonymous.
    pub fn open(storage: S) -> Self {
        let session = match storage.get_item(ADMIN_SESSION_KEY) {
            Ok(Some(ref flag)) if flag == AUTHENTICATED => Session::Authenticated,
            Ok(_) => Session::Anonymous,
            Err(e) => {
                warn!("Error reading admin session: {:?}", e);
                Session::Anonymous
            }
        };
        debug!("Restored admin session: {:?}", session);
        AdminGate {
            storage,
            session,
            login_modal_open: false,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session == Session::Authenticated
    }

    pub fn is_login_modal_open(&self) -> bool {
        self.login_modal_open
    }

    pub fn open_login_modal(&mut self) {
        self.login_modal_open = true;
    }

    pub fn close_login_modal(&mut self) {
        self.login_modal_open = false;
    }

    /// On success, returns where to navigate next and whether the session
    /// flag was saved. Retries are unlimited.
    pub fn login(&mut self, password: &str) -> Result<(Route, Durability), AccessDenied> {
        if password != ADMIN_PASSWORD {
            info!("Rejected admin login");
            return Err(AccessDenied);
        }
        self.session = Session::Authenticated;
        self.login_modal_open = false;
        let durability = persist(self.storage.set_item(ADMIN_SESSION_KEY, AUTHENTICATED));
        info!("Admin logged in ({:?})", durability);
        Ok((Route::Admin, durability))
    }

    pub fn logout(&mut self) -> (Route, Durability) {
        self.session = Session::Anonymous;
        let durability = persist(self.storage.remove_item(ADMIN_SESSION_KEY));
        info!("Admin logged out ({:?})", durability);
        (Route::Home, durability)
    }
}

fn persist<E: std::fmt::Debug>(res: Result<(), E>) -> Durability {
    match res {
        Ok(()) => Durability::Durable,
        Err(e) => {
            error!("Error saving admin session: {:?}", e);
            Durability::Volatile
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use infra::persistence::{MemoryStorage, StorageError};

    #[test]
    fn starts_anonymous_on_empty_storage() {
        let gate = AdminGate::open(MemoryStorage::new());
        assert_eq!(gate.session(), Session::Anonymous);
        assert!(!gate.is_login_modal_open());
    }

    #[test]
    fn wrong_password_is_denied() {
        env_logger::try_init().unwrap_or_default();
        let storage = MemoryStorage::new();
        let mut gate = AdminGate::open(&storage);

        assert_eq!(gate.login("wrong"), Err(AccessDenied));
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get_item(ADMIN_SESSION_KEY).expect("get"), None);
    }

    #[test]
    fn right_password_survives_a_restart() {
        env_logger::try_init().unwrap_or_default();
        let storage = MemoryStorage::new();
        let mut gate = AdminGate::open(&storage);
        gate.open_login_modal();

        assert_eq!(
            gate.login("zaykaaAdmin123"),
            Ok((Route::Admin, Durability::Durable))
        );
        assert!(gate.is_authenticated());
        assert!(!gate.is_login_modal_open());

        let restarted = AdminGate::open(&storage);
        assert!(restarted.is_authenticated());
    }

    #[test]
    fn retries_are_unlimited() {
        let mut gate = AdminGate::open(MemoryStorage::new());
        for _ in 0..10 {
            assert!(gate.login("guess").is_err());
        }
        assert!(gate.login("zaykaaAdmin123").is_ok());
    }

    #[test]
    fn logout_clears_stored_flag() {
        let storage = MemoryStorage::new();
        let mut gate = AdminGate::open(&storage);
        gate.login("zaykaaAdmin123").expect("login");

        assert_eq!(gate.logout(), (Route::Home, Durability::Durable));
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get_item(ADMIN_SESSION_KEY).expect("get"), None);
        assert!(!AdminGate::open(&storage).is_authenticated());
    }

    #[test]
    fn only_the_literal_true_counts() {
        for flag in &["TRUE", "1", "yes", ""] {
            let storage = MemoryStorage::new();
            storage.set_item(ADMIN_SESSION_KEY, flag).expect("set");
            assert!(
                !AdminGate::open(&storage).is_authenticated(),
                "flag {:?}",
                flag
            );
        }
    }

    #[test]
    fn login_succeeds_even_when_the_flag_cannot_be_saved() {
        let storage = MemoryStorage::with_quota(4);
        let mut gate = AdminGate::open(&storage);

        assert_eq!(
            gate.login("zaykaaAdmin123"),
            Ok((Route::Admin, Durability::Volatile))
        );
        assert!(gate.is_authenticated());
        assert!(!AdminGate::open(&storage).is_authenticated());
    }

    #[test]
    fn logout_reports_a_flag_that_could_not_be_cleared() {
        let storage = MemoryStorage::new();
        storage.set_item(ADMIN_SESSION_KEY, AUTHENTICATED).expect("set");
        let mut gate = AdminGate::open(ReadOnly(&storage));
        assert!(gate.is_authenticated());

        assert_eq!(gate.logout(), (Route::Home, Durability::Volatile));
        assert!(!gate.is_authenticated());
        assert!(AdminGate::open(&storage).is_authenticated());
    }

    /// Reads through to `0`, refuses every write.
    struct ReadOnly<S>(S);

    impl<S: Storage> Storage for ReadOnly<S> {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key)
        }
        fn set_item(&self, _: &str, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
        fn remove_item(&self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn modal_toggles() {
        let mut gate = AdminGate::open(MemoryStorage::new());
        gate.open_login_modal();
        assert!(gate.is_login_modal_open());
        gate.close_login_modal();
        assert!(!gate.is_login_modal_open());
    }
}
