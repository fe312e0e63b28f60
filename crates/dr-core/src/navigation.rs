//! Seller wizard navigation state shared between tabs.
//!
//! The active tab and the seller id returned by the Company Overview save
//! live in one [`WizardNav`] value. Persistence goes through [`NavStore`] so
//! the seller id survives a page reload in the browser.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::wizard::SellerTab;

/// Storage key for the current seller id.
pub const SELLER_ID_KEY: &str = "dealroom.seller_id";

/// Minimal key/value persistence.
pub trait NavStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process store for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryNavStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryNavStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavStore for MemoryNavStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardNav {
    tab: SellerTab,
    seller_id: Option<i64>,
}

impl WizardNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the seller id left by a previous session. An unparsable value
    /// is ignored.
    pub fn restore(store: &dyn NavStore) -> Self {
        let seller_id = store
            .get(SELLER_ID_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        Self {
            tab: SellerTab::default(),
            seller_id,
        }
    }

    /// Start editing an existing seller.
    pub fn for_seller(seller_id: i64) -> Self {
        Self {
            tab: SellerTab::default(),
            seller_id: Some(seller_id),
        }
    }

    pub fn tab(&self) -> SellerTab {
        self.tab
    }

    pub fn seller_id(&self) -> Option<i64> {
        self.seller_id
    }

    /// Switch tabs and persist the seller id so the next tab can read it.
    pub fn go_to(&mut self, tab: SellerTab, store: &dyn NavStore) {
        self.tab = tab;
        self.persist(store);
    }

    /// Record the id returned by a Company Overview save.
    pub fn set_seller_id(&mut self, seller_id: i64, store: &dyn NavStore) {
        self.seller_id = Some(seller_id);
        self.persist(store);
    }

    /// Forget the current seller; used when starting a new one.
    pub fn reset(&mut self, store: &dyn NavStore) {
        *self = Self::default();
        store.remove(SELLER_ID_KEY);
    }

    fn persist(&self, store: &dyn NavStore) {
        match self.seller_id {
            Some(id) => store.set(SELLER_ID_KEY, &id.to_string()),
            None => store.remove(SELLER_ID_KEY),
        }
    }
}
