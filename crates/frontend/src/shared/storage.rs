//! `window.localStorage` behind the [`KeyValueStore`] seam.

use contracts::dashboards::d400_sales_metrics::DashboardStore;
use contracts::shared::storage::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

/// Browser local storage. Every call re-resolves the storage object, so a
/// store disabled mid-session surfaces as [`StoreError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StoreError> {
        window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Read {
                key: key.to_string(),
                message: js_message(&e),
            })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: js_message(&e),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: js_message(&e),
            })
    }
}

/// Dashboard persistence backed by local storage.
pub fn dashboard_store() -> DashboardStore<LocalStore> {
    DashboardStore::new(LocalStore)
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
