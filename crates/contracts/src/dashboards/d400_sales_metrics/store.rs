//! Typed access to the persisted dashboard blobs.
//!
//! Nothing here fails: unreadable or malformed data is logged and replaced by
//! defaults, write failures are logged and dropped.

use super::compare::{migrate_period_labels, PERIOD_MAIN_KEY};
use super::period::{CustomDays, PeriodSelector};
use super::state::RawState;
use crate::shared::layout::{LabelState, PositionMap, SizeState, VisibilityMap};
use crate::shared::storage::{KeyValueStore, StoreError};
use serde::Serialize;
use serde_json::Value;

pub const STATE_KEY: &str = "metricsAdminState";
pub const LABELS_KEY: &str = "metricsLabelState";
pub const POSITIONS_KEY: &str = "metricsPositionState";
pub const VISIBILITY_KEY: &str = "metricsVisibilityState";
pub const SIZES_KEY: &str = "metricsSizeState";
pub const CUSTOM_DAYS_KEY: &str = "metricsCustomPeriodDays";
pub const PERIOD_KEY: &str = "metricsPeriodState";

pub struct DashboardStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DashboardStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Saved base figures, or `None` when absent or unreadable.
    pub fn load_state(&self) -> Option<RawState> {
        let value = self.read_json(STATE_KEY)?;
        let state = RawState::from_json_value(value);
        if state.is_none() {
            log::warn!("Ignoring malformed '{}' blob", STATE_KEY);
        }
        state
    }

    pub fn save_state(&self, state: &RawState) {
        self.write_json(STATE_KEY, state);
    }

    pub fn custom_days(&self) -> CustomDays {
        CustomDays::from_stored(self.read_raw(CUSTOM_DAYS_KEY).as_deref())
    }

    pub fn set_custom_days(&self, days: CustomDays) {
        self.write_raw(CUSTOM_DAYS_KEY, &days.to_stored());
    }

    /// Selected period; custom windows pick up the stored day count.
    /// Label sets from earlier versions kept the period as their
    /// `periodMain` caption, which is used when no period was saved.
    pub fn load_period(&self) -> PeriodSelector {
        let custom = self.custom_days();
        let saved = self.read_raw(PERIOD_KEY).or_else(|| {
            self.load_labels()
                .get(PERIOD_MAIN_KEY)
                .map(str::to_string)
        });
        match saved {
            Some(key) => PeriodSelector::from_key(&key, custom),
            None => PeriodSelector::BASELINE,
        }
    }

    pub fn save_period(&self, period: &PeriodSelector) {
        self.write_raw(PERIOD_KEY, period.key());
    }

    pub fn load_labels(&self) -> LabelState {
        let mut labels = self
            .read_json(LABELS_KEY)
            .map(LabelState::from_json_value)
            .unwrap_or_default();
        migrate_period_labels(&mut labels);
        labels
    }

    pub fn save_labels(&self, labels: &LabelState) {
        self.write_json(LABELS_KEY, labels);
    }

    pub fn load_positions(&self) -> PositionMap {
        self.read_json(POSITIONS_KEY)
            .map(PositionMap::from_json_value)
            .unwrap_or_default()
    }

    pub fn save_positions(&self, positions: &PositionMap) {
        self.write_json(POSITIONS_KEY, positions);
    }

    pub fn load_visibility(&self) -> VisibilityMap {
        self.read_json(VISIBILITY_KEY)
            .map(VisibilityMap::from_json_value)
            .unwrap_or_default()
    }

    pub fn save_visibility(&self, visibility: &VisibilityMap) {
        self.write_json(VISIBILITY_KEY, visibility);
    }

    pub fn load_sizes(&self) -> SizeState {
        self.read_json(SIZES_KEY)
            .map(SizeState::from_json_value)
            .unwrap_or_default()
    }

    pub fn save_sizes(&self, sizes: &SizeState) {
        self.write_json(SIZES_KEY, sizes);
    }

    // ------------------------------------------------------------------------

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    fn read_json(&self, key: &str) -> Option<Value> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unparseable '{}' blob: {}", key, e);
                None
            }
        }
    }

    fn write_raw(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set_item(key, value) {
            log::warn!("{}", e);
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set_item(key, &raw));
        if let Err(e) = result {
            log::warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_metrics::state::{normalize, BaseState, StateField};
    use crate::shared::layout::Position;
    use crate::shared::storage::MemoryStore;

    /// Every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disabled".to_string()))
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                message: "quota".to_string(),
            })
        }

        fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disabled".to_string()))
        }
    }

    #[test]
    fn test_state_round_trip_keeps_raw_text() {
        let store = DashboardStore::new(MemoryStore::new());
        assert!(store.load_state().is_none());

        let mut draft = RawState::default();
        draft.set_text(StateField::AvgSalePrice, "19,90");
        store.save_state(&draft);

        let loaded = store.load_state().unwrap();
        assert_eq!(loaded, draft);
        assert_eq!(normalize(&loaded).avg_sale_price, 19.9);
    }

    #[test]
    fn test_partial_blob_merges_defaults() {
        let mem = MemoryStore::new();
        mem.set_item(STATE_KEY, r#"{"salesCount": 12}"#).unwrap();
        let store = DashboardStore::new(&mem);
        let state = normalize(&store.load_state().unwrap());
        assert_eq!(state.sales_count, 12);
        assert_eq!(state.units_per_sale, 1.0);
    }

    #[test]
    fn test_malformed_blobs_fall_back() {
        let mem = MemoryStore::new();
        mem.set_item(STATE_KEY, "{not json").unwrap();
        mem.set_item(LABELS_KEY, "[]").unwrap();
        mem.set_item(SIZES_KEY, "42").unwrap();
        mem.set_item(CUSTOM_DAYS_KEY, "zero").unwrap();
        let store = DashboardStore::new(&mem);

        assert!(store.load_state().is_none());
        assert_eq!(store.load_labels(), LabelState::default());
        assert_eq!(store.load_sizes(), SizeState::default());
        assert_eq!(store.custom_days(), CustomDays::default());

        mem.set_item(STATE_KEY, "[1,2,3]").unwrap();
        assert!(store.load_state().is_none());
    }

    #[test]
    fn test_broken_store_never_propagates() {
        let store = DashboardStore::new(BrokenStore);
        assert!(store.load_state().is_none());
        assert_eq!(store.custom_days().get(), 7);
        assert_eq!(store.load_period(), PeriodSelector::BASELINE);
        assert_eq!(store.load_positions(), PositionMap::default());
        store.save_state(&RawState::from(&BaseState::default()));
        store.set_custom_days(CustomDays::new(3));
        store.save_sizes(&SizeState::default());
    }

    #[test]
    fn test_period_and_custom_days() {
        let store = DashboardStore::new(MemoryStore::new());
        assert_eq!(store.load_period(), PeriodSelector::BASELINE);

        store.set_custom_days(CustomDays::new(45));
        store.save_period(&PeriodSelector::Custom(CustomDays::new(45)));
        assert_eq!(
            store.load_period(),
            PeriodSelector::Custom(CustomDays::new(45))
        );
        assert_eq!(store.inner().get_item(CUSTOM_DAYS_KEY).unwrap().as_deref(), Some("45"));

        store.save_period(&PeriodSelector::Last7Days);
        assert_eq!(store.load_period(), PeriodSelector::Last7Days);
    }

    #[test]
    fn test_period_falls_back_to_saved_caption() {
        let mem = MemoryStore::new();
        mem.set_item(LABELS_KEY, r#"{"periodMain":"Últimos 7 dias"}"#).unwrap();
        let store = DashboardStore::new(&mem);
        assert_eq!(store.load_period(), PeriodSelector::Last7Days);
        assert_eq!(store.load_period().days(), 7);

        mem.set_item(LABELS_KEY, r#"{"periodMain":"Personalizado"}"#).unwrap();
        mem.set_item(CUSTOM_DAYS_KEY, "12").unwrap();
        assert_eq!(store.load_period(), PeriodSelector::Custom(CustomDays::new(12)));

        mem.set_item(LABELS_KEY, r#"{"periodMain":"Data personalizada"}"#).unwrap();
        assert_eq!(store.load_period(), PeriodSelector::Custom(CustomDays::new(12)));

        // an explicitly saved period wins over the caption
        store.save_period(&PeriodSelector::Today);
        assert_eq!(store.load_period(), PeriodSelector::Today);
    }

    #[test]
    fn test_reset_while_projected_keeps_period() {
        let store = DashboardStore::new(MemoryStore::new());
        let mut draft = RawState::default();
        draft.set_text(StateField::SalesCount, "90");
        store.save_state(&draft);
        store.save_period(&PeriodSelector::Last7Days);

        store.save_state(&RawState::default());
        assert_eq!(normalize(&store.load_state().unwrap()), BaseState::default());
        assert_eq!(store.load_period(), PeriodSelector::Last7Days);
    }

    #[test]
    fn test_loaded_labels_are_migrated() {
        let mem = MemoryStore::new();
        mem.set_item(
            LABELS_KEY,
            r#"{"periodCompare":"Personalizado","headline":"Vendas"}"#,
        )
        .unwrap();
        let store = DashboardStore::new(&mem);
        let labels = store.load_labels();
        assert_eq!(labels.get("periodCompare"), Some("Custom period"));
        assert_eq!(labels.get("headline"), Some("Vendas"));
    }

    #[test]
    fn test_layout_blobs() {
        let store = DashboardStore::new(MemoryStore::new());

        let mut positions = PositionMap::default();
        positions.set("netProfit", Position { x: 10.0, y: 20.0 });
        store.save_positions(&positions);
        assert_eq!(store.load_positions(), positions);

        let mut visibility = VisibilityMap::default();
        visibility.set("cogs", false);
        store.save_visibility(&visibility);
        assert!(!store.load_visibility().is_visible("cogs"));

        let mut sizes = SizeState::default();
        sizes.set_item_scale("cogs", 2.0);
        store.save_sizes(&sizes);
        assert_eq!(store.load_sizes(), sizes);

        let mut labels = LabelState::default();
        labels.commit("storeName", "Acme", "My store");
        store.save_labels(&labels);
        assert_eq!(store.load_labels().text_or("storeName", ""), "Acme");
    }
}
