//! Reporting windows and linear projection of the 30-day baseline.

use super::state::{BaseState, MAX_COUNT};
use crate::shared::number_parse::parse_leading_integer;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of the reference window every other period is scaled from.
pub const BASELINE_DAYS: u32 = 30;

/// Custom window length used when nothing valid was stored.
pub const DEFAULT_CUSTOM_DAYS: u32 = 7;

/// Labels the custom option was saved under by earlier versions.
pub const LEGACY_CUSTOM_LABELS: [&str; 2] = ["Data personalizada", "Personalizado"];

/// User-defined window length, always at least one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomDays(u32);

impl Default for CustomDays {
    fn default() -> Self {
        Self(DEFAULT_CUSTOM_DAYS)
    }
}

impl CustomDays {
    /// Zero falls back to the default window.
    pub fn new(days: u32) -> Self {
        if days == 0 {
            Self::default()
        } else {
            Self(days)
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Read the persisted value; unset, zero or garbage gives the default.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(parse_leading_integer)
            .filter(|days| *days > 0)
            .map(|days| Self(u32::try_from(days).unwrap_or(u32::MAX)))
            .unwrap_or_default()
    }

    /// Read an answer typed into the "how many days" prompt.
    /// Returns `None` when the answer must be ignored.
    pub fn parse_prompt(answer: &str) -> Option<Self> {
        let normalized = answer.replacen(',', ".", 1);
        parse_leading_integer(&normalized)
            .filter(|days| *days > 0)
            .map(|days| Self(u32::try_from(days).unwrap_or(u32::MAX)))
    }

    /// Value as written to storage.
    pub fn to_stored(&self) -> String {
        self.0.to_string()
    }
}

/// Reporting window selected in the period dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodSelector {
    Today,
    Last7Days,
    Last15Days,
    Last30Days,
    ThisMonth,
    LastMonth,
    Custom(CustomDays),
    /// Unrecognized stored key, treated as a 30-day window.
    Other(String),
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl PeriodSelector {
    pub const BASELINE: PeriodSelector = PeriodSelector::Last30Days;

    /// Fixed options, in dropdown order.
    pub const NAMED: [PeriodSelector; 6] = [
        PeriodSelector::Today,
        PeriodSelector::Last7Days,
        PeriodSelector::Last15Days,
        PeriodSelector::Last30Days,
        PeriodSelector::ThisMonth,
        PeriodSelector::LastMonth,
    ];

    /// Stable identifier used in storage.
    pub fn key(&self) -> &str {
        match self {
            PeriodSelector::Today => "today",
            PeriodSelector::Last7Days => "last_7_days",
            PeriodSelector::Last15Days => "last_15_days",
            PeriodSelector::Last30Days => "last_30_days",
            PeriodSelector::ThisMonth => "this_month",
            PeriodSelector::LastMonth => "last_month",
            PeriodSelector::Custom(_) => "custom",
            PeriodSelector::Other(key) => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PeriodSelector::Today => "Today",
            PeriodSelector::Last7Days => "Last 7 days",
            PeriodSelector::Last15Days => "Last 15 days",
            PeriodSelector::Last30Days => "Last 30 days",
            PeriodSelector::ThisMonth => "This month",
            PeriodSelector::LastMonth => "Last month",
            PeriodSelector::Custom(_) => "Custom period",
            PeriodSelector::Other(key) => key,
        }
    }

    /// Label earlier versions saved for the fixed options.
    fn legacy_label(&self) -> Option<&'static str> {
        match self {
            PeriodSelector::Today => Some("Hoje"),
            PeriodSelector::Last7Days => Some("Últimos 7 dias"),
            PeriodSelector::Last15Days => Some("Últimos 15 dias"),
            PeriodSelector::Last30Days => Some("Últimos 30 dias"),
            PeriodSelector::ThisMonth => Some("Este mês"),
            PeriodSelector::LastMonth => Some("Mês passado"),
            _ => None,
        }
    }

    /// Resolve a stored key, a display label or a legacy label. `custom`
    /// supplies the day count when the key names the custom window.
    pub fn from_key(key: &str, custom: CustomDays) -> Self {
        let key = key.trim();
        if key.is_empty() {
            return Self::BASELINE;
        }
        if key == "custom" || key == "Custom period" || LEGACY_CUSTOM_LABELS.contains(&key) {
            return PeriodSelector::Custom(custom);
        }
        Self::NAMED
            .into_iter()
            .find(|p| p.key() == key || p.label() == key || p.legacy_label() == Some(key))
            .unwrap_or_else(|| PeriodSelector::Other(key.to_string()))
    }

    /// Number of days the window covers.
    pub fn days(&self) -> u32 {
        match self {
            PeriodSelector::Today => 1,
            PeriodSelector::Last7Days => 7,
            PeriodSelector::Last15Days => 15,
            PeriodSelector::Last30Days => BASELINE_DAYS,
            PeriodSelector::ThisMonth => 30,
            PeriodSelector::LastMonth => 30,
            PeriodSelector::Custom(days) => days.get(),
            PeriodSelector::Other(_) => BASELINE_DAYS,
        }
    }

    pub fn is_baseline(&self) -> bool {
        *self == Self::BASELINE
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PeriodSelector::Custom(_))
    }

    /// Factor applied to period-cumulative figures.
    pub fn ratio(&self) -> f64 {
        self.days() as f64 / BASELINE_DAYS as f64
    }

    /// Calendar window the option stands for, ending `today`.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        if *self == PeriodSelector::Today {
            return (today, today);
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(self.days())))
            .unwrap_or(NaiveDate::MIN);
        (start, today)
    }
}

/// State for the active period plus whether it was projected from the
/// baseline (projected states are read-only for editing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodState {
    pub state: BaseState,
    pub is_derived: bool,
}

/// Project the baseline figures onto `selector`.
///
/// Counts and money totals scale linearly, per-unit and rate figures are
/// copied. The baseline itself is returned untouched.
pub fn derive_for_period(base: &BaseState, selector: &PeriodSelector) -> PeriodState {
    if selector.is_baseline() {
        return PeriodState {
            state: *base,
            is_derived: false,
        };
    }

    let ratio = selector.ratio();
    let scale_count = |v: u64| -> u64 {
        let scaled = (v as f64 * ratio).round();
        if scaled > 0.0 {
            scaled.min(MAX_COUNT) as u64
        } else {
            0
        }
    };
    let scale_money = |v: f64| -> f64 { round2(v * ratio).max(0.0) };

    let derived = BaseState {
        sales_count: scale_count(base.sales_count),
        visits: scale_count(base.visits),
        canceled_sales: scale_count(base.canceled_sales),
        ad_spend: scale_money(base.ad_spend),
        other_costs: scale_money(base.other_costs),
        ..*base
    };

    PeriodState {
        // independent rounding can push canceled above sales
        state: derived.normalized(),
        is_derived: true,
    }
}

/// Round half away from zero to two decimals.
///
/// Rounds the binary product `v * 100`, not the decimal expansion of `v`:
/// `1.115` (stored as 1.11499...) gives `1.12`, where rounding the exact
/// decimal would give `1.11`.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
