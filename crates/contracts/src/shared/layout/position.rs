use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Widget anchor in percent of the canvas (`0..=100` on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Only finite coordinates make a position.
    pub fn new(x: f64, y: f64) -> Option<Self> {
        (x.is_finite() && y.is_finite()).then_some(Self { x, y })
    }

    /// Position under the pointer, relative to the canvas rectangle.
    pub fn from_pointer(client_x: f64, client_y: f64, canvas: &CanvasRect) -> Self {
        let x = if canvas.width > 0.0 {
            (client_x - canvas.left) / canvas.width * 100.0
        } else {
            0.0
        };
        let y = if canvas.height > 0.0 {
            (client_y - canvas.top) / canvas.height * 100.0
        } else {
            0.0
        };
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }
}

/// Bounding box of the rendered canvas, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

fn clamp_percent(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    (v.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// Positions the operator dragged widgets to, keyed by widget key.
/// Widgets without an entry sit at their configured default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionMap(BTreeMap<String, Position>);

impl PositionMap {
    /// Keep only entries whose `x` and `y` are both finite numbers.
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(entries) = value else {
            return Self::default();
        };
        let positions = entries
            .into_iter()
            .filter_map(|(key, entry)| {
                let x = entry.get("x")?.as_f64()?;
                let y = entry.get("y")?.as_f64()?;
                Position::new(x, y).map(|p| (key, p))
            })
            .collect();
        Self(positions)
    }

    pub fn get(&self, key: &str) -> Option<Position> {
        self.0.get(key).copied()
    }

    pub fn set(&mut self, key: &str, position: Position) {
        if Position::new(position.x, position.y).is_some() {
            self.0.insert(key.to_string(), position);
        }
    }

    /// Stored position, or `fallback` when the widget was never moved.
    pub fn resolve(&self, key: &str, fallback: Position) -> Position {
        self.get(key).unwrap_or(fallback)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
