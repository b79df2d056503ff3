//! Public types for the widget engine: kind tags, renderer instructions, outcomes.

use crate::error::RenderError;
use crate::models::{Column, Record, Scalar};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Renderer family selector declared by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    GroupedBar,
    DivergingBar,
    StackedBar,
    Pie,
    Table,
    Leaderboard,
    Card,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::GroupedBar,
        Kind::DivergingBar,
        Kind::StackedBar,
        Kind::Pie,
        Kind::Table,
        Kind::Leaderboard,
        Kind::Card,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::GroupedBar => "GroupedBar",
            Kind::DivergingBar => "DivergingBar",
            Kind::StackedBar => "StackedBar",
            Kind::Pie => "Pie",
            Kind::Table => "Table",
            Kind::Leaderboard => "Leaderboard",
            Kind::Card => "Card",
        }
    }

    /// Short code used by the older backend (`VBC`, `PIE`, `LDRBRD`, …).
    pub fn legacy_code(self) -> &'static str {
        match self {
            Kind::GroupedBar => "VBC",
            Kind::DivergingBar => "VDBC",
            Kind::StackedBar => "VSBC",
            Kind::Pie => "PIE",
            Kind::Table => "TBL",
            Kind::Leaderboard => "LDRBRD",
            Kind::Card => "CARD",
        }
    }

    /// Canonical names match exactly; legacy codes match case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Kind> {
        let tag = tag.trim();
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == tag || k.legacy_code().eq_ignore_ascii_case(tag))
    }

    /// Icon token shown next to the widget title.
    pub fn icon(self) -> &'static str {
        match self {
            Kind::Pie => "pie",
            Kind::Table | Kind::Leaderboard => "table",
            _ => "bar",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_tag(s).ok_or_else(|| RenderError::UnsupportedKind(s.to_string()))
    }
}

/// How bar-family series are laid out. The data shape is the same for all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStyle {
    Grouped,
    /// Horizontal bars diverging from a zero baseline.
    Diverging,
    Stacked,
}

impl BarStyle {
    pub fn is_horizontal(self) -> bool {
        matches!(self, BarStyle::Diverging)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStyle {
    Plain,
    /// Leaderboard: rank column first and emphasized.
    Ranked,
}

/// One category of a bar chart: its label plus one value per series.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub name: String,
    values: Vec<(String, f64)>,
}

impl NormalizedRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Set a series value. A repeated series name overwrites in place.
    pub fn set(&mut self, series: &str, value: f64) {
        match self.values.iter_mut().find(|(s, _)| s == series) {
            Some(slot) => slot.1 = value,
            None => self.values.push((series.to_string(), value)),
        }
    }

    pub fn get(&self, series: &str) -> Option<f64> {
        self.values.iter().find(|(s, _)| s == series).map(|(_, v)| *v)
    }

    /// `(series, value)` pairs in dataset order.
    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }
}

/// Serialized as a flat object: `{"name": "...", "<series>": value, ...}`.
impl Serialize for NormalizedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("name", &self.name)?;
        for (series, v) in &self.values {
            map.serialize_entry(series, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub series: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Single headline value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardValue {
    pub label: String,
    pub value: Scalar,
}

/// Renderer instruction: one variant per renderer family, each holding only the
/// data that family draws from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Widget {
    Bar {
        style: BarStyle,
        rows: Vec<NormalizedRow>,
        series: Vec<SeriesColor>,
    },
    Pie {
        slices: Vec<Slice>,
    },
    Table {
        style: TableStyle,
        columns: Vec<Column>,
        records: Vec<Record>,
    },
    Card(CardValue),
}

impl Widget {
    /// The kind this instruction was built for.
    pub fn kind(&self) -> Kind {
        match self {
            Widget::Bar { style: BarStyle::Grouped, .. } => Kind::GroupedBar,
            Widget::Bar { style: BarStyle::Diverging, .. } => Kind::DivergingBar,
            Widget::Bar { style: BarStyle::Stacked, .. } => Kind::StackedBar,
            Widget::Pie { .. } => Kind::Pie,
            Widget::Table { style: TableStyle::Plain, .. } => Kind::Table,
            Widget::Table { style: TableStyle::Ranked, .. } => Kind::Leaderboard,
            Widget::Card(_) => Kind::Card,
        }
    }

    /// Well-shaped but without anything to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Widget::Bar { rows, .. } => rows.is_empty(),
            Widget::Pie { slices } => slices.is_empty(),
            Widget::Table { records, .. } => records.is_empty(),
            Widget::Card(_) => false,
        }
    }
}

/// Result of one pass through the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    Renderable { widget: Widget },
    Unrenderable { reason: String },
}

impl RenderOutcome {
    pub fn unrenderable(err: &RenderError) -> Self {
        RenderOutcome::Unrenderable {
            reason: err.to_string(),
        }
    }

    pub fn is_renderable(&self) -> bool {
        matches!(self, RenderOutcome::Renderable { .. })
    }

    pub fn widget(&self) -> Option<&Widget> {
        match self {
            RenderOutcome::Renderable { widget } => Some(widget),
            RenderOutcome::Unrenderable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            RenderOutcome::Renderable { .. } => None,
            RenderOutcome::Unrenderable { reason } => Some(reason),
        }
    }
}

impl From<Result<Widget, RenderError>> for RenderOutcome {
    fn from(res: Result<Widget, RenderError>) -> Self {
        match res {
            Ok(widget) => RenderOutcome::Renderable { widget },
            Err(e) => RenderOutcome::unrenderable(&e),
        }
    }
}

/// A widget as handed to the page: header, body outcome, follow-up suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: &'static str,
    pub outcome: RenderOutcome,
    pub suggestions: Vec<String>,
}
