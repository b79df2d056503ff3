use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Serde helper: keep a field only when it has the expected shape.
///
/// Anything else (wrong type, `null`) reads as absent, so one off-type field never
/// costs the rest of the payload. Whoever needs the field reports it as missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(v).ok())
}

/// Serde helper: a kind tag given as a string or a bare number.
fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// One backend response, exactly as it arrives over the wire.
///
/// Every field is optional: the backend is driven by a language model and may omit
/// or null anything. The field names of the older backend vocabulary
/// (`suggested_chart_config`, `widget_data`, `proactive_suggestions`, …) are
/// accepted next to the current ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(default, deserialize_with = "lenient_tag")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, alias = "widget_data", deserialize_with = "lenient")]
    pub data: Option<RawWidgetData>,
    #[serde(default, alias = "proactive_suggestions", deserialize_with = "lenient")]
    pub next_suggestions: Option<Vec<String>>,
    /// `false` when the backend gave up on the query.
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, alias = "chart_type", deserialize_with = "lenient_tag")]
    pub legacy_kind: Option<String>,
    #[serde(default, alias = "suggested_chart_config", deserialize_with = "lenient")]
    pub chart_config: Option<LegacyChartConfig>,
}

/// Nested descriptor shape used by the older backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyChartConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub widget: Option<LegacyWidget>,
    #[serde(default, deserialize_with = "lenient")]
    pub widget_data: Option<RawWidgetData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyWidget {
    #[serde(default, deserialize_with = "lenient_tag")]
    pub widget_typeofchart: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub widget_title: Option<String>,
}

impl ResponsePayload {
    /// The kind tag, wherever the backend put it.
    pub fn kind_tag(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .or_else(|| {
                self.chart_config
                    .as_ref()
                    .and_then(|c| c.widget.as_ref())
                    .and_then(|w| w.widget_typeofchart.as_deref())
            })
            .or(self.legacy_kind.as_deref())
    }

    pub fn widget_data(&self) -> Option<&RawWidgetData> {
        self.data
            .as_ref()
            .or_else(|| self.chart_config.as_ref().and_then(|c| c.widget_data.as_ref()))
    }

    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .or_else(|| {
                self.chart_config
                    .as_ref()
                    .and_then(|c| c.widget.as_ref())
                    .and_then(|w| w.widget_title.as_deref())
            })
            .unwrap_or("")
    }

    /// Follow-up questions, blank entries dropped, otherwise verbatim.
    pub fn suggestions(&self) -> Vec<String> {
        self.next_suggestions
            .iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// The loosely-typed data block. Which fields are populated depends on the kind.
///
/// A field of the wrong shape reads as `None`; only the transformer for the kind
/// at hand decides whether that is an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWidgetData {
    #[serde(default, deserialize_with = "lenient")]
    pub labels: Option<Vec<Scalar>>,
    #[serde(default, deserialize_with = "lenient")]
    pub datasets: Option<Vec<RawDataset>>,
    #[serde(default, deserialize_with = "lenient")]
    pub columns: Option<Vec<RawColumn>>,
    #[serde(default, deserialize_with = "lenient")]
    pub records: Option<Vec<Record>>,
}

/// One series plotted against the shared `labels` axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    #[serde(default, alias = "label", deserialize_with = "lenient")]
    pub series_name: Option<String>,
    #[serde(default, alias = "data", deserialize_with = "lenient")]
    pub values: Option<Vec<Scalar>>,
    #[serde(default, alias = "backgroundColor", deserialize_with = "lenient")]
    pub color_hint: Option<ColorHint>,
}

/// Explicit color(s) attached to a dataset.
///
/// Pie datasets from the older backend carry one color per slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorHint {
    One(String),
    PerItem(Vec<String>),
}

impl ColorHint {
    /// The color for the whole series: the single hint, or the first of a list.
    pub fn series(&self) -> Option<&str> {
        let hint = match self {
            ColorHint::One(c) => Some(c.as_str()),
            ColorHint::PerItem(cs) => cs.first().map(String::as_str),
        };
        hint.filter(|c| !c.trim().is_empty())
    }

    /// The color for item `idx`, only when one was given per item.
    pub fn item(&self, idx: usize) -> Option<&str> {
        let hint = match self {
            ColorHint::One(_) => None,
            ColorHint::PerItem(cs) => cs.get(idx).map(String::as_str),
        };
        hint.filter(|c| !c.trim().is_empty())
    }
}

/// A column descriptor as sent; any element shape is accepted and checked later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawColumn {
    pub key: Option<String>,
    pub label: Option<String>,
}

impl From<Value> for RawColumn {
    fn from(v: Value) -> Self {
        let text = |field: &str| v.get(field).and_then(Value::as_str).map(str::to_string);
        Self {
            key: text("key"),
            label: text("label"),
        }
    }
}

impl RawColumn {
    /// `None` when the column has no usable key.
    pub fn to_column(&self) -> Option<Column> {
        let key = self.key.as_deref().filter(|k| !k.trim().is_empty())?;
        Some(Column {
            key: key.to_string(),
            label: self.label.clone(),
        })
    }
}

/// Table column: `key` into each record plus a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: Some(label.into()),
        }
    }

    /// The label to show; falls back to a humanized key.
    pub fn display_label(&self) -> String {
        match self.label.as_deref() {
            Some(l) if !l.trim().is_empty() => l.to_string(),
            _ => humanize_key(&self.key),
        }
    }
}

/// `total_sales` -> `Total Sales`.
pub fn humanize_key(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Numeric value, also accepting numeric text such as `"42.5"`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// Natural (unlocalized) string form: integral numbers without a fraction.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) if is_exact_integer(*n) => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => Ok(()),
        }
    }
}

fn is_exact_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Number(n) if is_exact_integer(*n) => serializer.serialize_i64(*n as i64),
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

/// Serde helper: accept any JSON scalar (number, string, bool, null).
///
/// A nested array or object is kept as its compact JSON text.
impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number, string, boolean, or null")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Scalar, A::Error> {
                let v = Value::deserialize(SeqAccessDeserializer::new(seq))?;
                Ok(Scalar::Text(v.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Scalar, A::Error> {
                let v = Value::deserialize(MapAccessDeserializer::new(map))?;
                Ok(Scalar::Text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar::Number(v as f64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar::Number(v))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Scalar, E> {
                Ok(Scalar::Text(s.to_string()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Scalar, E> {
                Ok(Scalar::Text(s))
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Scalar, E> {
                Ok(Scalar::Bool(b))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar::Null)
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// One table row: column key -> cell, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Vec<(String, Scalar)>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an object mapping column keys to scalar values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Record, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rec = Record::new();
                while let Some((k, v)) = access.next_entry::<String, Scalar>()? {
                    rec.insert(k, v);
                }
                Ok(rec)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_backend_key_order() {
        let r: Record = serde_json::from_str(r#"{"zeta":1,"alpha":"a","mid":null}"#).unwrap();
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(r.get("mid"), Some(&Scalar::Null));
    }

    #[test]
    fn humanize_snake_case() {
        assert_eq!(humanize_key("total_sales"), "Total Sales");
        assert_eq!(humanize_key("REGION"), "Region");
        assert_eq!(humanize_key("rank"), "Rank");
    }

    #[test]
    fn off_type_fields_read_as_absent() {
        let p: ResponsePayload = serde_json::from_str(
            r#"{"kind":"Pie","title":7,"nextSuggestions":"Try X","success":"yes",
                "data":{"labels":["a"],"records":[[1,2]]}}"#,
        )
        .unwrap();
        assert_eq!(p.kind_tag(), Some("Pie"));
        assert_eq!(p.title(), "");
        assert!(p.suggestions().is_empty());
        assert_eq!(p.success, None);
        let data = p.widget_data().unwrap();
        assert_eq!(data.labels.as_ref().map(Vec::len), Some(1));
        assert!(data.records.is_none());
    }

    #[test]
    fn column_without_key_is_kept_for_reporting() {
        let d: RawWidgetData =
            serde_json::from_str(r#"{"columns":[{"label":"Name"},"bare",{"key":"n"}]}"#).unwrap();
        let cols = d.columns.unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].to_column(), None);
        assert_eq!(cols[1].to_column(), None);
        assert_eq!(cols[2].to_column().unwrap().display_label(), "N");
    }

    #[test]
    fn display_label_falls_back_to_humanized_key() {
        let col = Column {
            key: "total_sales".into(),
            label: None,
        };
        assert_eq!(col.display_label(), "Total Sales");
        assert_eq!(Column::new("k", "  ").display_label(), "K");
        assert_eq!(Column::new("k", "Kay").display_label(), "Kay");
    }

    #[test]
    fn nested_cell_is_kept_as_json_text() {
        let r: Record = serde_json::from_str(r#"{"tags":["a","b"],"n":1}"#).unwrap();
        assert_eq!(r.get("tags"), Some(&Scalar::Text(r#"["a","b"]"#.into())));
    }

    #[test]
    fn scalar_display_is_unlocalized() {
        assert_eq!(Scalar::Number(2020.0).to_string(), "2020");
        assert_eq!(Scalar::Number(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Null.to_string(), "");
    }
}
