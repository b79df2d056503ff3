//! A conversation view: the already-fetched backend responses, rendered in order.

use crate::error::RenderError;
use crate::models::ResponsePayload;
use crate::palette::Palette;
use crate::widget::{self, RenderOutcome, Rendered};
use anyhow::{Context, Result};
use log::warn;
use serde_json::Value;

#[derive(Debug, Clone)]
enum Entry {
    Payload(Box<ResponsePayload>),
    /// The element is not a response object at all.
    Invalid(String),
}

impl Entry {
    fn from_value(v: Value) -> Self {
        if v.is_null() {
            return Entry::Payload(Box::default());
        }
        if !v.is_object() {
            warn!("skipping non-object response: {v}");
            return Entry::Invalid(format!("expected a response object, got {v}"));
        }
        match serde_json::from_value::<ResponsePayload>(v) {
            Ok(p) => Entry::Payload(Box::new(p)),
            Err(e) => {
                warn!("skipping unreadable response: {e}");
                Entry::Invalid(e.to_string())
            }
        }
    }
}

/// Ordered sequence of responses.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    entries: Vec<Entry>,
}

impl Conversation {
    /// Parse a JSON document holding one response object or an array of them.
    ///
    /// ### Errors
    /// Only when the text is not JSON. Individual responses that are not objects
    /// are kept and later render as `Unrenderable`.
    pub fn from_json(text: &str) -> Result<Self> {
        let v: Value = serde_json::from_str(text).context("parse response json")?;
        Ok(Self::from_value(v))
    }

    pub fn from_value(v: Value) -> Self {
        let entries = match v {
            Value::Array(items) => items.into_iter().map(Entry::from_value).collect(),
            other => vec![Entry::from_value(other)],
        };
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `Rendered` per response, in conversation order.
    pub fn render(&self, palette: &Palette) -> Vec<Rendered> {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Payload(p) => widget::render(p, palette),
                Entry::Invalid(detail) => Rendered {
                    title: String::new(),
                    description: None,
                    icon: "bar",
                    outcome: RenderOutcome::unrenderable(&RenderError::InvalidPayload(
                        detail.clone(),
                    )),
                    suggestions: Vec::new(),
                },
            })
            .collect()
    }
}
