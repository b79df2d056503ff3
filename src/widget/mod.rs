//! Widget engine: validate a response, dispatch on its kind, reshape its data, and
//! hand back a renderer instruction or the reason there is nothing to draw.
//!
//! - Validation only checks that a kind tag and a data block are present
//! - Dispatch maps the kind to its transformer and renderer family
//! - Colors are resolved here, from an injected `Palette`
//! - Every failure becomes `RenderOutcome::Unrenderable`; nothing panics

pub mod present;
pub mod transform;
pub mod types;

pub use types::{
    BarStyle, CardValue, Kind, NormalizedRow, RenderOutcome, Rendered, SeriesColor, Slice,
    TableStyle, Widget,
};

use crate::error::RenderError;
use crate::format::Formatter;
use crate::models::{RawWidgetData, ResponsePayload};
use crate::palette::{Palette, PaletteError};
use log::{debug, warn};

/// Palette and number locale used for one page.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub palette: Palette,
    pub formatter: Formatter,
}

impl RenderConfig {
    /// Build from user-facing options; `palette` is a `#a,#b,...` list.
    pub fn from_options(locale: &str, palette: Option<&str>) -> Result<Self, PaletteError> {
        let palette = match palette {
            Some(list) => Palette::parse(list)?,
            None => Palette::default(),
        };
        Ok(Self {
            palette,
            formatter: Formatter::new(locale),
        })
    }
}

/// The parts of a response the engine needs, once both are known to be present.
#[derive(Debug, Clone, Copy)]
pub struct Validated<'a> {
    pub kind: &'a str,
    pub data: &'a RawWidgetData,
}

/// Renderable iff a kind tag and a data block are both present.
pub fn validate(payload: &ResponsePayload) -> Result<Validated<'_>, RenderError> {
    let data = payload.widget_data().ok_or(RenderError::MissingData)?;
    let kind = payload.kind_tag().ok_or(RenderError::MissingData)?;
    Ok(Validated { kind, data })
}

/// Build the renderer instruction for a known kind.
pub fn build(kind: Kind, data: &RawWidgetData, palette: &Palette) -> Result<Widget, RenderError> {
    let widget = match kind {
        Kind::GroupedBar | Kind::DivergingBar | Kind::StackedBar => {
            let style = match kind {
                Kind::DivergingBar => BarStyle::Diverging,
                Kind::StackedBar => BarStyle::Stacked,
                _ => BarStyle::Grouped,
            };
            let rows = transform::bar_rows(kind, data)?;
            let mut series = Vec::new();
            for (d, ds) in data.datasets.iter().flatten().enumerate() {
                series.push(SeriesColor {
                    series: transform::series_name(kind, ds, d)?.to_string(),
                    color: palette.color_for(ds, d),
                });
            }
            Widget::Bar {
                style,
                rows,
                series,
            }
        }
        Kind::Pie => {
            let hint = data
                .datasets
                .as_deref()
                .and_then(|ds| ds.first())
                .and_then(|ds| ds.color_hint.as_ref());
            let slices = transform::pie_pairs(data)?
                .into_iter()
                .enumerate()
                .map(|(i, (name, value))| Slice {
                    name,
                    value,
                    color: palette.resolve(hint.and_then(|h| h.item(i)), i),
                })
                .collect();
            Widget::Pie { slices }
        }
        Kind::Table | Kind::Leaderboard => {
            let style = if kind == Kind::Leaderboard {
                TableStyle::Ranked
            } else {
                TableStyle::Plain
            };
            let (columns, records) = transform::table(kind, data)?;
            Widget::Table {
                style,
                columns,
                records,
            }
        }
        Kind::Card => Widget::Card(transform::card(data)?),
    };
    Ok(widget)
}

/// Look up `kind`, reshape `data` for it, and resolve colors.
pub fn dispatch(kind: &str, data: &RawWidgetData, palette: &Palette) -> RenderOutcome {
    let res = kind
        .parse::<Kind>()
        .and_then(|k| {
            debug!("dispatching {kind:?} as {k}");
            build(k, data, palette)
        });
    if let Err(e) = &res {
        warn!("widget not renderable: {e}");
    }
    RenderOutcome::from(res)
}

/// Full pass over one response: backend failure, validation, dispatch.
pub fn render(payload: &ResponsePayload, palette: &Palette) -> Rendered {
    let outcome = if payload.success == Some(false) {
        let msg = payload
            .error
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "Analysis failed.".to_string());
        warn!("backend reported failure: {msg}");
        RenderOutcome::unrenderable(&RenderError::Backend(msg))
    } else {
        match validate(payload) {
            Ok(v) => dispatch(v.kind, v.data, palette),
            Err(e) => {
                warn!("widget not renderable: {e}");
                RenderOutcome::unrenderable(&e)
            }
        }
    };
    let icon = payload
        .kind_tag()
        .and_then(Kind::from_tag)
        .map_or("bar", Kind::icon);
    Rendered {
        title: payload.title().to_string(),
        description: payload.description.clone(),
        icon,
        outcome,
        suggestions: payload.suggestions(),
    }
}
