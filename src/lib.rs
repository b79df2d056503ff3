//! wdgt_rs
//!
//! Turns the widget payloads of a conversational data-analysis backend into
//! renderer-ready charts, tables, and cards. Pairs with the `wdgt` CLI.
//!
//! ### Features
//! - Grouped, diverging, and stacked bars, pies, tables, leaderboards, single-value cards
//! - Locale-aware number display (`1,234,567` vs `1.234.567`)
//! - Deterministic palette cycling with explicit color hints taking precedence
//! - Malformed or unknown payloads degrade to a readable reason instead of failing
//! - Optional SVG/PNG previews and CSV/JSON export
//!
//! ### Example
//! ```
//! use wdgt_rs::{Conversation, Palette, RenderOutcome};
//!
//! let conv = Conversation::from_json(
//!     r#"{"kind":"Pie","title":"Share","data":{"labels":["A","B"],
//!         "datasets":[{"seriesName":"x","values":[3,7]}]}}"#,
//! )?;
//! let rendered = conv.render(&Palette::default());
//! assert!(matches!(rendered[0].outcome, RenderOutcome::Renderable { .. }));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod conversation;
pub mod error;
pub mod format;
pub mod models;
pub mod palette;
pub mod preview;
pub mod storage;
pub mod widget;

pub use conversation::Conversation;
pub use error::RenderError;
pub use format::Formatter;
pub use models::{ResponsePayload, Scalar};
pub use palette::Palette;
pub use widget::{Kind, RenderConfig, RenderOutcome, Rendered, Widget, dispatch, render, validate};
