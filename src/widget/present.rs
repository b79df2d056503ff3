//! Renderer-family presentation: tooltips, table bodies, card values, and a plain
//! text rendering of a whole widget for terminals and logs.

use super::types::{CardValue, NormalizedRow, RenderOutcome, Rendered, Slice, TableStyle, Widget};
use crate::format::Formatter;
use crate::models::{Column, Record};
use std::fmt::Write as _;

/// Header line (the category) followed by `series: value` per series.
pub fn tooltip_lines(row: &NormalizedRow, fmt: &Formatter) -> Vec<String> {
    std::iter::once(row.name.clone())
        .chain(
            row.values()
                .iter()
                .map(|(series, v)| format!("{series}: {}", fmt.format_number(*v))),
        )
        .collect()
}

pub fn slice_tooltip(slice: &Slice, fmt: &Formatter) -> String {
    format!("{}: {}", slice.name, fmt.format_number(slice.value))
}

impl CardValue {
    pub fn display_value(&self, fmt: &Formatter) -> String {
        fmt.format_scalar(&self.value)
    }
}

/// A table laid out for display: ordered headers and formatted body cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub body: Vec<Vec<String>>,
    /// Column drawn with ranking emphasis, if any.
    pub emphasized: Option<usize>,
}

/// Lay out columns and records for `style`.
///
/// `Ranked` moves a `rank` column to the front, or prepends `#1..#n` when the
/// records carry no rank of their own.
pub fn table_view(
    style: TableStyle,
    columns: &[Column],
    records: &[Record],
    fmt: &Formatter,
) -> TableView {
    let mut ordered: Vec<&Column> = columns.iter().collect();
    let mut synthetic_rank = false;
    if style == TableStyle::Ranked {
        match ordered.iter().position(|c| c.key == "rank") {
            Some(pos) => {
                let rank = ordered.remove(pos);
                ordered.insert(0, rank);
            }
            None => synthetic_rank = true,
        }
    }

    let mut headers: Vec<String> = Vec::with_capacity(ordered.len() + 1);
    if synthetic_rank {
        headers.push("Rank".to_string());
    }
    headers.extend(ordered.iter().map(|c| c.display_label()));

    let body = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let mut cells = Vec::with_capacity(headers.len());
            if synthetic_rank {
                cells.push(format!("#{}", i + 1));
            }
            cells.extend(
                ordered
                    .iter()
                    .map(|c| rec.get(&c.key).map(|v| fmt.format_scalar(v)).unwrap_or_default()),
            );
            cells
        })
        .collect();

    TableView {
        headers,
        body,
        emphasized: (style == TableStyle::Ranked).then_some(0),
    }
}

/// Plain-text rendering: title, description, body, and suggestions.
pub fn to_text(rendered: &Rendered, fmt: &Formatter) -> String {
    let mut out = String::new();
    if !rendered.title.is_empty() {
        let _ = writeln!(out, "[{}] {}", rendered.icon, rendered.title);
    }
    if let Some(desc) = rendered.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{desc}");
    }
    match &rendered.outcome {
        RenderOutcome::Unrenderable { reason } => {
            let _ = writeln!(out, "{reason}");
        }
        RenderOutcome::Renderable { widget } => write_widget(&mut out, widget, fmt),
    }
    if !rendered.suggestions.is_empty() {
        let _ = writeln!(out, "Suggested next steps:");
        for s in &rendered.suggestions {
            let _ = writeln!(out, "  -> {s}");
        }
    }
    out
}

fn write_widget(out: &mut String, widget: &Widget, fmt: &Formatter) {
    match widget {
        Widget::Bar { rows, .. } if rows.is_empty() => {
            let _ = writeln!(out, "(no rows)");
        }
        Widget::Bar { rows, .. } => {
            for row in rows {
                let cells: Vec<String> = row
                    .values()
                    .iter()
                    .map(|(s, v)| format!("{s}={}", fmt.format_number(*v)))
                    .collect();
                let _ = writeln!(out, "  {}: {}", row.name, cells.join("  "));
            }
        }
        Widget::Pie { slices } if slices.is_empty() => {
            let _ = writeln!(out, "(no slices)");
        }
        Widget::Pie { slices } => {
            let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
            for slice in slices {
                let share = if total > 0.0 {
                    slice.value.max(0.0) / total * 100.0
                } else {
                    0.0
                };
                let _ = writeln!(
                    out,
                    "  {} ({}%)",
                    slice_tooltip(slice, fmt),
                    fmt.format_number((share * 10.0).round() / 10.0)
                );
            }
        }
        Widget::Table {
            style,
            columns,
            records,
        } => write_table(out, &table_view(*style, columns, records, fmt)),
        Widget::Card(card) => {
            let _ = writeln!(out, "  {}", card.label);
            let _ = writeln!(out, "  {}", card.display_value(fmt));
        }
    }
}

fn write_table(out: &mut String, view: &TableView) {
    let mut widths: Vec<usize> = view.headers.iter().map(|h| h.chars().count()).collect();
    for row in &view.body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}", w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let _ = writeln!(out, "  {}", line(&view.headers).trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", rule.join("-+-"));
    for row in &view.body {
        let _ = writeln!(out, "  {}", line(row).trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;

    #[test]
    fn tooltip_formats_series_values() {
        let mut row = NormalizedRow::new("Q1");
        row.set("revenue", 1_234_567.0);
        row.set("cost", 42.0);
        let fmt = Formatter::default();
        assert_eq!(
            tooltip_lines(&row, &fmt),
            vec!["Q1", "revenue: 1,234,567", "cost: 42"]
        );
    }

    #[test]
    fn ranked_table_moves_rank_first() {
        let cols = vec![Column::new("name", "Name"), Column::new("rank", "Rank")];
        let recs = vec![Record::new().with("name", "Ada").with("rank", "#1")];
        let view = table_view(TableStyle::Ranked, &cols, &recs, &Formatter::default());
        assert_eq!(view.headers, vec!["Rank", "Name"]);
        assert_eq!(view.body, vec![vec!["#1".to_string(), "Ada".to_string()]]);
        assert_eq!(view.emphasized, Some(0));
    }

    #[test]
    fn ranked_table_without_rank_column_numbers_rows() {
        let cols = vec![Column::new("score", "Score")];
        let recs = vec![
            Record::new().with("score", 9000.0),
            Record::new().with("score", 12.0),
        ];
        let view = table_view(TableStyle::Ranked, &cols, &recs, &Formatter::default());
        assert_eq!(view.headers, vec!["Rank", "Score"]);
        assert_eq!(view.body[0], vec!["#1", "9,000"]);
        assert_eq!(view.body[1], vec!["#2", "12"]);
    }

    #[test]
    fn plain_table_keeps_column_order_and_blanks_missing_cells() {
        let cols = vec![Column::new("a", "A"), Column::new("b", "B")];
        let recs = vec![Record::new().with("b", Scalar::Text("x".into()))];
        let view = table_view(TableStyle::Plain, &cols, &recs, &Formatter::default());
        assert_eq!(view.body[0], vec!["", "x"]);
        assert_eq!(view.emphasized, None);
    }

    #[test]
    fn card_value_is_localized() {
        let card = CardValue {
            label: "Revenue".into(),
            value: Scalar::Number(1_234_567.0),
        };
        assert_eq!(card.display_value(&Formatter::new("de")), "1.234.567");
    }
}
