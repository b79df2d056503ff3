use crate::models::{Record, Scalar};
use crate::widget::{Rendered, Widget};
use anyhow::{Result, bail};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{cell}"),
        _ => cell,
    }
}

/// Save a table-family widget as CSV: display labels as header, raw cell values below.
pub fn save_table_csv<P: AsRef<Path>>(widget: &Widget, path: P) -> Result<()> {
    let Widget::Table {
        columns, records, ..
    } = widget
    else {
        bail!("CSV export needs a table or leaderboard widget, got {}", widget.kind());
    };
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(columns.iter().map(|c| sanitize_cell(c.display_label())))?;
    for rec in records {
        wtr.write_record(columns.iter().map(|c| cell_text(rec, &c.key)))?;
    }
    wtr.flush()?;
    Ok(())
}

fn cell_text(rec: &Record, key: &str) -> String {
    match rec.get(key) {
        Some(n @ Scalar::Number(_)) => n.to_string(),
        Some(other) => sanitize_cell(other.to_string()),
        None => String::new(),
    }
}

/// Save rendered widgets as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rendered: &[Rendered], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rendered)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
