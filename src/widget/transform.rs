//! Per-family reshaping of the raw `{labels, datasets, columns, records}` block.
//!
//! Pure functions. A missing or ill-typed field comes back as
//! `RenderError::MalformedFamilyData` naming the field; empty-but-present input
//! comes back as an empty result.

use super::types::{CardValue, Kind, NormalizedRow};
use crate::error::RenderError;
use crate::models::{Column, RawDataset, RawWidgetData, Record, Scalar, humanize_key};

fn labels<'a>(kind: Kind, data: &'a RawWidgetData) -> Result<&'a [Scalar], RenderError> {
    data.labels
        .as_deref()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), "labels"))
}

fn value_at(kind: Kind, ds: &RawDataset, d: usize, i: usize) -> Result<f64, RenderError> {
    let values = ds
        .values
        .as_deref()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), format!("datasets[{d}].values")))?;
    values
        .get(i)
        .and_then(Scalar::to_number)
        .ok_or_else(|| RenderError::malformed(kind.as_str(), format!("datasets[{d}].values[{i}]")))
}

/// Series name of dataset `d`.
pub fn series_name(kind: Kind, ds: &RawDataset, d: usize) -> Result<&str, RenderError> {
    ds.series_name
        .as_deref()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), format!("datasets[{d}].seriesName")))
}

/// One row per label; each row carries every dataset's value at that index.
///
/// Values beyond `labels.len()` are ignored; a dataset shorter than `labels`
/// is malformed.
pub fn bar_rows(kind: Kind, data: &RawWidgetData) -> Result<Vec<NormalizedRow>, RenderError> {
    let labels = labels(kind, data)?;
    let datasets = data
        .datasets
        .as_deref()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), "datasets"))?;

    let mut rows = Vec::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        let mut row = NormalizedRow::new(label.to_string());
        for (d, ds) in datasets.iter().enumerate() {
            let series = series_name(kind, ds, d)?;
            row.set(series, value_at(kind, ds, d, i)?);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// `(name, value)` per label, read from the first dataset only.
pub fn pie_pairs(data: &RawWidgetData) -> Result<Vec<(String, f64)>, RenderError> {
    let kind = Kind::Pie;
    let labels = labels(kind, data)?;
    let datasets = data
        .datasets
        .as_deref()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), "datasets"))?;
    if labels.is_empty() {
        return Ok(Vec::new());
    }
    let first = datasets
        .first()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), "datasets[0]"))?;

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| Ok::<_, RenderError>((label.to_string(), value_at(kind, first, 0, i)?)))
        .collect()
}

/// Columns and records, unchanged. Without `columns`, they are derived from the
/// first record's keys; a column without a key is malformed.
pub fn table(kind: Kind, data: &RawWidgetData) -> Result<(Vec<Column>, Vec<Record>), RenderError> {
    let records = data
        .records
        .as_ref()
        .ok_or_else(|| RenderError::malformed(kind.as_str(), "records"))?;
    let columns = match (&data.columns, records.first()) {
        (Some(cols), _) => cols
            .iter()
            .enumerate()
            .map(|(i, c)| {
                c.to_column().ok_or_else(|| {
                    RenderError::malformed(kind.as_str(), format!("columns[{i}].key"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        (None, Some(first)) => first
            .keys()
            .map(|k| Column::new(k, humanize_key(k)))
            .collect(),
        (None, None) => return Err(RenderError::malformed(kind.as_str(), "columns")),
    };
    Ok((columns, records.clone()))
}

/// The headline `label` / `data` pair of the first record.
pub fn card(data: &RawWidgetData) -> Result<CardValue, RenderError> {
    let kind = Kind::Card.as_str();
    let first = data
        .records
        .as_ref()
        .ok_or_else(|| RenderError::malformed(kind, "records"))?
        .first()
        .ok_or_else(|| RenderError::malformed(kind, "records[0]"))?;
    let label = first
        .get("label")
        .filter(|v| !v.is_null())
        .ok_or_else(|| RenderError::malformed(kind, "records[0].label"))?;
    let value = first
        .get("data")
        .filter(|v| !v.is_null())
        .ok_or_else(|| RenderError::malformed(kind, "records[0].data"))?;
    Ok(CardValue {
        label: label.to_string(),
        value: value.clone(),
    })
}
