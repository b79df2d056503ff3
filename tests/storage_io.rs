use std::fs;
use wdgt_rs::{Conversation, Palette, storage};

const TABLE: &str = r#"{"kind":"Table","title":"Accounts",
  "data":{"columns":[{"key":"name","label":"Name"},{"key":"balance","label":"Balance"}],
          "records":[{"name":"Acme","balance":1200},
                     {"name":"=cmd|'/C calc'!A0","balance":-3.5}]}}"#;

#[test]
fn save_table_csv_and_json() {
    let rendered = Conversation::from_json(TABLE).unwrap().render(&Palette::default());
    let widget = rendered[0].outcome.widget().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("accounts.csv");
    storage::save_table_csv(widget, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("Name,Balance\n"));
    assert_eq!(csv_txt.lines().count(), 3);
    // text cells that look like formulas are neutralized, numbers are not
    assert!(csv_txt.contains("'=cmd"));
    assert!(csv_txt.contains(",-3.5"));

    let json_path = dir.path().join("widgets.json");
    storage::save_json(&rendered, &json_path).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["title"], "Accounts");
}

#[test]
fn csv_export_rejects_charts() {
    let rendered = Conversation::from_json(
        r#"{"kind":"Pie","data":{"labels":["a"],"datasets":[{"seriesName":"x","values":[1]}]}}"#,
    )
    .unwrap()
    .render(&Palette::default());
    let dir = tempfile::tempdir().unwrap();
    let widget = rendered[0].outcome.widget().unwrap();
    let err = storage::save_table_csv(widget, dir.path().join("x.csv")).unwrap_err();
    assert!(err.to_string().contains("Pie"));
}
