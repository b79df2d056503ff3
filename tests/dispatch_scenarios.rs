use wdgt_rs::widget::{BarStyle, Slice, TableStyle};
use wdgt_rs::{Palette, RenderOutcome, ResponsePayload, Widget, render};

fn payload(json: &str) -> ResponsePayload {
    serde_json::from_str(json).expect("payload json")
}

fn outcome(json: &str) -> RenderOutcome {
    render(&payload(json), &Palette::default()).outcome
}

#[test]
fn pie_two_slices_in_label_order() {
    let out = outcome(
        r#"{"kind":"Pie","data":{"labels":["A","B"],
            "datasets":[{"seriesName":"x","values":[3,7]}]}}"#,
    );
    let Some(Widget::Pie { slices }) = out.widget() else {
        panic!("expected pie, got {out:?}");
    };
    assert_eq!(
        slices,
        &vec![
            Slice {
                name: "A".into(),
                value: 3.0,
                color: "#05abf3".into(),
            },
            Slice {
                name: "B".into(),
                value: 7.0,
                color: "#f3b4b7".into(),
            },
        ]
    );
}

#[test]
fn card_with_no_records_cites_first_record() {
    let out = outcome(r#"{"kind":"Card","data":{"records":[]}}"#);
    let reason = out.reason().expect("unrenderable");
    assert!(reason.contains("records[0]"), "{reason}");
}

#[test]
fn unknown_kind_is_reported_verbatim() {
    let out = outcome(r#"{"kind":"Funnel","data":{"labels":["A"]}}"#);
    assert_eq!(
        out,
        RenderOutcome::Unrenderable {
            reason: "Unsupported chart type: Funnel".into()
        }
    );
}

#[test]
fn missing_data_never_reads_sub_fields() {
    for json in [
        r#"{"kind":"GroupedBar"}"#,
        r#"{"kind":"Table","data":null}"#,
        r#"{}"#,
    ] {
        assert_eq!(outcome(json).reason(), Some("No chart data available."), "{json}");
    }
}

#[test]
fn bar_family_rows_match_labels_and_carry_every_series() {
    for kind in ["GroupedBar", "DivergingBar", "StackedBar"] {
        let json = format!(
            r#"{{"kind":"{kind}","data":{{"labels":["Jan","Feb","Mar","Apr"],
                "datasets":[{{"seriesName":"2023","values":[1,-2,3,4]}},
                            {{"seriesName":"2024","values":[5,6,-7,8]}}]}}}}"#
        );
        let out = outcome(&json);
        let Some(Widget::Bar { rows, series, style }) = out.widget() else {
            panic!("expected bar for {kind}, got {out:?}");
        };
        assert_eq!(rows.len(), 4);
        for row in rows {
            assert!(row.get("2023").is_some() && row.get("2024").is_some());
        }
        assert_eq!(rows[2].name, "Mar");
        assert_eq!(rows[2].get("2024"), Some(-7.0));
        assert_eq!(series.len(), 2);
        assert_eq!(style.is_horizontal(), kind == "DivergingBar");
    }
}

#[test]
fn stacked_kind_keeps_the_same_rows_as_grouped() {
    let data = r#""data":{"labels":["a","b"],"datasets":[{"seriesName":"s","values":[1,2]}]}"#;
    let grouped = outcome(&format!(r#"{{"kind":"GroupedBar",{data}}}"#));
    let stacked = outcome(&format!(r#"{{"kind":"StackedBar",{data}}}"#));
    match (grouped.widget(), stacked.widget()) {
        (
            Some(Widget::Bar { rows: g, style: BarStyle::Grouped, .. }),
            Some(Widget::Bar { rows: s, style: BarStyle::Stacked, .. }),
        ) => assert_eq!(g, s),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn empty_labels_render_an_empty_chart() {
    let out = outcome(r#"{"kind":"GroupedBar","data":{"labels":[],"datasets":[]}}"#);
    let widget = out.widget().expect("renderable");
    assert!(widget.is_empty());
}

#[test]
fn missing_labels_are_malformed_not_empty() {
    let out = outcome(r#"{"kind":"StackedBar","data":{"datasets":[]}}"#);
    assert_eq!(
        out.reason(),
        Some("Malformed StackedBar data: missing or invalid labels")
    );
}

#[test]
fn short_value_sequence_names_the_gap() {
    let out = outcome(
        r#"{"kind":"GroupedBar","data":{"labels":["a","b","c"],
            "datasets":[{"seriesName":"s","values":[1,2,3]},{"seriesName":"t","values":[1]}]}}"#,
    );
    assert!(out.reason().unwrap().contains("datasets[1].values[1]"));
}

#[test]
fn leaderboard_and_table_share_one_shape() {
    let data = r#""data":{"columns":[{"key":"name","label":"Name"}],"records":[{"name":"Ada"}]}"#;
    let table = outcome(&format!(r#"{{"kind":"Table",{data}}}"#));
    let board = outcome(&format!(r#"{{"kind":"Leaderboard",{data}}}"#));
    match (table.widget(), board.widget()) {
        (
            Some(Widget::Table { style: TableStyle::Plain, columns: c1, records: r1 }),
            Some(Widget::Table { style: TableStyle::Ranked, columns: c2, records: r2 }),
        ) => {
            assert_eq!(c1, c2);
            assert_eq!(r1, r2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn alternate_palette_is_used() {
    let palette = Palette::parse("#000000;#ffffff").unwrap();
    let p = payload(
        r#"{"kind":"Pie","data":{"labels":["a","b","c"],
            "datasets":[{"seriesName":"x","values":[1,1,1]}]}}"#,
    );
    let out = render(&p, &palette).outcome;
    let Some(Widget::Pie { slices }) = out.widget() else {
        panic!("expected pie");
    };
    let colors: Vec<&str> = slices.iter().map(|s| s.color.as_str()).collect();
    assert_eq!(colors, vec!["#000000", "#ffffff", "#000000"]);
}

#[test]
fn pie_ignores_a_single_series_color() {
    let out = outcome(
        r##"{"kind":"Pie","data":{"labels":["a","b"],
            "datasets":[{"seriesName":"x","values":[1,2],"colorHint":"#123456"}]}}"##,
    );
    let Some(Widget::Pie { slices }) = out.widget() else {
        panic!("expected pie, got {out:?}");
    };
    let colors: Vec<&str> = slices.iter().map(|s| s.color.as_str()).collect();
    assert_eq!(colors, vec!["#05abf3", "#f3b4b7"]);
}

#[test]
fn table_and_leaderboard_without_records() {
    for kind in ["Table", "Leaderboard"] {
        let out = outcome(&format!(
            r#"{{"kind":"{kind}","data":{{"columns":[{{"key":"name"}}]}}}}"#
        ));
        assert_eq!(
            out.reason(),
            Some(format!("Malformed {kind} data: missing or invalid records").as_str())
        );
    }
}

#[test]
fn null_value_is_malformed_at_its_index() {
    let out = outcome(
        r#"{"kind":"GroupedBar","data":{"labels":["a","b"],
            "datasets":[{"seriesName":"s","values":[1,3]},{"seriesName":"t","values":[null,2]}]}}"#,
    );
    assert_eq!(
        out.reason(),
        Some("Malformed GroupedBar data: missing or invalid datasets[1].values[0]")
    );
}

#[test]
fn rendering_twice_is_identical() {
    let p = payload(
        r#"{"kind":"GroupedBar","title":"T","data":{"labels":["a"],
            "datasets":[{"seriesName":"s","values":[1]}]},"nextSuggestions":["Why?"]}"#,
    );
    assert_eq!(render(&p, &Palette::default()), render(&p, &Palette::default()));
}
