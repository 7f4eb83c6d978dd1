use paddock_tools::export::passthrough::ensure_name_common;
use paddock_tools::export::{
    attribute_dictionary, passthrough_records, rules_export, season_rows, team_records,
};
use paddock_tools::model::SheetTable;
use serde_json::{Value, json};

#[test]
fn passthrough_keeps_every_row() {
    let table = SheetTable::from_rows(
        "staff_core",
        &["staff_id", "name", "role"],
        vec![
            vec![json!("S1"), json!("Patrick Head")],
            vec![json!("S2"), json!("Gordon Murray"), json!("designer")],
            vec![json!("S3"), Value::Null, Value::Null],
        ],
    );

    let records = passthrough_records(table);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["role"], Value::Null);
    assert!(records.iter().all(|record| record.len() == 3));
}

#[test]
fn name_common_follows_the_fallback_chain() {
    let mut official = SheetTable::from_rows(
        "teams_core",
        &["team_id", "team_name", "name_official"],
        vec![vec![json!("MCL"), json!("McLaren"), json!("Marlboro Team McLaren")]],
    );
    assert_eq!(ensure_name_common(&mut official), Some("name_official"));
    assert_eq!(official.rows[0]["name_common"], json!("Marlboro Team McLaren"));

    let mut bare = SheetTable::from_rows("teams_core", &["team_id"], vec![vec![json!("ATS")]]);
    assert_eq!(ensure_name_common(&mut bare), Some("team_id"));

    let mut nothing = SheetTable::from_rows("teams_core", &["country"], vec![vec![json!("GB")]]);
    assert_eq!(ensure_name_common(&mut nothing), None);
    assert!(!nothing.has_column("name_common"));
}

#[test]
fn existing_name_common_is_untouched() {
    let table = SheetTable::from_rows(
        "teams_core",
        &["team_id", "name_common", "name"],
        vec![vec![json!("LOTUS"), json!("Lotus"), json!("Team Essex Lotus")]],
    );

    let records = team_records(table);
    assert_eq!(records[0]["name_common"], json!("Lotus"));
}

#[test]
fn season_filter_keeps_only_the_target_season() {
    let table = SheetTable::from_rows(
        "calendar",
        &["round", "Season"],
        vec![
            vec![json!(1), json!(1980)],
            vec![json!(2), json!(1979)],
            vec![json!(3), Value::Null],
            vec![json!(4), json!(1980)],
        ],
    );

    let rows = season_rows(table, 1980);

    assert_eq!(rows.season_column, Some("Season"));
    assert_eq!(rows.records.len(), 2);
    assert!(rows.records.iter().all(|row| row["Season"] == json!(1980)));
}

#[test]
fn season_filter_ignores_seasons_stored_as_text() {
    let table = SheetTable::from_rows(
        "calendar",
        &["round", "season"],
        vec![
            vec![json!(1), json!(1980)],
            vec![json!(2), json!("1980")],
            vec![json!(3), json!(" 1980 ")],
        ],
    );

    let rows = season_rows(table, 1980);

    assert_eq!(rows.records.len(), 1);
    assert_eq!(rows.records[0]["round"], json!(1));
}

#[test]
fn rules_keep_the_unfiltered_sheet_alongside_the_season() {
    let table = SheetTable::from_rows(
        "rules",
        &["year", "min_weight"],
        vec![vec![json!(1979), json!(575)], vec![json!(1980), json!(585)]],
    );

    let rules = rules_export(table, 1980);

    assert_eq!(rules.all.len(), 2);
    let season = rules.season.expect("season rules");
    assert_eq!(season.len(), 1);
    assert_eq!(season[0]["min_weight"], json!(585));

    let undated = SheetTable::from_rows("rules", &["min_weight"], vec![vec![json!(585)]]);
    let rules = rules_export(undated, 1980);
    assert!(rules.season.is_none());
    assert_eq!(rules.all.len(), 1);
}

#[test]
fn labelled_dictionary_keeps_the_last_label_for_a_key() {
    let table = SheetTable::from_rows(
        "core_driver_attributes",
        &["key", "label"],
        vec![
            vec![json!("speed"), json!("Speed Rating")],
            vec![json!("speed"), json!("Top Speed")],
        ],
    );

    assert_eq!(
        Value::Object(attribute_dictionary(&table)),
        json!({"speed": "Top Speed"})
    );
}

#[test]
fn labelled_dictionary_renders_cells_as_text() {
    let table = SheetTable::from_rows(
        "core_staff_attributes",
        &["key", "label", "group"],
        vec![
            vec![json!(1), json!(2.5), json!("x")],
            vec![Value::Null, json!("orphan"), json!("x")],
            vec![json!("morale"), Value::Null, json!("y")],
        ],
    );

    assert_eq!(
        Value::Object(attribute_dictionary(&table)),
        json!({"1": "2.5", "morale": ""})
    );
}

#[test]
fn unlabelled_dictionary_is_keyed_by_row_index() {
    let table = SheetTable::from_rows(
        "core_staff_attributes",
        &["key", "description"],
        vec![
            vec![json!("design"), json!("Chassis design")],
            vec![json!("pit"), Value::Null],
        ],
    );

    assert_eq!(
        Value::Object(attribute_dictionary(&table)),
        json!({
            "0": {"key": "design", "description": "Chassis design"},
            "1": {"key": "pit", "description": null}
        })
    );
}
