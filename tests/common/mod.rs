#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

pub enum Cell {
    Text(&'static str),
    Number(f64),
    /// A date cell (year, month, day) stored with a `yyyy-mm-dd` number format.
    Date(u16, u8, u8),
    Empty,
}

pub fn text(value: &'static str) -> Cell {
    Cell::Text(value)
}

pub fn num(value: f64) -> Cell {
    Cell::Number(value)
}

pub fn date(year: u16, month: u8, day: u8) -> Cell {
    Cell::Date(year, month, day)
}

pub struct Sheet {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &'static str, columns: &'static [&'static str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name,
            columns,
            rows,
        }
    }
}

/// Writes a workbook with one worksheet per entry, header in the first row.
pub fn write_fixture(path: &Path, sheets: &[Sheet]) {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).expect("sheet name");
        for (col_idx, header) in sheet.columns.iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, *header)
                .expect("header written");
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = col_idx as u16;
                match cell {
                    Cell::Text(value) => {
                        worksheet
                            .write_string(row_num, col_num, *value)
                            .expect("string cell written");
                    }
                    Cell::Number(value) => {
                        worksheet
                            .write_number(row_num, col_num, *value)
                            .expect("number cell written");
                    }
                    Cell::Date(year, month, day) => {
                        let datetime =
                            ExcelDateTime::from_ymd(*year, *month, *day).expect("valid date");
                        worksheet
                            .write_datetime_with_format(row_num, col_num, &datetime, &date_format)
                            .expect("date cell written");
                    }
                    Cell::Empty => {}
                }
            }
        }
    }
    workbook.save(path).expect("workbook saved");
}

/// Workbook covering every recognised sheet.
pub fn championship_sheets() -> Vec<Sheet> {
    vec![
        Sheet::new(
            "teams_core",
            &["team_id", "name", "country"],
            vec![
                vec![text("LOTUS"), text("Team Lotus"), text("GB")],
                vec![text("FERRARI"), text("Scuderia Ferrari"), text("IT")],
            ],
        ),
        Sheet::new(
            "staff_core",
            &["staff_id", "name", "role"],
            vec![
                vec![text("S1"), text("Colin Chapman"), text("principal")],
                vec![text("S2"), text("Mauro Forghieri"), Cell::Empty],
            ],
        ),
        Sheet::new(
            "core_tracks",
            &["track_id", "name"],
            vec![vec![text("INTERLAGOS"), text("Autódromo José Carlos Pace")]],
        ),
        Sheet::new(
            "calendar",
            &["round", "season", "track_id"],
            vec![
                vec![num(1.0), num(1980.0), text("BUENOS_AIRES")],
                vec![num(2.0), num(1980.0), text("INTERLAGOS")],
                vec![num(1.0), num(1981.0), text("LONG_BEACH")],
            ],
        ),
        Sheet::new(
            "rules",
            &["season", "points_system"],
            vec![
                vec![num(1979.0), text("9-6-4-3-2-1")],
                vec![num(1980.0), text("9-6-4-3-2-1 best 5")],
            ],
        ),
        Sheet::new(
            "core_driver_attributes",
            &["key", "label"],
            vec![
                vec![text("speed"), text("Speed Rating")],
                vec![text("speed"), text("Top Speed")],
                vec![text("wet"), text("Wet Weather")],
            ],
        ),
        Sheet::new(
            "core_staff_attributes",
            &["attribute", "weight"],
            vec![
                vec![text("design"), num(0.5)],
                vec![text("leadership"), Cell::Empty],
            ],
        ),
        Sheet::new(
            "driver_core",
            &["driver_id", "first_name", "last_name"],
            vec![
                vec![text("D1"), text("Jim"), text("Clark")],
                vec![text(" D2 "), text("Niki"), text("Lauda")],
            ],
        ),
        Sheet::new(
            "driver_ratings",
            &["driver_id", "season", "pace", "racecraft"],
            vec![
                vec![text("D2"), num(1979.0), num(80.0), num(75.0)],
                vec![text("D2"), num(1980.0), num(90.0), Cell::Empty],
                vec![Cell::Empty, num(1980.0), num(50.0), num(50.0)],
            ],
        ),
        Sheet::new(
            "contracts",
            &["driver_id", "team_id", "season"],
            vec![
                vec![text("D1"), text("LOTUS"), num(1980.0)],
                vec![text("D2"), text("FERRARI"), num(1979.0)],
            ],
        ),
    ]
}
