//! Terminal tables

use crate::workbook::Table;
use lcr_common::{ComponentClass, MatchRecord, ReferenceRow};
use tabled::{builder::Builder, settings::Style};

/// Search results, numbered for `--pick`
pub fn matches_table(matches: &[MatchRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Material", "Long Description", "File"]);

    for (i, m) in matches.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            m.material.clone(),
            m.description.clone(),
            m.source_file.clone(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Any workbook table, header first
pub fn workbook_table(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().map(String::as_str));
    for row in 0..table.len() {
        builder.push_record((0..table.headers.len()).map(|col| table.cell(row, col)));
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Reference component table with the tolerance window of each row
pub fn reference_view(rows: &[ReferenceRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Component", "Value", "Tolerance", "Min", "Max"]);

    for row in rows {
        let (min, max) = match row.window() {
            Ok((window, unit)) => (
                format!("{:.2}{}", window.min, unit),
                format!("{:.2}{}", window.max, unit),
            ),
            Err(_) => ("-".to_string(), "-".to_string()),
        };
        builder.push_record([
            row.component.clone(),
            row.value.clone(),
            row.tolerance.clone(),
            min,
            max,
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Units per class, in display order
pub fn units_view(classes: &[ComponentClass]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Component", "Units"]);
    for class in classes {
        builder.push_record([class.name().to_string(), class.units().join(", ")]);
    }
    builder.build().with(Style::rounded()).to_string()
}
