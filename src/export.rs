use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

use crate::data::{IncomeGroup, SCENARIO_LABELS, WARMING_LABELS};
use crate::growth::GrowthRateTable;

/// Excel's hard limit on worksheet name length.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Turn a table heading into a legal worksheet name: dashes become spaces,
/// characters Excel forbids are dropped, and the result is cut to 31 chars.
pub fn sheet_name(heading: &str) -> String {
    heading
        .chars()
        .map(|c| if c == '-' { ' ' } else { c })
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// Write one sheet per group: warming labels across row 1, scenario labels
/// down column A, growth rates in %/yr in the body. Replaces `path`.
#[tracing::instrument(level = "info", skip(rates, groups, path), fields(path = %path.as_ref().display()))]
pub fn write_growth_workbook<P: AsRef<Path>>(
    rates: &GrowthRateTable,
    groups: &[IncomeGroup],
    path: P,
) -> Result<()> {
    let header = Format::new().set_bold();
    let body = Format::new().set_num_format("0.000");

    let mut workbook = Workbook::new();
    for &group in groups {
        let name = sheet_name(group.heading());
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&name)
            .with_context(|| format!("naming sheet {:?}", name))?;
        write_group_sheet(sheet, rates, group, &header, &body)
            .with_context(|| format!("writing sheet {:?}", name))?;
        debug!(sheet = %name, "sheet written");
    }

    workbook
        .save(path.as_ref())
        .with_context(|| format!("saving workbook {:?}", path.as_ref()))?;
    Ok(())
}

fn write_group_sheet(
    sheet: &mut Worksheet,
    rates: &GrowthRateTable,
    group: IncomeGroup,
    header: &Format,
    body: &Format,
) -> Result<()> {
    sheet.set_column_width(0, 12)?;
    for (col, label) in WARMING_LABELS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16 + 1, *label, header)?;
        sheet.set_column_width(col as u16 + 1, 11)?;
    }

    let percent = rates.percent(group);
    for (row, label) in SCENARIO_LABELS.iter().enumerate() {
        let r = row as u32 + 1;
        sheet.write_string_with_format(r, 0, *label, header)?;
        for (col, value) in percent.row(row).iter().enumerate() {
            sheet.write_number_with_format(r, col as u16 + 1, *value, body)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RawTable, TABLE_SHAPE};
    use crate::growth::compute_growth_rates;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use ndarray::Array3;
    use tempfile::tempdir;

    #[test]
    fn sheet_names_are_cleaned_and_truncated() {
        assert_eq!(sheet_name("Low-income group"), "Low income group");
        assert_eq!(sheet_name("All-country average"), "All country average");
        let long = "An extremely-long income group heading: with [odd] chars";
        let name = sheet_name(long);
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(!name.contains(['[', ':', '-']));
    }

    #[test]
    fn workbook_round_trips_percentages() -> Result<()> {
        let raw = RawTable::from_array(Array3::from_shape_fn(TABLE_SHAPE, |(g, r, c)| {
            100.0 + g as f64 * 10.0 + r as f64 * 25.0 - c as f64 * 3.0
        }))?;
        let rates = compute_growth_rates(&raw, 80)?;
        let dir = tempdir()?;
        let path = dir.path().join("rates.xlsx");
        write_growth_workbook(&rates, &IncomeGroup::ALL, &path)?;

        let mut book: Xlsx<_> = open_workbook(&path)?;
        assert_eq!(
            book.sheet_names(),
            vec![
                "All country average",
                "High income group",
                "Middle income group",
                "Low income group"
            ]
        );
        let range = book.worksheet_range("Middle income group")?;
        assert_eq!(
            range.get_value((0, 5)),
            Some(&Data::String("8.5 W m-2".into()))
        );
        assert_eq!(range.get_value((6, 0)), Some(&Data::String("SSP5".into())));
        let expected = rates.percent(IncomeGroup::Middle);
        for row in 0..6 {
            for col in 0..5 {
                let got = match range.get_value((row as u32 + 1, col as u32 + 1)) {
                    Some(Data::Float(v)) => *v,
                    Some(Data::Int(v)) => *v as f64,
                    other => panic!("unexpected cell {other:?}"),
                };
                assert!((got - expected[[row, col]]).abs() < 1e-9);
            }
        }
        Ok(())
    }
}
