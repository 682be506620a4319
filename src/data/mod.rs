// src/data/mod.rs
pub mod labels;
pub mod raw_table;

use csv::{ReaderBuilder, Trim};
use ndarray::Array3;
use std::{
    fmt::Write as _,
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};
use tracing::{debug, trace};

use crate::error::{GrowthError, Result};
pub use labels::{scenario_index, IncomeGroup, SCENARIO_LABELS, WARMING_LABELS};
pub use raw_table::{RawTable, TABLE_SHAPE};

/// Open `path` and parse it with [`parse_figure_data`].
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_figure_data<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GrowthError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => GrowthError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let table = parse_figure_data(BufReader::new(file))?;
    debug!("loaded {:?} table", TABLE_SHAPE);
    Ok(table)
}

/// Parse the tab-separated figure layout:
/// - a heading record (e.g. "Low-income group") selects the table that follows;
/// - a column header record (blank first field, or "No warming ...") is skipped;
/// - a data record is a scenario label followed by five values.
///
/// Every table and every row must appear exactly once.
pub fn parse_figure_data<R: Read>(reader: R) -> Result<RawTable> {
    let (_, n_rows, n_cols) = TABLE_SHAPE;
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut values = Array3::<f64>::zeros(TABLE_SHAPE);
    let mut seen_tables = [false; 4];
    let mut seen_rows = [[false; 6]; 4];
    let mut current: Option<IncomeGroup> = None;

    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            GrowthError::parse(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let first = record.get(0).unwrap_or("");

        if let Some(group) = IncomeGroup::from_heading(first) {
            if seen_tables[group.index()] {
                return Err(GrowthError::parse(
                    line,
                    format!("table {:?} appears twice", group.heading()),
                ));
            }
            seen_tables[group.index()] = true;
            trace!(line, group = %group, "table heading");
            current = Some(group);
            continue;
        }

        // column header row
        if first.is_empty() || first.starts_with(WARMING_LABELS[0]) {
            continue;
        }

        let row = scenario_index(first).ok_or_else(|| {
            GrowthError::parse(line, format!("unrecognised row label {:?}", first))
        })?;
        let group = current
            .ok_or_else(|| GrowthError::parse(line, "data row before any table heading"))?;
        if seen_rows[group.index()][row] {
            return Err(GrowthError::parse(
                line,
                format!("row {:?} repeated in {:?}", first, group.heading()),
            ));
        }

        let mut fields: Vec<&str> = record.iter().skip(1).collect();
        while fields.last() == Some(&"") {
            fields.pop();
        }
        if fields.len() != n_cols {
            return Err(GrowthError::parse(
                line,
                format!("expected {} values, found {}", n_cols, fields.len()),
            ));
        }
        for (col, field) in fields.iter().enumerate() {
            let v: f64 = field
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| GrowthError::parse(line, format!("not a number: {:?}", field)))?;
            values[[group.index(), row, col]] = v;
        }
        seen_rows[group.index()][row] = true;
    }

    let mut missing = Vec::new();
    for group in IncomeGroup::ALL {
        if !seen_tables[group.index()] {
            missing.push(format!("table {:?}", group.heading()));
            continue;
        }
        for row in 0..n_rows {
            if !seen_rows[group.index()][row] {
                missing.push(format!("{:?} / {:?}", group.heading(), SCENARIO_LABELS[row]));
            }
        }
    }
    if !missing.is_empty() {
        return Err(GrowthError::Shape(format!("missing {}", missing.join(", "))));
    }

    RawTable::from_array(values)
}

/// Render a table back into the layout [`parse_figure_data`] reads.
pub fn format_figure_data(table: &RawTable) -> String {
    let mut out = String::new();
    for group in IncomeGroup::ALL {
        let _ = writeln!(out, "{}", group.heading());
        let _ = writeln!(out, "\t{}", WARMING_LABELS.join("\t"));
        for (row, label) in SCENARIO_LABELS.iter().enumerate() {
            out.push_str(label);
            for v in table.group(group).row(row) {
                let _ = write!(out, "\t{}", v);
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,warming_growth::data=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn numbered_table() -> RawTable {
        let arr = Array3::from_shape_fn(TABLE_SHAPE, |(g, r, c)| {
            1000.0 * (g + 1) as f64 + 10.0 * r as f64 + c as f64 + 0.5
        });
        RawTable::from_array(arr).unwrap()
    }

    #[test]
    fn test_load_figure_data_example() -> anyhow::Result<()> {
        init_test_logging();
        let content = "All-country average\n\
\tNo warming\t2.6 W m-2\t4.5 W m-2\t7.0 W m-2\t8.5 W m-2\n\
No growth\t10.8\t10.7\t10.6\t10.4\t10.3\n\
SSP1\t54.1\t52.9\t51.2\t49.0\t47.6\n\
SSP2\t39.4\t38.6\t37.3\t35.6\t34.5\n\
SSP3\t14.2\t13.9\t13.5\t12.9\t12.4\n\
SSP4\t27.0\t26.4\t25.6\t24.5\t23.8\n\
SSP5\t83.6\t81.8\t79.2\t75.8\t73.7\n\
\n";
        let rest = numbered_table();
        let mut text = content.to_string();
        // the other three groups come from a generated table
        let generated = format_figure_data(&rest);
        let skip = generated.find("High-income group").unwrap();
        text.push_str(&generated[skip..]);

        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(text.as_bytes())?;

        let table = load_figure_data(tmp.path())?;
        assert_eq!(table.values()[[0, 0, 0]], 10.8);
        assert_eq!(table.values()[[0, 5, 4]], 73.7);
        assert_eq!(table.values()[[0, 3, 2]], 13.5);
        assert_eq!(table.group(IncomeGroup::Low), rest.group(IncomeGroup::Low));
        Ok(())
    }

    #[test]
    fn formatted_table_parses_back() {
        let table = numbered_table();
        let parsed = parse_figure_data(format_figure_data(&table).as_bytes()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn tables_may_come_in_any_order() {
        let table = numbered_table();
        let text = format_figure_data(&table);
        let blocks: Vec<&str> = text.split("\n\n").filter(|b| !b.is_empty()).collect();
        let reversed: String = blocks.iter().rev().map(|b| format!("{b}\n\n")).collect();
        let parsed = parse_figure_data(reversed.as_bytes()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_figure_data(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, GrowthError::FileNotFound { .. }));
    }

    #[test]
    fn missing_row_is_shape_error() {
        let text: String = format_figure_data(&numbered_table())
            .lines()
            .filter(|l| !l.starts_with("SSP4"))
            .map(|l| format!("{l}\n"))
            .collect();
        let err = parse_figure_data(text.as_bytes()).unwrap_err();
        match err {
            GrowthError::Shape(msg) => assert!(msg.contains("SSP4"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_table_is_shape_error() {
        let text = format_figure_data(&numbered_table());
        let cut = text.find("Low-income group").unwrap();
        let err = parse_figure_data(text[..cut].as_bytes()).unwrap_err();
        assert!(matches!(err, GrowthError::Shape(_)));
    }

    #[test]
    fn bad_number_reports_line() {
        let text = format_figure_data(&numbered_table()).replacen("1010.5", "abc", 1);
        let err = parse_figure_data(text.as_bytes()).unwrap_err();
        match err {
            GrowthError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_row_is_rejected() {
        let text = format_figure_data(&numbered_table()).replacen("\t1014.5", "", 1);
        let err = parse_figure_data(text.as_bytes()).unwrap_err();
        assert!(matches!(err, GrowthError::Parse { .. }));
    }

    #[test]
    fn duplicate_heading_is_rejected() {
        let text = format_figure_data(&numbered_table());
        let doubled = format!("{text}High-income group\n");
        let err = parse_figure_data(doubled.as_bytes()).unwrap_err();
        assert!(matches!(err, GrowthError::Parse { .. }));
    }

    #[test]
    fn data_before_heading_is_rejected() {
        let text = format!("SSP1\t1\t2\t3\t4\t5\n{}", format_figure_data(&numbered_table()));
        let err = parse_figure_data(text.as_bytes()).unwrap_err();
        assert!(matches!(err, GrowthError::Parse { line: 1, .. }));
    }
}
