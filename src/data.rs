use crate::error::DataError;
use crate::layout::Annotation;
use crate::models::{Column, Table};
use crate::viz::RenderedChart;
use anyhow::Result;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Load a table from CSV: the first column holds row labels (dates), every
/// other column is a numeric series named by its header.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table, DataError> {
    let f = File::open(path)?;
    read_csv(f)
}

/// Same as [`load_csv`], from any reader.
pub fn read_csv<R: Read>(rdr: R) -> Result<Table, DataError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(DataError::Empty);
    }
    let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut index = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        index.push(rec.get(0).unwrap_or_default().to_string());
        for (j, name) in names.iter().enumerate() {
            let raw = rec.get(j + 1).unwrap_or_default();
            let v = raw.parse::<f64>().map_err(|_| DataError::Parse {
                row: row + 1,
                column: name.clone(),
                raw: raw.to_string(),
            })?;
            values[j].push(v);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(n, v)| Column::new(n, v))
        .collect();
    Table::new(index, columns)
}

/// Save the labels of a rendered chart as pretty JSON.
pub fn save_labels_json<P: AsRef<Path>>(chart: &RenderedChart, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(chart)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save labels as CSV, one row per label: `group,side,value,color,position`.
/// Line labels use group 0 and side `line`.
pub fn save_labels_csv<P: AsRef<Path>>(chart: &RenderedChart, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["group", "side", "value", "color", "position"])?;
    let mut row = |group: usize, side: &str, a: &Annotation| {
        wtr.write_record([
            group.to_string(),
            side.to_string(),
            a.value.to_string(),
            a.color.to_hex(),
            a.position.to_string(),
        ])
    };
    for a in &chart.line_labels {
        row(0, "line", a)?;
    }
    for (g, labels) in chart.bar_labels.iter().enumerate() {
        for a in &labels.positive {
            row(g, "positive", a)?;
        }
        for a in &labels.negative {
            row(g, "negative", a)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_index_and_columns() {
        let text = "date, Fund , Index\n2024-01-31,1.5,-2\n2024-02-29, 2.25 ,NaN\n";
        let t = read_csv(text.as_bytes()).unwrap();
        assert_eq!(t.index(), ["2024-01-31", "2024-02-29"]);
        assert_eq!(t.column_names(), vec!["Fund", "Index"]);
        assert_eq!(t.columns()[0].values, vec![1.5, 2.25]);
        assert!(t.columns()[1].values[1].is_nan());
    }

    #[test]
    fn empty_cell_is_a_parse_error() {
        let err = read_csv("d,a\nx,\n".as_bytes()).unwrap_err();
        match err {
            DataError::Parse { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(read_csv("d,a\n".as_bytes()), Err(DataError::Empty)));
        assert!(matches!(read_csv("d\n1\n".as_bytes()), Err(DataError::Empty)));
    }
}
