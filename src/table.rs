// Copyright 2023 Remi Bernotavicius

//! Plain text tables for the terminal.

use crate::error::{Error, Result};
use std::fmt::Write as _;

/// A record that can be shown as one row of a table.
pub trait Tabular {
    const HEADERS: &'static [&'static str];
    const MAX_WIDTHS: &'static [usize];

    fn cells(&self) -> Vec<String>;
}

const ELLIPSIS: &str = "...";

fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.into();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = cell.chars().take(keep).collect();
    out.push_str(&ELLIPSIS[..width.min(ELLIPSIS.len())]);
    out
}

fn border(out: &mut String, widths: &[usize]) {
    out.push('+');
    for w in widths {
        out.push_str(&"-".repeat(w + 2));
        out.push('+');
    }
    out.push('\n');
}

fn row(out: &mut String, cells: impl IntoIterator<Item = String>, widths: &[usize]) {
    out.push('|');
    for (cell, &w) in cells.into_iter().zip(widths) {
        let cell = truncate(&cell, w);
        write!(out, " {cell:<w$} |").ok();
    }
    out.push('\n');
}

/// Lays `rows` out under `headers`. Each column is as wide as its widest cell or header, but no
/// wider than its entry in `max_widths`; longer cells are cut short and end in `...`.
pub fn format_table(
    headers: &[&str],
    rows: &[Vec<String>],
    max_widths: &[usize],
) -> Result<String> {
    if max_widths.len() != headers.len() {
        return Err(Error::validation(format!(
            "{} column widths given for {} columns",
            max_widths.len(),
            headers.len()
        )));
    }
    if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
        return Err(Error::validation(format!(
            "row {i} has {} cells, expected {}",
            r.len(),
            headers.len()
        )));
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let widest = rows
                .iter()
                .map(|r| r[i].chars().count())
                .chain([h.chars().count()])
                .max()
                .unwrap_or(0);
            widest.min(max_widths[i])
        })
        .collect();

    let mut out = String::new();
    border(&mut out, &widths);
    row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    border(&mut out, &widths);
    for r in rows {
        row(&mut out, r.iter().cloned(), &widths);
    }
    border(&mut out, &widths);
    Ok(out)
}

pub fn render<T: Tabular>(records: &[T]) -> Result<String> {
    let rows: Vec<_> = records.iter().map(Tabular::cells).collect();
    format_table(T::HEADERS, &rows, T::MAX_WIDTHS)
}

#[test]
fn widths_and_truncation() {
    let rows = vec![
        vec!["1".into(), "Spaghetti Carbonara".into()],
        vec!["12".into(), "Pho".into()],
    ];
    let table = format_table(&["ID", "Title"], &rows, &[5, 10]).unwrap();
    assert_eq!(
        table,
        "\
+----+------------+
| ID | Title      |
+----+------------+
| 1  | Spaghet... |
| 12 | Pho        |
+----+------------+
"
    );
}

#[test]
fn headers_can_be_cut_too() {
    let table = format_table(&["Difficulty"], &[vec!["Easy".into()]], &[6]).unwrap();
    assert_eq!(
        table,
        "\
+--------+
| Dif... |
+--------+
| Easy   |
+--------+
"
    );
}

#[test]
fn empty_table() {
    let table = format_table(&["Name"], &[], &[20]).unwrap();
    assert_eq!(table, "+------+\n| Name |\n+------+\n+------+\n");
}

#[test]
fn column_count_mismatch() {
    assert!(format_table(&["A", "B"], &[vec!["x".into()]], &[3, 3]).is_err());
    assert!(format_table(&["A", "B"], &[], &[3]).is_err());
}

#[test]
fn render_records() {
    struct Plan(&'static str);

    impl Tabular for Plan {
        const HEADERS: &'static [&'static str] = &["Name"];
        const MAX_WIDTHS: &'static [usize] = &[8];

        fn cells(&self) -> Vec<String> {
            vec![self.0.into()]
        }
    }

    let table = render(&[Plan("Week 1"), Plan("Holidays 2024")]).unwrap();
    assert!(table.contains("| Week 1   |"));
    assert!(table.contains("| Holid... |"));
}
