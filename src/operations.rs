// Copyright 2023 Remi Bernotavicius

//! Writes that span several tables. Each one validates its input first and then does all of its
//! writing inside a single transaction.

use crate::error::{Error, Result};
use std::str::FromStr;

pub mod account;
pub mod feedback;
pub mod meal_plan;
pub mod pantry;
pub mod recipe;

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("{field} must be a number, got {value:?}")))
}

/// Parses a whole number that can't be negative.
fn parse_count(field: &str, value: &str) -> Result<i32> {
    let n: i32 = parse_field(field, value)?;
    if n < 0 {
        return Err(Error::validation(format!("{field} can't be negative")));
    }
    Ok(n)
}

/// Parses a finite amount that can't be negative.
fn parse_amount(field: &str, value: &str) -> Result<f32> {
    let n: f32 = parse_field(field, value)?;
    check_amount(field, n)?;
    Ok(n)
}

fn check_amount(field: &str, n: f32) -> Result<()> {
    if !n.is_finite() || n < 0.0 {
        return Err(Error::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{field} can't be empty")));
    }
    Ok(value)
}

/// Empty or blank optional text is treated as absent.
fn optional_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[test]
fn numeric_fields() {
    assert_eq!(parse_count("servings", " 4 ").unwrap(), 4);
    assert!(matches!(
        parse_count("servings", "-1"),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        parse_count("servings", "four"),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        parse_count("servings", "2.5"),
        Err(Error::Validation(_))
    ));

    assert_eq!(parse_amount("protein", "12.5").unwrap(), 12.5);
    assert_eq!(parse_amount("protein", "0").unwrap(), 0.0);
    assert!(parse_amount("protein", "-0.5").is_err());
    assert!(parse_amount("protein", "NaN").is_err());
    assert!(parse_amount("protein", "inf").is_err());
}

#[test]
fn text_fields() {
    assert_eq!(require_text("title", "  Soup ").unwrap(), "Soup");
    assert!(require_text("title", "   ").is_err());
    assert_eq!(optional_text(Some(" ")), None);
    assert_eq!(optional_text(Some(" note ")), Some("note"));
    assert_eq!(optional_text(None), None);
}
