// Copyright 2023 Remi Bernotavicius

//! Read-only views over the database. Every view comes back as named records rather than loose
//! rows, and the tabular ones implement [`crate::table::Tabular`].

pub mod meal_plans;
pub mod pantry;
pub mod recipes;
pub mod recommend;
pub mod search;

fn optional_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
