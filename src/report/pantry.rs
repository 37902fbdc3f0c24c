// Copyright 2023 Remi Bernotavicius

use super::optional_cell;
use crate::database;
use crate::error::Result;
use crate::query;
use crate::session::Session;
use crate::table::Tabular;
use chrono::NaiveDate;

#[derive(Clone, Debug, PartialEq)]
pub struct PantryLine {
    pub ingredient: String,
    pub quantity: f32,
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl Tabular for PantryLine {
    const HEADERS: &'static [&'static str] = &["Ingredient", "Quantity", "Unit", "Expiry Date"];
    const MAX_WIDTHS: &'static [usize] = &[20, 8, 8, 14];

    fn cells(&self) -> Vec<String> {
        vec![
            self.ingredient.clone(),
            self.quantity.to_string(),
            optional_cell(&self.unit),
            optional_cell(&self.expiry_date),
        ]
    }
}

/// What the caller has on hand, by ingredient name.
pub fn view_pantry(conn: &mut database::Connection, session: &Session) -> Result<Vec<PantryLine>> {
    Ok(query::pantry::pantry_for_user(conn, session.user_id)?
        .into_iter()
        .map(|(item, ingredient)| PantryLine {
            ingredient: ingredient.name,
            quantity: item.quantity,
            unit: ingredient.unit,
            expiry_date: item.expiry_date,
        })
        .collect())
}

#[test]
fn lines_in_name_order() {
    use crate::database::models::{IngredientDetails, PantryItem};
    use crate::database::fixtures;

    let mut db = database::test_database();
    let conn = db.conn();
    let session = Session {
        user_id: fixtures::user(conn, "demo_user"),
        username: "demo_user".into(),
    };
    let bought = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let milk = query::ingredients::find_or_create_ingredient(
        conn,
        "Milk",
        &IngredientDetails {
            unit: Some("ml".into()),
            ..Default::default()
        },
    )
    .unwrap();
    let apples = fixtures::ingredient(conn, "Apples");
    for (ingredient_id, quantity, expiry_date) in [
        (milk, 500.0, NaiveDate::from_ymd_opt(2024, 6, 8)),
        (apples, 6.0, None),
    ] {
        query::pantry::upsert_pantry_item(
            conn,
            &PantryItem {
                user_id: session.user_id,
                ingredient_id,
                quantity,
                expiry_date,
                purchase_date: bought,
            },
        )
        .unwrap();
    }

    let lines = view_pantry(conn, &session).unwrap();
    let cells: Vec<_> = lines.iter().map(Tabular::cells).collect();
    assert_eq!(
        cells,
        [
            vec!["Apples", "6", "", ""],
            vec!["Milk", "500", "ml", "2024-06-08"],
        ]
    );
}
