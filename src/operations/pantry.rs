// Copyright 2023 Remi Bernotavicius

use super::{check_amount, require_text};
use crate::database::models::{IngredientDetails, PantryItem};
use crate::database::Database;
use crate::error::Result;
use crate::query;
use crate::session::Session;
use chrono::NaiveDate;

/// Records that the caller has `quantity` of the named ingredient, bought today. Whatever was
/// recorded for the same ingredient before is replaced, not added to.
pub fn add_to_pantry(
    db: &mut Database,
    session: &Session,
    ingredient_name: &str,
    details: &IngredientDetails,
    quantity: f32,
    expiry_date: Option<NaiveDate>,
) -> Result<()> {
    let ingredient_name = require_text("ingredient name", ingredient_name)?;
    check_amount("quantity", quantity)?;
    let purchase_date = chrono::Local::now().date_naive();

    let previous = db.with_transaction(|conn| {
        let ingredient_id =
            query::ingredients::find_or_create_ingredient(conn, ingredient_name, details)?;
        let previous = query::pantry::get_pantry_item(conn, session.user_id, ingredient_id)?;
        query::pantry::upsert_pantry_item(
            conn,
            &PantryItem {
                user_id: session.user_id,
                ingredient_id,
                quantity,
                expiry_date,
                purchase_date,
            },
        )?;
        Ok(previous)
    })?;
    match previous {
        Some(p) => log::info!(
            "replaced {} of {ingredient_name:?} in the pantry with {quantity}",
            p.quantity
        ),
        None => log::info!("stocked {quantity} of {ingredient_name:?} in the pantry"),
    }
    Ok(())
}

/// Returns `false` when the ingredient wasn't in the caller's pantry.
pub fn remove_from_pantry(
    db: &mut Database,
    session: &Session,
    ingredient_name: &str,
) -> Result<bool> {
    let removed = db.with_transaction(|conn| {
        let Some(ingredient_id) =
            query::ingredients::find_ingredient_id(conn, ingredient_name.trim())?
        else {
            return Ok(0);
        };
        query::pantry::delete_pantry_item(conn, session.user_id, ingredient_id)
    })?;
    if removed > 0 {
        log::info!("removed {ingredient_name:?} from the pantry");
    }
    Ok(removed > 0)
}
