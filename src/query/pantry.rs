// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{Ingredient, IngredientId, PantryItem, UserId};
use crate::error::Result;
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

/// Stores `item`, replacing whatever the same user had on hand for the same ingredient.
pub fn upsert_pantry_item(conn: &mut database::Connection, item: &PantryItem) -> Result<()> {
    use database::schema::pantry::dsl::*;
    use diesel::insert_into;

    insert_into(pantry)
        .values(item)
        .on_conflict((user_id, ingredient_id))
        .do_update()
        .set((
            quantity.eq(item.quantity),
            expiry_date.eq(item.expiry_date),
            purchase_date.eq(item.purchase_date),
        ))
        .execute(conn)?;
    Ok(())
}

pub fn get_pantry_item(
    conn: &mut database::Connection,
    owner: UserId,
    ingredient: IngredientId,
) -> Result<Option<PantryItem>> {
    use database::schema::pantry::dsl::*;

    Ok(pantry
        .select(PantryItem::as_select())
        .filter(user_id.eq(owner))
        .filter(ingredient_id.eq(ingredient))
        .get_result(conn)
        .optional()?)
}

/// Returns the number of rows removed, which is zero when the ingredient wasn't on hand.
pub fn delete_pantry_item(
    conn: &mut database::Connection,
    owner: UserId,
    ingredient: IngredientId,
) -> Result<usize> {
    use database::schema::pantry::dsl::*;
    use diesel::delete;

    Ok(delete(
        pantry
            .filter(user_id.eq(owner))
            .filter(ingredient_id.eq(ingredient)),
    )
    .execute(conn)?)
}

/// Everything `owner` has on hand, in ingredient name order.
pub fn pantry_for_user(
    conn: &mut database::Connection,
    owner: UserId,
) -> Result<Vec<(PantryItem, Ingredient)>> {
    use database::schema::{ingredients, pantry};

    Ok(pantry::table
        .inner_join(ingredients::table)
        .select((PantryItem::as_select(), Ingredient::as_select()))
        .filter(pantry::user_id.eq(owner))
        .order_by(ingredients::name.asc())
        .load(conn)?)
}

pub fn pantry_item_count(conn: &mut database::Connection, owner: UserId) -> Result<i64> {
    use database::schema::pantry::dsl::*;

    Ok(pantry.filter(user_id.eq(owner)).count().get_result(conn)?)
}

#[test]
fn upsert_replaces() {
    use crate::database::fixtures;
    use chrono::NaiveDate;

    let mut db = database::test_database();
    let conn = db.conn();
    let owner = fixtures::user(conn, "demo_user");
    let rice = fixtures::ingredient(conn, "Brown Rice");
    let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();

    let first = PantryItem {
        user_id: owner,
        ingredient_id: rice,
        quantity: 500.0,
        expiry_date: Some(day(30)),
        purchase_date: day(1),
    };
    upsert_pantry_item(conn, &first).unwrap();

    let second = PantryItem {
        quantity: 250.0,
        expiry_date: None,
        purchase_date: day(2),
        ..first.clone()
    };
    upsert_pantry_item(conn, &second).unwrap();

    assert_eq!(pantry_item_count(conn, owner).unwrap(), 1);
    assert_eq!(get_pantry_item(conn, owner, rice).unwrap(), Some(second));

    assert_eq!(delete_pantry_item(conn, owner, rice).unwrap(), 1);
    assert_eq!(delete_pantry_item(conn, owner, rice).unwrap(), 0);
    assert!(pantry_for_user(conn, owner).unwrap().is_empty());
}
