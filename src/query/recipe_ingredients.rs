// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{Ingredient, Recipe, RecipeIngredient};
use crate::error::Result;
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub fn add_recipe_ingredient(
    conn: &mut database::Connection,
    usage: &RecipeIngredient,
) -> Result<()> {
    use database::schema::recipe_ingredients::dsl::*;
    use diesel::insert_into;

    insert_into(recipe_ingredients).values(usage).execute(conn)?;
    Ok(())
}

/// Every ingredient line of `recipe`, in ingredient name order.
pub fn ingredients_for_recipe(
    conn: &mut database::Connection,
    recipe: &Recipe,
) -> Result<Vec<(RecipeIngredient, Ingredient)>> {
    Ok(RecipeIngredient::belonging_to(recipe)
        .inner_join(database::schema::ingredients::table)
        .select((RecipeIngredient::as_select(), Ingredient::as_select()))
        .order_by(database::schema::ingredients::name.asc())
        .load(conn)?)
}

#[cfg(test)]
pub fn recipe_ingredient_count(conn: &mut database::Connection) -> Result<i64> {
    use database::schema::recipe_ingredients::dsl::*;

    Ok(recipe_ingredients.count().get_result(conn)?)
}
