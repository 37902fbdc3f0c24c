// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{MealPlanId, MealPlanRecipe, Recipe};
use crate::error::Result;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

/// Fills one (plan, date, meal type) slot. A slot that already holds a recipe is a conflict.
pub fn add_meal_plan_recipe(conn: &mut database::Connection, entry: &MealPlanRecipe) -> Result<()> {
    use database::schema::meal_plan_recipes::dsl::*;
    use diesel::insert_into;

    insert_into(meal_plan_recipes).values(entry).execute(conn)?;
    Ok(())
}

/// Everything scheduled in a plan along with its recipe, earliest date first.
pub fn planned_recipes(
    conn: &mut database::Connection,
    plan: MealPlanId,
) -> Result<Vec<(MealPlanRecipe, Recipe)>> {
    use database::schema::meal_plan_recipes::dsl::*;

    Ok(meal_plan_recipes
        .inner_join(database::schema::recipes::table)
        .select((MealPlanRecipe::as_select(), Recipe::as_select()))
        .filter(plan_id.eq(plan))
        .order_by(meal_date.asc())
        .load(conn)?)
}

#[cfg(test)]
pub fn meal_plan_recipe_count(conn: &mut database::Connection, plan: MealPlanId) -> Result<i64> {
    use database::schema::meal_plan_recipes::dsl::*;

    Ok(meal_plan_recipes
        .filter(plan_id.eq(plan))
        .count()
        .get_result(conn)?)
}
