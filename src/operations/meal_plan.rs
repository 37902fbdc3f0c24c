// Copyright 2023 Remi Bernotavicius

use super::require_text;
use crate::database::models::{MealPlanId, MealPlanRecipe, MealType, NewMealPlan, RecipeId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::query;
use crate::session::Session;
use chrono::NaiveDate;

pub fn create_meal_plan(
    db: &mut Database,
    session: &Session,
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<MealPlanId> {
    let name = require_text("plan name", name)?;
    if end_date < start_date {
        return Err(Error::validation(format!(
            "plan ends on {end_date}, before it starts on {start_date}"
        )));
    }

    let plan_id = db.with_transaction(|conn| {
        query::meal_plans::insert_meal_plan(
            conn,
            &NewMealPlan {
                user_id: session.user_id,
                name,
                start_date,
                end_date,
            },
        )
    })?;
    log::info!("created meal plan {plan_id} {name:?}");
    Ok(plan_id)
}

/// Schedules `recipe_id` for a meal in one of the caller's plans. A plan belonging to someone else
/// is reported the same way as a plan that doesn't exist.
pub fn add_recipe_to_meal_plan(
    db: &mut Database,
    session: &Session,
    plan_id: MealPlanId,
    recipe_id: RecipeId,
    meal_date: NaiveDate,
    meal_type: MealType,
) -> Result<()> {
    db.with_transaction(|conn| {
        if query::meal_plans::find_owned_meal_plan(conn, plan_id, session.user_id)?.is_none() {
            return Err(Error::not_found("meal plan", plan_id));
        }
        if query::recipes::find_recipe(conn, recipe_id)?.is_none() {
            return Err(Error::not_found("recipe", recipe_id));
        }
        query::meal_plan_recipes::add_meal_plan_recipe(
            conn,
            &MealPlanRecipe {
                plan_id,
                recipe_id,
                meal_date,
                meal_type,
            },
        )
    })?;
    log::info!("added recipe {recipe_id} to meal plan {plan_id} for {meal_type} on {meal_date}");
    Ok(())
}
