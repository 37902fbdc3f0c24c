// Copyright 2023 Remi Bernotavicius

use super::{check_amount, optional_text, parse_amount, parse_count, parse_field, require_text};
use crate::database::models::{
    Difficulty, IngredientDetails, NewRecipe, RecipeId, RecipeIngredient, RecipeTag,
};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::query;
use crate::session::Session;

/// One ingredient line of a recipe as it was entered.
#[derive(Clone, Debug, Default)]
pub struct IngredientEntry {
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
    pub notes: Option<String>,
    /// Used only if no ingredient with this name exists yet.
    pub details: IngredientDetails,
}

#[derive(Clone, Debug, Default)]
pub struct TagEntry {
    pub name: String,
    pub description: Option<String>,
}

/// A recipe as it was entered, numbers still in text form.
#[derive(Clone, Debug, Default)]
pub struct RecipeForm {
    pub title: String,
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub cuisine: String,
    pub difficulty: String,
    pub is_public: bool,
    pub ingredients: Vec<IngredientEntry>,
    pub tags: Vec<TagEntry>,
}

struct ValidIngredient<'a> {
    name: &'a str,
    quantity: f32,
    unit: Option<String>,
    notes: Option<String>,
    details: &'a IngredientDetails,
}

fn validate_recipe(owner: &Session, form: &RecipeForm) -> Result<NewRecipe> {
    let difficulty: Difficulty = form.difficulty.trim().parse().map_err(|_| {
        Error::validation(format!(
            "difficulty must be one of {}, got {:?}",
            Difficulty::iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            form.difficulty
        ))
    })?;

    Ok(NewRecipe {
        user_id: owner.user_id,
        title: require_text("title", &form.title)?.into(),
        instructions: form.instructions.trim().into(),
        prep_time: parse_count("prep time", &form.prep_time)?,
        cook_time: parse_count("cook time", &form.cook_time)?,
        servings: parse_count("servings", &form.servings)?,
        calories: parse_count("calories", &form.calories)?,
        protein: parse_amount("protein", &form.protein)?,
        carbs: parse_amount("carbs", &form.carbs)?,
        fats: parse_amount("fats", &form.fats)?,
        cuisine: form.cuisine.trim().into(),
        difficulty,
        is_public: form.is_public,
    })
}

fn validate_ingredient(entry: &IngredientEntry) -> Result<ValidIngredient<'_>> {
    let name = require_text("ingredient name", &entry.name)?;
    let quantity = if entry.quantity.trim().is_empty() {
        0.0
    } else {
        parse_field::<f32>(&format!("quantity of {name}"), &entry.quantity)?
    };
    check_amount(&format!("quantity of {name}"), quantity)?;
    Ok(ValidIngredient {
        name,
        quantity,
        unit: optional_text(entry.unit.as_deref()).map(Into::into),
        notes: optional_text(entry.notes.as_deref()).map(Into::into),
        details: &entry.details,
    })
}

fn validate_tag(entry: &TagEntry) -> Result<(&str, Option<&str>)> {
    Ok((
        require_text("tag name", &entry.name)?,
        optional_text(entry.description.as_deref()),
    ))
}

/// Stores a recipe together with its ingredient lines and tags. Ingredients and tags that don't
/// exist yet are created. Either everything is stored or nothing is.
pub fn create_recipe(db: &mut Database, session: &Session, form: &RecipeForm) -> Result<RecipeId> {
    let new_recipe = validate_recipe(session, form)?;
    let ingredients = form
        .ingredients
        .iter()
        .map(validate_ingredient)
        .collect::<Result<Vec<_>>>()?;
    let tags = form
        .tags
        .iter()
        .map(validate_tag)
        .collect::<Result<Vec<_>>>()?;

    let recipe_id = db.with_transaction(|conn| {
        let recipe_id = query::recipes::insert_recipe(conn, &new_recipe)?;

        for entry in &ingredients {
            let ingredient_id =
                query::ingredients::find_or_create_ingredient(conn, entry.name, entry.details)?;
            query::recipe_ingredients::add_recipe_ingredient(
                conn,
                &RecipeIngredient {
                    recipe_id,
                    ingredient_id,
                    quantity: entry.quantity,
                    unit: entry.unit.clone(),
                    notes: entry.notes.clone(),
                },
            )?;
        }

        for &(name, description) in &tags {
            let tag_id = query::tags::find_or_create_tag(conn, name, description)?;
            query::recipe_tags::add_recipe_tag(conn, &RecipeTag { recipe_id, tag_id })?;
        }

        Ok(recipe_id)
    })?;

    log::info!(
        "created recipe {recipe_id} {:?} with {} ingredients and {} tags",
        new_recipe.title,
        ingredients.len(),
        tags.len()
    );
    Ok(recipe_id)
}
