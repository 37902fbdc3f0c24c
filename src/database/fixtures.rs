// Copyright 2023 Remi Bernotavicius

//! Rows for tests to build on.

use crate::database;
use crate::database::models::{
    Difficulty, IngredientId, NewRecipe, NewUser, RecipeId, RecipeIngredient, UserId,
};
use crate::query;

pub fn user(conn: &mut database::Connection, username: &str) -> UserId {
    let email = format!("{username}@example.com");
    query::users::insert_user(
        conn,
        &NewUser {
            username,
            email: &email,
            password_hash: &crate::password::hash_password("password123"),
            bio: None,
            created_at: chrono::Local::now().naive_local(),
        },
    )
    .unwrap()
}

pub fn new_recipe(owner: UserId, title: &str) -> NewRecipe {
    NewRecipe {
        user_id: owner,
        title: title.into(),
        instructions: "Combine and cook.".into(),
        prep_time: 10,
        cook_time: 20,
        servings: 2,
        calories: 450,
        protein: 30.5,
        carbs: 40.25,
        fats: 12.0,
        cuisine: "Italian".into(),
        difficulty: Difficulty::Easy,
        is_public: true,
    }
}

pub fn ingredient(conn: &mut database::Connection, name: &str) -> IngredientId {
    query::ingredients::find_or_create_ingredient(conn, name, &Default::default()).unwrap()
}

/// A public recipe owned by `owner` that uses one unit of each of `ingredients`.
pub fn recipe(
    conn: &mut database::Connection,
    owner: UserId,
    title: &str,
    ingredients: &[&str],
) -> RecipeId {
    let recipe_id = query::recipes::insert_recipe(conn, &new_recipe(owner, title)).unwrap();
    for name in ingredients {
        let ingredient_id = ingredient(conn, name);
        query::recipe_ingredients::add_recipe_ingredient(
            conn,
            &RecipeIngredient {
                recipe_id,
                ingredient_id,
                quantity: 1.0,
                unit: None,
                notes: None,
            },
        )
        .unwrap();
    }
    recipe_id
}
