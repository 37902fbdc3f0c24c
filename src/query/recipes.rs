// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{NewRecipe, Recipe, RecipeId};
use crate::error::{Error, Result};
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub fn insert_recipe(conn: &mut database::Connection, new_recipe: &NewRecipe) -> Result<RecipeId> {
    use database::schema::recipes::dsl::*;
    use diesel::insert_into;

    Ok(insert_into(recipes)
        .values(new_recipe)
        .returning(id)
        .get_result(conn)?)
}

pub fn find_recipe(conn: &mut database::Connection, recipe_id: RecipeId) -> Result<Option<Recipe>> {
    use database::schema::recipes::dsl::*;

    Ok(recipes
        .select(Recipe::as_select())
        .filter(id.eq(recipe_id))
        .get_result(conn)
        .optional()?)
}

pub fn get_recipe(conn: &mut database::Connection, recipe_id: RecipeId) -> Result<Recipe> {
    find_recipe(conn, recipe_id)?.ok_or_else(|| Error::not_found("recipe", recipe_id))
}

#[cfg(test)]
pub fn recipe_count(conn: &mut database::Connection) -> Result<i64> {
    use database::schema::recipes::dsl::*;

    Ok(recipes.count().get_result(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{fixtures, test_database};
    use crate::database::models::{Difficulty, UserId};

    #[test]
    fn insert_and_get() {
        let mut db = test_database();
        let conn = db.conn();
        let owner = fixtures::user(conn, "chef_master");

        let new_recipe = fixtures::new_recipe(owner, "Garlic Rice");
        let recipe_id = insert_recipe(conn, &new_recipe).unwrap();

        let recipe = get_recipe(conn, recipe_id).unwrap();
        assert_eq!(recipe.user_id, owner);
        assert_eq!(recipe.title, "Garlic Rice");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.protein, new_recipe.protein);
        assert_eq!(recipe_count(conn).unwrap(), 1);
    }

    #[test]
    fn missing_recipe() {
        let mut db = test_database();
        let conn = db.conn();

        assert!(find_recipe(conn, RecipeId(1)).unwrap().is_none());
        assert!(matches!(
            get_recipe(conn, RecipeId(1)),
            Err(Error::NotFound { entity: "recipe", .. })
        ));
    }

    #[test]
    fn owner_must_exist() {
        let mut db = test_database();
        let conn = db.conn();

        let result = insert_recipe(conn, &fixtures::new_recipe(UserId(42), "Orphan Stew"));
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
        assert_eq!(recipe_count(conn).unwrap(), 0);
    }
}
