// Copyright 2023 Remi Bernotavicius

use crate::database;
#[cfg(test)]
use crate::database::models::Ingredient;
use crate::database::models::{IngredientDetails, IngredientId};
use crate::error::{Error, Result};
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
#[cfg(test)]
use diesel::SelectableHelper as _;

pub fn find_ingredient_id(
    conn: &mut database::Connection,
    ingredient_name: &str,
) -> Result<Option<IngredientId>> {
    use database::schema::ingredients::dsl::*;

    Ok(ingredients
        .select(id)
        .filter(name.eq(ingredient_name))
        .get_result(conn)
        .optional()?)
}

#[cfg(test)]
pub fn get_ingredient(
    conn: &mut database::Connection,
    ingredient_id: IngredientId,
) -> Result<Ingredient> {
    use database::schema::ingredients::dsl::*;

    ingredients
        .select(Ingredient::as_select())
        .filter(id.eq(ingredient_id))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("ingredient", ingredient_id))
}

/// Returns the id of the ingredient called `ingredient_name`, creating it with `details` if there
/// isn't one. Names match exactly, case included.
///
/// A row that appears between the lookup and the insert is picked up by the unique constraint on
/// the name; the insert then does nothing and the existing id is read back.
pub fn find_or_create_ingredient(
    conn: &mut database::Connection,
    ingredient_name: &str,
    details: &IngredientDetails,
) -> Result<IngredientId> {
    if let Some(existing) = find_ingredient_id(conn, ingredient_name)? {
        return Ok(existing);
    }

    {
        use database::schema::ingredients::dsl::*;
        use diesel::insert_into;

        insert_into(ingredients)
            .values((
                name.eq(ingredient_name),
                category.eq(details.category.as_deref()),
                unit.eq(details.unit.as_deref()),
                nutritional_info.eq(details.nutritional_info.as_deref()),
            ))
            .on_conflict(name)
            .do_nothing()
            .execute(conn)?;
    }
    log::info!("created ingredient {ingredient_name:?}");

    find_ingredient_id(conn, ingredient_name)?
        .ok_or_else(|| Error::not_found("ingredient", ingredient_name))
}

#[cfg(test)]
pub fn ingredient_count(conn: &mut database::Connection) -> Result<i64> {
    use database::schema::ingredients::dsl::*;

    Ok(ingredients.count().get_result(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_database;

    #[test]
    fn find_or_create_reuses_existing() {
        let mut db = test_database();
        let conn = db.conn();

        let details = IngredientDetails {
            category: Some("Vegetable".into()),
            unit: Some("pieces".into()),
            nutritional_info: None,
        };
        let first = find_or_create_ingredient(conn, "Tomato", &details).unwrap();
        let second =
            find_or_create_ingredient(conn, "Tomato", &IngredientDetails::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(ingredient_count(conn).unwrap(), 1);

        let tomato = get_ingredient(conn, first).unwrap();
        assert_eq!(tomato.category.as_deref(), Some("Vegetable"));
        assert_eq!(tomato.unit.as_deref(), Some("pieces"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut db = test_database();
        let conn = db.conn();

        let lower = find_or_create_ingredient(conn, "garlic", &Default::default()).unwrap();
        let upper = find_or_create_ingredient(conn, "Garlic", &Default::default()).unwrap();
        assert_ne!(lower, upper);
        assert_eq!(ingredient_count(conn).unwrap(), 2);
    }

    #[test]
    fn lookup_missing() {
        let mut db = test_database();
        let conn = db.conn();

        assert_eq!(find_ingredient_id(conn, "Saffron").unwrap(), None);
        assert!(matches!(
            get_ingredient(conn, IngredientId(7)),
            Err(Error::NotFound { .. })
        ));
    }
}
