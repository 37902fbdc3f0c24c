// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{Recipe, RecipeTag};
use crate::error::Result;
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;

pub fn add_recipe_tag(conn: &mut database::Connection, link: &RecipeTag) -> Result<()> {
    use database::schema::recipe_tags::dsl::*;
    use diesel::insert_into;

    insert_into(recipe_tags).values(link).execute(conn)?;
    Ok(())
}

pub fn tag_names_for_recipe(
    conn: &mut database::Connection,
    recipe: &Recipe,
) -> Result<Vec<String>> {
    use database::schema::tags;

    Ok(RecipeTag::belonging_to(recipe)
        .inner_join(tags::table)
        .select(tags::name)
        .order_by(tags::name.asc())
        .load(conn)?)
}

#[cfg(test)]
pub fn recipe_tag_count(conn: &mut database::Connection) -> Result<i64> {
    use database::schema::recipe_tags::dsl::*;

    Ok(recipe_tags.count().get_result(conn)?)
}

#[test]
fn tags_for_recipe() {
    use crate::database::fixtures;
    use crate::query;

    let mut db = database::test_database();
    let conn = db.conn();
    let owner = fixtures::user(conn, "chef_master");
    let recipe_id = fixtures::recipe(conn, owner, "Garden Salad", &[]);
    let recipe = query::recipes::get_recipe(conn, recipe_id).unwrap();

    for name in ["Vegetarian", "Healthy"] {
        let tag_id = query::tags::find_or_create_tag(conn, name, None).unwrap();
        add_recipe_tag(conn, &RecipeTag { recipe_id, tag_id }).unwrap();
    }

    assert_eq!(
        tag_names_for_recipe(conn, &recipe).unwrap(),
        ["Healthy", "Vegetarian"]
    );
    assert_eq!(recipe_tag_count(conn).unwrap(), 2);
}
