// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{FeedbackId, NewFeedback, RecipeFeedback, RecipeId, UserId};
use crate::error::Result;
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub fn find_feedback_id(
    conn: &mut database::Connection,
    recipe: RecipeId,
    reviewer: UserId,
) -> Result<Option<FeedbackId>> {
    use database::schema::recipe_feedback::dsl::*;

    Ok(recipe_feedback
        .select(id)
        .filter(recipe_id.eq(recipe))
        .filter(user_id.eq(reviewer))
        .get_result(conn)
        .optional()?)
}

/// Stores `feedback`, overwriting the reviewer's earlier feedback on the same recipe if there is
/// any.
pub fn upsert_feedback(conn: &mut database::Connection, feedback: &NewFeedback<'_>) -> Result<()> {
    use database::schema::recipe_feedback::dsl::*;
    use diesel::insert_into;

    insert_into(recipe_feedback)
        .values(feedback)
        .on_conflict((recipe_id, user_id))
        .do_update()
        .set((
            rating.eq(feedback.rating),
            difficulty_rating.eq(feedback.difficulty_rating),
            actual_cooking_time.eq(feedback.actual_cooking_time),
            comment.eq(feedback.comment),
            created_at.eq(feedback.created_at),
        ))
        .execute(conn)?;
    Ok(())
}

/// Feedback left on `recipe` along with each reviewer's username, most recent first.
pub fn feedback_for_recipe(
    conn: &mut database::Connection,
    recipe: RecipeId,
) -> Result<Vec<(RecipeFeedback, String)>> {
    use database::schema::{recipe_feedback, users};

    Ok(recipe_feedback::table
        .inner_join(users::table)
        .select((RecipeFeedback::as_select(), users::username))
        .filter(recipe_feedback::recipe_id.eq(recipe))
        .order_by((recipe_feedback::created_at.desc(), recipe_feedback::id.desc()))
        .load(conn)?)
}

#[test]
fn upsert_keeps_one_row_per_reviewer() {
    use crate::database::fixtures;

    let mut db = database::test_database();
    let conn = db.conn();
    let owner = fixtures::user(conn, "chef_master");
    let reviewer = fixtures::user(conn, "demo_user");
    let recipe = fixtures::recipe(conn, owner, "Chicken Rice", &["Chicken Breast"]);

    let now = chrono::Local::now().naive_local();
    let first = NewFeedback {
        recipe_id: recipe,
        user_id: reviewer,
        rating: 3,
        difficulty_rating: 2,
        actual_cooking_time: None,
        comment: Some("fine"),
        created_at: now,
    };
    upsert_feedback(conn, &first).unwrap();
    let original_id = find_feedback_id(conn, recipe, reviewer).unwrap().unwrap();

    upsert_feedback(
        conn,
        &NewFeedback {
            rating: 5,
            actual_cooking_time: Some(35),
            comment: None,
            created_at: now + chrono::Duration::seconds(1),
            ..first
        },
    )
    .unwrap();

    let all = feedback_for_recipe(conn, recipe).unwrap();
    assert_eq!(all.len(), 1);
    let (feedback, username) = &all[0];
    assert_eq!(feedback.id, original_id);
    assert_eq!(username, "demo_user");
    assert_eq!(feedback.rating, 5);
    assert_eq!(feedback.difficulty_rating, 2);
    assert_eq!(feedback.actual_cooking_time, Some(35));
    assert_eq!(feedback.comment, None);
}
