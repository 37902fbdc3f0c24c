// Copyright 2023 Remi Bernotavicius

use super::optional_text;
use crate::database::models::{NewFeedback, RecipeId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::query;
use crate::session::Session;
use std::ops::RangeInclusive;

const RATING_RANGE: RangeInclusive<i32> = 1..=5;

#[derive(Clone, Debug, Default)]
pub struct FeedbackForm {
    pub rating: i32,
    pub difficulty_rating: i32,
    pub actual_cooking_time: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Created,
    /// The caller had already reviewed the recipe and that review was overwritten.
    Replaced,
}

fn check_rating(field: &str, value: i32) -> Result<()> {
    if !RATING_RANGE.contains(&value) {
        return Err(Error::validation(format!(
            "{field} must be between {} and {}, got {value}",
            RATING_RANGE.start(),
            RATING_RANGE.end()
        )));
    }
    Ok(())
}

pub fn submit_feedback(
    db: &mut Database,
    session: &Session,
    recipe_id: RecipeId,
    form: &FeedbackForm,
) -> Result<FeedbackOutcome> {
    check_rating("rating", form.rating)?;
    check_rating("difficulty rating", form.difficulty_rating)?;
    if form.actual_cooking_time.is_some_and(|t| t < 0) {
        return Err(Error::validation("cooking time can't be negative"));
    }
    let comment = optional_text(form.comment.as_deref());

    let outcome = db.with_transaction(|conn| {
        if query::recipes::find_recipe(conn, recipe_id)?.is_none() {
            return Err(Error::not_found("recipe", recipe_id));
        }
        let existing = query::feedback::find_feedback_id(conn, recipe_id, session.user_id)?;
        query::feedback::upsert_feedback(
            conn,
            &NewFeedback {
                recipe_id,
                user_id: session.user_id,
                rating: form.rating,
                difficulty_rating: form.difficulty_rating,
                actual_cooking_time: form.actual_cooking_time,
                comment,
                created_at: chrono::Local::now().naive_local(),
            },
        )?;
        Ok(match existing {
            Some(_) => FeedbackOutcome::Replaced,
            None => FeedbackOutcome::Created,
        })
    })?;
    log::info!("{outcome:?} feedback on recipe {recipe_id}");
    Ok(outcome)
}
