// Copyright 2023 Remi Bernotavicius

use super::optional_cell;
use crate::database;
use crate::database::models::{Difficulty, Recipe, RecipeId, Tag, UserId};
use crate::error::Result;
use crate::query;
use crate::table::Tabular;
use diesel::deserialize::Queryable;
use diesel::expression::Selectable;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecipeFilter {
    All,
    OwnedBy(UserId),
    Public,
}

#[derive(Queryable, Selectable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub cook_time: i32,
    pub servings: i32,
    pub is_public: bool,
}

impl Tabular for RecipeSummary {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Title",
        "Cuisine",
        "Difficulty",
        "Cook Time",
        "Servings",
        "Public",
    ];
    const MAX_WIDTHS: &'static [usize] = &[5, 20, 10, 10, 11, 8, 6];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.cuisine.clone(),
            self.difficulty.to_string(),
            self.cook_time.to_string(),
            self.servings.to_string(),
            if self.is_public { "Yes" } else { "No" }.into(),
        ]
    }
}

pub fn list_recipes(
    conn: &mut database::Connection,
    filter: RecipeFilter,
) -> Result<Vec<RecipeSummary>> {
    use database::schema::recipes::dsl::*;

    let query = recipes
        .select(RecipeSummary::as_select())
        .order_by(id.asc())
        .into_boxed();
    let query = match filter {
        RecipeFilter::All => query,
        RecipeFilter::OwnedBy(owner) => query.filter(user_id.eq(owner)),
        RecipeFilter::Public => query.filter(is_public.eq(true)),
    };
    Ok(query.load(conn)?)
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f32,
    pub unit: Option<String>,
}

impl Tabular for IngredientLine {
    const HEADERS: &'static [&'static str] = &["Ingredient", "Quantity", "Unit"];
    const MAX_WIDTHS: &'static [usize] = &[25, 8, 10];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.quantity.to_string(),
            optional_cell(&self.unit),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackEntry {
    pub username: String,
    pub rating: i32,
    pub difficulty_rating: i32,
    pub actual_cooking_time: Option<i32>,
    pub comment: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<IngredientLine>,
    pub tags: Vec<String>,
    /// Most recent first.
    pub feedback: Vec<FeedbackEntry>,
}

impl RecipeDetail {
    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }
}

pub fn recipe_detail(conn: &mut database::Connection, recipe_id: RecipeId) -> Result<RecipeDetail> {
    let recipe = query::recipes::get_recipe(conn, recipe_id)?;

    let ingredients = query::recipe_ingredients::ingredients_for_recipe(conn, &recipe)?
        .into_iter()
        .map(|(line, ingredient)| IngredientLine {
            name: ingredient.name,
            quantity: line.quantity,
            unit: line.unit,
        })
        .collect();
    let tags = query::recipe_tags::tag_names_for_recipe(conn, &recipe)?;
    let feedback = query::feedback::feedback_for_recipe(conn, recipe_id)?
        .into_iter()
        .map(|(f, username)| FeedbackEntry {
            username,
            rating: f.rating,
            difficulty_rating: f.difficulty_rating,
            actual_cooking_time: f.actual_cooking_time,
            comment: f.comment,
            created_at: f.created_at,
        })
        .collect();

    Ok(RecipeDetail {
        recipe,
        ingredients,
        tags,
        feedback,
    })
}

impl Tabular for Tag {
    const HEADERS: &'static [&'static str] = &["Tag", "Description"];
    const MAX_WIDTHS: &'static [usize] = &[20, 40];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), optional_cell(&self.description)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewFeedback, RecipeTag};
    use crate::database::{fixtures, test_database};
    use crate::error::Error;

    #[test]
    fn filters() {
        let mut db = test_database();
        let conn = db.conn();
        let alice = fixtures::user(conn, "alice");
        let bob = fixtures::user(conn, "bob");

        let soup = fixtures::recipe(conn, alice, "Soup", &[]);
        let mut secret = fixtures::new_recipe(alice, "Secret Sauce");
        secret.is_public = false;
        let secret = query::recipes::insert_recipe(conn, &secret).unwrap();
        let stew = fixtures::recipe(conn, bob, "Stew", &[]);

        let mut ids = |filter: RecipeFilter| -> Vec<RecipeId> {
            list_recipes(&mut *conn, filter)
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect()
        };
        assert_eq!(ids(RecipeFilter::All), [soup, secret, stew]);
        assert_eq!(ids(RecipeFilter::OwnedBy(alice)), [soup, secret]);
        assert_eq!(ids(RecipeFilter::Public), [soup, stew]);

        let summary = &list_recipes(conn, RecipeFilter::OwnedBy(bob)).unwrap()[0];
        assert_eq!(
            summary.cells(),
            ["3", "Stew", "Italian", "Easy", "20", "2", "Yes"]
        );
    }

    #[test]
    fn detail_collects_everything() {
        let mut db = test_database();
        let conn = db.conn();
        let chef = fixtures::user(conn, "chef_master");
        let demo = fixtures::user(conn, "demo_user");
        let recipe_id = fixtures::recipe(conn, chef, "Bruschetta", &["Tomato", "Bread"]);
        for name in ["Vegetarian", "Appetizer"] {
            let tag_id = query::tags::find_or_create_tag(conn, name, None).unwrap();
            query::recipe_tags::add_recipe_tag(conn, &RecipeTag { recipe_id, tag_id }).unwrap();
        }

        let then = chrono::NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let reviews = [(chef, 4, then), (demo, 5, then + chrono::Duration::days(1))];
        for (reviewer, rating, at) in reviews {
            query::feedback::upsert_feedback(
                conn,
                &NewFeedback {
                    recipe_id,
                    user_id: reviewer,
                    rating,
                    difficulty_rating: 1,
                    actual_cooking_time: None,
                    comment: None,
                    created_at: at,
                },
            )
            .unwrap();
        }

        let detail = recipe_detail(conn, recipe_id).unwrap();
        assert_eq!(detail.recipe.title, "Bruschetta");
        assert_eq!(
            detail.ingredients,
            [
                IngredientLine {
                    name: "Bread".into(),
                    quantity: 1.0,
                    unit: None
                },
                IngredientLine {
                    name: "Tomato".into(),
                    quantity: 1.0,
                    unit: None
                },
            ]
        );
        assert_eq!(detail.tag_list(), "Appetizer, Vegetarian");
        let reviewers: Vec<_> = detail.feedback.iter().map(|f| f.username.as_str()).collect();
        assert_eq!(reviewers, ["demo_user", "chef_master"]);
        assert_eq!(detail.feedback[0].rating, 5);
    }

    #[test]
    fn detail_of_missing_recipe() {
        let mut db = test_database();
        assert!(matches!(
            recipe_detail(db.conn(), RecipeId(5)),
            Err(Error::NotFound { entity: "recipe", .. })
        ));
    }
}
