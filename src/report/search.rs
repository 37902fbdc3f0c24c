// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{Difficulty, RecipeId};
use crate::error::Result;
use crate::table::Tabular;
use diesel::deserialize::Queryable;
use diesel::expression::Selectable;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

/// Every criterion that is set must match. Unset criteria match everything.
#[derive(Clone, Debug, Default)]
pub struct SearchCriteria {
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub max_cook_time: Option<i32>,
    /// A recipe matches if it has any one of these.
    pub tags: Vec<String>,
}

#[derive(Queryable, Selectable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct SearchHit {
    pub id: RecipeId,
    pub title: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub cook_time: i32,
    pub servings: i32,
}

impl Tabular for SearchHit {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Title",
        "Cuisine",
        "Difficulty",
        "Cook Time",
        "Servings",
    ];
    const MAX_WIDTHS: &'static [usize] = &[5, 20, 10, 10, 11, 8];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.cuisine.clone(),
            self.difficulty.to_string(),
            self.cook_time.to_string(),
            self.servings.to_string(),
        ]
    }
}

/// Searches public recipes only.
pub fn search_recipes(
    conn: &mut database::Connection,
    criteria: &SearchCriteria,
) -> Result<Vec<SearchHit>> {
    use database::schema::{recipe_tags, recipes, tags};

    let mut query = recipes::table
        .select(SearchHit::as_select())
        .filter(recipes::is_public.eq(true))
        .order_by(recipes::id.asc())
        .into_boxed();

    if let Some(cuisine) = &criteria.cuisine {
        query = query.filter(recipes::cuisine.eq(cuisine.clone()));
    }
    if let Some(difficulty) = criteria.difficulty {
        query = query.filter(recipes::difficulty.eq(difficulty));
    }
    if let Some(max_cook_time) = criteria.max_cook_time {
        query = query.filter(recipes::cook_time.le(max_cook_time));
    }
    if !criteria.tags.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::name.eq_any(criteria.tags.clone()))
            .select(recipe_tags::recipe_id);
        query = query.filter(recipes::id.eq_any(tagged));
    }

    Ok(query.load(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewRecipe, RecipeTag, UserId};
    use crate::database::{fixtures, test_database};
    use crate::query;

    fn add(
        conn: &mut database::Connection,
        owner: UserId,
        title: &str,
        change: impl FnOnce(&mut NewRecipe),
        tag_names: &[&str],
    ) -> RecipeId {
        let mut new_recipe = fixtures::new_recipe(owner, title);
        change(&mut new_recipe);
        let recipe_id = query::recipes::insert_recipe(conn, &new_recipe).unwrap();
        for name in tag_names {
            let tag_id = query::tags::find_or_create_tag(conn, name, None).unwrap();
            query::recipe_tags::add_recipe_tag(conn, &RecipeTag { recipe_id, tag_id }).unwrap();
        }
        recipe_id
    }

    #[test]
    fn criteria_are_combined() {
        let mut db = test_database();
        let conn = db.conn();
        let chef = fixtures::user(conn, "chef_master");

        let carbonara = add(conn, chef, "Carbonara", |_| {}, &["Quick Meal"]);
        let lasagna = add(
            conn,
            chef,
            "Lasagna",
            |r| {
                r.cook_time = 90;
                r.difficulty = Difficulty::Hard;
            },
            &["Comfort Food"],
        );
        let curry = add(
            conn,
            chef,
            "Green Curry",
            |r| r.cuisine = "Thai".into(),
            &["Quick Meal", "Spicy"],
        );
        add(
            conn,
            chef,
            "Private Pasta",
            |r| r.is_public = false,
            &["Quick Meal"],
        );

        let ids = |conn: &mut database::Connection, criteria: SearchCriteria| -> Vec<RecipeId> {
            search_recipes(conn, &criteria)
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect()
        };

        assert_eq!(
            ids(conn, SearchCriteria::default()),
            [carbonara, lasagna, curry]
        );
        assert_eq!(
            ids(
                conn,
                SearchCriteria {
                    cuisine: Some("Italian".into()),
                    ..Default::default()
                }
            ),
            [carbonara, lasagna]
        );
        assert_eq!(
            ids(
                conn,
                SearchCriteria {
                    cuisine: Some("Italian".into()),
                    max_cook_time: Some(30),
                    ..Default::default()
                }
            ),
            [carbonara]
        );
        assert_eq!(
            ids(
                conn,
                SearchCriteria {
                    difficulty: Some(Difficulty::Hard),
                    ..Default::default()
                }
            ),
            [lasagna]
        );
        assert_eq!(
            ids(
                conn,
                SearchCriteria {
                    tags: vec!["Spicy".into(), "Comfort Food".into()],
                    ..Default::default()
                }
            ),
            [lasagna, curry]
        );
        assert_eq!(
            ids(
                conn,
                SearchCriteria {
                    tags: vec!["Quick Meal".into()],
                    cuisine: Some("Thai".into()),
                    ..Default::default()
                }
            ),
            [curry]
        );
        assert!(ids(
            conn,
            SearchCriteria {
                tags: vec!["Dessert".into()],
                ..Default::default()
            }
        )
        .is_empty());
    }
}
