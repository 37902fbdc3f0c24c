// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::RecipeId;
use crate::error::Result;
use crate::query;
use crate::session::Session;
use crate::table::Tabular;
use diesel::deserialize::QueryableByName;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::RunQueryDsl as _;

pub const MAX_RECOMMENDATIONS: i64 = 10;

/// A recipe that shares at least one ingredient with the pantry it was recommended for.
#[derive(QueryableByName, Clone, Debug, PartialEq)]
pub struct Recommendation {
    #[diesel(sql_type = Integer)]
    pub id: RecipeId,
    #[diesel(sql_type = Text)]
    pub title: String,
    /// Distinct ingredients of the recipe that are in the pantry.
    #[diesel(sql_type = BigInt)]
    pub matched: i64,
    /// Distinct ingredients of the recipe.
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

impl Recommendation {
    pub fn match_percentage(&self) -> f64 {
        self.matched as f64 * 100.0 / self.total as f64
    }
}

impl Tabular for Recommendation {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Ingredients", "Match Percentage"];
    const MAX_WIDTHS: &'static [usize] = &[5, 20, 15, 16];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            format!("{} of {}", self.matched, self.total),
            format!("{:.1}%", self.match_percentage()),
        ]
    }
}

const RECOMMEND_SQL: &str = "\
SELECT r.id AS id, r.title AS title,
    COUNT(DISTINCT CASE WHEN ri.ingredient_id IN
        (SELECT ingredient_id FROM pantry WHERE user_id = ?)
        THEN ri.ingredient_id END) AS matched,
    COUNT(DISTINCT ri.ingredient_id) AS total
FROM recipes r
JOIN recipe_ingredients ri ON ri.recipe_id = r.id
GROUP BY r.id
HAVING matched > 0
ORDER BY matched * 1.0 / total DESC, matched DESC, r.id ASC
LIMIT ?";

#[derive(Clone, Debug, PartialEq)]
pub enum Recommendations {
    /// Nothing to match against.
    EmptyPantry,
    /// Best first. Empty when no recipe shares an ingredient with the pantry.
    Ranked(Vec<Recommendation>),
}

/// Recipes ranked by the share of their ingredients the caller already has, then by how many they
/// have. Recipes sharing no ingredient with the pantry are left out.
pub fn recommend_from_pantry(
    conn: &mut database::Connection,
    session: &Session,
) -> Result<Recommendations> {
    if query::pantry::pantry_item_count(conn, session.user_id)? == 0 {
        return Ok(Recommendations::EmptyPantry);
    }

    let ranked = diesel::sql_query(RECOMMEND_SQL)
        .bind::<Integer, _>(session.user_id)
        .bind::<BigInt, _>(MAX_RECOMMENDATIONS)
        .load(conn)?;
    Ok(Recommendations::Ranked(ranked))
}
