// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{MealPlan, MealPlanId, MealType, Recipe, RecipeId};
use crate::error::{Error, Result};
use crate::query;
use crate::session::Session;
use crate::table::Tabular;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

impl Tabular for MealPlan {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Start Date", "End Date"];
    const MAX_WIDTHS: &'static [usize] = &[5, 20, 10, 10];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.start_date.to_string(),
            self.end_date.to_string(),
        ]
    }
}

pub fn list_meal_plans(
    conn: &mut database::Connection,
    session: &Session,
) -> Result<Vec<MealPlan>> {
    query::meal_plans::meal_plans_for_user(conn, session.user_id)
}

/// Calories are summed wider than a single recipe stores them, so any number of planned recipes
/// adds up without overflowing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Macros {
    pub calories: i64,
    pub protein: f32,
    pub carbs: f32,
    pub fats: f32,
}

impl Macros {
    fn of(recipe: &Recipe) -> Self {
        Self {
            calories: recipe.calories.into(),
            protein: recipe.protein,
            carbs: recipe.carbs,
            fats: recipe.fats,
        }
    }
}

impl std::ops::Add for Macros {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }
}

impl fmt::Display for Macros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calories: {}, Protein: {}g, Carbs: {}g, Fats: {}g",
            self.calories, self.protein, self.carbs, self.fats
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlannedRecipe {
    pub recipe_id: RecipeId,
    pub title: String,
    pub macros: Macros,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlannedMeal {
    pub meal_type: MealType,
    pub recipe: PlannedRecipe,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanDay {
    pub date: NaiveDate,
    /// In the order they are eaten, only the meals that have something planned.
    pub meals: Vec<PlannedMeal>,
}

impl PlanDay {
    pub fn totals(&self) -> Macros {
        self.meals
            .iter()
            .fold(Macros::default(), |sum, m| sum + m.recipe.macros)
    }
}

#[derive(Clone, Debug)]
pub struct MealPlanDetails {
    pub plan: MealPlan,
    /// Earliest first, only days that have something planned.
    pub days: Vec<PlanDay>,
}

/// One of the caller's plans broken down by day and meal. A plan belonging to someone else is
/// reported as not found.
pub fn meal_plan_details(
    conn: &mut database::Connection,
    session: &Session,
    plan_id: MealPlanId,
) -> Result<MealPlanDetails> {
    let plan = query::meal_plans::find_owned_meal_plan(conn, plan_id, session.user_id)?
        .ok_or_else(|| Error::not_found("meal plan", plan_id))?;

    let mut by_day: BTreeMap<NaiveDate, BTreeMap<MealType, PlannedRecipe>> = BTreeMap::new();
    for (entry, recipe) in query::meal_plan_recipes::planned_recipes(conn, plan_id)? {
        by_day.entry(entry.meal_date).or_default().insert(
            entry.meal_type,
            PlannedRecipe {
                recipe_id: recipe.id,
                macros: Macros::of(&recipe),
                title: recipe.title,
            },
        );
    }

    let days = by_day
        .into_iter()
        .map(|(date, meals)| PlanDay {
            date,
            meals: meals
                .into_iter()
                .map(|(meal_type, recipe)| PlannedMeal { meal_type, recipe })
                .collect(),
        })
        .collect();
    Ok(MealPlanDetails { plan, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::fixtures;
    use crate::database::models::{MealPlanRecipe, NewMealPlan, NewRecipe};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn plan(conn: &mut database::Connection, session: &Session) -> MealPlanId {
        query::meal_plans::insert_meal_plan(
            conn,
            &NewMealPlan {
                user_id: session.user_id,
                name: "April",
                start_date: day(1),
                end_date: day(30),
            },
        )
        .unwrap()
    }

    fn schedule(
        conn: &mut database::Connection,
        plan_id: MealPlanId,
        recipe_id: RecipeId,
        meal_date: NaiveDate,
        meal_type: MealType,
    ) {
        query::meal_plan_recipes::add_meal_plan_recipe(
            conn,
            &MealPlanRecipe {
                plan_id,
                recipe_id,
                meal_date,
                meal_type,
            },
        )
        .unwrap();
    }

    fn session(conn: &mut database::Connection, username: &str) -> Session {
        Session {
            user_id: fixtures::user(conn, username),
            username: username.into(),
        }
    }

    #[test]
    fn grouped_by_day_then_meal() {
        let mut db = database::test_database();
        let conn = db.conn();
        let alice = session(conn, "alice");
        let porridge = fixtures::recipe(conn, alice.user_id, "Porridge", &[]);
        let salad = fixtures::recipe(conn, alice.user_id, "Salad", &[]);
        let plan_id = plan(conn, &alice);

        schedule(conn, plan_id, salad, day(3), MealType::Dinner);
        schedule(conn, plan_id, porridge, day(3), MealType::Snack);
        schedule(conn, plan_id, salad, day(2), MealType::Lunch);
        schedule(conn, plan_id, porridge, day(3), MealType::Breakfast);

        let details = meal_plan_details(conn, &alice, plan_id).unwrap();
        assert_eq!(details.plan.name, "April");

        let layout: Vec<_> = details
            .days
            .iter()
            .map(|d| {
                (
                    d.date,
                    d.meals
                        .iter()
                        .map(|m| (m.meal_type, m.recipe.title.as_str()))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        assert_eq!(
            layout,
            [
                (day(2), vec![(MealType::Lunch, "Salad")]),
                (
                    day(3),
                    vec![
                        (MealType::Breakfast, "Porridge"),
                        (MealType::Dinner, "Salad"),
                        (MealType::Snack, "Porridge"),
                    ]
                ),
            ]
        );

        let calories: BTreeMap<_, _> = details
            .days
            .iter()
            .map(|d| (d.date, d.totals().calories))
            .collect();
        assert_eq!(calories, maplit::btreemap! { day(2) => 450, day(3) => 1350 });
    }

    #[test]
    fn macros_match_the_recipe() {
        let mut db = database::test_database();
        let conn = db.conn();
        let alice = session(conn, "alice");
        let recipe_id = fixtures::recipe(conn, alice.user_id, "Chicken Rice", &[]);
        let plan_id = plan(conn, &alice);
        schedule(conn, plan_id, recipe_id, day(5), MealType::Lunch);
        schedule(conn, plan_id, recipe_id, day(5), MealType::Dinner);

        let details = meal_plan_details(conn, &alice, plan_id).unwrap();
        let recipe = query::recipes::get_recipe(conn, recipe_id).unwrap();
        let lunch = &details.days[0].meals[0].recipe;
        assert_eq!(
            lunch.macros,
            Macros {
                calories: recipe.calories.into(),
                protein: recipe.protein,
                carbs: recipe.carbs,
                fats: recipe.fats,
            }
        );
        assert_eq!(
            details.days[0].totals(),
            Macros {
                calories: 900,
                protein: 61.0,
                carbs: 80.5,
                fats: 24.0,
            }
        );
        assert_eq!(
            lunch.macros.to_string(),
            "Calories: 450, Protein: 30.5g, Carbs: 40.25g, Fats: 12g"
        );
    }

    #[test]
    fn one_recipe_per_slot() {
        let mut db = database::test_database();
        let conn = db.conn();
        let alice = session(conn, "alice");
        let porridge = fixtures::recipe(conn, alice.user_id, "Porridge", &[]);
        let salad = fixtures::recipe(conn, alice.user_id, "Salad", &[]);
        let plan_id = plan(conn, &alice);
        schedule(conn, plan_id, porridge, day(1), MealType::Lunch);

        let err = query::meal_plan_recipes::add_meal_plan_recipe(
            conn,
            &MealPlanRecipe {
                plan_id,
                recipe_id: salad,
                meal_date: day(1),
                meal_type: MealType::Lunch,
            },
        )
        .unwrap_err();
        assert!(err.is_conflict());

        let details = meal_plan_details(conn, &alice, plan_id).unwrap();
        assert_eq!(details.days.len(), 1);
        assert_eq!(details.days[0].meals.len(), 1);
        assert_eq!(details.days[0].meals[0].recipe.recipe_id, porridge);
    }

    #[test]
    fn day_totals_do_not_overflow() {
        let mut db = database::test_database();
        let conn = db.conn();
        let alice = session(conn, "alice");
        let feast = query::recipes::insert_recipe(
            conn,
            &NewRecipe {
                calories: 2_000_000_000,
                ..fixtures::new_recipe(alice.user_id, "Feast")
            },
        )
        .unwrap();
        let plan_id = plan(conn, &alice);
        schedule(conn, plan_id, feast, day(9), MealType::Lunch);
        schedule(conn, plan_id, feast, day(9), MealType::Dinner);

        let details = meal_plan_details(conn, &alice, plan_id).unwrap();
        assert_eq!(details.days[0].totals().calories, 4_000_000_000);
    }

    #[test]
    fn other_users_plan_not_found() {
        let mut db = database::test_database();
        let conn = db.conn();
        let alice = session(conn, "alice");
        let bob = session(conn, "bob");
        let plan_id = plan(conn, &alice);

        assert!(matches!(
            meal_plan_details(conn, &bob, plan_id),
            Err(Error::NotFound { .. })
        ));
        assert!(meal_plan_details(conn, &alice, plan_id)
            .unwrap()
            .days
            .is_empty());
        assert_eq!(list_meal_plans(conn, &alice).unwrap().len(), 1);
        assert!(list_meal_plans(conn, &bob).unwrap().is_empty());
    }
}
