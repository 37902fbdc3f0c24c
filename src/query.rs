// Copyright 2023 Remi Bernotavicius

//! Per-table primitives. None of these open a transaction; callers that need several of them to
//! land together run them inside [`crate::database::Database::with_transaction`].

pub mod feedback;
pub mod ingredients;
pub mod meal_plan_recipes;
pub mod meal_plans;
pub mod pantry;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod tags;
pub mod users;
