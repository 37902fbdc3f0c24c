// Copyright 2023 Remi Bernotavicius

use derive_more::Display;
use diesel::associations::{Associations, Identifiable};
use diesel::deserialize::Queryable;
use diesel::expression::Selectable;
use diesel::prelude::Insertable;
use diesel_derive_enum::DbEnum;
use diesel_derive_newtype::DieselNewType;
use strum::{EnumIter, EnumString};

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct UserId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::users)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::database::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub bio: Option<&'a str>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct IngredientId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::ingredients)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub nutritional_info: Option<String>,
}

/// The attributes an ingredient is created with when its name isn't known yet.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct IngredientDetails {
    pub category: Option<String>,
    pub unit: Option<String>,
    pub nutritional_info: Option<String>,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct TagId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::tags)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(
    Debug, Display, EnumIter, EnumString, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, DbEnum,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[display("Easy")]
    Easy,
    #[display("Medium")]
    Medium,
    #[display("Hard")]
    Hard,
}

impl Difficulty {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct RecipeId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct Recipe {
    pub id: RecipeId,
    pub user_id: UserId,
    pub title: String,
    pub instructions: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub calories: i32,
    pub protein: f32,
    pub carbs: f32,
    pub fats: f32,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub is_public: bool,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct NewRecipe {
    pub user_id: UserId,
    pub title: String,
    pub instructions: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub calories: i32,
    pub protein: f32,
    pub carbs: f32,
    pub fats: f32,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub is_public: bool,
}

#[derive(Associations, Queryable, Selectable, Identifiable, Insertable, Clone, Debug)]
#[diesel(belongs_to(Recipe))]
#[diesel(belongs_to(Ingredient))]
#[diesel(primary_key(recipe_id, ingredient_id))]
#[diesel(table_name = crate::database::schema::recipe_ingredients)]
pub struct RecipeIngredient {
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub quantity: f32,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

#[derive(Associations, Queryable, Selectable, Identifiable, Insertable, Clone, Debug)]
#[diesel(belongs_to(Recipe))]
#[diesel(belongs_to(Tag))]
#[diesel(primary_key(recipe_id, tag_id))]
#[diesel(table_name = crate::database::schema::recipe_tags)]
pub struct RecipeTag {
    pub recipe_id: RecipeId,
    pub tag_id: TagId,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct MealPlanId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::meal_plans)]
pub struct MealPlan {
    pub id: MealPlanId,
    pub user_id: UserId,
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::database::schema::meal_plans)]
pub struct NewMealPlan<'a> {
    pub user_id: UserId,
    pub name: &'a str,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// Meals sort in the order they are eaten during a day.
#[derive(
    Debug, Display, EnumString, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, DbEnum,
)]
#[strum(ascii_case_insensitive)]
pub enum MealType {
    #[display("Breakfast")]
    Breakfast,
    #[display("Lunch")]
    Lunch,
    #[display("Dinner")]
    Dinner,
    #[display("Snack")]
    Snack,
}

#[derive(Queryable, Selectable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::meal_plan_recipes)]
pub struct MealPlanRecipe {
    pub plan_id: MealPlanId,
    pub recipe_id: RecipeId,
    pub meal_date: chrono::NaiveDate,
    pub meal_type: MealType,
}

#[derive(Queryable, Selectable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::pantry)]
pub struct PantryItem {
    pub user_id: UserId,
    pub ingredient_id: IngredientId,
    pub quantity: f32,
    pub expiry_date: Option<chrono::NaiveDate>,
    pub purchase_date: chrono::NaiveDate,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct FeedbackId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::recipe_feedback)]
pub struct RecipeFeedback {
    pub id: FeedbackId,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub rating: i32,
    pub difficulty_rating: i32,
    pub actual_cooking_time: Option<i32>,
    pub comment: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::recipe_feedback)]
pub struct NewFeedback<'a> {
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub rating: i32,
    pub difficulty_rating: i32,
    pub actual_cooking_time: Option<i32>,
    pub comment: Option<&'a str>,
    pub created_at: chrono::NaiveDateTime,
}
