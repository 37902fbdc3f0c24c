// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{MealPlan, MealPlanId, NewMealPlan, UserId};
use crate::error::Result;
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub fn insert_meal_plan(
    conn: &mut database::Connection,
    new_plan: &NewMealPlan<'_>,
) -> Result<MealPlanId> {
    use database::schema::meal_plans::dsl::*;
    use diesel::insert_into;

    Ok(insert_into(meal_plans)
        .values(new_plan)
        .returning(id)
        .get_result(conn)?)
}

/// The plan with `plan_id`, but only if `owner` is the one who made it.
pub fn find_owned_meal_plan(
    conn: &mut database::Connection,
    plan_id: MealPlanId,
    owner: UserId,
) -> Result<Option<MealPlan>> {
    use database::schema::meal_plans::dsl::*;

    Ok(meal_plans
        .select(MealPlan::as_select())
        .filter(id.eq(plan_id))
        .filter(user_id.eq(owner))
        .get_result(conn)
        .optional()?)
}

pub fn meal_plans_for_user(
    conn: &mut database::Connection,
    owner: UserId,
) -> Result<Vec<MealPlan>> {
    use database::schema::meal_plans::dsl::*;

    Ok(meal_plans
        .select(MealPlan::as_select())
        .filter(user_id.eq(owner))
        .order_by((start_date.asc(), id.asc()))
        .load(conn)?)
}

#[test]
fn plans_are_scoped_to_their_owner() {
    use crate::database::fixtures;
    use chrono::NaiveDate;

    let mut db = database::test_database();
    let conn = db.conn();
    let alice = fixtures::user(conn, "alice");
    let bob = fixtures::user(conn, "bob");

    let week = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
    let later = insert_meal_plan(
        conn,
        &NewMealPlan {
            user_id: alice,
            name: "Second week",
            start_date: week(11),
            end_date: week(17),
        },
    )
    .unwrap();
    let earlier = insert_meal_plan(
        conn,
        &NewMealPlan {
            user_id: alice,
            name: "First week",
            start_date: week(4),
            end_date: week(10),
        },
    )
    .unwrap();

    let plans = meal_plans_for_user(conn, alice).unwrap();
    assert_eq!(
        plans.iter().map(|p| p.id).collect::<Vec<_>>(),
        [earlier, later]
    );
    assert!(meal_plans_for_user(conn, bob).unwrap().is_empty());

    assert_eq!(
        find_owned_meal_plan(conn, later, alice).unwrap().unwrap().name,
        "Second week"
    );
    assert_eq!(find_owned_meal_plan(conn, later, bob).unwrap(), None);
}
