// Copyright 2023 Remi Bernotavicius

//! Command line surface. Every subcommand maps onto one operation or report and prints what it
//! gets back.

use crate::database::models::{Difficulty, IngredientDetails, MealPlanId, MealType, RecipeId};
use crate::database::Database;
use crate::error::Result;
use crate::operations::account::{self, Registration};
use crate::operations::feedback::{self, FeedbackForm, FeedbackOutcome};
use crate::operations::recipe::{self, IngredientEntry, RecipeForm, TagEntry};
use crate::operations::{meal_plan, pantry};
use crate::report::meal_plans::MealPlanDetails;
use crate::report::recipes::{RecipeDetail, RecipeFilter};
use crate::report::recommend::Recommendations;
use crate::report::search::SearchCriteria;
use crate::report::{meal_plans, recipes, recommend, search};
use crate::session::SessionState;
use crate::table::{self, Tabular};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(value_name = "USERNAME")]
        new_username: String,
        email: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm: String,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Show or change your account
    #[command(subcommand)]
    Profile(ProfileCommand),

    #[command(subcommand)]
    Recipes(RecipeCommand),

    /// List every tag
    Tags,

    #[command(subcommand)]
    Plans(PlanCommand),

    #[command(subcommand)]
    Pantry(PantryCommand),

    /// Rate a recipe you've cooked. Rating again replaces your earlier rating.
    Feedback {
        recipe_id: i32,
        /// 1 to 5
        #[arg(long)]
        rating: i32,
        /// 1 to 5
        #[arg(long)]
        difficulty: i32,
        /// Minutes it actually took
        #[arg(long)]
        time: Option<i32>,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    /// Blank values are left alone
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    List {
        /// Only your own recipes
        #[arg(long, conflicts_with = "public")]
        mine: bool,
        /// Only public recipes
        #[arg(long)]
        public: bool,
    },
    Show {
        recipe_id: i32,
    },
    Add(AddRecipe),
    /// Search public recipes
    Search {
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// In minutes
        #[arg(long)]
        max_cook_time: Option<i32>,
        /// Match recipes with any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Recipes that use what's in your pantry
    Recommend,
}

#[derive(Debug, Args)]
pub struct AddRecipe {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    instructions: String,
    /// In minutes
    #[arg(long, default_value = "0")]
    prep_time: String,
    /// In minutes
    #[arg(long, default_value = "0")]
    cook_time: String,
    #[arg(long, default_value = "1")]
    servings: String,
    #[arg(long, default_value = "0")]
    calories: String,
    /// In grams
    #[arg(long, default_value = "0")]
    protein: String,
    /// In grams
    #[arg(long, default_value = "0")]
    carbs: String,
    /// In grams
    #[arg(long, default_value = "0")]
    fats: String,
    #[arg(long, default_value = "")]
    cuisine: String,
    /// Easy, Medium or Hard
    #[arg(long, default_value = "Easy")]
    difficulty: String,
    /// Keep the recipe to yourself
    #[arg(long)]
    private: bool,
    /// NAME:QUANTITY[:UNIT[:NOTES]], repeat for each ingredient
    #[arg(long = "ingredient", value_parser = parse_ingredient)]
    ingredients: Vec<IngredientEntry>,
    /// Repeat for each tag
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    List,
    Create {
        name: String,
        /// YYYY-MM-DD
        start: NaiveDate,
        /// YYYY-MM-DD
        end: NaiveDate,
    },
    /// Schedule a recipe for a meal
    Add {
        plan_id: i32,
        recipe_id: i32,
        /// YYYY-MM-DD
        date: NaiveDate,
        /// Breakfast, Lunch, Dinner or Snack
        meal: MealType,
    },
    Show {
        plan_id: i32,
    },
}

#[derive(Debug, Subcommand)]
pub enum PantryCommand {
    List,
    /// Record how much of an ingredient you have, replacing what was recorded before
    Add {
        ingredient: String,
        quantity: f32,
        /// YYYY-MM-DD
        #[arg(long)]
        expires: Option<NaiveDate>,
        /// Used if the ingredient is new
        #[arg(long)]
        category: Option<String>,
        /// Used if the ingredient is new
        #[arg(long)]
        unit: Option<String>,
    },
    Remove {
        ingredient: String,
    },
}

fn parse_ingredient(arg: &str) -> std::result::Result<IngredientEntry, String> {
    let mut parts = arg.splitn(4, ':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err("expected NAME:QUANTITY[:UNIT[:NOTES]]".into());
    }
    let quantity = parts.next().unwrap_or_default();
    let unit = parts.next().map(String::from);
    let notes = parts.next().map(String::from);
    Ok(IngredientEntry {
        name: name.into(),
        quantity: quantity.into(),
        details: IngredientDetails {
            unit: unit.clone(),
            ..Default::default()
        },
        unit,
        notes,
    })
}

fn print_table<T: Tabular>(records: &[T], empty_message: &str) -> Result<()> {
    if records.is_empty() {
        println!("{empty_message}");
    } else {
        print!("{}", table::render(records)?);
    }
    Ok(())
}

fn print_recipe(detail: &RecipeDetail) -> Result<()> {
    let recipe = &detail.recipe;
    println!("--- {} ---", recipe.title);
    println!(
        "Cuisine: {}  Difficulty: {}  Servings: {}",
        recipe.cuisine, recipe.difficulty, recipe.servings
    );
    println!(
        "Prep: {} min  Cook: {} min",
        recipe.prep_time, recipe.cook_time
    );
    println!(
        "Calories: {}, Protein: {}g, Carbs: {}g, Fats: {}g",
        recipe.calories, recipe.protein, recipe.carbs, recipe.fats
    );
    if !detail.tags.is_empty() {
        println!("Tags: {}", detail.tag_list());
    }
    println!();
    print_table(&detail.ingredients, "No ingredients listed.")?;
    println!();
    println!("{}", recipe.instructions);

    if !detail.feedback.is_empty() {
        println!();
        println!("--- Feedback ---");
        for f in &detail.feedback {
            print!(
                "{} rated {}/5, difficulty {}/5",
                f.username, f.rating, f.difficulty_rating
            );
            if let Some(minutes) = f.actual_cooking_time {
                print!(", took {minutes} min");
            }
            println!(" ({})", f.created_at.format("%Y-%m-%d %H:%M"));
            if let Some(comment) = &f.comment {
                println!("  {comment}");
            }
        }
    }
    Ok(())
}

fn print_meal_plan(details: &MealPlanDetails) {
    let plan = &details.plan;
    println!("--- Meal Plan: {} ---", plan.name);
    println!("From {} to {}", plan.start_date, plan.end_date);
    if details.days.is_empty() {
        println!();
        println!("No recipes added to this meal plan.");
        return;
    }
    for day in &details.days {
        println!();
        println!("Date: {}", day.date);
        for meal in &day.meals {
            println!("  {}: {}", meal.meal_type, meal.recipe.title);
            println!("    {}", meal.recipe.macros);
        }
        println!("  Day total: {}", day.totals());
    }
}

pub fn run(db: &mut Database, sessions: &SessionState, command: Command) -> Result<()> {
    match command {
        Command::Register {
            new_username,
            email,
            new_password,
            confirm,
            bio,
        } => {
            let user_id = account::register(
                db,
                &Registration {
                    username: &new_username,
                    email: &email,
                    password: &new_password,
                    confirm_password: &confirm,
                    bio: bio.as_deref(),
                },
            )?;
            println!("Registered {new_username} with id {user_id}.");
        }
        Command::Profile(command) => {
            let session = sessions.require()?;
            match command {
                ProfileCommand::Show => {
                    let user = account::view_profile(db, session)?;
                    println!("Username: {}", user.username);
                    println!("Email:    {}", user.email);
                    println!("Bio:      {}", user.bio.unwrap_or_default());
                    println!("Joined:   {}", user.created_at.format("%Y-%m-%d"));
                }
                ProfileCommand::Update { email, bio } => {
                    if account::update_profile(db, session, email.as_deref(), bio.as_deref())? {
                        println!("Profile updated.");
                    } else {
                        println!("Nothing to update.");
                    }
                }
                ProfileCommand::Password {
                    current,
                    new_password,
                    confirm,
                } => {
                    account::change_password(db, session, &current, &new_password, &confirm)?;
                    println!("Password changed.");
                }
            }
        }
        Command::Recipes(command) => run_recipes(db, sessions, command)?,
        Command::Tags => {
            let tags = crate::query::tags::all_tags(db.conn())?;
            print_table(&tags, "No tags yet.")?;
        }
        Command::Plans(command) => {
            let session = sessions.require()?;
            match command {
                PlanCommand::List => {
                    let plans = meal_plans::list_meal_plans(db.conn(), session)?;
                    print_table(&plans, "No meal plans found.")?;
                }
                PlanCommand::Create { name, start, end } => {
                    let plan_id = meal_plan::create_meal_plan(db, session, &name, start, end)?;
                    println!("Created meal plan {plan_id}.");
                }
                PlanCommand::Add {
                    plan_id,
                    recipe_id,
                    date,
                    meal,
                } => {
                    meal_plan::add_recipe_to_meal_plan(
                        db,
                        session,
                        MealPlanId(plan_id),
                        RecipeId(recipe_id),
                        date,
                        meal,
                    )?;
                    println!("Added recipe {recipe_id} to {meal} on {date}.");
                }
                PlanCommand::Show { plan_id } => {
                    let details =
                        meal_plans::meal_plan_details(db.conn(), session, MealPlanId(plan_id))?;
                    print_meal_plan(&details);
                }
            }
        }
        Command::Pantry(command) => {
            let session = sessions.require()?;
            match command {
                PantryCommand::List => {
                    let lines = crate::report::pantry::view_pantry(db.conn(), session)?;
                    print_table(&lines, "Pantry is empty.")?;
                }
                PantryCommand::Add {
                    ingredient,
                    quantity,
                    expires,
                    category,
                    unit,
                } => {
                    let details = IngredientDetails {
                        category,
                        unit,
                        nutritional_info: None,
                    };
                    pantry::add_to_pantry(db, session, &ingredient, &details, quantity, expires)?;
                    println!("Stocked {quantity} of {ingredient}.");
                }
                PantryCommand::Remove { ingredient } => {
                    if pantry::remove_from_pantry(db, session, &ingredient)? {
                        println!("Removed {ingredient} from the pantry.");
                    } else {
                        println!("{ingredient} wasn't in the pantry.");
                    }
                }
            }
        }
        Command::Feedback {
            recipe_id,
            rating,
            difficulty,
            time,
            comment,
        } => {
            let session = sessions.require()?;
            let form = FeedbackForm {
                rating,
                difficulty_rating: difficulty,
                actual_cooking_time: time,
                comment,
            };
            match feedback::submit_feedback(db, session, RecipeId(recipe_id), &form)? {
                FeedbackOutcome::Created => println!("Thanks for your feedback."),
                FeedbackOutcome::Replaced => println!("Your earlier feedback was replaced."),
            }
        }
    }
    Ok(())
}

fn run_recipes(db: &mut Database, sessions: &SessionState, command: RecipeCommand) -> Result<()> {
    match command {
        RecipeCommand::List { mine, public } => {
            let filter = if mine {
                RecipeFilter::OwnedBy(sessions.require()?.user_id)
            } else if public {
                RecipeFilter::Public
            } else {
                RecipeFilter::All
            };
            let found = recipes::list_recipes(db.conn(), filter)?;
            print_table(&found, "No recipes found.")?;
        }
        RecipeCommand::Show { recipe_id } => {
            let detail = recipes::recipe_detail(db.conn(), RecipeId(recipe_id))?;
            print_recipe(&detail)?;
        }
        RecipeCommand::Add(add) => {
            let session = sessions.require()?;
            let form = RecipeForm {
                title: add.title,
                instructions: add.instructions,
                prep_time: add.prep_time,
                cook_time: add.cook_time,
                servings: add.servings,
                calories: add.calories,
                protein: add.protein,
                carbs: add.carbs,
                fats: add.fats,
                cuisine: add.cuisine,
                difficulty: add.difficulty,
                is_public: !add.private,
                ingredients: add.ingredients,
                tags: add
                    .tags
                    .into_iter()
                    .map(|name| TagEntry {
                        name,
                        description: None,
                    })
                    .collect(),
            };
            let recipe_id = recipe::create_recipe(db, session, &form)?;
            println!("Created recipe {recipe_id}.");
        }
        RecipeCommand::Search {
            cuisine,
            difficulty,
            max_cook_time,
            tags,
        } => {
            let criteria = SearchCriteria {
                cuisine,
                difficulty,
                max_cook_time,
                tags,
            };
            let hits = search::search_recipes(db.conn(), &criteria)?;
            print_table(&hits, "No recipes found matching your criteria.")?;
        }
        RecipeCommand::Recommend => {
            let session = sessions.require()?;
            match recommend::recommend_from_pantry(db.conn(), session)? {
                Recommendations::EmptyPantry => println!("Your pantry is empty."),
                Recommendations::Ranked(ranked) => print_table(
                    &ranked,
                    "No recipes found that match your pantry ingredients.",
                )?,
            }
        }
    }
    Ok(())
}

#[test]
fn ingredient_argument() {
    let entry = parse_ingredient("Olive Oil:2:tbsp:extra virgin").unwrap();
    assert_eq!(entry.name, "Olive Oil");
    assert_eq!(entry.quantity, "2");
    assert_eq!(entry.unit.as_deref(), Some("tbsp"));
    assert_eq!(entry.notes.as_deref(), Some("extra virgin"));
    assert_eq!(entry.details.unit.as_deref(), Some("tbsp"));

    let entry = parse_ingredient("Salt").unwrap();
    assert_eq!(entry.quantity, "");
    assert_eq!(entry.unit, None);

    assert!(parse_ingredient(":3").is_err());
}
