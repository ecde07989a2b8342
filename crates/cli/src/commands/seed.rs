//! Catalog seeding command.
//!
//! Inserts a handful of starter meal packages so a fresh environment has
//! something to render. Refuses to run against a non-empty catalog.

use rust_decimal::Decimal;

use mealkit_api::db::meals::{MealInput, MealRepository};

use super::CommandError;

/// Seed the meal catalog with starter data.
///
/// # Errors
///
/// Returns an error if the catalog already has meals or a database
/// operation fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let repo = MealRepository::new(&pool);

    let existing = repo.list_all().await?;
    if !existing.is_empty() {
        tracing::warn!(
            count = existing.len(),
            "Catalog already has meals, refusing to seed"
        );
        return Ok(());
    }

    for input in starter_meals() {
        let meal = repo.create(&input).await?;
        tracing::info!(meal_id = %meal.id, name = %meal.name, "Seeded meal");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}

fn starter_meals() -> Vec<MealInput> {
    vec![
        MealInput {
            name: "Family Box".to_string(),
            description: Some("Four dinners for four people".to_string()),
            image: Some("family-box.jpg".to_string()),
            price: Decimal::new(64900, 2),
        },
        MealInput {
            name: "Veggie Box".to_string(),
            description: Some("Three vegetarian dinners for two".to_string()),
            image: Some("veggie-box.jpg".to_string()),
            price: Decimal::new(44900, 2),
        },
        MealInput {
            name: "Quick & Easy".to_string(),
            description: Some("Three 20-minute dinners for two".to_string()),
            image: Some("quick-easy.jpg".to_string()),
            price: Decimal::new(39900, 2),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_meals_are_valid_inputs() {
        let meals = starter_meals();
        assert!(!meals.is_empty());
        for meal in meals {
            assert!(!meal.name.trim().is_empty());
            assert!(meal.price > Decimal::ZERO);
        }
    }
}
