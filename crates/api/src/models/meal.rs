//! Meal catalog models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mealkit_core::{MealId, Price};

/// A meal package as stored in the database.
///
/// `image` holds the file name relative to the image host; the absolute
/// URL is only assembled in [`MealResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a meal with an absolute image URL.
#[derive(Debug, Clone, Serialize)]
pub struct MealResponse {
    pub id: MealId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Price,
}

impl MealResponse {
    /// Build the public view, resolving `image` against the image host.
    #[must_use]
    pub fn from_meal(meal: &Meal, img_base_url: &str) -> Self {
        let image = meal
            .image
            .as_ref()
            .map(|name| join_image_url(img_base_url, name));

        Self {
            id: meal.id,
            name: meal.name.clone(),
            description: meal.description.clone(),
            image,
            price: Price::from_amount(meal.price),
        }
    }
}

/// Join an image file name onto the image host without doubling slashes.
fn join_image_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name.trim_start_matches('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn meal(image: Option<&str>) -> Meal {
        Meal {
            id: MealId::new(),
            name: "Family Box".to_string(),
            description: Some("Four dinners for four".to_string()),
            image: image.map(String::from),
            price: Decimal::new(64900, 2),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_image_url_joined_against_host() {
        let resp = MealResponse::from_meal(&meal(Some("family-box.jpg")), "https://img.example.com/");
        assert_eq!(
            resp.image.as_deref(),
            Some("https://img.example.com/family-box.jpg")
        );
    }

    #[test]
    fn test_image_url_strips_leading_slash() {
        let resp = MealResponse::from_meal(&meal(Some("/family-box.jpg")), "https://img.example.com");
        assert_eq!(
            resp.image.as_deref(),
            Some("https://img.example.com/family-box.jpg")
        );
    }

    #[test]
    fn test_missing_image_stays_none() {
        let resp = MealResponse::from_meal(&meal(None), "https://img.example.com");
        assert!(resp.image.is_none());
    }
}
