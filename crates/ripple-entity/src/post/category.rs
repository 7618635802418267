//! Post category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content categories a post is tagged with.
///
/// The category drives the interest-affinity stage of the recommendation
/// cascade, so it is a closed enum rather than a free-form tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    /// A full recipe with ingredients and steps.
    Recipe,
    /// A photo of a prepared meal.
    MealPhoto,
    /// A nutrition tip or fact.
    NutritionTip,
    /// A cooking technique demonstration.
    CookingTechnique,
}

impl PostCategory {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recipe => "recipe",
            Self::MealPhoto => "meal_photo",
            Self::NutritionTip => "nutrition_tip",
            Self::CookingTechnique => "cooking_technique",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = ripple_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recipe" => Ok(Self::Recipe),
            "meal_photo" => Ok(Self::MealPhoto),
            "nutrition_tip" => Ok(Self::NutritionTip),
            "cooking_technique" => Ok(Self::CookingTechnique),
            _ => Err(ripple_core::AppError::validation(format!(
                "Invalid post category: '{s}'"
            ))),
        }
    }
}
