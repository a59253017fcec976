pub mod narration;

use std::fmt;

use serde::Deserialize;

pub use narration::{narrate, Section};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitnessPlan {
    pub workout_plan: WorkoutPlan,
    pub diet_plan: DietPlan,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutPlan {
    pub overview: String,
    pub weekly_schedule: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutDay {
    pub day: String,
    pub duration: Option<String>,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    pub name: String,
    pub sets: Option<Quantity>,
    pub reps: Option<Quantity>,
    pub rest_time: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietPlan {
    pub overview: String,
    pub daily_meals: Vec<MealDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MealDay {
    pub day: String,
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub dinner: Option<Meal>,
    pub snacks: Option<Meal>,
}

impl MealDay {
    pub fn meals(&self) -> impl Iterator<Item = (&'static str, &Meal)> {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Dinner", &self.dinner),
            ("Snacks", &self.snacks),
        ]
        .into_iter()
        .filter_map(|(slot, meal)| meal.as_ref().map(|m| (slot, m)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Meal {
    pub name: String,
    pub calories: Option<Quantity>,
}

/// Counts the generator emits either as numbers or as free text ("8-12").
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}
