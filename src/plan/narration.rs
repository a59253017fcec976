use serde::Deserialize;

use super::{DietPlan, FitnessPlan, WorkoutPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Workout,
    Diet,
    #[default]
    Both,
}

pub fn narrate(plan: &FitnessPlan, section: Section) -> String {
    match section {
        Section::Workout => workout_text(&plan.workout_plan),
        Section::Diet => diet_text(&plan.diet_plan),
        Section::Both => {
            let text = format!(
                "{} {}",
                workout_text(&plan.workout_plan),
                diet_text(&plan.diet_plan)
            );
            collapse_whitespace(&text)
        }
    }
}

pub fn workout_text(workout: &WorkoutPlan) -> String {
    let mut out = String::new();
    push_sentence(&mut out, &workout.overview);

    for day in &workout.weekly_schedule {
        match day.duration.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(duration) => push_sentence(&mut out, &format!("{}: {}", day.day, duration)),
            None => push_sentence(&mut out, &day.day),
        }

        for exercise in &day.exercises {
            let mut line = exercise.name.clone();
            match (&exercise.sets, &exercise.reps) {
                (Some(sets), Some(reps)) => line.push_str(&format!(", {} sets of {} reps", sets, reps)),
                (Some(sets), None) => line.push_str(&format!(", {} sets", sets)),
                (None, Some(reps)) => line.push_str(&format!(", {} reps", reps)),
                (None, None) => {}
            }
            if let Some(rest) = exercise.rest_time.as_deref().filter(|r| !r.trim().is_empty()) {
                line.push_str(&format!(", rest {}", rest));
            }
            push_sentence(&mut out, &line);

            if let Some(instructions) = &exercise.instructions {
                push_sentence(&mut out, instructions);
            }
        }
    }

    collapse_whitespace(&out)
}

pub fn diet_text(diet: &DietPlan) -> String {
    let mut out = String::new();
    push_sentence(&mut out, &diet.overview);

    for day in &diet.daily_meals {
        push_sentence(&mut out, &day.day);

        for (slot, meal) in day.meals() {
            let mut line = format!("{}: {}", slot, meal.name);
            if let Some(calories) = &meal.calories {
                line.push_str(&format!(", {} calories", calories));
            }
            push_sentence(&mut out, &line);
        }
    }

    collapse_whitespace(&out)
}

/// Appends `text` as a sentence, adding a full stop unless it already ends one.
fn push_sentence(out: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(text);
    if !text.ends_with(['.', '!', '?']) {
        out.push('.');
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_plan() -> FitnessPlan {
        serde_json::from_value(json!({
            "workoutPlan": {
                "overview": "A three day full body split",
                "weeklySchedule": [{
                    "day": "Monday",
                    "duration": "45 minutes",
                    "exercises": [
                        { "name": "Squats", "sets": 3, "reps": "10", "restTime": "60 seconds",
                          "instructions": "Keep your\n chest up." },
                        { "name": "Plank" }
                    ]
                }]
            },
            "dietPlan": {
                "overview": "High protein vegetarian",
                "dailyMeals": [{
                    "day": "Monday",
                    "breakfast": { "name": "Paneer bhurji", "calories": 350 },
                    "dinner": { "name": "Dal and rice" }
                }]
            },
            "tips": ["Sleep eight hours"]
        }))
        .unwrap()
    }

    #[test]
    fn workout_narration() {
        assert_eq!(
            narrate(&sample_plan(), Section::Workout),
            "A three day full body split. Monday: 45 minutes. \
             Squats, 3 sets of 10 reps, rest 60 seconds. Keep your chest up. Plank."
        );
    }

    #[test]
    fn diet_narration() {
        assert_eq!(
            narrate(&sample_plan(), Section::Diet),
            "High protein vegetarian. Monday. Breakfast: Paneer bhurji, 350 calories. Dinner: Dal and rice."
        );
    }

    #[test]
    fn both_joins_workout_then_diet() {
        let plan = sample_plan();
        let both = narrate(&plan, Section::Both);
        assert_eq!(
            both,
            format!(
                "{} {}",
                narrate(&plan, Section::Workout),
                narrate(&plan, Section::Diet)
            )
        );
    }

    #[test]
    fn empty_plan_is_silent() {
        assert_eq!(narrate(&FitnessPlan::default(), Section::Both), "");
    }

    #[test]
    fn section_defaults_to_both() {
        assert_eq!(Section::default(), Section::Both);
        let parsed: Section = serde_json::from_value(json!("diet")).unwrap();
        assert_eq!(parsed, Section::Diet);
    }
}
