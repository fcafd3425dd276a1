//! Workout catalogue: one session template per goal
//!
//! Main-block prescriptions (sets, reps, rest) are tabulated per fitness
//! level; warmup and cooldown are shared across levels.

use super::substitution;
use super::{DefaultWorkoutPlan, Exercise, FitnessGoal, FitnessLevel, WorkoutPlanContent};
use crate::errors::PlanError;

/// Timed movement used in warmups and cooldowns
struct Drill {
    name: &'static str,
    emoji: &'static str,
    duration: &'static str,
}

impl From<&Drill> for Exercise {
    fn from(d: &Drill) -> Self {
        Exercise {
            name: d.name.to_string(),
            emoji: d.emoji.to_string(),
            duration: Some(d.duration.to_string()),
            ..Default::default()
        }
    }
}

/// Main-block exercise with a prescription per fitness level
struct Lift {
    name: &'static str,
    emoji: &'static str,
    sets: [u32; 3],
    reps: [&'static str; 3],
    rest: [&'static str; 3],
}

impl Lift {
    fn prescribe(&self, level: FitnessLevel) -> Exercise {
        let i = level.index();
        Exercise {
            name: self.name.to_string(),
            emoji: self.emoji.to_string(),
            sets: Some(self.sets[i]),
            reps: Some(self.reps[i].to_string()),
            duration: None,
            rest: Some(self.rest[i].to_string()),
        }
    }
}

struct Session {
    description: &'static str,
    warmup: &'static [Drill],
    main: &'static [Lift],
    cooldown: &'static [Drill],
    /// Estimated kcal per session, indexed by fitness level
    calories_burned: [i32; 3],
}

const GENERAL_WARMUP: &[Drill] = &[
    Drill { name: "Jumping Jacks", emoji: "⭐", duration: "2 minutes" },
    Drill { name: "Arm Circles", emoji: "🔄", duration: "1 minute" },
    Drill { name: "Leg Swings", emoji: "🦵", duration: "1 minute per leg" },
];

const STRENGTH_WARMUP: &[Drill] = &[
    Drill { name: "Light Jog", emoji: "🏃", duration: "3 minutes" },
    Drill { name: "Bodyweight Squats", emoji: "🏋️", duration: "1 minute" },
    Drill { name: "Band Pull-Aparts", emoji: "🎗️", duration: "1 minute" },
];

const STRETCH_COOLDOWN: &[Drill] = &[
    Drill { name: "Hamstring Stretch", emoji: "🧘", duration: "1 minute per side" },
    Drill { name: "Quad Stretch", emoji: "🦵", duration: "1 minute per side" },
    Drill { name: "Child's Pose", emoji: "🙇", duration: "2 minutes" },
];

const MOBILITY_COOLDOWN: &[Drill] = &[
    Drill { name: "Walking", emoji: "🚶", duration: "3 minutes" },
    Drill { name: "Chest Opener Stretch", emoji: "🧘", duration: "1 minute" },
    Drill { name: "Foam Rolling", emoji: "🧽", duration: "3 minutes" },
];

const WEIGHT_LOSS: Session = Session {
    description: "Circuit-style session that keeps the heart rate elevated to maximize calorie burn.",
    warmup: GENERAL_WARMUP,
    main: &[
        Lift { name: "Burpees", emoji: "💥", sets: [2, 3, 4], reps: ["8", "12", "15"], rest: ["60 seconds", "45 seconds", "30 seconds"] },
        Lift { name: "Jump Squats", emoji: "🦘", sets: [2, 3, 4], reps: ["10", "15", "20"], rest: ["60 seconds", "45 seconds", "30 seconds"] },
        Lift { name: "Mountain Climbers", emoji: "⛰️", sets: [2, 3, 4], reps: ["20", "30", "40"], rest: ["45 seconds", "30 seconds", "20 seconds"] },
        Lift { name: "Walking Lunges", emoji: "🚶", sets: [2, 3, 3], reps: ["10 per leg", "12 per leg", "16 per leg"], rest: ["60 seconds", "45 seconds", "30 seconds"] },
        Lift { name: "Sprint Intervals", emoji: "⚡", sets: [4, 6, 8], reps: ["20 seconds", "30 seconds", "30 seconds"], rest: ["90 seconds", "60 seconds", "30 seconds"] },
    ],
    cooldown: STRETCH_COOLDOWN,
    calories_burned: [250, 350, 450],
};

const MUSCLE_GAIN: Session = Session {
    description: "Compound strength session built around progressive overload.",
    warmup: STRENGTH_WARMUP,
    main: &[
        Lift { name: "Barbell Squats", emoji: "🏋️", sets: [3, 4, 5], reps: ["10", "8", "5"], rest: ["90 seconds", "2 minutes", "3 minutes"] },
        Lift { name: "Bench Press", emoji: "💪", sets: [3, 4, 5], reps: ["10", "8", "5"], rest: ["90 seconds", "2 minutes", "3 minutes"] },
        Lift { name: "Romanian Deadlifts", emoji: "🏋️", sets: [3, 4, 4], reps: ["10", "8", "6"], rest: ["90 seconds", "2 minutes", "2 minutes"] },
        Lift { name: "Bent-Over Rows", emoji: "🚣", sets: [3, 4, 4], reps: ["10", "10", "8"], rest: ["90 seconds", "90 seconds", "2 minutes"] },
        Lift { name: "Overhead Press", emoji: "🙌", sets: [3, 3, 4], reps: ["10", "8", "6"], rest: ["90 seconds", "2 minutes", "2 minutes"] },
    ],
    cooldown: MOBILITY_COOLDOWN,
    calories_burned: [220, 300, 380],
};

const ENDURANCE: Session = Session {
    description: "Aerobic base session mixing steady running with muscular endurance work.",
    warmup: GENERAL_WARMUP,
    main: &[
        Lift { name: "Steady Running", emoji: "🏃", sets: [1, 1, 1], reps: ["15 minutes", "25 minutes", "40 minutes"], rest: ["2 minutes", "2 minutes", "2 minutes"] },
        Lift { name: "Bodyweight Squats", emoji: "🦵", sets: [2, 3, 4], reps: ["15", "20", "30"], rest: ["45 seconds", "30 seconds", "30 seconds"] },
        Lift { name: "Push-Ups", emoji: "💪", sets: [2, 3, 4], reps: ["8", "15", "25"], rest: ["45 seconds", "30 seconds", "30 seconds"] },
        Lift { name: "High Knees", emoji: "🔥", sets: [2, 3, 4], reps: ["30 seconds", "45 seconds", "60 seconds"], rest: ["45 seconds", "30 seconds", "20 seconds"] },
        Lift { name: "Plank Hold", emoji: "🧱", sets: [2, 3, 3], reps: ["30 seconds", "45 seconds", "90 seconds"], rest: ["45 seconds", "30 seconds", "30 seconds"] },
    ],
    cooldown: STRETCH_COOLDOWN,
    calories_burned: [280, 400, 560],
};

const GENERAL_FITNESS: Session = Session {
    description: "Full-body session balancing strength, mobility and conditioning.",
    warmup: GENERAL_WARMUP,
    main: &[
        Lift { name: "Goblet Squats", emoji: "🏋️", sets: [2, 3, 4], reps: ["10", "12", "15"], rest: ["60 seconds", "60 seconds", "45 seconds"] },
        Lift { name: "Push-Ups", emoji: "💪", sets: [2, 3, 4], reps: ["8", "12", "20"], rest: ["60 seconds", "45 seconds", "45 seconds"] },
        Lift { name: "Dumbbell Rows", emoji: "🚣", sets: [2, 3, 4], reps: ["10 per arm", "12 per arm", "15 per arm"], rest: ["60 seconds", "45 seconds", "45 seconds"] },
        Lift { name: "Reverse Lunges", emoji: "🦵", sets: [2, 3, 3], reps: ["8 per leg", "10 per leg", "12 per leg"], rest: ["60 seconds", "45 seconds", "45 seconds"] },
        Lift { name: "Bicycle Crunches", emoji: "🚴", sets: [2, 3, 3], reps: ["12", "20", "30"], rest: ["45 seconds", "30 seconds", "30 seconds"] },
    ],
    cooldown: MOBILITY_COOLDOWN,
    calories_burned: [200, 280, 360],
};

fn session(goal: FitnessGoal) -> &'static Session {
    match goal {
        FitnessGoal::WeightLoss => &WEIGHT_LOSS,
        FitnessGoal::MuscleGain => &MUSCLE_GAIN,
        FitnessGoal::Endurance => &ENDURANCE,
        FitnessGoal::GeneralFitness => &GENERAL_FITNESS,
    }
}

/// Select the catalogue session for `goal` and `level`, then apply the
/// health-condition substitutions
pub fn default_workout_plan(
    goal: FitnessGoal,
    level: FitnessLevel,
    health_conditions: &[String],
) -> Result<DefaultWorkoutPlan, PlanError> {
    let session = session(goal);

    let mut content = WorkoutPlanContent {
        warmup: session.warmup.iter().map(Exercise::from).collect(),
        main: session.main.iter().map(|lift| lift.prescribe(level)).collect(),
        cooldown: session.cooldown.iter().map(Exercise::from).collect(),
    };

    let substitutions = substitution::for_exercise_conditions(health_conditions);
    let replaced = substitution::apply_to_workout(&mut content, &substitutions);

    let mut description = format!("{} {}", level.label(), session.description.to_lowercase());
    if replaced > 0 {
        let conditions: Vec<&str> = health_conditions
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        description.push_str(&format!(
            " {} exercise(s) swapped for: {}.",
            replaced,
            conditions.join(", ")
        ));
    }

    Ok(DefaultWorkoutPlan {
        name: format!("{} {} Workout", level.label(), goal.label()),
        description,
        calories_burned: session.calories_burned[level.index()],
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_goal_and_level_resolves() {
        for goal in FitnessGoal::ALL {
            for level in FitnessLevel::ALL {
                let plan = default_workout_plan(goal, level, &[]).unwrap();
                assert!(!plan.content.warmup.is_empty());
                assert!(!plan.content.main.is_empty());
                assert!(!plan.content.cooldown.is_empty());
                assert!(plan.calories_burned > 0);
                assert!(plan.content.main.iter().all(|e| e.sets.is_some() && e.rest.is_some()));
            }
        }
    }

    #[test]
    fn test_level_scales_volume() {
        let beginner =
            default_workout_plan(FitnessGoal::MuscleGain, FitnessLevel::Beginner, &[]).unwrap();
        let advanced =
            default_workout_plan(FitnessGoal::MuscleGain, FitnessLevel::Advanced, &[]).unwrap();

        let sets = |p: &DefaultWorkoutPlan| p.content.main.iter().filter_map(|e| e.sets).sum::<u32>();
        assert!(sets(&advanced) > sets(&beginner));
        assert!(advanced.calories_burned > beginner.calories_burned);
    }

    #[test]
    fn test_knee_condition_removes_jumping() {
        let plan = default_workout_plan(
            FitnessGoal::WeightLoss,
            FitnessLevel::Intermediate,
            &["knee pain".to_string()],
        )
        .unwrap();

        for exercise in plan.content.exercises() {
            assert!(
                !exercise.name.to_lowercase().contains("jump"),
                "{} should have been swapped",
                exercise.name
            );
        }
        assert!(plan.description.contains("knee pain"));
    }

    #[test]
    fn test_substitution_keeps_prescription() {
        let plan = default_workout_plan(
            FitnessGoal::WeightLoss,
            FitnessLevel::Beginner,
            &["Lower back".to_string(), "hypertension".to_string()],
        )
        .unwrap();

        let swapped = plan
            .content
            .main
            .iter()
            .find(|e| e.name == "Brisk Walking Intervals")
            .unwrap();
        assert_eq!(swapped.sets, Some(4));
        assert_eq!(swapped.rest.as_deref(), Some("90 seconds"));
    }
}
