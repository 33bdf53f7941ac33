//! Exercise catalog: the fixed table of known exercises and their metadata.
//!
//! The built-in catalog is constructed once per process and never mutated.
//! Deployments may replace it at startup with a JSON file of the same shape
//! (see [`ExerciseCatalog::from_json_file`]).

use std::collections::HashSet;
use std::iter;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Exercise catalog is empty")]
    Empty,
    #[error("Exercise catalog contains an entry without a name")]
    UnnamedEntry,
    #[error("Duplicate exercise in catalog: {0}")]
    DuplicateEntry(String),
    #[error("Exercise '{0}' has no steps")]
    MissingSteps(String),
    #[error("Exercise '{0}' has a timed duration that is blank")]
    BlankDuration(String),
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How an exercise is measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timing {
    /// Counted in sets and reps.
    #[default]
    Untimed,
    /// Held or repeated for a fixed duration, e.g. "1 minute".
    Bounded { duration: String },
    /// Held for as long as possible.
    Unbounded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub timing: Timing,
    pub steps: Vec<String>,
    pub link: String,
}

/// A validated, non-empty exercise table in declaration order.
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    first: CatalogEntry,
    rest: Vec<CatalogEntry>,
}

impl ExerciseCatalog {
    /// Build a catalog from a list of entries, rejecting duplicates and
    /// entries that could not be materialized into a plan.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(CatalogError::UnnamedEntry);
            }
            if entry.steps.is_empty() {
                return Err(CatalogError::MissingSteps(entry.name.clone()));
            }
            if let Timing::Bounded { duration } = &entry.timing {
                if duration.trim().is_empty() {
                    return Err(CatalogError::BlankDuration(entry.name.clone()));
                }
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateEntry(entry.name.clone()));
            }
        }

        let mut entries = entries.into_iter();
        let first = entries.next().ok_or(CatalogError::Empty)?;

        Ok(Self {
            first,
            rest: entries.collect(),
        })
    }

    /// Parse a catalog from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries().find(|entry| entry.name == name)
    }

    /// The first declared entry. Always present.
    pub fn first(&self) -> &CatalogEntry {
        &self.first
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        iter::once(&self.first).chain(self.rest.iter())
    }

    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

static BUILTIN_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_builtin_catalog);

/// The catalog shipped with the service.
pub fn builtin_catalog() -> &'static ExerciseCatalog {
    &BUILTIN_CATALOG
}

fn entry(name: &str, description: &str, timing: Timing, link: &str, steps: &[&str]) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        description: description.to_string(),
        timing,
        steps: steps.iter().map(|s| s.to_string()).collect(),
        link: link.to_string(),
    }
}

fn bounded(duration: &str) -> Timing {
    Timing::Bounded {
        duration: duration.to_string(),
    }
}

fn build_builtin_catalog() -> ExerciseCatalog {
    let (first, rest) = builtin_entries();
    ExerciseCatalog { first, rest }
}

fn builtin_entries() -> (CatalogEntry, Vec<CatalogEntry>) {
    use Timing::{Unbounded, Untimed};

    let first = entry(
        "Bridge",
        "The bridge is a great exercise to target your glutes, hamstrings, and lower back.",
        bounded("1 minute"),
        "https://www.youtube.com/embed/Fctxa_BBjds",
        &[
            "Lie on your back with your knees bent and feet flat on the ground.",
            "Lift your hips up towards the ceiling, keeping your shoulders and feet grounded.",
            "Hold for a few seconds before lowering back down.",
        ],
    );

    let rest = vec![
        entry(
            "Chair squat",
            "The chair squat is a lower-body exercise that targets your quadriceps, hamstrings, and glutes.",
            Untimed,
            "https://www.youtube.com/embed/4k1SPQ9tEMg",
            &[
                "Stand with your feet hip-width apart.",
                "Squat down as if you're sitting in a chair, keeping your weight on your heels and your knees behind your toes.",
                "Rise back up to standing and repeat.",
            ],
        ),
        entry(
            "Knee pushup",
            "The knee pushup is a modification of the traditional pushup that is easier to perform.",
            Untimed,
            "https://www.youtube.com/embed/jWxvty2KROs",
            &[
                "Start in a plank position with your hands and knees on the ground.",
                "Lower your chest towards the ground by bending your elbows.",
                "Push back up to the starting position.",
            ],
        ),
        entry(
            "Stationary lunge",
            "The stationary lunge is a great exercise to target your quadriceps, hamstrings, and glutes.",
            Untimed,
            "https://www.youtube.com/embed/qO_21ExL4zw",
            &[
                "Stand with one foot forward and the other foot back, with your feet hip-width apart.",
                "Bend your front knee to lower your body towards the ground, keeping your back straight.",
                "Rise back up and repeat on the other side.",
            ],
        ),
        entry(
            "Plank to Downward Dog",
            "The plank to downward dog is a great exercise to stretch your hamstrings, calves, and back.",
            bounded("30-60 seconds"),
            "https://www.youtube.com/embed/J8QhVr5Pvig",
            &[
                "Start in a plank position with your arms straight and your body in a straight line.",
                "Push your hips up towards the ceiling to move into a downward dog position.",
                "Return to plank and repeat.",
            ],
        ),
        entry(
            "Straight-leg donkey kick",
            "The straight-leg donkey kick is an exercise that targets your glutes and hamstrings.",
            Untimed,
            "https://www.youtube.com/embed/FlWTMfgB0Hk",
            &[
                "Start on all fours with your hands and knees on the ground.",
                "Keeping your leg straight, lift one leg up behind you until it's in line with your body.",
                "Lower back down and repeat on the other side.",
            ],
        ),
        entry(
            "Bird Dog",
            "The bird dog is an exercise that targets your lower back, glutes, and abs.",
            Untimed,
            "https://www.youtube.com/embed/wiFNA3sqjCA",
            &[
                "Start on all fours with your hands and knees on the ground.",
                "Lift one arm and the opposite leg straight out from your body, keeping your back straight.",
                "Lower back down and repeat on the other side.",
            ],
        ),
        entry(
            "Side-lying hip abduction",
            "The side-lying hip abduction is an exercise that targets your glutes and outer thigh muscles.",
            Untimed,
            "https://www.youtube.com/embed/RwH43Qdgcbo",
            &[
                "Lie on your side with your legs straight and stacked on top of each other.",
                "Lift your top leg as high as you can without moving your hips.",
                "Lower back down and repeat on the other side.",
            ],
        ),
        entry(
            "Bicycle crunch",
            "The bicycle crunch is an exercise that targets your abs and oblique muscles.",
            Untimed,
            "https://www.youtube.com/embed/Iwyvozckjak",
            &[
                "Lie on your back with your hands behind your head and your knees bent.",
                "Lift your shoulder blades off the ground and bring your left elbow to your right knee while straightening your left leg.",
                "Switch sides and repeat.",
            ],
        ),
        entry(
            "Pushups",
            "A classic bodyweight exercise that targets your chest, triceps, and shoulders.",
            Untimed,
            "https://www.youtube.com/embed/JyCG_5l3XLk",
            &[
                "Assume a plank position with your hands slightly wider than shoulder-width apart and your feet close together",
                "Lower your body by bending your elbows and keeping your back straight",
                "Stop when your chest is just above the ground",
                "Push yourself back up to the starting position",
                "Repeat for desired number of reps",
            ],
        ),
        entry(
            "Squats",
            "A lower body exercise that targets your quadriceps, hamstrings, and glutes.",
            Untimed,
            "https://www.youtube.com/embed/xqvCmoLULNY",
            &[
                "Stand with your feet shoulder-width apart and your toes pointing straight ahead",
                "Bend your knees and push your hips back as if you were going to sit down on a chair",
                "Keep your weight on your heels and your chest lifted",
                "Lower your body until your thighs are parallel to the ground",
                "Push yourself back up to the starting position",
                "Repeat for the instructed number of reps",
            ],
        ),
        entry(
            "Plank",
            "A core exercise that targets your abs, back, and shoulder muscles.",
            bounded("30 seconds - 1 minute"),
            "https://www.youtube.com/embed/ASdvN_XEl_c",
            &[
                "Assume a plank position with your forearms on the ground, elbows directly under your shoulders, and your feet hip-width apart",
                "Keep your body in a straight line from head to heels, engaging your core muscles to prevent your hips from sagging",
                "Hold the position for the 30 seconds - 1 minute",
                "Release and rest",
            ],
        ),
        entry(
            "Burpees",
            "A full-body exercise that targets your chest, arms, legs, and core muscles.",
            Untimed,
            "https://www.youtube.com/embed/TU8QYVW0gDU",
            &[
                "Stand with your feet hip-width apart and your arms at your sides",
                "Lower your body into a squat position and place your hands on the ground in front of you",
                "Kick your legs back into a pushup position",
                "Perform a pushup",
                "Jump your feet back up towards your hands",
                "Stand up and jump as high as you can",
                "Repeat for the required number of reps",
            ],
        ),
        entry(
            "Crunches",
            "A core exercise that targets your abs.",
            Untimed,
            "https://www.youtube.com/embed/Xyd_fa5zoEU",
            &[
                "Lie on your back with your knees bent and your feet flat on the ground",
                "Place your hands behind your head or across your chest",
                "Lift your shoulders off the ground by contracting your abs",
                "Pause briefly at the top of the movement",
                "Lower your shoulders back down to the ground",
                "Repeat for desired number of reps",
            ],
        ),
        entry(
            "Mountain climbers",
            "A full-body exercise that targets your abs, arms, and legs.",
            Untimed,
            "https://www.youtube.com/embed/nmwgirgXLYM",
            &[
                "Assume a plank position with your hands directly under your shoulders and your feet hip-width apart",
                "Lift one foot off the ground and bring your knee towards your chest, keeping your core engaged",
                "Quickly switch to the other foot and bring your knee towards your chest",
                "Continue alternating legs in a running-like motion, while keeping your upper body stable",
                "Increase speed for more intensity",
                "Repeat for desired number of reps",
            ],
        ),
        entry(
            "Jumping jacks",
            "A full-body exercise that increases your heart rate and improves coordination.",
            Untimed,
            "https://www.youtube.com/embed/iSSAk4XCsRA",
            &[
                "Stand with your feet together and your arms at your sides",
                "Jump your feet out to the sides and raise your arms above your head at the same time",
                "Jump your feet back together and lower your arms to your sides",
                "Repeat for desired number of reps",
            ],
        ),
        entry(
            "Jumping lunges",
            "A challenging exercise that targets your legs, glutes, and core.",
            Untimed,
            "https://www.youtube.com/embed/hTdcOG9muQk",
            &[
                "Start in a lunge position with your right leg forward and your left leg back, both knees bent at 90 degrees.",
                "Jump up explosively and switch your leg position in midair, landing in a lunge position with your left leg forward.",
                "Continue alternating legs as fast as possible for desired number of reps.",
            ],
        ),
        entry(
            "Tricep dips",
            "An exercise that targets your triceps, shoulders, and chest, and can be done using a chair or bench.",
            Untimed,
            "https://www.youtube.com/embed/0326dy_-CzM",
            &[
                "Sit on the edge of a chair or bench with your hands resting on the edge, fingers pointing forward.",
                "Slide your butt off the edge and lower your body towards the ground by bending your elbows.",
                "Push yourself back up to the starting position and repeat for desired number of reps.",
            ],
        ),
        entry(
            "Russian twists",
            "An exercise that targets your abs and obliques.",
            Untimed,
            "https://www.youtube.com/embed/wkD8rjkodUI",
            &[
                "Sit on the ground with your knees bent and feet flat on the ground, leaning your torso back slightly.",
                "Clasp your hands together in front of your chest and twist your torso to the right, tapping your hands on the ground.",
                "Twist to the left and tap the ground on the opposite side.",
                "Continue alternating sides for desired number of reps.",
            ],
        ),
        entry(
            "Plank shoulder taps",
            "An exercise that targets your abs, shoulders, and upper back.",
            Untimed,
            "https://www.youtube.com/embed/ztpXZm7Dv80",
            &[
                "Start in a plank position with your arms straight and your body in a straight line.",
                "Lift your right hand and tap your left shoulder, then return it to the ground.",
                "Lift your left hand and tap your right shoulder, then return it to the ground.",
                "Continue alternating sides for desired number of reps.",
            ],
        ),
        entry(
            "Jump rope",
            "A fun and simple exercise that provides a great cardio workout while improving coordination and balance.",
            Unbounded,
            "https://www.youtube.com/embed/u3zgHI8QnqE",
            &[
                "Stand with your feet hip-width apart, holding a jump rope by the handles with both hands.",
                "Swing the rope over your head and jump as it passes under your feet.",
                "Land softly on the balls of your feet and repeat for desired number of reps.",
            ],
        ),
        entry(
            "Wall sit",
            "A lower body exercise that targets your quadriceps, hamstrings, and glutes.",
            Unbounded,
            "https://www.youtube.com/embed/XULOKw4E4P4",
            &[
                "Stand with your back against a wall and your feet shoulder-width apart.",
                "Slide down the wall until your thighs are parallel to the ground, with your knees directly above your ankles.",
                "Hold this position for as long as you can, keeping your back straight and your abs engaged.",
            ],
        ),
        entry(
            "Superman",
            "An exercise that targets your lower back, glutes, and shoulders.",
            bounded("1 minute"),
            "https://www.youtube.com/embed/J9zXkxUAfUA",
            &[
                "Lie face down on a mat with your arms and legs extended.",
                "Lift your arms, chest, and legs off the ground, keeping your neck in a neutral position.",
                "Hold for a few seconds before lowering back down to the starting position.",
            ],
        ),
        entry(
            "Single-Leg Deadlift",
            "A unilateral exercise that strengthens your hamstrings, glutes, and lower back.",
            Untimed,
            "https://www.youtube.com/embed/HtHxnWmMgzM",
            &[
                "Stand with your feet hip-width apart, holding a dumbbell in one hand.",
                "Lift one foot slightly off the ground and hinge forward at your hips, extending your lifted leg behind you.",
                "Lower the weight down towards the ground while keeping your back straight and your lifted leg parallel to the floor.",
                "Return to standing, squeezing your glutes and driving your hips forward, then repeat on the other side for desired number of reps.",
            ],
        ),
        entry(
            "Reverse Lunges with Knee Lift",
            "A lower body exercise that strengthens your legs and improves balance and stability.",
            Untimed,
            "https://www.youtube.com/embed/extwj0TKGX8",
            &[
                "Stand with your feet hip-width apart and take a big step back with one foot, bending both knees to lower your body down into a lunge.",
                "Press through your front foot to return to standing, lifting your back leg and raising your knee up towards your chest.",
                "Lower your foot back down to the ground and step back into a lunge on the same side.",
                "Repeat on the other side for desired number of reps.",
            ],
        ),
        entry(
            "Bear Crawl",
            "A full-body exercise that strengthens your core, shoulders, and hips.",
            Untimed,
            "https://www.youtube.com/embed/t8XLor7unqU",
            &[
                "Start in a plank position with your hands and feet on the ground, wrists directly under your shoulders.",
                "Step your right hand and left foot forward at the same time, keeping your hips low and your knees hovering just above the ground.",
                "Step your left hand and right foot forward at the same time, moving forwards and keeping your core engaged.",
                "Reverse the movement by stepping your right foot and left hand back, then your left foot and right hand, returning to the starting position. Repeat for desired number of reps.",
            ],
        ),
        entry(
            "Shoulder Taps with Leg Raise",
            "An upper body and core exercise that improves shoulder stability and strengthens your abs.",
            Untimed,
            "https://www.youtube.com/embed/QDQKV9QtwUA",
            &[
                "Start in a plank position with your hands on the ground shoulder-width apart and your feet hip-width apart.",
                "Lift your right hand to tap your left shoulder, keeping your core tight to prevent your hips from rotating.",
                "Lift your right leg up towards the ceiling, squeezing your glutes and keeping your hips level.",
                "Lower your leg and hand back to the starting position, then repeat on the other side for desired number of reps.",
            ],
        ),
        entry(
            "Bulgarian Split Squat",
            "A lower body exercise that strengthens the legs, glutes, and core while improving balance and stability.",
            Untimed,
            "https://www.youtube.com/embed/2C-uNgKwPLE",
            &[
                "Stand with your feet hip-width apart, facing away from a bench or step.",
                "Extend your left leg behind you and place the top of your left foot on the bench or step.",
                "Lower your body down towards the ground, bending your right knee and keeping your left leg straight.",
                "Press through your right heel to stand back up to the starting position, then repeat for desired number of reps before switching legs.",
            ],
        ),
    ];

    (first, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builtin_catalog_passes_validation() {
        let (first, rest) = builtin_entries();
        let rebuilt = ExerciseCatalog::from_entries(iter::once(first).chain(rest).collect());
        assert!(rebuilt.is_ok(), "builtin catalog must validate: {:?}", rebuilt.err());
        assert_eq!(builtin_catalog().len(), 28);
    }

    #[test]
    fn test_builtin_timing_modes() {
        let catalog = builtin_catalog();

        assert_eq!(catalog.get("Bridge").unwrap().timing, bounded("1 minute"));
        assert_eq!(catalog.get("Plank").unwrap().timing, bounded("30 seconds - 1 minute"));
        assert_eq!(catalog.get("Jump rope").unwrap().timing, Timing::Unbounded);
        assert_eq!(catalog.get("Wall sit").unwrap().timing, Timing::Unbounded);
        assert_eq!(catalog.get("Pushups").unwrap().timing, Timing::Untimed);

        let timed = catalog
            .entries()
            .filter(|e| e.timing != Timing::Untimed)
            .count();
        assert_eq!(timed, 6);
    }

    #[test]
    fn test_builtin_entries_have_links_and_steps() {
        for entry in builtin_catalog().entries() {
            assert!(entry.link.starts_with("https://"), "{} has no link", entry.name);
            assert!(!entry.steps.is_empty(), "{} has no steps", entry.name);
            assert!(!entry.description.is_empty(), "{} has no description", entry.name);
        }
    }

    #[test]
    fn test_steps_keep_catalog_order() {
        let pushups = builtin_catalog().get("Pushups").unwrap();
        assert_eq!(pushups.steps.len(), 5);
        assert!(pushups.steps[0].starts_with("Assume a plank position"));
        assert_eq!(pushups.steps[4], "Repeat for desired number of reps");
    }

    #[test]
    fn test_from_json_accepts_all_timing_kinds() {
        let json = r#"[
            {"name": "Hold", "description": "d", "timing": {"kind": "bounded", "duration": "20 seconds"},
             "steps": ["a"], "link": "https://example.com/hold"},
            {"name": "Hang", "description": "d", "timing": {"kind": "unbounded"},
             "steps": ["a", "b"], "link": "https://example.com/hang"},
            {"name": "Press", "description": "d", "steps": ["a"], "link": "https://example.com/press"}
        ]"#;

        let catalog = ExerciseCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("Press").unwrap().timing, Timing::Untimed);
        assert_eq!(catalog.get("Hang").unwrap().timing, Timing::Unbounded);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Hold", "Hang", "Press"]);
        assert_eq!(catalog.first().name, "Hold");
    }

    #[test]
    fn test_from_entries_rejects_invalid_catalogs() {
        assert_matches!(ExerciseCatalog::from_entries(vec![]), Err(CatalogError::Empty));

        let no_steps = entry("Lonely", "d", Timing::Untimed, "https://x", &[]);
        assert_matches!(
            ExerciseCatalog::from_entries(vec![no_steps]),
            Err(CatalogError::MissingSteps(name)) if name == "Lonely"
        );

        let a = entry("Twice", "d", Timing::Untimed, "https://x", &["s"]);
        assert_matches!(
            ExerciseCatalog::from_entries(vec![a.clone(), a]),
            Err(CatalogError::DuplicateEntry(_))
        );

        let blank = entry("Blank", "d", bounded("  "), "https://x", &["s"]);
        assert_matches!(
            ExerciseCatalog::from_entries(vec![blank]),
            Err(CatalogError::BlankDuration(_))
        );

        assert_matches!(ExerciseCatalog::from_json("{not json"), Err(CatalogError::Parse(_)));
    }
}
