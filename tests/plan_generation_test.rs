mod common;

use std::collections::HashSet;
use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{days, person, random_person, MemoryPlanStore};
use workout_challenge::catalog::{builtin_catalog, ExerciseCatalog, Timing};
use workout_challenge::models::ExerciseMode;
use workout_challenge::services::{LoadError, PlanError, PlanGenerationService};
use workout_challenge::storage::StoreError;

fn service(store: &Arc<MemoryPlanStore>) -> PlanGenerationService<Arc<MemoryPlanStore>> {
    PlanGenerationService::new(store.clone(), Arc::new(builtin_catalog().clone()))
}

#[tokio::test]
async fn test_example_scenario() {
    let store = Arc::new(MemoryPlanStore::new());
    let generator = service(&store);
    let person = person("Male", 1.75, 70.0);

    let plan = generator
        .generate(Some(&person), &days(&["Monday", "Wednesday"]))
        .await
        .unwrap();

    assert_eq!(plan.plan.name, "2/6 CHALLENGE");
    assert_eq!(plan.plan.number, 1);
    assert_eq!(plan.plan.person_id, person.id);
    assert!(!plan.plan.started);
    assert!(!plan.plan.finished);
    assert_eq!(plan.weeks.len(), 6);
    assert_eq!(plan.days().count(), 12);

    for exercise in plan.exercises() {
        if let Some(ExerciseMode::Untimed { sets, reps }) = exercise.exercise.mode() {
            assert_eq!((sets, reps), (4, 10), "{}", exercise.exercise.name);
        }
    }

    let tables = store.tables();
    assert_eq!(tables.plans.len(), 1);
    assert_eq!(tables.weeks.len(), 6);
    assert_eq!(tables.days.len(), 12);
    assert_eq!(tables.exercises.len(), plan.exercises().count());
}

#[tokio::test]
async fn test_plan_structure() {
    let store = Arc::new(MemoryPlanStore::new());
    let generator = service(&store);
    let person = random_person();
    let mut rng = StdRng::seed_from_u64(42);

    let plan = generator
        .generate_with_rng(
            Some(&person),
            &days(&["friday", "Tuesday", "SUN"]),
            &mut rng,
        )
        .await
        .unwrap();

    assert_eq!(plan.plan.name, "3/6 CHALLENGE");

    for (index, week) in plan.weeks.iter().enumerate() {
        assert_eq!(week.week.number, index as i32 + 1);
        assert_eq!(week.week.current_week, index == 0);
        assert!(!week.week.finished);

        let names: Vec<_> = week.days.iter().map(|d| d.day.name.as_str()).collect();
        assert_eq!(names, vec!["Friday", "Tuesday", "Sunday"]);
        let numbers: Vec<_> = week.days.iter().map(|d| d.day.number).collect();
        assert_eq!(numbers, vec![5, 2, 7]);

        for day in &week.days {
            assert!(!day.day.finished);
            assert!(
                (4..=6).contains(&day.exercises.len()),
                "{} exercises on {}",
                day.exercises.len(),
                day.day.name
            );
            for (position, exercise) in day.exercises.iter().enumerate() {
                assert_eq!(exercise.exercise.position, position as i32);
                assert!(!exercise.exercise.finished);
            }
        }
    }
}

#[tokio::test]
async fn test_modes_and_steps_follow_catalog() {
    let store = Arc::new(MemoryPlanStore::new());
    let generator = service(&store);
    let person = person("female", 1.62, 48.0);
    let catalog = builtin_catalog();

    let plan = generator
        .generate(
            Some(&person),
            &days(&["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
        )
        .await
        .unwrap();

    // 42 sessions with at least four exercises each exhaust the catalog.
    let drawn: HashSet<_> = plan.exercises().map(|e| e.exercise.name.clone()).collect();
    assert_eq!(drawn.len(), catalog.len());

    for exercise in plan.exercises() {
        let entry = catalog.get(&exercise.exercise.name).unwrap();
        assert_eq!(exercise.steps, entry.steps);

        let mode = exercise.exercise.mode().unwrap();
        match &entry.timing {
            Timing::Untimed => assert_eq!(mode, ExerciseMode::Untimed { sets: 2, reps: 15 }),
            Timing::Bounded { duration } => assert_eq!(
                mode,
                ExerciseMode::TimedBounded {
                    duration: duration.clone()
                }
            ),
            Timing::Unbounded => assert_eq!(mode, ExerciseMode::TimedUnbounded),
        }
    }

    // Stored steps keep catalog order.
    let tables = store.tables();
    let first = &plan.weeks[0].days[0].exercises[0];
    let mut stored: Vec<_> = tables
        .steps
        .iter()
        .filter(|s| s.exercise_id == first.exercise.id)
        .collect();
    stored.sort_by_key(|s| s.position);
    let instructions: Vec<_> = stored.iter().map(|s| s.instruction.clone()).collect();
    assert_eq!(instructions, first.steps);
}

#[tokio::test]
async fn test_plan_numbers_are_sequential_per_person() {
    let store = Arc::new(MemoryPlanStore::new());
    let generator = service(&store);
    let first_person = random_person();
    let second_person = random_person();
    let preferred = days(&["Saturday"]);

    let numbers = [
        generator.generate(Some(&first_person), &preferred).await.unwrap().plan.number,
        generator.generate(Some(&first_person), &preferred).await.unwrap().plan.number,
        generator.generate(Some(&second_person), &preferred).await.unwrap().plan.number,
        generator.generate(Some(&first_person), &preferred).await.unwrap().plan.number,
    ];

    assert_eq!(numbers, [1, 2, 1, 3]);
}

#[tokio::test]
async fn test_failed_commit_leaves_no_records() {
    let person = random_person();
    let preferred = days(&["Monday", "Thursday"]);

    // Plan row, first week, first day, first exercise, a step, and deep inside.
    for fail_on in [1, 2, 3, 4, 5, 60, 100] {
        let store = Arc::new(MemoryPlanStore::new());
        let generator = service(&store);
        store.fail_on_insert(fail_on);

        let result = generator.generate(Some(&person), &preferred).await;

        assert_matches!(
            result,
            Err(PlanError::CreationFailure(StoreError::CreateFailed(_))),
            "failure injected at insert {}",
            fail_on
        );
        assert_eq!(store.tables().record_count(), 0, "insert {}", fail_on);
        assert!(store.insert_attempts() >= fail_on);

        store.clear_failure();
        let plan = generator.generate(Some(&person), &preferred).await.unwrap();
        assert_eq!(plan.plan.number, 1);
    }
}

#[tokio::test]
async fn test_rejected_requests_never_reach_the_store() {
    let store = Arc::new(MemoryPlanStore::new());
    let generator = service(&store);
    let valid = days(&["Monday"]);

    assert_matches!(
        generator.generate(None, &valid).await,
        Err(PlanError::MissingPerson)
    );
    assert_matches!(
        generator.generate(Some(&random_person()), &[]).await,
        Err(PlanError::MissingPreferredDays)
    );
    assert_matches!(
        generator
            .generate(Some(&random_person()), &days(&["Monday", "Caturday"]))
            .await,
        Err(PlanError::UnknownWeekday(day)) if day == "Caturday"
    );
    assert_matches!(
        generator.generate(Some(&person("other", 1.8, 80.0)), &valid).await,
        Err(PlanError::IndeterminateLoad(LoadError::UnrecognizedGender(_)))
    );
    assert_matches!(
        generator.generate(Some(&person("male", 0.0, 80.0)), &valid).await,
        Err(PlanError::IndeterminateLoad(LoadError::InvalidHeight(_)))
    );

    assert_eq!(store.insert_attempts(), 0);
    assert_eq!(store.tables().record_count(), 0);
}

#[tokio::test]
async fn test_custom_catalog_is_used() {
    let catalog = ExerciseCatalog::from_json(
        r#"[
            {"name": "Hold", "description": "Hold still.", "timing": {"kind": "unbounded"},
             "steps": ["Hold"], "link": "https://example.com/hold"},
            {"name": "Press", "description": "Press up.",
             "steps": ["Lower", "Press"], "link": "https://example.com/press"}
        ]"#,
    )
    .unwrap();
    let store = Arc::new(MemoryPlanStore::new());
    let generator = PlanGenerationService::new(store.clone(), Arc::new(catalog));

    let plan = generator
        .generate(Some(&person("male", 1.9, 95.0)), &days(&["Wednesday"]))
        .await
        .unwrap();

    for exercise in plan.exercises() {
        match exercise.exercise.name.as_str() {
            "Hold" => assert_eq!(exercise.exercise.mode(), Some(ExerciseMode::TimedUnbounded)),
            "Press" => assert_eq!(
                exercise.exercise.mode(),
                Some(ExerciseMode::Untimed { sets: 5, reps: 8 })
            ),
            other => panic!("unexpected exercise {}", other),
        }
    }
}
