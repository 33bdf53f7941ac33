//! Sets and reps derived from body-mass index and gender category.

use serde::Serialize;
use thiserror::Error;

use crate::models::Person;

pub const UNDERWEIGHT_BMI: f64 = 18.5;
pub const OVERWEIGHT_BMI: f64 = 25.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Gender '{0}' is not a recognized category")]
    UnrecognizedGender(String),
    #[error("Height must be greater than zero, got {0}")]
    InvalidHeight(f64),
    #[error("Weight must be greater than zero, got {0}")]
    InvalidWeight(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Exact match on "male" or "female", ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("male") {
            Some(Gender::Male)
        } else if value.eq_ignore_ascii_case("female") {
            Some(Gender::Female)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingLoad {
    pub sets: u32,
    pub reps: u32,
}

impl TrainingLoad {
    const fn new(sets: u32, reps: u32) -> Self {
        Self { sets, reps }
    }
}

pub fn calculate_bmi(height: f64, weight: f64) -> Result<f64, LoadError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(LoadError::InvalidHeight(height));
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(LoadError::InvalidWeight(weight));
    }
    Ok(weight / (height * height))
}

pub fn determine_sets_and_reps(gender: &str, bmi: f64) -> Result<TrainingLoad, LoadError> {
    let gender =
        Gender::parse(gender).ok_or_else(|| LoadError::UnrecognizedGender(gender.to_string()))?;

    let load = match gender {
        Gender::Male if bmi < UNDERWEIGHT_BMI => TrainingLoad::new(3, 12),
        Gender::Male if bmi < OVERWEIGHT_BMI => TrainingLoad::new(4, 10),
        Gender::Male => TrainingLoad::new(5, 8),
        Gender::Female if bmi < UNDERWEIGHT_BMI => TrainingLoad::new(2, 15),
        Gender::Female if bmi < OVERWEIGHT_BMI => TrainingLoad::new(3, 12),
        Gender::Female => TrainingLoad::new(4, 10),
    };

    Ok(load)
}

/// Gender is checked before biometrics so an unset profile reports the
/// missing category first.
pub fn training_load_for(person: &Person) -> Result<TrainingLoad, LoadError> {
    if Gender::parse(&person.gender).is_none() {
        return Err(LoadError::UnrecognizedGender(person.gender.clone()));
    }
    let bmi = calculate_bmi(person.height, person.weight)?;
    determine_sets_and_reps(&person.gender, bmi)
}
