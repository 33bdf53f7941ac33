use thiserror::Error;

pub const MAX_GENDER_LENGTH: usize = 10;
pub const MAX_USERNAME_LENGTH: usize = 150;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("Invalid email format")]
    InvalidEmail,
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::Empty("Username"));
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Username",
            max: MAX_USERNAME_LENGTH,
        });
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Empty("Email"));
    }

    if email.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "Email",
            max: 255,
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Gender is stored verbatim; only the load calculator interprets it.
pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if gender.trim().is_empty() {
        return Err(ValidationError::Empty("Gender"));
    }

    if gender.chars().count() > MAX_GENDER_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Gender",
            max: MAX_GENDER_LENGTH,
        });
    }

    Ok(())
}

pub fn validate_biometrics(height: f64, weight: f64) -> Result<(), ValidationError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(ValidationError::NotPositive("Height"));
    }

    if !weight.is_finite() || weight <= 0.0 {
        return Err(ValidationError::NotPositive("Weight"));
    }

    Ok(())
}

pub fn validate_positive_count(value: i32, field: &'static str) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.user@domain.co.uk").is_ok());

        assert_eq!(validate_email(""), Err(ValidationError::Empty("Email")));
        assert_eq!(validate_email("invalid-email"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@domain.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("user@domain"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_gender_validation() {
        assert!(validate_gender("Male").is_ok());
        assert!(validate_gender("nonbinary").is_ok());
        assert!(validate_gender("   ").is_err());
        assert!(validate_gender("abcdefghijk").is_err());
    }

    #[test]
    fn test_biometrics_validation() {
        assert!(validate_biometrics(1.75, 70.0).is_ok());
        assert_eq!(
            validate_biometrics(0.0, 70.0),
            Err(ValidationError::NotPositive("Height"))
        );
        assert_eq!(
            validate_biometrics(1.75, -3.0),
            Err(ValidationError::NotPositive("Weight"))
        );
        assert!(validate_biometrics(f64::NAN, 70.0).is_err());
        assert!(validate_biometrics(1.75, f64::INFINITY).is_err());
    }

    #[test]
    fn test_username_and_counts() {
        assert!(validate_username("runner42").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(&"x".repeat(151)).is_err());

        assert!(validate_positive_count(3, "Sets").is_ok());
        assert_eq!(
            validate_positive_count(0, "Sets"),
            Err(ValidationError::NotPositive("Sets"))
        );
    }
}
