//! Validation of the raw text fields a user types into the student form.
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! sees one message at a time. The numeric fields are parsed before any
//! other check.

use crate::error::ValidationError;
use crate::student::StudentRecord;

/// Raw, unvalidated form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub id: String,
    pub name: String,
    pub age: String,
    pub grade: String,
}

impl StudentForm {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
            grade: grade.into(),
        }
    }

    pub fn validate(&self) -> Result<StudentRecord, ValidationError> {
        let age = parse_age(&self.age)?;
        let grade = parse_grade(&self.grade)?;

        validate_id(&self.id)?;
        validate_name(&self.name)?;
        if age <= 0 {
            return Err(ValidationError::NonPositiveAge);
        }
        if !(0.0..=100.0).contains(&grade) {
            return Err(ValidationError::GradeOutOfRange);
        }

        let age = age.unsigned_abs();
        Ok(StudentRecord::new(self.id.clone(), self.name.clone(), age, grade))
    }
}

/// Student ids are exactly five ASCII digits.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if id.len() != 5 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::MalformedId);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NameHasDigits);
    }
    Ok(())
}

fn parse_age(raw: &str) -> Result<i32, ValidationError> {
    raw.parse::<i32>().map_err(|_| ValidationError::InvalidFormat)
}

fn parse_grade(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(grade) if grade.is_finite() => Ok(grade),
        _ => Err(ValidationError::InvalidFormat),
    }
}
