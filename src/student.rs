use serde::{Deserialize, Serialize};
use std::fmt;

/// One student's row in the `students` table.
///
/// Values are built from validated input and handed to the store by
/// reference. A record is a snapshot: after any store mutation the caller
/// has to re-fetch it to see the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub grade: f64,
}

impl StudentRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: u32, grade: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            grade,
        }
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Grade: {:.2}",
            self.id, self.name, self.age, self.grade
        )
    }
}
