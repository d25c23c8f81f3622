//! Command-line front end: one subcommand per form action.
//!
//! Commands take the raw text a user would type into the form, validate it,
//! call the store and render a one-screen text result.

use crate::error::{StoreError, ValidationError};
use crate::sqlite::StudentStore;
use crate::validation::{validate_id, StudentForm};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "students")]
#[command(author, version, about = "Student records manager", long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database path from the config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a new student
    Add(StudentArgs),
    /// Remove a student by id
    Remove {
        /// Five digit student id
        #[arg(long)]
        id: String,
    },
    /// Update an existing student's name, age and grade
    Update(StudentArgs),
    /// Display all students
    List {
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Calculate the average grade
    Average,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct StudentArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_hyphen_values = true)]
    pub age: String,
    #[arg(long, allow_hyphen_values = true)]
    pub grade: String,
}

impl StudentArgs {
    fn form(&self) -> StudentForm {
        StudentForm::new(
            self.id.clone(),
            self.name.clone(),
            self.age.clone(),
            self.grade.clone(),
        )
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Text,
    Json,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode students: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run `command` against `store` and render the text shown to the user.
/// Failures come back as `Error: <message>` rather than as `Err`.
pub fn execute(store: &StudentStore, command: &Command) -> String {
    match run_command(store, command) {
        Ok(output) => output,
        Err(e) => format!("Error: {}", e),
    }
}

pub fn run_command(store: &StudentStore, command: &Command) -> Result<String, CommandError> {
    match command {
        Command::Add(args) => {
            let student = args.form().validate()?;
            store.add(&student)?;
            Ok("Student added successfully.".to_string())
        }
        Command::Remove { id } => {
            validate_id(id)?;
            store.remove(id)?.ok_or_not_found(id)?;
            Ok("Student removed successfully.".to_string())
        }
        Command::Update(args) => {
            let student = args.form().validate()?;
            store.update(&student)?.ok_or_not_found(&student.id)?;
            Ok("Student updated successfully.".to_string())
        }
        Command::List { format } => {
            let students = store.list()?;
            match format {
                ListFormat::Json => Ok(serde_json::to_string_pretty(&students)?),
                ListFormat::Text if students.is_empty() => Ok("No students found.".to_string()),
                ListFormat::Text => Ok(students
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")),
            }
        }
        Command::Average => Ok(format!("Average Grade: {:.2}", store.average_grade()?)),
    }
}
