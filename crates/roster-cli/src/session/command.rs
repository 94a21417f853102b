//! Session command grammar.
//!
//! A line is split into words with [`split_args`] and then parsed by clap,
//! so each session command gets the same `--help` and error messages as the
//! top-level CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster::{EmployeeId, RosterError, SortKey, StatusFilter};

/// One parsed session line.
#[derive(Parser, Debug)]
#[command(name = "roster>", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add a new employee
    Add {
        /// Full name
        #[arg(long)]
        name: String,

        /// Department (free-form; the configured list is only a suggestion)
        #[arg(short, long)]
        department: String,

        /// Annual salary
        #[arg(short, long, allow_negative_numbers = true)]
        salary: f64,

        /// Performance rating between 0.0 and 5.0
        #[arg(short, long, allow_negative_numbers = true)]
        rating: f64,

        /// Years of experience
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        experience: i32,

        /// Record the employee as inactive
        #[arg(long)]
        inactive: bool,

        /// Profile image reference
        #[arg(long, default_value = "")]
        image: String,

        /// Use this id instead of generating one
        #[arg(long)]
        id: Option<EmployeeId>,
    },

    /// Remove an employee
    Remove {
        /// Employee id or unique id prefix
        id: String,
    },

    /// Change one field of an employee
    Update {
        /// Employee id or unique id prefix
        id: String,

        /// Field name (name, department, salary, rating, experience, active, image)
        field: String,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Raise salaries of employees rated at least MIN_RATING
    Raise {
        /// Percentage increase, e.g. 10 for 10%
        #[arg(allow_negative_numbers = true)]
        percentage: f64,

        /// Minimum performance rating to qualify
        #[arg(allow_negative_numbers = true)]
        min_rating: f64,
    },

    /// Show the highest-paid employees
    Top,

    /// Average salary of a department
    Average {
        /// Department name, matched ignoring case
        department: Option<String>,
    },

    /// Search employees
    Search {
        #[command(subcommand)]
        by: SearchBy,
    },

    /// List employees by employment status
    Filter {
        /// all, active, or inactive
        status: StatusFilter,
    },

    /// List all employees
    List {
        /// Sort by experience, salary, or rating
        #[arg(short, long)]
        sort: Option<SortKey>,
    },

    /// Show one employee in detail
    Show {
        /// Employee id or unique id prefix
        id: String,
    },

    /// Count employees by status
    Count,

    /// Import employees from a CSV or TSV file
    Import {
        /// Path to the file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the configured departments
    Departments,

    /// Show the logged-in user
    Whoami,

    /// End the session
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand, Debug)]
pub enum SearchBy {
    /// Name or department containing TERM, ignoring case
    Term {
        /// Omitting the term is an error, like searching for nothing
        term: Option<String>,
    },

    /// Rating at or above MIN
    Rating {
        #[arg(allow_negative_numbers = true)]
        min: f64,
    },

    /// Salary between MIN and MAX inclusive
    Salary {
        #[arg(allow_negative_numbers = true)]
        min: f64,

        #[arg(allow_negative_numbers = true)]
        max: f64,
    },

    /// Department equal to DEPARTMENT, ignoring case
    Department { department: String },

    /// Name containing TERM, ignoring case
    Name { term: String },
}

/// Split a command line into words.
///
/// Words are separated by whitespace. Single quotes keep everything
/// literally; double quotes allow `\"` and `\\` escapes. A backslash
/// outside quotes escapes the next character.
pub fn split_args(line: &str) -> Result<Vec<String>, RosterError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated('\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(unterminated('"')),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated('"')),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(ch) = chars.next() {
                    current.push(ch);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn unterminated(quote: char) -> RosterError {
    RosterError::invalid_argument(format!("Unterminated {} quote", quote))
}
