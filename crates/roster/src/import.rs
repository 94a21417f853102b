//! CSV/TSV import of employee records.
//!
//! Each data row becomes an [`Employee`] through the validating constructor.
//! Nothing is ever written back.
//!
//! ```text
//! name,department,salary,performance_rating,years_of_experience,active
//! Dan Mark,IT,50000,5.0,4,true
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::employee::{Employee, EmployeeId, NewEmployee};
use crate::error::{ErrorKind, Result, RosterError};
use crate::store::parse_flag;

const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "department",
    "salary",
    "performance_rating",
    "years_of_experience",
];

/// Column positions resolved from the header row.
#[derive(Debug)]
struct Columns {
    id: Option<usize>,
    name: usize,
    department: usize,
    salary: usize,
    rating: usize,
    experience: usize,
    active: Option<usize>,
    profile_image: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |wanted: &str| {
            headers.iter().position(|h| {
                normalize_header(h) == normalize_header(wanted)
            })
        };
        let require = |wanted: &str| {
            find(wanted).ok_or_else(|| {
                RosterError::parse(format!(
                    "Missing required column '{}' (required: {})",
                    wanted,
                    REQUIRED_COLUMNS.join(", ")
                ))
            })
        };

        Ok(Self {
            id: find("id"),
            name: require("name")?,
            department: require("department")?,
            salary: require("salary")?,
            rating: require("performance_rating")?,
            experience: require("years_of_experience")?,
            active: find("active"),
            profile_image: find("profile_image"),
        })
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect::<String>()
        .to_lowercase()
}

/// Read employees from delimited text with a header row.
pub fn read_employees(mut reader: impl Read) -> Result<Vec<Employee>> {
    let mut contents = Vec::new();
    reader
        .read_to_end(&mut contents)
        .map_err(|e| RosterError::new(ErrorKind::Io, format!("Failed to read input: {}", e)))?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(&contents))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_slice());

    let columns = Columns::from_headers(csv_reader.headers()?)?;

    let mut employees = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = record?;
        let employee = parse_row(&record, &columns).map_err(|e| e.context(format!("row {}", row)))?;
        employees.push(employee);
    }

    Ok(employees)
}

/// Read employees from a file.
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<Employee>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        RosterError::new(
            ErrorKind::Io,
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    read_employees(BufReader::new(file)).map_err(|e| e.context(path.display()))
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<Employee> {
    let cell = |index: usize| record.get(index).unwrap_or("");
    let optional = |index: Option<usize>| index.map(cell).filter(|v| !v.is_empty());

    let id = match optional(columns.id) {
        Some(text) => text.parse::<EmployeeId>()?,
        None => EmployeeId::generate(),
    };

    let salary = parse_number(cell(columns.salary), "salary")?;
    let rating = parse_number(cell(columns.rating), "performance_rating")?;
    let experience = cell(columns.experience).parse::<i32>().map_err(|_| {
        RosterError::parse(format!(
            "years_of_experience must be a whole number, got '{}'",
            cell(columns.experience)
        ))
    })?;
    let active = match optional(columns.active) {
        Some(text) => parse_flag(text)
            .ok_or_else(|| RosterError::parse(format!("active must be true or false, got '{}'", text)))?,
        None => true,
    };

    NewEmployee::new(cell(columns.name), cell(columns.department))
        .with_salary(salary)
        .with_rating(rating)
        .with_experience(experience)
        .with_active(active)
        .with_profile_image(optional(columns.profile_image).unwrap_or(""))
        .build(id)
}

fn parse_number(text: &str, column: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| RosterError::parse(format!("{} must be a number, got '{}'", column, text)))
}

/// Pick tab when the header line has more tabs than commas.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let tabs = header.iter().filter(|b| **b == b'\t').count();
    let commas = header.iter().filter(|b| **b == b',').count();
    if tabs > commas { b'\t' } else { b',' }
}
