//! A logged-in session: one store, one user, and a command interpreter.
//!
//! Both `roster shell` and `roster run` feed lines to [`Session::execute`].
//! The session never exits the process; callers decide what a failed line
//! means.

pub mod command;
pub mod render;

use std::io::Write;

use chrono::{DateTime, Local};
use clap::Parser;
use colored::Colorize;
use roster::{
    CredentialTable, EmployeeId, EmployeeStore, NewEmployee, RosterConfig, RosterError, User,
};
use tracing::{debug, info, warn};

use command::{split_args, SearchBy, SessionCommand, SessionLine};

/// Shortest id prefix accepted in place of a full id.
pub const MIN_ID_PREFIX: usize = 4;

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    store: EmployeeStore,
    config: RosterConfig,
    user: User,
    logged_in_at: DateTime<Local>,
    json: bool,
}

impl Session {
    /// Check credentials and open a session with an empty store.
    pub fn login(
        credentials: &CredentialTable,
        username: &str,
        password: &str,
        config: RosterConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(user) = credentials.authenticate(username, password) else {
            warn!(username, "authentication failed");
            return Err("Invalid username or password".into());
        };
        info!(username, "logged in");

        Ok(Self {
            store: EmployeeStore::new(),
            config,
            user: user.clone(),
            logged_in_at: Local::now(),
            json: false,
        })
    }

    /// Emit JSON instead of tables.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Add the sample record shown on first start.
    pub fn seed_demo(&mut self) -> roster::Result<EmployeeId> {
        let employee = NewEmployee::new("Mr Lii", "Admin")
            .with_salary(100000.0)
            .with_rating(4.8)
            .with_experience(15)
            .with_active(true)
            .with_profile_image("images/lord.jpg")
            .build(EmployeeId::generate())?;
        let id = employee.id();
        self.store.add(employee)?;
        debug!(%id, "seeded demo record");
        Ok(id)
    }

    /// Run one command line. Blank lines and `#` comments do nothing.
    pub fn execute(
        &mut self,
        line: &str,
        out: &mut dyn Write,
    ) -> Result<Flow, Box<dyn std::error::Error>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        debug!(line, "executing");

        let args = split_args(line)?;
        let parsed = match SessionLine::try_parse_from(args) {
            Ok(parsed) => parsed,
            Err(e)
                if matches!(
                    e.kind(),
                    clap::error::ErrorKind::DisplayHelp
                        | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e.render().to_string().trim_end().to_string().into()),
        };

        self.dispatch(parsed.command, out)
    }

    fn dispatch(
        &mut self,
        command: SessionCommand,
        out: &mut dyn Write,
    ) -> Result<Flow, Box<dyn std::error::Error>> {
        let json = self.json;

        match command {
            SessionCommand::Add {
                name,
                department,
                salary,
                rating,
                experience,
                inactive,
                image,
                id,
            } => {
                if !self.config.is_known_department(&department) {
                    warn!(department = %department, "department is not in the configured list");
                }
                let employee = NewEmployee::new(name, department)
                    .with_salary(salary)
                    .with_rating(rating)
                    .with_experience(experience)
                    .with_active(!inactive)
                    .with_profile_image(image)
                    .build(id.unwrap_or_else(EmployeeId::generate))?;
                let id = employee.id();
                let name = employee.name().to_string();
                self.store.add(employee)?;
                info!(%id, name = %name, "employee added");
                render::success(
                    out,
                    &format!("Added {} ({})", name, id),
                    serde_json::json!({ "id": id }),
                    json,
                )?;
            }

            SessionCommand::Remove { id } => {
                let id = self.resolve_id(&id)?;
                let removed = self.store.remove(id)?;
                info!(%id, "employee removed");
                render::success(
                    out,
                    &format!("Removed {}", removed.name()),
                    serde_json::json!({ "id": id }),
                    json,
                )?;
            }

            SessionCommand::Update { id, field, value } => {
                let id = self.resolve_id(&id)?;
                self.store.update_field(id, &field, &value)?;
                info!(%id, field = %field, "employee updated");
                let employee = self
                    .store
                    .get(id)
                    .ok_or_else(|| RosterError::not_found(format!("Employee {}", id)))?;
                render::employee_detail(out, employee, json)?;
            }

            SessionCommand::Raise {
                percentage,
                min_rating,
            } => {
                let raised = self.store.give_raise(percentage, min_rating)?;
                info!(percentage, min_rating, raised, "raise applied");
                render::success(
                    out,
                    &format!(
                        "Raised salary by {}% for {} employee(s) rated {} or higher",
                        percentage, raised, min_rating
                    ),
                    serde_json::json!({ "raised": raised }),
                    json,
                )?;
            }

            SessionCommand::Top => {
                let top = self.store.top_paid(self.config.top_paid_limit);
                render::employees(out, &top, json)?;
            }

            SessionCommand::Average { department } => {
                let average = self
                    .store
                    .average_salary_by_department(department.as_deref())?;
                let department = department.unwrap_or_default();
                if json {
                    render::write_json(
                        out,
                        &serde_json::json!({ "department": department, "average_salary": average }),
                    )?;
                } else {
                    writeln!(
                        out,
                        "Average salary in {}: {}",
                        department.cyan(),
                        format!("{:.2}", average).bold()
                    )?;
                }
            }

            SessionCommand::Search { by } => {
                let found = match &by {
                    SearchBy::Term { term } => self.store.search_by_term(term.as_deref())?,
                    SearchBy::Rating { min } => self.store.search_by_min_rating(*min)?,
                    SearchBy::Salary { min, max } => {
                        self.store.search_by_salary_range(*min, *max)?
                    }
                    SearchBy::Department { department } => {
                        self.store.search_by_department(department)?
                    }
                    SearchBy::Name { term } => self.store.search_by_name(term),
                };
                render::employees(out, &found, json)?;
            }

            SessionCommand::Filter { status } => {
                render::employees(out, &self.store.filter_by_status(status), json)?;
            }

            SessionCommand::List { sort } => {
                let list = match sort {
                    Some(key) => self.store.sorted(key),
                    None => self.store.all(),
                };
                render::employees(out, &list, json)?;
            }

            SessionCommand::Show { id } => {
                let id = self.resolve_id(&id)?;
                let employee = self
                    .store
                    .get(id)
                    .ok_or_else(|| RosterError::not_found(format!("Employee {}", id)))?;
                render::employee_detail(out, employee, json)?;
            }

            SessionCommand::Count => {
                let headcount = self.store.headcount();
                if json {
                    render::write_json(out, &headcount)?;
                } else {
                    writeln!(
                        out,
                        "{} employee(s): {} active, {} inactive",
                        headcount.total.to_string().bold(),
                        headcount.active.to_string().green(),
                        headcount.inactive.to_string().yellow()
                    )?;
                }
            }

            SessionCommand::Import { file } => {
                let employees = roster::import::import_file(&file)?;
                for employee in &employees {
                    if !self.config.is_known_department(employee.department()) {
                        warn!(
                            department = %employee.department(),
                            id = %employee.id(),
                            "imported department is not in the configured list"
                        );
                    }
                }
                let imported = self.store.import(employees)?;
                info!(file = %file.display(), imported, "employees imported");
                render::success(
                    out,
                    &format!("Imported {} employee(s) from {}", imported, file.display()),
                    serde_json::json!({ "imported": imported }),
                    json,
                )?;
            }

            SessionCommand::Departments => {
                if json {
                    render::write_json(out, &self.config.departments)?;
                } else {
                    for department in &self.config.departments {
                        writeln!(out, "{}", department)?;
                    }
                }
            }

            SessionCommand::Whoami => {
                if json {
                    render::write_json(
                        out,
                        &serde_json::json!({
                            "user": &self.user,
                            "logged_in_at": self.logged_in_at.to_rfc3339(),
                        }),
                    )?;
                } else {
                    writeln!(
                        out,
                        "{} (logged in {})",
                        self.user.username().bold(),
                        self.logged_in_at.format("%Y-%m-%d %H:%M:%S")
                    )?;
                }
            }

            SessionCommand::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Resolve a full id or a unique prefix of one.
    fn resolve_id(&self, text: &str) -> roster::Result<EmployeeId> {
        if let Ok(id) = text.parse::<EmployeeId>() {
            return Ok(id);
        }

        let prefix = text.trim().to_lowercase();
        if prefix.len() < MIN_ID_PREFIX {
            return Err(RosterError::invalid_argument(format!(
                "Id prefix '{}' is too short; give at least {} characters",
                text, MIN_ID_PREFIX
            )));
        }

        let mut matches = self
            .store
            .iter()
            .map(|e| e.id())
            .filter(|id| id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(RosterError::not_found(format!(
                "No employee with id starting with '{}'",
                text
            ))),
            (Some(_), Some(_)) => Err(RosterError::invalid_argument(format!(
                "Id prefix '{}' matches more than one employee",
                text
            ))),
        }
    }
}
