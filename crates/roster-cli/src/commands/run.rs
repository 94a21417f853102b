//! Run command - execute a script of session commands.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use roster::{CredentialTable, RosterConfig};
use tracing::{info, warn};

use crate::session::{Flow, Session};

/// Outcome of a script run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    pub executed: usize,
    pub failed: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    script: PathBuf,
    user: String,
    password: String,
    demo: bool,
    json_output: bool,
    keep_going: bool,
    config: RosterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&script)
        .map_err(|e| format!("Failed to read script {}: {}", script.display(), e))?;

    let mut session = Session::login(&CredentialTable::default(), &user, &password, config)?
        .with_json(json_output);
    if demo {
        session.seed_demo()?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = execute_script(&mut session, &text, keep_going, &mut out, &mut io::stderr())?;
    info!(
        script = %script.display(),
        executed = summary.executed,
        failed = summary.failed,
        "script finished"
    );

    if summary.failed > 0 {
        return Err(format!(
            "{} of {} command(s) failed",
            summary.failed, summary.executed
        )
        .into());
    }
    Ok(())
}

/// Execute each non-blank, non-comment line of `text`.
///
/// Without `keep_going` the first failure ends the run with an error naming
/// its line number.
pub fn execute_script(
    session: &mut Session,
    text: &str,
    keep_going: bool,
    out: &mut dyn Write,
    errors: &mut dyn Write,
) -> Result<ScriptSummary, Box<dyn std::error::Error>> {
    let mut summary = ScriptSummary::default();

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        summary.executed += 1;

        match session.execute(line, out) {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) if keep_going => {
                summary.failed += 1;
                warn!(line = number, error = %e, "command failed; continuing");
                writeln!(errors, "{} line {}: {}", "Error:".red().bold(), number, e)?;
            }
            Err(e) => return Err(format!("line {}: {}", number, e).into()),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SCRIPT: &str = "\
# two employees and a raise
add --name 'Dan Mark' -d IT -s 50000 -r 5 -e 4
add --name 'Owusu Dennis' -d HR -s 60000 -r 3 -e 4

search salary 60000 50000
raise 10 4.0
";

    fn session() -> Session {
        Session::login(
            &CredentialTable::default(),
            "admin",
            "admin123",
            RosterConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_script_stops_at_first_failure() {
        let mut session = session();
        let err = execute_script(&mut session, SCRIPT, false, &mut Vec::new(), &mut Vec::new())
            .unwrap_err();

        assert!(err.to_string().starts_with("line 5:"));
        let dan = session.store().search_by_name("Dan").pop().unwrap();
        assert_eq!(dan.salary(), 50000.0);
    }

    #[test]
    fn test_script_keep_going() {
        let mut session = session();
        let mut errors = Vec::new();
        let summary =
            execute_script(&mut session, SCRIPT, true, &mut Vec::new(), &mut errors).unwrap();

        assert_eq!(
            summary,
            ScriptSummary {
                executed: 4,
                failed: 1
            }
        );
        assert!(String::from_utf8(errors).unwrap().contains("line 5"));
        assert_eq!(
            session.store().average_salary_by_department("IT").unwrap(),
            55000.0
        );
    }

    #[test]
    fn test_script_exit_ends_early() {
        let mut session = session();
        let summary = execute_script(
            &mut session,
            "exit\nadd --name Late -d IT -s 1 -r 1\n",
            false,
            &mut Vec::new(),
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(summary.executed, 1);
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_run_missing_script() {
        let err = run(
            PathBuf::from("/nonexistent/script.roster"),
            "admin".to_string(),
            "admin123".to_string(),
            false,
            false,
            false,
            RosterConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read script"));
    }

    #[test]
    fn test_run_rejects_bad_login() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"count\n").unwrap();

        let err = run(
            file.path().to_path_buf(),
            "admin".to_string(),
            "wrong".to_string(),
            false,
            false,
            false,
            RosterConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn test_run_script_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"add --name 'Dan Mark' -d IT -s 50000 -r 5\ncount\n")
            .unwrap();

        run(
            file.path().to_path_buf(),
            "admin".to_string(),
            "admin123".to_string(),
            true,
            true,
            false,
            RosterConfig::default(),
        )
        .unwrap();
    }
}
