//! Shell command - log in and read session commands from stdin.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use roster::{CredentialTable, RosterConfig};
use tracing::{info, warn};

use crate::session::{Flow, Session};

pub fn run(
    user: String,
    password: Option<String>,
    demo: bool,
    json_output: bool,
    config: RosterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let password = match password {
        Some(password) => password,
        None => prompt_password(&mut input)?,
    };

    let mut session = Session::login(&CredentialTable::default(), &user, &password, config)?
        .with_json(json_output);
    if demo {
        session.seed_demo()?;
    }

    println!(
        "{} {}",
        "Welcome,".green().bold(),
        session.user().username().white().bold()
    );
    println!("Type 'help' for commands, 'exit' to leave.");
    println!();

    let executed = read_loop(&mut session, &mut input, &mut io::stdout(), &mut io::stderr())?;
    info!(executed, "session ended");
    Ok(())
}

/// Execute lines from `input` until `exit` or end of input.
///
/// Failed commands are reported on `errors` and the loop carries on.
/// Returns the number of lines read.
pub fn read_loop(
    session: &mut Session,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    errors: &mut dyn Write,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut count = 0;
    loop {
        write!(out, "{} ", "roster>".cyan().bold())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        count += 1;

        match session.execute(&line, out) {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!(line = line.trim(), error = %e, "command failed");
                writeln!(errors, "{} {}", "Error:".red().bold(), e)?;
            }
        }
    }
    Ok(count)
}

fn prompt_password(input: &mut dyn BufRead) -> Result<String, Box<dyn std::error::Error>> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut password = String::new();
    input.read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_loop_continues_after_errors() {
        let mut session = session();
        let mut input = io::Cursor::new(
            "add --name 'Dan Mark' -d IT -s 50000 -r 5\n\
             add --name Ben -d IT -s -1 -r 3\n\
             count\n",
        );
        let mut out = Vec::new();
        let mut errors = Vec::new();

        let count = read_loop(&mut session, &mut input, &mut out, &mut errors).unwrap();

        assert_eq!(count, 3);
        assert_eq!(session.store().len(), 1);
        let errors = String::from_utf8(errors).unwrap();
        assert!(errors.contains("Invalid salary"));
        assert_eq!(errors.lines().count(), 1);
    }

    #[test]
    fn test_loop_stops_at_exit() {
        let mut session = session();
        let mut input = io::Cursor::new("exit\nadd --name Late -d IT -s 1 -r 1\n");
        let count =
            read_loop(&mut session, &mut input, &mut Vec::new(), &mut Vec::new()).unwrap();

        assert_eq!(count, 1);
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_prompt_password_strips_newline() {
        let mut input = io::Cursor::new("admin123\r\nlist\n");
        assert_eq!(prompt_password(&mut input).unwrap(), "admin123");
    }
}
