//! Departments command - print the configured picklist.

use colored::Colorize;
use roster::RosterConfig;

pub fn run(config: &RosterConfig, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(&config.departments)?);
        return Ok(());
    }

    println!("{}", "Departments".cyan().bold());
    for department in &config.departments {
        println!("  {}", department);
    }
    Ok(())
}
