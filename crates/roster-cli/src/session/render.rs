//! Output for session commands: tables for people, JSON for machines.

use std::io::Write;

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use roster::Employee;
use serde::Serialize;

type RenderResult = Result<(), Box<dyn std::error::Error>>;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Print a listing, or "No employees found." when it is empty.
pub fn employees(out: &mut dyn Write, list: &[&Employee], json: bool) -> RenderResult {
    if json {
        return write_json(out, &list);
    }
    if list.is_empty() {
        writeln!(out, "{}", "No employees found.".yellow())?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Name",
        "Department",
        "Salary",
        "Rating",
        "Experience",
        "Status",
    ]);
    apply_table_style(&mut table);
    for e in list {
        table.add_row(vec![
            e.id().short(),
            e.name().to_string(),
            e.department().to_string(),
            format!("{:.2}", e.salary()),
            format!("{:.1}", e.performance_rating()),
            e.years_of_experience().to_string(),
            status_label(e).to_string(),
        ]);
    }
    for index in [3, 4, 5] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    writeln!(out, "{table}")?;
    writeln!(out, "{} employee(s)", list.len().to_string().bold())?;
    Ok(())
}

/// Print every field of one employee.
pub fn employee_detail(out: &mut dyn Write, employee: &Employee, json: bool) -> RenderResult {
    if json {
        return write_json(out, employee);
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec!["ID".to_string(), employee.id().to_string()]);
    table.add_row(vec!["Name".to_string(), employee.name().to_string()]);
    table.add_row(vec![
        "Department".to_string(),
        employee.department().to_string(),
    ]);
    table.add_row(vec![
        "Salary".to_string(),
        format!("{:.2}", employee.salary()),
    ]);
    table.add_row(vec![
        "Rating".to_string(),
        format!("{:.1}", employee.performance_rating()),
    ]);
    table.add_row(vec![
        "Experience".to_string(),
        format!("{} years", employee.years_of_experience()),
    ]);
    table.add_row(vec!["Status".to_string(), status_label(employee).to_string()]);
    if !employee.profile_image().is_empty() {
        table.add_row(vec![
            "Image".to_string(),
            employee.profile_image().to_string(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Print a success line, or `{"status": "ok", ...}` in JSON mode.
pub fn success(
    out: &mut dyn Write,
    message: &str,
    details: serde_json::Value,
    json: bool,
) -> RenderResult {
    if json {
        let mut value = serde_json::json!({ "status": "ok", "message": message });
        if let (Some(map), serde_json::Value::Object(extra)) = (value.as_object_mut(), details) {
            map.extend(extra);
        }
        return write_json(out, &value);
    }
    writeln!(out, "{} {}", "✓".green(), message)?;
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> RenderResult {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn status_label(employee: &Employee) -> &'static str {
    if employee.is_active() {
        "Active"
    } else {
        "Inactive"
    }
}
