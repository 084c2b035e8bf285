//! Course CLI commands: create, list, delete.

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use campus_core::repository::course::CourseFilter;
use campus_types::course::CreateCourseRequest;

use crate::state::AppState;

/// Add a course to the catalog via interactive wizard or one-shot flags.
pub async fn create_course(
    state: &AppState,
    code: Option<String>,
    title: Option<String>,
    credits: Option<i32>,
    schedule: Option<String>,
    json: bool,
) -> Result<()> {
    let code = match code {
        Some(c) => c,
        None => Input::<String>::new()
            .with_prompt("Catalog code (e.g. CS-101)")
            .interact_text()?,
    };

    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("Course title")
            .interact_text()?,
    };

    let credits = match credits {
        Some(c) => c,
        None => Input::<i32>::new()
            .with_prompt("Credits (1-10)")
            .default(3)
            .interact_text()?,
    };

    let schedule = match schedule {
        Some(s) => s,
        None => Input::<String>::new()
            .with_prompt("Schedule")
            .default("TBA".to_string())
            .interact_text()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Adding course...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let request = CreateCourseRequest {
        code,
        title,
        credits,
        schedule,
    };

    let course = state.course_service.create_course(request).await?;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&course)?);
        return Ok(());
    }

    println!();
    println!("  {} Course added!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Code:").bold(), style(&course.code).cyan());
    println!("  {}  {}", style("Title:").bold(), &course.title);
    println!("  {}  {}", style("Credits:").bold(), course.credits);
    println!("  {}  {}", style("Schedule:").bold(), &course.schedule);
    println!();

    Ok(())
}

/// List courses in a table, optionally filtered by credits or code substring.
pub async fn list_courses(
    state: &AppState,
    credits: Option<i32>,
    code: Option<String>,
    json: bool,
) -> Result<()> {
    let filter = Some(CourseFilter {
        credits,
        code_contains: code,
        ..Default::default()
    });

    let courses = state.course_service.list_courses(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
        return Ok(());
    }

    if courses.is_empty() {
        println!();
        println!("  No courses found. Add one with {}", style("campus create course").yellow());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Code", "Title", "Credits", "Schedule"]);

    for course in &courses {
        table.add_row(vec![
            Cell::new(&course.code),
            Cell::new(&course.title),
            Cell::new(course.credits),
            Cell::new(&course.schedule),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} course(s)", courses.len());
    println!();

    Ok(())
}

/// Delete a course after confirmation (enrollments cascade).
pub async fn delete_course(state: &AppState, code: &str, force: bool, json: bool) -> Result<()> {
    let course = state.course_service.get_course_by_code(code).await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete course '{}' and all its enrollments?",
                course.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    state.course_service.delete_course(&course.id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": true, "code": code}));
        return Ok(());
    }

    println!("  {} Course deleted.", style("✓").green());

    Ok(())
}
