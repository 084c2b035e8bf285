//! Student CLI commands: create, list, show, delete.

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use campus_core::repository::student::StudentFilter;
use campus_types::student::CreateStudentRequest;

use crate::state::AppState;

/// Register a new student via interactive wizard or one-shot flags.
///
/// # Examples
///
/// ```bash
/// # Interactive wizard
/// campus create student
///
/// # One-shot with flags
/// campus create student --national-id 1002003004 --name "Ana Torres" \
///     --email ana@uni.edu --semester 3
/// ```
pub async fn create_student(
    state: &AppState,
    national_id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    semester: Option<i32>,
    json: bool,
) -> Result<()> {
    let national_id = match national_id {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("National ID")
            .interact_text()?,
    };

    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Full name")
            .interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()?,
    };

    let semester = match semester {
        Some(s) => s,
        None => Input::<i32>::new()
            .with_prompt("Semester (1-12)")
            .default(1)
            .interact_text()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Registering student...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let request = CreateStudentRequest {
        national_id,
        full_name: name,
        email,
        semester,
    };

    let student = state.student_service.create_student(request).await?;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&student)?);
        return Ok(());
    }

    println!();
    println!("  {} Student registered!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Name:").bold(), style(&student.full_name).cyan());
    println!("  {}  {}", style("National ID:").bold(), &student.national_id);
    println!("  {}  {}", style("Semester:").bold(), student.semester);
    println!("  {}  {}", style("ID:").bold(), style(student.id.to_string()).dim());
    println!();

    Ok(())
}

/// List students in a table, optionally filtered by semester.
pub async fn list_students(
    state: &AppState,
    semester: Option<i32>,
    sort: &str,
    json: bool,
) -> Result<()> {
    let filter = Some(StudentFilter {
        semester,
        sort_by: Some(sort.to_string()),
        ..Default::default()
    });

    let students = state.student_service.list_students(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&students)?);
        return Ok(());
    }

    if students.is_empty() {
        println!();
        println!("  No students found. Register one with {}", style("campus create student").yellow());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["National ID", "Name", "Email", "Semester"]);

    for student in &students {
        table.add_row(vec![
            Cell::new(&student.national_id),
            Cell::new(&student.full_name),
            Cell::new(&student.email),
            Cell::new(student.semester),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} student(s)", students.len());
    println!();

    Ok(())
}

/// Show a student with their enrolled courses.
pub async fn show_student(state: &AppState, national_id: &str, json: bool) -> Result<()> {
    let student = state
        .student_service
        .get_student_by_national_id(national_id)
        .await?;
    let transcript = state.enrollment_service.transcript(&student.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&student.full_name).cyan().bold());
    println!("  National ID: {}", student.national_id);
    println!("  Email:       {}", student.email);
    println!("  Semester:    {}", student.semester);
    println!();

    if transcript.courses.is_empty() {
        println!("  Not enrolled in any course.");
    } else {
        println!("  {}", style("── Courses ──").dim());
        for course in &transcript.courses {
            println!(
                "  {} {} ({} credits, {})",
                style("•").dim(),
                course.code,
                course.credits,
                course.schedule
            );
        }
    }
    println!();

    Ok(())
}

/// Delete a student after confirmation (enrollments cascade).
pub async fn delete_student(
    state: &AppState,
    national_id: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let student = state
        .student_service
        .get_student_by_national_id(national_id)
        .await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete student '{}' and all their enrollments?",
                student.full_name
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    state.student_service.delete_student(&student.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "national_id": national_id})
        );
        return Ok(());
    }

    println!("  {} Student deleted.", style("✓").green());

    Ok(())
}
