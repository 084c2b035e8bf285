//! Enrollment CLI commands: enroll and drop.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Enroll a student (by national ID) in a course (by catalog code).
pub async fn enroll(
    state: &AppState,
    student: &str,
    course: &str,
    json: bool,
) -> Result<()> {
    let student = state
        .student_service
        .get_student_by_national_id(student)
        .await?;
    let course = state.course_service.get_course_by_code(course).await?;

    let confirmation = state
        .enrollment_service
        .enroll(&student.id, &course.id)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&confirmation)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Enrolled {} in {}",
        style("✓").green().bold(),
        style(&student.full_name).cyan(),
        style(&course.code).cyan()
    );
    println!(
        "  {}",
        style(format!("{} ({} credits, {})", course.title, course.credits, course.schedule)).dim()
    );
    println!();

    Ok(())
}

/// Drop a student (by national ID) from a course (by catalog code).
pub async fn drop(state: &AppState, student: &str, course: &str, json: bool) -> Result<()> {
    let student = state
        .student_service
        .get_student_by_national_id(student)
        .await?;
    let course = state.course_service.get_course_by_code(course).await?;

    state
        .enrollment_service
        .as_ref()
        .drop(&student.id, &course.id)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "dropped": true,
                "student": student.national_id,
                "course": course.code,
            })
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Dropped {} from {}",
        style("✓").green().bold(),
        style(&student.full_name).cyan(),
        style(&course.code).cyan()
    );
    println!();

    Ok(())
}
