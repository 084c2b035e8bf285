//! System status dashboard command.

use anyhow::Result;
use console::style;
use sqlx::Row;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows student, course, and enrollment counts plus storage info and version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let total_students = count(state, "SELECT COUNT(*) as cnt FROM students").await?;
    let total_courses = count(state, "SELECT COUNT(*) as cnt FROM courses").await?;
    let total_enrollments = count(state, "SELECT COUNT(*) as cnt FROM enrollments").await?;
    let active_enrollments = count(
        state,
        "SELECT COUNT(*) as cnt FROM enrollments WHERE status = 'active'",
    )
    .await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "students": total_students,
            "courses": total_courses,
            "enrollments": {
                "total": total_enrollments,
                "active": active_enrollments,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Campus v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Records ──").dim());
    println!("  Students:    {}", style(total_students).bold());
    println!("  Courses:     {}", style(total_courses).bold());
    println!("  Enrollments: {}", style(total_enrollments).bold());
    if total_enrollments > 0 {
        println!("  Active:      {}", style(active_enrollments).green());
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}

async fn count(state: &AppState, sql: &str) -> Result<i64> {
    let row = sqlx::query(sql).fetch_one(&state.db_pool.reader).await?;
    Ok(row.try_get("cnt").unwrap_or(0))
}
