//! Campus CLI and REST API entry point.
//!
//! Binary name: `campus`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, CreateResource, DeleteResource, ListResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,campus=debug",
        _ => "trace",
    };
    campus_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "campus", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::Student {
                national_id,
                name,
                email,
                semester,
            } => {
                cli::student::create_student(&state, national_id, name, email, semester, cli.json)
                    .await?;
            }
            CreateResource::Course {
                code,
                title,
                credits,
                schedule,
            } => {
                cli::course::create_course(&state, code, title, credits, schedule, cli.json)
                    .await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Students { semester, sort } => {
                cli::student::list_students(&state, semester, &sort, cli.json).await?;
            }
            ListResource::Courses { credits, code } => {
                cli::course::list_courses(&state, credits, code, cli.json).await?;
            }
        },

        Commands::Show { national_id } => {
            cli::student::show_student(&state, &national_id, cli.json).await?;
        }

        Commands::Delete { resource } => match resource {
            DeleteResource::Student { national_id, force } => {
                cli::student::delete_student(&state, &national_id, force, cli.json).await?;
            }
            DeleteResource::Course { code, force } => {
                cli::course::delete_course(&state, &code, force, cli.json).await?;
            }
        },

        Commands::Enroll { student, course } => {
            cli::enrollment::enroll(&state, &student, &course, cli.json).await?;
        }

        Commands::Drop { student, course } => {
            cli::enrollment::drop(&state, &student, &course, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Campus API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    campus_observe::tracing_setup::shutdown_tracing();

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
