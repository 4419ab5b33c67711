//! CLI administration tool for campus-registry.
//!
//! Provides commands for viewing statistics, removing records and checking
//! the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Delete a user (asks for confirmation)
//! cargo run --bin admin -- user delete 3f1c...
//!
//! # Delete a course without prompting
//! cargo run --bin admin -- course delete 9a2e... -y
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`
//!
//! Deleting a user or course does not touch enrollments that reference it.

use campus_registry::application::services::ResourceService;
use campus_registry::config::{Config, mask_connection_string};
use campus_registry::domain::filter::FilterPredicate;
use campus_registry::infrastructure::persistence::{
    PgCourseRepository, PgEnrollmentRepository, PgUserRepository,
};
use campus_registry::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing campus-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show record counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: RecordAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema
    Check,
}

/// Per-record subcommands shared by users and courses.
#[derive(Subcommand)]
enum RecordAction {
    /// Delete a record by id
    Delete {
        /// Record id
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Stats => handle_stats(&state(&pool)).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::User { action } => handle_user_action(action, &state(&pool)).await?,
        Commands::Course { action } => handle_course_action(action, &state(&pool)).await?,
    }

    Ok(())
}

/// Services over the PostgreSQL repositories, as the server wires them.
fn state(pool: &PgPool) -> AppState {
    let pool = Arc::new(pool.clone());

    AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgCourseRepository::new(pool.clone())),
        Arc::new(PgEnrollmentRepository::new(pool)),
        Default::default(),
    )
}

/// Displays record counts.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics
///
///   Users:        12
///   Courses:      4
///   Enrollments:  30
///     P  pending   10
///     A  active    15
///     S  studying   5
///     I  inactive   0
/// ```
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let all = FilterPredicate::default();
    let (users, courses, enrollments, by_status) = tokio::try_join!(
        state.users.count(&all),
        state.courses.count(&all),
        state.enrollments.count(&all),
        state.enrollments.status_summary(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to load statistics: {e}"))?;

    println!("  Users:        {}", users.to_string().bright_green().bold());
    println!("  Courses:      {}", courses.to_string().bright_green().bold());
    println!(
        "  Enrollments:  {}",
        enrollments.to_string().bright_green().bold()
    );

    for (status, count) in by_status {
        println!(
            "    {}  {:<9} {}",
            status.as_str().bright_white(),
            format!("{status:?}").to_lowercase().bright_black(),
            count.to_string().cyan()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());

            for table in ["users", "courses", "enrollments"] {
                let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
                    .bind(table)
                    .fetch_one(pool)
                    .await?;

                let status = if exists {
                    "present".green()
                } else {
                    "missing (start the server to run migrations)".red()
                };
                println!("  Table {:<12} {}", table.cyan(), status);
            }
            println!();
        }
    }

    Ok(())
}

/// Deletes a user after showing who it is.
async fn handle_user_action(action: RecordAction, state: &AppState) -> Result<()> {
    let RecordAction::Delete { id, yes } = action;

    println!("{}", "🗑  Delete User".bright_blue().bold());
    println!();

    let user = state
        .users
        .get(&id)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("  Name:  {}", format!("{} {}", user.first_name, user.last_name).cyan());
    println!("  Email: {}", user.email.as_deref().unwrap_or("-"));
    println!("  ID:    {}", user.id.bright_black());
    println!();

    if !confirm(yes, "Delete this user?")? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    state
        .users
        .delete(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {e}"))?;

    println!("{}", "✅ User deleted".green().bold());
    Ok(())
}

/// Deletes a course after showing which one it is.
async fn handle_course_action(action: RecordAction, state: &AppState) -> Result<()> {
    let RecordAction::Delete { id, yes } = action;

    println!("{}", "🗑  Delete Course".bright_blue().bold());
    println!();

    let course = state
        .courses
        .get(&id)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("  Name:  {}", course.name.cyan());
    println!("  Dates: {} → {}", course.start_date, course.end_date);
    println!("  ID:    {}", course.id.bright_black());
    println!();

    if !confirm(yes, "Delete this course?")? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    state
        .courses
        .delete(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete course: {e}"))?;

    println!("{}", "✅ Course deleted".green().bold());
    Ok(())
}

/// Asks for confirmation (default: No) unless `skip` is set.
fn confirm(skip: bool, prompt: &str) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
