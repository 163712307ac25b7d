use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod db;
mod error;
mod gpa;
mod models;
mod report;
mod store;

use models::GpaSnapshot;
use store::RecordStore;

#[derive(Parser)]
#[command(name = "gradepoint")]
#[command(about = "Course grade tracker with weighted GPA summaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a course grade
    Add {
        #[arg(long)]
        course: String,
        #[arg(long)]
        credits: f64,
        #[arg(long)]
        grade: i64,
        /// Freshman, Sophomore, Junior, or Senior
        #[arg(long)]
        year: String,
    },
    /// Remove a course record by id
    Remove {
        #[arg(long)]
        id: Uuid,
    },
    /// Replace a course record with new values (a fresh id is assigned)
    Edit {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        course: String,
        #[arg(long)]
        credits: f64,
        #[arg(long)]
        grade: i64,
        #[arg(long)]
        year: String,
    },
    /// List all course records
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the current GPA figures
    Gpa {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Bulk-load course records from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Generate a markdown grade report
    Report {
        #[arg(long, default_value = "grade-report.md")]
        out: PathBuf,
    },
}

fn print_summary(snapshot: &GpaSnapshot) {
    println!("Overall GPA: {:.2}", snapshot.overall);
    println!("Freshman GPA: {:.2}", snapshot.freshman);
    println!("Sophomore GPA: {:.2}", snapshot.sophomore);
    println!("Junior GPA: {:.2}", snapshot.junior);
    println!("Senior GPA: {:.2}", snapshot.senior);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://gradepoint.db?mode=rwc".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let mut store = RecordStore::open(pool).await?;

    match cli.command {
        Commands::Add {
            course,
            credits,
            grade,
            year,
        } => {
            let id = store.add(&course, credits, grade, &year).await?;
            println!("Added {course} as record {id}.");
            print_summary(store.snapshot());
        }
        Commands::Remove { id } => {
            store.remove(id).await?;
            println!("Removed record {id}.");
            print_summary(store.snapshot());
        }
        Commands::Edit {
            id,
            course,
            credits,
            grade,
            year,
        } => {
            let new_id = store.edit(id, &course, credits, grade, &year).await?;
            println!("Replaced record {id}; new id {new_id}.");
            print_summary(store.snapshot());
        }
        Commands::List { json } => {
            let records = store.records().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No course records yet.");
            } else {
                for record in records {
                    let points = gpa::grade_points(record.grade)?;
                    println!(
                        "- {} | {} ({}) {} credits, grade {}, {:.1} points",
                        record.id,
                        record.course,
                        record.year,
                        record.credits,
                        record.grade,
                        points
                    );
                }
            }
        }
        Commands::Gpa { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.snapshot())?);
            } else {
                print_summary(store.snapshot());
            }
        }
        Commands::Import { csv } => {
            let inserted = store.import_csv(&csv).await?;
            println!("Imported {inserted} records from {}.", csv.display());
            print_summary(store.snapshot());
        }
        Commands::Report { out } => {
            let records = store.records().await?;
            let report = report::build_report(&records, store.snapshot())?;
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
