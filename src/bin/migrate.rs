use anyhow::{Result, anyhow};
use medicine_bot::config::database_url_from_env;
use medicine_bot::database::connection::DatabaseManager;
use medicine_bot::database::models::{MedicineHistory, MedicineStatusRow};
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize basic logging for the migration
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    dotenvy::dotenv().ok();
    let database_url = database_url_from_env();

    match command {
        "migrate" | "up" => run_migrations(&database_url).await,
        "check" => check_database(&database_url).await,
        "reset" => reset_database(&database_url).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn sqlite_path(database_url: &str) -> Option<&str> {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
}

async fn run_migrations(database_url: &str) -> Result<()> {
    println!("💊 Medicine Bot - Database Migration Tool");
    println!("=========================================");
    println!("📊 Database URL: {}", mask_url(database_url));

    // Ensure data directory exists for SQLite
    if let Some(db_path) = sqlite_path(database_url) {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                println!("📁 Creating directory: {}", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(_) => println!("✅ Migrations completed successfully!"),
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database(database_url: &str) -> Result<()> {
    println!("🔍 Checking database connection and schema...");
    println!("📊 Database URL: {}", mask_url(database_url));

    let db_manager = DatabaseManager::new(database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.table_names().await {
        Ok(tables) => {
            println!("✅ Database connection successful!");
            println!("📋 Found tables:");
            for table in tables {
                println!("  • {table}");
            }
        }
        Err(e) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
            return Ok(());
        }
    }

    match MedicineStatusRow::find(&db_manager.pool).await {
        Ok(Some(row)) => println!(
            "💊 Remaining: {} (last taken: {})",
            row.remaining,
            row.last_taken_at.as_deref().unwrap_or("never")
        ),
        Ok(None) => println!("💊 Counter not initialized yet"),
        Err(e) => println!("⚠️  Could not read counter: {e}"),
    }
    if let Ok(count) = MedicineHistory::count(&db_manager.pool).await {
        println!("📜 History entries: {count}");
    }

    Ok(())
}

async fn reset_database(database_url: &str) -> Result<()> {
    println!("⚠️  WARNING: This will delete ALL data in the database!");
    println!("🤔 Are you sure you want to continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() != "yes" {
        println!("❌ Reset cancelled.");
        return Ok(());
    }

    // For SQLite, we can just delete the file
    let Some(db_path) = sqlite_path(database_url) else {
        return Err(anyhow!("Reset is only supported for SQLite databases"));
    };
    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("🗑️  Deleted database file: {db_path}");
    }

    println!("🔄 Recreating database schema...");
    run_migrations(database_url).await?;

    println!("✅ Database reset completed!");

    Ok(())
}

fn mask_url(url: &str) -> String {
    match sqlite_path(url).and_then(|path| Path::new(path).file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("💊 Medicine Bot - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run database migrations (default)");
    println!("    check          Check database connection, schema and counter");
    println!("    reset          Reset database (SQLite only) - DESTRUCTIVE!");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: sqlite:./data/medicine.db)");
    println!();
}
