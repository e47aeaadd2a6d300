use std::process::ExitCode;

use clap::{Parser, Subcommand};
use coursebook_cli::accounts::create_user;
use coursebook_cli::seeder::{self, SeedConfig};
use coursebook_config::{DatabaseConfig, PasswordConfig};
use coursebook_db::{PgStore, init_db_pool, run_migrations};
use coursebook_models::CreateUserDto;
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursebook-cli")]
#[command(about = "Coursebook CLI - Administrative tools for Coursebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address, used as the login identifier
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users and courses
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "5")]
        users: usize,

        /// Number of courses per user
        #[arg(short = 'c', long, default_value = "3")]
        courses: usize,
    },
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(label).interact_text()?),
    }
}

fn prompt_password(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database = DatabaseConfig::from_env()?;
    let password = PasswordConfig::from_env()?;

    let pool = init_db_pool(&database).await?;
    run_migrations(&pool).await?;
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password: secret,
        } => {
            let dto = CreateUserDto {
                first_name: Some(prompt(first_name, "First name")?),
                last_name: Some(prompt(last_name, "Last name")?),
                email_address: Some(prompt(email, "Email address")?),
                password: Some(prompt_password(secret)?),
            };
            let user = create_user(&store, password.hash_cost, dto).await?;
            println!("\n✅ User created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email_address);
            println!("   Name: {} {}", user.first_name, user.last_name);
        }
        Commands::Seed { users, courses } => {
            let config = SeedConfig::new(users, courses);
            seeder::seed_all(&store, config, password.hash_cost).await?;
            println!(
                "\n✅ Seeding complete. Every seeded user logs in with password \"{}\".",
                seeder::SEED_PASSWORD
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
