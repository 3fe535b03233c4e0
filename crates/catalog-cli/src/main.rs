use catalog_cli::seeder::{self, AdminOutcome, SeedConfig, SeedResult};
use catalog_config::DatabaseConfig;
use catalog_db::{init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Catalog CLI - Administrative tools for the Catalog API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account, or promote an existing user
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Insert fake products
    SeedProducts {
        /// Number of products to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,
    },
    /// Delete every product
    ClearProducts {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> SeedResult<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::SeedProducts { count } => {
            seeder::seed_products(&pool, SeedConfig::new(count)).await?;
            Ok(())
        }
        Commands::ClearProducts { yes } => handle_clear_products(&pool, yes).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> SeedResult<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    match seeder::create_or_promote_admin(pool, &name, &email, &password).await? {
        AdminOutcome::Created(id) => {
            println!("\n✅ Administrator created");
            println!("   ID: {}", id);
            println!("   Email: {}", email.trim().to_lowercase());
        }
        AdminOutcome::Promoted(id) => {
            println!("\n✅ Existing user promoted to administrator");
            println!("   ID: {}", id);
        }
    }

    Ok(())
}

async fn handle_clear_products(pool: &PgPool, yes: bool) -> SeedResult<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete every product?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Aborted");
        return Ok(());
    }

    seeder::clear_products(pool).await?;
    Ok(())
}
