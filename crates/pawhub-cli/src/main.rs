use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use pawhub_cache::{CacheBackend, CacheConfig, PermissionCache, connect_store};
use pawhub_cli::{create_admin, render_check, render_expansion, set_privileges};
use pawhub_db::{PgAdminDirectory, init_db_pool};

#[derive(Parser)]
#[command(name = "pawhub-cli")]
#[command(about = "PawHub CLI - administrator and privilege tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Raw privilege string, e.g. "111" or "shop:read,pets:write"
        #[arg(long)]
        privileges: Option<String>,
    },
    /// Replace an administrator's privilege string
    SetPrivileges {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        privileges: String,
    },
    /// Print the permissions a privilege string expands to
    Expand { privileges: String },
    /// Check a privilege string against required permissions (any one suffices)
    Check {
        privileges: String,

        #[arg(required = true)]
        required: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Expand { privileges } => {
            println!("{}", render_expansion(&privileges));
        }
        Commands::Check {
            privileges,
            required,
        } => {
            let (allowed, line) = render_check(&privileges, &required);
            println!("{line}");
            if !allowed {
                std::process::exit(1);
            }
        }
        Commands::CreateAdmin {
            username,
            password,
            privileges,
        } => handle_create_admin(username, password, privileges).await?,
        Commands::SetPrivileges { id, privileges } => {
            handle_set_privileges(id, &privileges).await?
        }
    }

    Ok(())
}

async fn connect_directory() -> anyhow::Result<PgAdminDirectory> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    Ok(PgAdminDirectory::new(pool))
}

async fn handle_create_admin(
    username: Option<String>,
    password: Option<String>,
    privileges: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let directory = connect_directory().await?;
    let admin = create_admin(&directory, &username, &password, privileges.as_deref()).await?;

    println!("\n✅ Administrator created successfully!");
    println!("   ID: {}", admin.id);
    println!("   Username: {}", admin.username);
    println!("   Privileges: {}", admin.privileges.as_deref().unwrap_or("(none)"));
    Ok(())
}

async fn handle_set_privileges(id: i64, privileges: &str) -> anyhow::Result<()> {
    let directory = connect_directory().await?;
    let admin = set_privileges(&directory, id, privileges).await?;

    // A running API on the in-memory backend notices the change on its next
    // read; a shared Redis entry can be dropped right away.
    let config = CacheConfig::from_env();
    if config.backend == CacheBackend::Redis {
        let store = connect_store(&config).await?;
        PermissionCache::new(store, &config).invalidate(admin.id).await;
    }

    println!("✅ Privileges for {} set to {:?}", admin.username, privileges);
    println!("{}", render_expansion(privileges));
    Ok(())
}
