//! Companion binary - runs the family health record in one process.

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service_lib::JwtIdentityProvider;
use common::CompanionConfig;
use companion_lib::{run_demo, DemoOptions, Services};
use domain::{AuthUser, Gender};

#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "Family health record companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a fresh account through profiles, reminders, documents, diet and sharing
    Demo {
        #[arg(long, default_value = "Ana")]
        name: String,
        #[arg(long, default_value_t = 8)]
        age: i32,
        #[arg(long, default_value = "female")]
        gender: Gender,
    },
    /// Print a development identity token
    Token {
        #[arg(long)]
        uid: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = CompanionConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.identity.uses_dev_secret() {
        warn!("IDENTITY_SECRET is not set, using the development secret");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { name, age, gender } => {
            info!(blobs = %config.blob.root_dir, "Starting demo");
            let services = Services::from_config(&config);
            let options = DemoOptions {
                profile_name: name,
                age,
                gender,
                ..DemoOptions::default()
            };

            let report = run_demo(&services, options).await?;
            println!("{report}");
        }
        Commands::Token { uid, email, name } => {
            let mut user = AuthUser::new(uid);
            user.email = email;
            user.display_name = name;

            let token = JwtIdentityProvider::new(config.identity).mint_dev_token(&user)?;
            println!("{token}");
        }
    }

    Ok(())
}
