//! Checkout quantity CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! cq-cli migrate storefront
//!
//! # Run admin database migrations
//! cq-cli migrate admin
//!
//! # Run all database migrations
//! cq-cli migrate all
//!
//! # Create admin user (prompts for a password)
//! cq-cli admin create -e admin@example.com -n "Admin Name" -r super_admin
//!
//! # Read or change the checkout quantity label
//! cq-cli label get
//! cq-cli label set "Seats per day"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "cq-cli")]
#[command(author, version, about = "Checkout quantity CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Read or change the checkout quantity label
    Label {
        #[command(subcommand)]
        action: LabelAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run admin database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin role (`super_admin`, `admin`, `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[derive(Subcommand)]
enum LabelAction {
    /// Print the current label
    Get,
    /// Store a new label (an empty string is allowed)
    Set {
        /// New label text
        value: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Create { email, name, role } => {
                commands::admin::create_user(&email, &name, &role).await?;
            }
        },
        Commands::Label { action } => match action {
            LabelAction::Get => commands::label::get().await?,
            LabelAction::Set { value } => commands::label::set(&value).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_create_defaults_role() {
        let cli = Cli::try_parse_from([
            "cq-cli", "admin", "create", "-e", "ops@example.com", "-n", "Ops",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Admin {
            action: AdminAction::Create { role, .. },
        } = cli.command
        else {
            panic!("expected admin create");
        };
        assert_eq!(role, "admin");
    }

    #[test]
    fn test_parse_label_set_allows_empty() {
        let cli = Cli::try_parse_from(["cq-cli", "label", "set", ""])
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(
            cli.command,
            Commands::Label { action: LabelAction::Set { value } } if value.is_empty()
        ));
    }
}
