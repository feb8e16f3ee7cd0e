//! Cartwheel CLI - storefront client for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Validate a sign-up form
//! cartwheel signup validate form.json --billing-country Germany
//!
//! # Check a postal code
//! cartwheel postal-code Germany 10115
//!
//! # Apply a discount code to the cached cart
//! cartwheel cart discount SUMMER
//! ```
//!
//! # Commands
//!
//! - `signup` - Validate, preview and submit sign-up forms
//! - `postal-code` - Check a postal code against a country's format
//! - `cart` - Inspect and mutate the locally cached cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cartwheel_core::{CartAction, LineItemId};
use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with sign-up forms
    Signup {
        #[command(subcommand)]
        action: SignupAction,
    },
    /// Check a postal code against a country's format
    PostalCode {
        /// Country name (e.g. `Germany`, `UnitedKingdom`)
        country: String,
        /// Postal code to check
        code: String,
    },
    /// Inspect and mutate the cached cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
}

#[derive(Args)]
struct SignupForm {
    /// JSON file with the sign-up form fields
    file: PathBuf,

    /// Selected billing country
    #[arg(long)]
    billing_country: Option<String>,

    /// Selected shipping country
    #[arg(long)]
    shipping_country: Option<String>,
}

#[derive(Subcommand)]
enum SignupAction {
    /// Report validation errors
    Validate(SignupForm),
    /// Print the customer draft for a valid form
    Draft(SignupForm),
    /// Register the customer with the commerce API
    Submit(SignupForm),
}

#[derive(Subcommand)]
enum CartCommand {
    /// Print the cached cart
    Show,
    /// Re-fetch the cached cart
    Refresh,
    /// Apply a discount code
    Discount {
        /// Discount code
        code: String,
    },
    /// Remove units of a line item
    Remove {
        /// Line item ID
        line_item_id: String,

        /// Number of units to remove
        #[arg(short, long, default_value_t = 1)]
        quantity: u64,
    },
    /// Set the quantity of a line item
    Quantity {
        /// Line item ID
        line_item_id: String,
        /// New quantity
        quantity: u64,
    },
    /// Delete the cart
    Delete,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|v| !v.is_empty())?;
    let environment = std::env::var("SENTRY_ENVIRONMENT").ok();

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: environment.map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_cli=info,cartwheel_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Signup { action } => match action {
            SignupAction::Validate(form) => {
                commands::signup::validate(
                    &form.file,
                    form.billing_country.as_deref(),
                    form.shipping_country.as_deref(),
                )?;
            }
            SignupAction::Draft(form) => {
                commands::signup::draft(
                    &form.file,
                    form.billing_country.as_deref(),
                    form.shipping_country.as_deref(),
                )?;
            }
            SignupAction::Submit(form) => {
                commands::signup::submit(
                    &form.file,
                    form.billing_country.as_deref(),
                    form.shipping_country.as_deref(),
                )
                .await?;
            }
        },
        Commands::PostalCode { country, code } => {
            commands::signup::postal_code(&country, &code)?;
        }
        Commands::Cart { action } => {
            let service = commands::cart::service()?;
            match action {
                CartCommand::Show => commands::cart::show(&service)?,
                CartCommand::Refresh => commands::cart::refresh(&service).await?,
                CartCommand::Discount { code } => {
                    commands::cart::apply(&service, &CartAction::AddDiscountCode { code }).await?;
                }
                CartCommand::Remove {
                    line_item_id,
                    quantity,
                } => {
                    let action = CartAction::RemoveLineItem {
                        line_item_id: LineItemId::new(line_item_id),
                        quantity,
                    };
                    commands::cart::apply(&service, &action).await?;
                }
                CartCommand::Quantity {
                    line_item_id,
                    quantity,
                } => {
                    let action = CartAction::ChangeQuantity {
                        line_item_id: LineItemId::new(line_item_id),
                        quantity,
                    };
                    commands::cart::apply(&service, &action).await?;
                }
                CartCommand::Delete => {
                    commands::cart::apply(&service, &CartAction::DeleteCart).await?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
