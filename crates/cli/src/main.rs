//! Clementine CLI - drive the commerce client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! clem catalog list
//! clem catalog get <product-id>
//!
//! # Manage the local cart
//! clem cart show
//! clem cart add <product-id> --quantity 2
//! clem cart remove <product-id>
//! clem cart clear
//!
//! # Manage the wishlist
//! clem wishlist show
//! clem wishlist toggle <product-id>
//!
//! # Session
//! clem session login -e shopper@example.com -p secret
//! clem session whoami
//! clem session logout
//! ```
//!
//! Configuration comes from `CLEMENTINE_API_URL` and `CLEMENTINE_DATA_DIR`
//! (see `clementine_client::config`); a `.env` file is honored.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's command output goes to stdout by design.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clem")]
#[command(author, version, about = "Clementine commerce CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Log in, log out, inspect the session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// Show one product
    Get { product_id: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart (fetched from the catalog)
    Add {
        product_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add or remove a product from the wishlist
    Toggle { product_id: String },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Log in against the auth service
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Show the active identity
    Whoami,
    /// Log out and erase the persisted identity
    Logout,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&ctx).await?,
            CatalogAction::Get { product_id } => commands::catalog::get(&ctx, &product_id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx)?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&ctx, &product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&ctx, &product_id)?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&ctx)?,
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&ctx, &product_id).await?;
            }
        },
        Commands::Session { action } => match action {
            SessionAction::Login { email, password } => {
                commands::session::login(&ctx, &email, &password).await?;
            }
            SessionAction::Whoami => commands::session::whoami(&ctx)?,
            SessionAction::Logout => commands::session::logout(&ctx)?,
        },
    }

    Ok(())
}
