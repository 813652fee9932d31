//! Rentbook CLI - browse, book and administer rental listings.
//!
//! # Commands
//!
//! - `rentbook listings` - List, show, create, update and delete products
//! - `rentbook availability <id> <date>` - Check a product on a date
//! - `rentbook book` - Book a product (prompts for missing fields)
//! - `rentbook bookings` - Admin booking table, approve/reject/delete
//! - `rentbook my` - Your reservations, cancel one
//! - `rentbook login` / `register` / `logout` / `whoami` - Session
//! - `rentbook health` - Backend health
//! - `rentbook open <path>` - Render any page by path
//! - `rentbook completions` - Generate shell completions

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use rentbook::App;
use rentbook::config::AppConfig;
use rentbook::domain::{BookingFilter, BookingStatus, Id, ListingUpdate};
use rentbook::session::SessionContext;
use rentbook::views::BookingAction;
use rentbook_log::Level;
use std::io;
use std::path::PathBuf;

mod commands;
mod error;

use commands::{Context, account, bookings, health, listings, open, reservations};
use error::{CliError, CliResult};

/// Rentbook CLI - listing rental and booking client
#[derive(Parser)]
#[command(name = "rentbook")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Browse, book and administer rental products")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} rentbook listings\n  {} rentbook book --product 3 --date 2025-03-05\n  {} rentbook bookings list --status pending\n  {} rentbook open /my-reservations",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML or JSON)
    #[arg(long, global = true, env = "RENTBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Keep the session in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Products available for rent
    #[command(alias = "l", visible_alias = "products")]
    Listings {
        #[command(subcommand)]
        command: Option<ListingsCommands>,
    },

    /// Check whether a product is free on a date
    #[command(alias = "a")]
    Availability {
        /// Product id
        product: Id,
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Book a product
    #[command(alias = "b", visible_alias = "rent")]
    Book(BookArgs),

    /// Manage all bookings (admin)
    Bookings {
        #[command(subcommand)]
        command: Option<BookingsCommands>,
    },

    /// Your reservations
    #[command(visible_alias = "reservations")]
    My {
        #[command(subcommand)]
        command: Option<MyCommands>,
    },

    /// Sign in
    Login {
        #[arg(short, long, env = "RENTBOOK_EMAIL")]
        email: Option<String>,
        #[arg(short, long, env = "RENTBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, env = "RENTBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user and navigation
    Whoami,

    /// Backend health
    Health,

    /// Render a page by path (e.g. /products/3, /bookings)
    Open {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ListingsCommands {
    /// List all products
    List,

    /// Show one product and its bookings
    Show { id: Id },

    /// Add a product (admin)
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        capacity: Option<i64>,
    },

    /// Edit a product (admin)
    Update {
        id: Id,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        capacity: Option<i64>,
    },

    /// Delete a product (admin)
    Delete {
        id: Id,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct BookArgs {
    /// Product id
    #[arg(short, long)]
    product: Option<Id>,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    #[arg(short, long)]
    notes: Option<String>,
}

#[derive(Subcommand)]
enum BookingsCommands {
    /// List bookings, optionally filtered
    List(FilterArgs),

    /// Confirm a booking
    Approve { id: Id },

    /// Reject a booking
    Reject { id: Id },

    /// Delete a booking
    Delete {
        id: Id,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Default)]
struct FilterArgs {
    /// User name or email
    #[arg(short, long)]
    user: Option<String>,

    /// From date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// To date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    #[arg(short, long, value_enum)]
    status: Option<StatusArg>,

    /// Product id
    #[arg(short, long)]
    product: Option<Id>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Confirmed,
    Rejected,
}

impl From<StatusArg> for BookingStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => BookingStatus::Pending,
            StatusArg::Confirmed => BookingStatus::Confirmed,
            StatusArg::Rejected => BookingStatus::Rejected,
        }
    }
}

impl From<FilterArgs> for BookingFilter {
    fn from(args: FilterArgs) -> Self {
        BookingFilter {
            user: args.user,
            date_from: args.from,
            date_to: args.to,
            status: args.status.map(Into::into),
            room_id: args.product,
        }
    }
}

#[derive(Subcommand)]
enum MyCommands {
    /// List your reservations
    List,

    /// Cancel a reservation
    Cancel {
        id: Id,
        #[arg(short, long)]
        yes: bool,
    },
}

fn build_app(cli: &Cli) -> CliResult<App> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let app = if cli.ephemeral {
        App::with_session(config, SessionContext::in_memory())?
    } else {
        App::open(config)?
    };
    Ok(app)
}

async fn run(cli: Cli) -> CliResult<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "rentbook", &mut io::stdout());
        return Ok(());
    }

    let ctx = Context::new(build_app(&cli)?, cli.quiet);

    match cli.command {
        Commands::Listings { command } => match command.unwrap_or(ListingsCommands::List) {
            ListingsCommands::List => listings::list(&ctx).await,
            ListingsCommands::Show { id } => listings::show(&ctx, id).await,
            ListingsCommands::Create {
                name,
                description,
                capacity,
            } => listings::create(&ctx, &name, description.as_deref(), capacity).await,
            ListingsCommands::Update {
                id,
                name,
                description,
                capacity,
            } => {
                let update = ListingUpdate {
                    name,
                    description,
                    capacity,
                };
                listings::update(&ctx, id, update).await
            }
            ListingsCommands::Delete { id, yes } => listings::delete(&ctx, id, yes).await,
        },

        Commands::Availability { product, date } => {
            bookings::availability(&ctx, product, &date).await
        }

        Commands::Book(args) => bookings::book(&ctx, args.product, args.date, args.notes).await,

        Commands::Bookings { command } => {
            match command.unwrap_or(BookingsCommands::List(FilterArgs::default())) {
                BookingsCommands::List(filters) => bookings::list(&ctx, filters.into()).await,
                BookingsCommands::Approve { id } => {
                    bookings::act(&ctx, id, BookingAction::Approve, true).await
                }
                BookingsCommands::Reject { id } => {
                    bookings::act(&ctx, id, BookingAction::Reject, true).await
                }
                BookingsCommands::Delete { id, yes } => {
                    bookings::act(&ctx, id, BookingAction::Delete, yes).await
                }
            }
        }

        Commands::My { command } => match command.unwrap_or(MyCommands::List) {
            MyCommands::List => reservations::list(&ctx).await,
            MyCommands::Cancel { id, yes } => reservations::cancel(&ctx, id, yes).await,
        },

        Commands::Login { email, password } => account::login(&ctx, email, password).await,
        Commands::Register {
            email,
            name,
            password,
        } => account::register(&ctx, email, name, password).await,
        Commands::Logout => account::logout(&ctx).await,
        Commands::Whoami => account::whoami(&ctx),
        Commands::Health => health::run(&ctx).await,
        Commands::Open { path } => open::run(&ctx, &path).await,
        Commands::Completions { .. } => Err(CliError::InvalidArgument(
            "completions are handled before startup".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    rentbook_log::init();
    if cli.verbose {
        rentbook_log::set_level(Level::Debug);
    } else if cli.quiet {
        rentbook_log::set_level(Level::Error);
    }
    rentbook_log::tracing_compat::install();

    if let Err(e) = run(cli).await {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
