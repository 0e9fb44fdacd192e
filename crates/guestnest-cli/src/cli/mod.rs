//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use guestnest_core::config::{self, Config};
use guestnest_core::{HttpIdentityClient, SessionStore};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "guestnest")]
#[command(version)]
#[command(about = "Browse GuestNest stays from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to open in the interactive browser (e.g. /homes, /login)
    #[arg(long, default_value = "/")]
    route: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show who the backend thinks you are
    Whoami,
    /// Log in with a username or email
    Login {
        /// Username or email
        #[arg(value_name = "IDENTIFIER")]
        identifier: String,
        #[arg(long, env = "GUESTNEST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long, env = "GUESTNEST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when config.toml is broken.
    if let Some(Commands::Config { command }) = &cli.command {
        return run_config(command);
    }

    let config = Config::load().context("load config")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    let Some(command) = cli.command else {
        let _log_guard = logging::init_file(&config.log_filter, &config::paths::logs_dir())?;
        let store = build_store(&config)?;
        // The browser spawns store calls onto the ambient runtime.
        let _rt_guard = rt.enter();
        return guestnest_tui::run_interactive(store, &cli.route);
    };

    logging::init_stderr(&config.log_filter);
    rt.block_on(dispatch(command, &config))
}

async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    let store = build_store(config)?;

    match command {
        Commands::Whoami => commands::session::whoami(&store).await,
        Commands::Login {
            identifier,
            password,
        } => commands::session::login(&store, &identifier, &password).await,
        Commands::Signup {
            username,
            email,
            name,
            password,
        } => commands::session::signup(&store, &username, &email, &name, &password).await,
        Commands::Logout => commands::session::logout(&store).await,
        Commands::Config { command } => run_config(&command),
    }
}

fn run_config(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
    }
}

fn build_store(config: &Config) -> Result<SessionStore<HttpIdentityClient>> {
    let client = HttpIdentityClient::from_config(config).context("configure backend client")?;
    tracing::debug!(backend = %client.base_url(), "identity backend");
    Ok(SessionStore::new(client))
}
