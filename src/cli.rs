//! Command-line front end for the installer.
//!
//! It only talks to the command layer and renders the progress events it
//! receives; all installation logic lives in the library.

use clap::{Parser, Subcommand};
use meldmc_installer_lib::commands::install_command::{resolve_install_target, start_install, InstallRequest};
use meldmc_installer_lib::commands::config_commands::{self, ConfigUpdate};
use meldmc_installer_lib::commands::version_command;
use meldmc_installer_lib::error::{AppError, CommandError};
use meldmc_installer_lib::meld::dto::{Channel, ChannelLists};
use meldmc_installer_lib::state::event_state::{EventPayload, EventState};
use meldmc_installer_lib::state::State;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, CommandError>;

/// MeldMC Installer - installs MeldMC and registers it with the Minecraft launcher
#[derive(Parser)]
#[command(name = "meldmc-installer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository base URL to use instead of the configured one
    #[arg(long, value_name = "URL", global = true)]
    pub repository: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the versions published on each channel, latest first
    Versions {
        /// Only list this channel (release or snapshot)
        #[arg(short, long, value_name = "CHANNEL")]
        channel: Option<Channel>,
    },
    /// Install MeldMC and create a launcher profile for it
    Install {
        /// Channel to install from (release or snapshot)
        #[arg(short, long, value_name = "CHANNEL", default_value = "release")]
        channel: Channel,

        /// Version to install (default: latest on the channel)
        #[arg(long, value_name = "VERSION")]
        version: Option<String>,

        /// Minecraft directory (default: the platform's .minecraft)
        #[arg(short, long, value_name = "PATH")]
        dir: Option<PathBuf>,
    },
    /// Show or change the saved installer settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the saved settings (the default)
    Show,
    /// Change one or more saved settings
    Set {
        /// Repository base URL
        #[arg(long, value_name = "URL")]
        repository_url: Option<String>,

        /// Artifact path below each channel, e.g. net/coosanta/meldmc
        #[arg(long, value_name = "PATH")]
        artifact_path: Option<String>,

        /// Minecraft directory to use instead of the platform default
        #[arg(long, value_name = "PATH", conflicts_with = "reset_minecraft_dir")]
        minecraft_dir: Option<PathBuf>,

        /// Go back to the platform's default Minecraft directory
        #[arg(long)]
        reset_minecraft_dir: bool,
    },
}

pub async fn run(state: &State, command: Commands) -> Result<()> {
    match command {
        Commands::Versions { channel } => list_versions(state, channel).await,
        Commands::Install {
            channel,
            version,
            dir,
        } => {
            install(
                state,
                InstallRequest {
                    channel,
                    version,
                    minecraft_dir: dir,
                },
            )
            .await
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => show_config(state).await,
            ConfigAction::Set {
                repository_url,
                artifact_path,
                minecraft_dir,
                reset_minecraft_dir,
            } => {
                let update = ConfigUpdate {
                    repository_base_url: repository_url,
                    artifact_path,
                    minecraft_directory: minecraft_dir,
                    reset_minecraft_directory: reset_minecraft_dir,
                };
                config_commands::update_installer_config(state, update).await?;
                println!("Settings saved.");
                show_config(state).await
            }
        },
    }
}

async fn show_config(state: &State) -> Result<()> {
    let config = config_commands::get_installer_config(state).await?;

    println!("Config file:         {}", state.config_manager.config_path().display());
    println!("Repository URL:      {}", config.repository_base_url);
    println!("Artifact path:       {}", config.artifact_path);
    match (&config.minecraft_directory, config.minecraft_dir()) {
        (Some(dir), _) => println!("Minecraft directory: {}", dir.display()),
        (None, Some(default)) => {
            println!("Minecraft directory: {} (platform default)", default.display())
        }
        (None, None) => println!("Minecraft directory: not set"),
    }
    Ok(())
}

async fn load_versions(state: &State) -> Result<ChannelLists> {
    println!("Loading versions...");
    version_command::get_versions(state, &EventState::disabled())
        .await
        .inspect_err(|_| {
            eprintln!("Error: Could not connect to the MeldMC repository.");
            eprintln!("Please check your internet connection and try again.");
            eprintln!("If the problem persists, the repository may be temporarily unavailable.");
        })
}

async fn list_versions(state: &State, only: Option<Channel>) -> Result<()> {
    let lists = load_versions(state).await?;

    for channel in Channel::ALL {
        if only.is_some_and(|wanted| wanted != channel) {
            continue;
        }
        let records = lists.for_channel(channel);
        println!("{} ({}):", channel, records.len());
        for record in records {
            println!("  {}", record);
        }
    }
    Ok(())
}

async fn install(state: &State, request: InstallRequest) -> Result<()> {
    let lists = load_versions(state).await?;
    let default_dir = config_commands::get_default_minecraft_dir(state).await?;
    let (version, minecraft_dir) = resolve_install_target(&lists, &request, default_dir)?;

    println!(
        "Installing MeldMC {} ({}) into {}",
        version,
        version.channel(),
        minecraft_dir.display()
    );

    let mut handle = start_install(state, version, minecraft_dir).await?;
    while let Some(event) = handle.events.recv().await {
        render_event(&event);
    }

    let outcome = handle
        .task
        .await
        .map_err(|e| CommandError::from(AppError::Task(e)))??;

    println!();
    println!(
        "MeldMC {} has been installed successfully!",
        outcome.version.identifier()
    );
    println!("You can now select the '{}' profile in your Minecraft launcher.", outcome.profile_name);
    Ok(())
}

fn render_event(event: &EventPayload) {
    match (&event.error, event.progress) {
        (Some(error), _) => eprintln!("[  0%] {}: {}", event.message, error),
        (None, Some(progress)) => println!("[{:>3.0}%] {}", progress, event.message),
        (None, None) => println!("       {}", event.message),
    }
}
