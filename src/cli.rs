use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Administrative console for the listing site.
#[derive(Parser, Debug)]
#[command(name = "estate-admin", version, about)]
pub struct Cli {
    /// Configuration file; missing files fall back to defaults.
    #[arg(
        long,
        short,
        global = true,
        default_value = "config.yaml",
        env = "ESTATE_ADMIN_CONFIG"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ESTATE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and clear the stored session.
    Logout,
    /// Report whether a usable session is stored.
    Status,
    /// Show the signed-in user.
    Whoami,
    /// Homepage and CMS sections.
    #[command(subcommand)]
    Section(SectionCommand),
    /// Property listings.
    #[command(subcommand)]
    Property(PropertyCommand),
    /// Contact-form messages.
    #[command(subcommand)]
    Message(MessageCommand),
    /// Change the signed-in user's password.
    Password(PasswordArgs),
    /// Upload images and print their URLs.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the configuration JSON schema.
    Schema,
}

#[derive(Subcommand, Debug)]
pub enum SectionCommand {
    /// List section names.
    List,
    /// Print a section's current content.
    Get { name: String },
    /// Replace a section with the JSON object in FILE.
    Put {
        name: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Restore a section to its defaults.
    Reset { name: String },
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    List,
    Show { id: String },
    /// Create a listing from the JSON form data in FILE.
    Add {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a listing with the JSON form data in FILE.
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MessageCommand {
    List,
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct PasswordArgs {
    #[arg(long)]
    pub current: String,
    #[arg(long)]
    pub new: String,
    #[arg(long)]
    pub confirm: String,
}
