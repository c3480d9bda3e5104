//! Command handlers. Each one stands in for an admin view: it navigates the
//! gate to that view first, then talks to the backend through the context's
//! client.

use std::path::{Path, PathBuf};

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::cli::{Command, MessageCommand, PasswordArgs, PropertyCommand, SectionCommand};
use crate::client::properties::PropertyDraft;
use crate::client::ContentSection;
use crate::errors::ApiError;
use crate::routes::GateOutcome;
use crate::state::SessionContext;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("not signed in, run `estate-admin login` first (wanted {requested})")]
    NotSignedIn { requested: String },

    #[error("{0}")]
    Usage(String),

    #[error("cannot read {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CommandError {
    /// Authentication failures exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::NotSignedIn { .. } => 2,
            CommandError::Api(e) if e.is_unauthorized() => 2,
            _ => 1,
        }
    }
}

/// Run `command` against the context.
pub async fn execute(ctx: &SessionContext, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Login { email, password } => login(ctx, &email, &password).await,
        Command::Logout => {
            ctx.guard.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Status => {
            status(ctx);
            Ok(())
        }
        Command::Whoami => {
            open(ctx, "/dashboard")?;
            whoami(ctx);
            Ok(())
        }
        Command::Section(cmd) => section(ctx, cmd).await,
        Command::Property(cmd) => property(ctx, cmd).await,
        Command::Message(cmd) => message(ctx, cmd).await,
        Command::Password(args) => change_password(ctx, args).await,
        Command::Upload { files } => upload(ctx, &files).await,
        Command::Schema => crate::config::print_schema()
            .map_err(|e| CommandError::Api(ApiError::Session(e))),
    }
}

/// Navigate to `view`, refusing when the gate denies it.
fn open(ctx: &SessionContext, view: &str) -> Result<(), CommandError> {
    match ctx.gate.navigate(view) {
        GateOutcome::Allowed { .. } => Ok(()),
        GateOutcome::Denied { requested, .. } => Err(CommandError::NotSignedIn { requested }),
    }
}

async fn login(ctx: &SessionContext, email: &str, password: &str) -> Result<(), CommandError> {
    open(ctx, &ctx.config.session.login_path)?;
    let user = ctx.client.login(email, password).await?;
    info!(user = user.display_name(), "signed in");
    println!("Signed in as {}.", user.display_name());
    open(ctx, "/")
}

fn status(ctx: &SessionContext) {
    if ctx.guard.is_authenticated() {
        let user = ctx.guard.current_user();
        match expiry(ctx) {
            Some(when) => println!("Signed in as {} until {}.", user.display_name(), when),
            None => println!("Signed in as {}.", user.display_name()),
        }
    } else {
        println!("Not signed in.");
    }
}

fn whoami(ctx: &SessionContext) {
    let user = ctx.guard.current_user();
    println!("Name:    {}", user.display_name());
    println!("Role:    {}", user.role.as_deref().unwrap_or("-"));
    if user.is_admin() {
        println!("Admin:   yes");
    }
    if let Some(when) = expiry(ctx) {
        println!("Expires: {}", when);
    }
}

fn expiry(ctx: &SessionContext) -> Option<String> {
    let exp = ctx.guard.claims()?.exp()?;
    DateTime::from_timestamp(exp as i64, 0).map(|t| t.to_rfc3339())
}

async fn section(ctx: &SessionContext, cmd: SectionCommand) -> Result<(), CommandError> {
    match cmd {
        SectionCommand::List => {
            for section in ContentSection::ALL {
                println!("{}", section);
            }
            Ok(())
        }
        SectionCommand::Get { name } => {
            let section = parse_section(&name)?;
            open(ctx, section.view())?;
            print_json(&ctx.client.get_section(section).await?)
        }
        SectionCommand::Put { name, file } => {
            let section = parse_section(&name)?;
            let body: serde_json::Value = read_json(&file)?;
            open(ctx, section.view())?;
            print_json(&ctx.client.put_section(section, &body).await?)
        }
        SectionCommand::Reset { name } => {
            let section = parse_section(&name)?;
            open(ctx, section.view())?;
            print_json(&ctx.client.reset_section(section).await?)
        }
    }
}

async fn property(ctx: &SessionContext, cmd: PropertyCommand) -> Result<(), CommandError> {
    match cmd {
        PropertyCommand::List => {
            open(ctx, "/properties")?;
            for property in ctx.client.list_properties().await? {
                println!("{}\t{}", property.id, property.name);
            }
            Ok(())
        }
        PropertyCommand::Show { id } => {
            open(ctx, &format!("/properties/{}", id))?;
            print_json(&ctx.client.get_property(&id).await?)
        }
        PropertyCommand::Add { file } => {
            let draft: PropertyDraft = read_json(&file)?;
            open(ctx, "/properties/add")?;
            print_json(&ctx.client.create_property(&draft).await?)
        }
        PropertyCommand::Update { id, file } => {
            let draft: PropertyDraft = read_json(&file)?;
            open(ctx, &format!("/properties/{}/edit", id))?;
            print_json(&ctx.client.update_property(&id, &draft).await?)
        }
        PropertyCommand::Delete { id } => {
            open(ctx, &format!("/properties/{}", id))?;
            ctx.client.delete_property(&id).await?;
            println!("Deleted property {}.", id);
            Ok(())
        }
    }
}

async fn message(ctx: &SessionContext, cmd: MessageCommand) -> Result<(), CommandError> {
    open(ctx, "/messages")?;
    match cmd {
        MessageCommand::List => {
            for message in ctx.client.list_messages().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    message.id,
                    message.created_at.as_deref().unwrap_or("-"),
                    message.email,
                    message.subject.as_deref().unwrap_or(&message.message)
                );
            }
            Ok(())
        }
        MessageCommand::Delete { id } => {
            ctx.client.delete_message(&id).await?;
            println!("Deleted message {}.", id);
            Ok(())
        }
    }
}

async fn change_password(ctx: &SessionContext, args: PasswordArgs) -> Result<(), CommandError> {
    open(ctx, "/change-password")?;
    let message = ctx
        .client
        .change_password(&args.current, &args.new, &args.confirm)
        .await?;
    println!("{}", message);
    Ok(())
}

async fn upload(ctx: &SessionContext, files: &[PathBuf]) -> Result<(), CommandError> {
    open(ctx, "/properties/add")?;
    let urls = match files {
        [single] => vec![ctx.client.upload(single).await?],
        many => {
            let paths: Vec<&Path> = many.iter().map(PathBuf::as_path).collect();
            ctx.client.upload_many(&paths).await?
        }
    };
    for url in urls {
        println!("{}", url);
    }
    Ok(())
}

fn parse_section(name: &str) -> Result<ContentSection, CommandError> {
    name.parse().map_err(CommandError::Usage)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let input_error = |reason: String| CommandError::Input {
        path: path.to_path_buf(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| input_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| input_error(e.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
