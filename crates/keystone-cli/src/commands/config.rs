//! Config command implementation.
//!
//! Manages CLI settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};
use crate::settings::{Settings, SettingsKey};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current settings
    Show,

    /// Get a setting
    Get(GetArgs),

    /// Set a setting
    Set(SetArgs),

    /// List available settings
    List,

    /// Reset settings to defaults
    Reset(ResetArgs),

    /// Show settings file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Settings key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Settings key
    pub key: String,

    /// Settings value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

fn current_values(settings: &Settings) -> Vec<KeyValue> {
    SettingsKey::ALL
        .iter()
        .map(|key| KeyValue::new(key.as_str(), settings.get(*key)))
        .collect()
}

/// Show current settings.
fn execute_show(ctx: &Context) -> Result<()> {
    let results = current_values(&ctx.settings);

    match ctx.format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<_, _> = results.into_iter().map(|kv| (kv.key, kv.value)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => print_output(&results, ctx.format)?,
        OutputFormat::Minimal => {
            for kv in results {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }
    Ok(())
}

/// Get a setting.
fn execute_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let key = SettingsKey::parse(&args.key)?;
    let value = ctx.settings.get(key);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => println!("{}: {}", key, value),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{}", value),
    }
    Ok(())
}

/// Set a setting.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = SettingsKey::parse(&args.key)?;
    let mut settings = ctx.settings.clone();
    settings.set(key, &args.value)?;
    settings.save(&ctx.settings_path)?;

    if !ctx.quiet {
        print_success(&format!("Set {} = {}", key, settings.get(key)));
    }
    Ok(())
}

/// List available settings.
fn execute_list(ctx: &Context) -> Result<()> {
    let defaults = Settings::default();
    let results: Vec<KeyValue> = SettingsKey::ALL
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), defaults.get(*key)),
            )
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Minimal => {
            for key in SettingsKey::ALL {
                println!("{}", key);
            }
        }
        _ => print_output(&results, ctx.format)?,
    }
    Ok(())
}

/// Reset settings.
fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    let mut settings = ctx.settings.clone();

    if args.all {
        Settings::default().save(&ctx.settings_path)?;
        if !ctx.quiet {
            print_success("Reset all configuration to defaults");
        }
    } else if let Some(key_str) = args.key {
        let key = SettingsKey::parse(&key_str)?;
        settings.reset(key);
        settings.save(&ctx.settings_path)?;
        if !ctx.quiet {
            print_success(&format!("Reset {} to default ({})", key, settings.get(key)));
        }
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }
    Ok(())
}

/// Show settings file path.
fn execute_path(ctx: &Context) -> Result<()> {
    if ctx.format == OutputFormat::Minimal {
        println!("{}", ctx.settings_path.display());
        return Ok(());
    }

    print_info(&format!("Config file: {}", ctx.settings_path.display()));
    if ctx.settings_path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    print_info(&format!("Storage: {}", ctx.storage_path()?.display()));
    Ok(())
}
