use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config, OutputFormat, ThemeMode};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Case-insensitive match against a `ValueEnum`'s variant names.
fn parse_choice<T: ValueEnum>(s: &str) -> Option<T> {
    T::from_str(s.trim(), true).ok()
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("wellscore configuration");
    println!("=======================");
    println!();

    println!("The form can use a dark or light palette. 'auto' asks the terminal.");
    let theme = loop {
        let input = prompt_with_default("Theme (auto/dark/light)", "auto")?;
        match parse_choice::<ThemeMode>(&input) {
            Some(theme) => break theme,
            None => println!("  Invalid: '{}'. Try again.", input),
        }
    };

    println!();
    println!("`wellscore score` prints plain text, tab-separated values, or JSON.");
    let format = loop {
        let input = prompt_with_default("Output format (text/tsv/json)", "text")?;
        match parse_choice::<OutputFormat>(&input) {
            Some(format) => break format,
            None => println!("  Invalid: '{}'. Try again.", input),
        }
    };

    println!();
    let breakdown = prompt_yes_no("Show which rules contributed to each score?", false)?;

    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        theme,
        format,
        breakdown,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `wellscore` to start the questionnaire.");

    Ok(())
}
