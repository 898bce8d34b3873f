use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config};
use crate::scoring::validation::{MAX_WEIGHT, MIN_WEIGHT};
use crate::scoring::{Priority, PriorityWeights};

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

/// Parse a weight typed at the prompt.
fn parse_weight(input: &str) -> Result<u8, String> {
    match input.trim().parse::<u8>() {
        Ok(v) if (MIN_WEIGHT..=MAX_WEIGHT).contains(&v) => Ok(v),
        _ => Err(format!(
            "must be a whole number from {} to {}",
            MIN_WEIGHT, MAX_WEIGHT
        )),
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Referee Configuration Wizard");
    println!("============================");
    println!();

    // 1. Priorities
    println!("Rate how much each factor matters to you, from 1 (low) to 5 (high).");
    println!("Factors rated 4 or 5 are called out in the trade-off analysis.");
    println!();
    let defaults = PriorityWeights::default();
    let mut priorities = defaults;
    for priority in Priority::ALL {
        let default = defaults.get(priority).to_string();
        let weight = loop {
            let input = prompt_with_default(&format!("Weight for {}", priority.label()), &default)?;
            match parse_weight(&input) {
                Ok(v) => break v,
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        };
        priorities.set(priority, weight);
    }

    // 2. Catalog
    println!();
    println!("Referee ships with a built-in catalog of APIs, cloud services and databases.");
    let catalog = if prompt_yes_no("Use a custom catalog file instead?", false)? {
        let path = loop {
            let p = prompt("  Catalog file path: ")?;
            if !p.is_empty() {
                break PathBuf::from(p);
            }
            println!("  Path is required.");
        };
        if let Err(e) = crate::catalog::load_catalog(&path) {
            println!("  Warning: {:#}", e);
            println!("  Saving the path anyway; fix the file before running a comparison.");
        }
        Some(path)
    } else {
        None
    };

    // 3. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
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

    // 4. Write config
    let config = Config {
        priorities: Some(priorities),
        catalog,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `referee list` to see the options you can compare.");

    Ok(())
}
