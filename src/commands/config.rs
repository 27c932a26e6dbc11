//! `gromit config`: show, update or reset the stored configuration.

use tracing::info;

use crate::config::{mask_api_key, ConfigStore, GromitConfig, DEFAULT_LANGUAGE};
use crate::error::CommandError;
use crate::llm::DEFAULT_MODEL;

use super::display::print_lines;

#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub url: Option<String>,
    pub key: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub show: bool,
    pub reset: bool,
}

impl ConfigOptions {
    fn updates(&self) -> GromitConfig {
        GromitConfig {
            ai_url: self.url.clone(),
            api_key: self.key.clone(),
            model: self.model.clone(),
            language: self.language.clone(),
        }
    }
}

/// What `config` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Shown,
    Reset { removed: bool },
    Updated(GromitConfig),
    Help,
}

/// Run `config`. `--show` wins over `--reset`, which wins over updates.
pub fn run<S: ConfigStore + ?Sized>(
    store: &S,
    options: &ConfigOptions,
) -> Result<ConfigAction, CommandError> {
    if options.show {
        print_lines(&describe(store));
        return Ok(ConfigAction::Shown);
    }

    if options.reset {
        let removed = store.remove()?;
        if removed {
            println!("  [DONE] Configuration removed ({})", store.path().display());
        } else {
            println!("No configuration to remove.");
        }
        return Ok(ConfigAction::Reset { removed });
    }

    let updates = options.updates();
    if updates.is_empty() {
        print_lines(&usage());
        return Ok(ConfigAction::Help);
    }

    let config = store.update(updates)?;
    info!("Updated configuration at {}", store.path().display());
    println!("  [DONE] Configuration saved ({})", store.path().display());
    print_lines(&describe(store));

    Ok(ConfigAction::Updated(config))
}

/// Current configuration, with the API key masked.
pub fn describe<S: ConfigStore + ?Sized>(store: &S) -> Vec<String> {
    if !store.exists() {
        return vec![
            format!("No configuration found at {}.", store.path().display()),
            "Run `gromit config --url <url> --key <key>` to set it up.".to_string(),
        ];
    }

    let config = store.load();
    vec![
        format!("Configuration ({}):", store.path().display()),
        format!(
            "  AI URL:   {}",
            config.ai_url.as_deref().unwrap_or("not set")
        ),
        format!(
            "  API key:  {}",
            config
                .api_key
                .as_deref()
                .map(mask_api_key)
                .unwrap_or_else(|| "not set".to_string())
        ),
        format!(
            "  Model:    {}",
            config
                .model
                .unwrap_or_else(|| format!("default ({})", DEFAULT_MODEL))
        ),
        format!(
            "  Language: {}",
            config
                .language
                .unwrap_or_else(|| format!("default ({})", DEFAULT_LANGUAGE))
        ),
    ]
}

fn usage() -> Vec<String> {
    [
        "Usage:",
        "  gromit config --url <url>          # chat-completions endpoint",
        "  gromit config --key <key>          # API key",
        "  gromit config --model <model>      # model name (default: gpt-4.1)",
        "  gromit config --language <lang>    # pt-BR, es or en-US",
        "  gromit config --show               # show the current configuration",
        "  gromit config --reset              # remove the configuration",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
