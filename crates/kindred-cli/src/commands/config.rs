use anyhow::{Context, Result};
use kindred_core::config::AppConfig;
use kindred_infrastructure::{ConfigStorage, GEMINI_API_KEY_ENV, KindredPaths, SecretStorage};

/// What `init` did, reported back to the user.
#[derive(Debug, PartialEq, Eq)]
pub struct InitReport {
    pub config_created: bool,
    pub secret_created: bool,
}

pub fn init(paths: &KindredPaths) -> Result<()> {
    let report = init_files(paths)?;
    let storage = ConfigStorage::from_paths(paths)?;
    let secret_file = paths.secret_file()?;

    if report.config_created {
        println!("Created {}", storage.path().display());
    } else {
        println!("Kept existing {}", storage.path().display());
    }
    if report.secret_created {
        println!("Created {}", secret_file.display());
        println!("Fill in gemini.api_key there, or set {GEMINI_API_KEY_ENV}.");
    } else {
        println!("Kept existing {}", secret_file.display());
    }
    Ok(())
}

pub fn init_files(paths: &KindredPaths) -> Result<InitReport> {
    let storage = ConfigStorage::from_paths(paths)?;
    let config_created = !storage.exists();
    if config_created {
        storage
            .save(&AppConfig::default())
            .context("Failed to write default config.toml")?;
    }

    let secret_storage = SecretStorage::from_paths(paths)?;
    let secret_created = !secret_storage.exists();
    paths
        .ensure_secret_file()
        .context("Failed to create secret.json")?;

    Ok(InitReport {
        config_created,
        secret_created,
    })
}

pub fn show(paths: &KindredPaths) -> Result<()> {
    print!("{}", render(paths)?);
    Ok(())
}

/// The effective config as TOML plus a credential summary. Never prints
/// key material.
pub fn render(paths: &KindredPaths) -> Result<String> {
    let config = ConfigStorage::from_paths(paths)?
        .load()
        .context("Failed to load config.toml")?;
    let mut out = toml::to_string_pretty(&config).context("Failed to render config")?;

    let env_key = std::env::var(GEMINI_API_KEY_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    let secret_state = match SecretStorage::from_paths(paths)?.load() {
        Ok(secrets) => match secrets.gemini {
            Some(gemini) if !gemini.api_key.trim().is_empty() => "gemini key set",
            _ => "no gemini key",
        },
        Err(_) => "missing or unreadable",
    };

    out.push_str(&format!("\n# secret.json: {secret_state}\n"));
    if env_key {
        out.push_str(&format!("# {GEMINI_API_KEY_ENV} is set and takes precedence\n"));
    }
    Ok(out)
}

pub fn path(paths: &KindredPaths) -> Result<()> {
    println!("config dir:  {}", paths.config_dir()?.display());
    println!("config:      {}", paths.config_file()?.display());
    println!("secrets:     {}", paths.secret_file()?.display());
    println!("assessments: {}", paths.assessments_dir()?.display());
    println!("logs:        {}", paths.logs_dir()?.display());
    Ok(())
}
