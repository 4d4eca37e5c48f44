use async_trait::async_trait;
use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::{env, fs};
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Error loading config: {0}")]
    ConfigError(String),
}

#[async_trait]
pub trait ConfigLoader {
    type SectionType;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError>;
}

pub trait ConfigLoaderSync {
    type SectionType;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError>;
}

pub async fn load_from_file<T: DeserializeOwned>(file_name: String) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = tokio::fs::read_to_string(file_name).await?;
    parse_config(&contents)
}

pub fn load_from_file_sync<T: DeserializeOwned>(file_name: String) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = fs::read_to_string(file_name)?;
    parse_config(&contents)
}

/// Expand `${VAR}` placeholders from the environment and parse the result as TOML.
pub fn parse_config<T: DeserializeOwned>(raw_config: &str) -> Result<T, LoadConfigError> {
    let contents = expand_vars(raw_config)?;
    Ok(toml::from_str(&contents)?)
}

fn expand_vars(raw_config: &str) -> Result<String, LoadConfigError> {
    let re = Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}").map_err(|e| LoadConfigError::ConfigError(e.to_string()))?;
    // unknown variables are left in place
    Ok(re
        .replace_all(raw_config, |caps: &Captures| match env::var(&caps[1]) {
            Ok(val) => val,
            Err(_) => caps[0].to_string(),
        })
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Section {
        name: String,
    }

    #[test]
    fn test_expand_vars() -> eyre::Result<()> {
        // SAFETY: no other test reads or writes this variable
        unsafe { env::set_var("SWAP_ROUTER_TEST_NAME", "router") };
        assert_eq!(expand_vars("name = \"${SWAP_ROUTER_TEST_NAME}\"")?, "name = \"router\"");
        assert_eq!(expand_vars("name = \"${SWAP_ROUTER_UNSET_VARIABLE}\"")?, "name = \"${SWAP_ROUTER_UNSET_VARIABLE}\"");

        let section: Section = parse_config("name = \"${SWAP_ROUTER_TEST_NAME}\"")?;
        assert_eq!(section.name, "router");
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = load_from_file_sync::<Section>("does/not/exist.toml".to_string());
        assert!(matches!(result, Err(LoadConfigError::IoError(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = parse_config::<Section>("name = ");
        assert!(matches!(result, Err(LoadConfigError::TomlError(_))));
    }
}
