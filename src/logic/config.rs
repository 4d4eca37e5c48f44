use crate::utils::config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError, load_from_file, load_from_file_sync};
use crate::utils::constants::{DEFAULT_MAX_HOPS, DEFAULT_MAX_PATHS};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct RouterConfigRoot {
    pub router: RouterConfigSection,
}

/// `[router]` table of the config file.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfigSection {
    /// Hop bound used when a caller has no preference
    #[serde(default = "default_max_hops")]
    pub max_hops: u8,
    /// Enumeration stops after this many candidate paths
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,
    /// Price candidate paths on the rayon pool
    #[serde(default = "default_enable_parallel_calculation")]
    pub enable_parallel_calculation: bool,
}

fn default_max_hops() -> u8 {
    DEFAULT_MAX_HOPS
}

fn default_max_paths() -> usize {
    DEFAULT_MAX_PATHS
}

fn default_enable_parallel_calculation() -> bool {
    true
}

impl RouterConfigSection {
    pub fn with_max_hops(&self, max_hops: u8) -> Self {
        Self { max_hops, ..self.clone() }
    }

    pub fn with_max_paths(&self, max_paths: usize) -> Self {
        Self { max_paths, ..self.clone() }
    }

    pub fn with_parallel_calculation(&self, enable_parallel_calculation: bool) -> Self {
        Self { enable_parallel_calculation, ..self.clone() }
    }

    /// Reject bounds that would make every quote fail.
    pub fn validate(self) -> Result<Self, LoadConfigError> {
        if self.max_hops < 1 {
            return Err(LoadConfigError::ConfigError("router.max_hops must be at least 1".to_string()));
        }
        if self.max_paths < 1 {
            return Err(LoadConfigError::ConfigError("router.max_paths must be at least 1".to_string()));
        }
        Ok(self)
    }
}

impl Default for RouterConfigSection {
    fn default() -> Self {
        Self { max_hops: DEFAULT_MAX_HOPS, max_paths: DEFAULT_MAX_PATHS, enable_parallel_calculation: true }
    }
}

#[async_trait]
impl ConfigLoader for RouterConfigSection {
    type SectionType = RouterConfigSection;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouterConfigRoot = load_from_file(file_name).await?;
        root.router.validate()
    }
}

impl ConfigLoaderSync for RouterConfigSection {
    type SectionType = RouterConfigSection;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouterConfigRoot = load_from_file_sync(file_name)?;
        root.router.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config_loader::parse_config;

    fn write_config(name: &str, contents: &str) -> eyre::Result<String> {
        let path = std::env::temp_dir().join(format!("swap-router-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, contents)?;
        Ok(path.to_string_lossy().to_string())
    }

    #[test]
    fn test_defaults() -> eyre::Result<()> {
        let root: RouterConfigRoot = parse_config("[router]\n")?;
        assert_eq!(root.router, RouterConfigSection::default());
        assert_eq!(root.router.max_hops, 3);
        assert_eq!(root.router.max_paths, 50_000);
        assert!(root.router.enable_parallel_calculation);
        Ok(())
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = parse_config::<RouterConfigRoot>("[router]\nmax_hop = 2\n");
        assert!(matches!(result, Err(LoadConfigError::TomlError(_))));
    }

    #[test]
    fn test_zero_bounds_are_rejected() -> eyre::Result<()> {
        for (name, contents) in [("zero-paths", "[router]\nmax_paths = 0\n"), ("zero-hops", "[router]\nmax_hops = 0\n")] {
            let file_name = write_config(name, contents)?;
            let result = RouterConfigSection::load_section_from_file_sync(file_name.clone());
            std::fs::remove_file(file_name)?;
            assert!(matches!(result, Err(LoadConfigError::ConfigError(_))), "{name}: {result:?}");
        }
        assert!(RouterConfigSection::default().validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_builders() {
        let config = RouterConfigSection::default().with_max_hops(2).with_max_paths(10).with_parallel_calculation(false);
        assert_eq!(config, RouterConfigSection { max_hops: 2, max_paths: 10, enable_parallel_calculation: false });
    }

    #[test]
    fn test_load_section_sync() -> eyre::Result<()> {
        let file_name = write_config("sync", "[router]\nmax_hops = 2\nenable_parallel_calculation = false\n")?;
        let config = RouterConfigSection::load_section_from_file_sync(file_name.clone())?;
        std::fs::remove_file(file_name)?;

        assert_eq!(config.max_hops, 2);
        assert_eq!(config.max_paths, DEFAULT_MAX_PATHS);
        assert!(!config.enable_parallel_calculation);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_section_async() -> eyre::Result<()> {
        let file_name = write_config("async", "[router]\nmax_hops = 4\nmax_paths = 1000\n")?;
        let config = RouterConfigSection::load_section_from_file(file_name.clone()).await?;
        std::fs::remove_file(file_name)?;

        assert_eq!(config, RouterConfigSection { max_hops: 4, max_paths: 1000, enable_parallel_calculation: true });
        Ok(())
    }
}
