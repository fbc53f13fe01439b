use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub links: LinksConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    /// Typst paper name, e.g. `a4` or `us-letter`.
    pub paper: String,
    pub margin_top: String,
    pub margin_bottom: String,
    pub margin_x: String,
    /// Number pages in the footer.
    pub numbers: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            margin_top: "2cm".to_string(),
            margin_bottom: "2cm".to_string(),
            margin_x: "2.5cm".to_string(),
            numbers: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub code_family: String,
    /// Also search fonts installed on the host; embedded fonts are always available.
    pub system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Libertinus Serif".to_string(),
            code_family: "DejaVu Sans Mono".to_string(),
            system_fonts: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinksConfig {
    pub color: String,
    pub underline: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            color: "#1a4f8b".to_string(),
            underline: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub render_timeout_secs: u64,
    pub max_concurrent_renders: usize,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            render_timeout_secs: 30,
            max_concurrent_renders: 4,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// The configuration embedded at build time.
    pub fn compiled_default() -> Self {
        // build.rs has already checked that the embedded file parses.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled default if the
    /// file does not exist. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::compiled_default()),
            Err(source) => {
                return Err(ConfigError::Read { path: path.to_path_buf(), source });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compiled_default_matches_struct_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[page]\nnumbers = true\n\n[server]\nport = 8080\n").unwrap();
        assert!(config.page.numbers);
        assert_eq!(config.page.paper, "a4");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.render_timeout(), Duration::from_secs(30));
        assert_eq!(config.links, LinksConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = Config::load(Path::new("/definitely/not/here/newsletter.toml")).unwrap();
        assert_eq!(config, Config::compiled_default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("newsletter-config-{}.toml", std::process::id()));
        fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn address_joins_host_and_port() {
        let server = ServerConfig { host: "127.0.0.1".to_string(), port: 9000, ..Default::default() };
        assert_eq!(server.address(), "127.0.0.1:9000");
    }
}
