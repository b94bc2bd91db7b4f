use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PokedexConfig {
    pub document: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl PokedexConfig {
    /// Document path, falling back to the default
    pub fn document_path(&self) -> PathBuf {
        self.document
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_document_path)
    }

    /// Listen address from host and port, falling back to defaults
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        let addr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}:{}: {}", host, port, e))?;
        Ok(addr)
    }

    /// Overlay values given on the command line
    pub fn merge(mut self, document: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(document) = document {
            self.document = Some(document.to_string_lossy().to_string());
        }
        if host.is_some() {
            self.host = host;
        }
        if port.is_some() {
            self.port = port;
        }
        self
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("pokedex.toml")
}

pub fn default_document_path() -> PathBuf {
    Path::new("data").join("pokedex.json")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PokedexConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PokedexConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PokedexConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
