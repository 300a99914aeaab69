use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub commission: CommissionConfig,
    #[serde(default)]
    pub statuses: StatusConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadConfig {
    /// Request body limit for the CSV upload
    pub max_bytes: usize,
    /// Uploads kept in memory at once; the oldest is discarded first
    pub max_sessions: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 20 * 1024 * 1024,
            max_sessions: 32,
        }
    }
}

/// Header names of the affiliate export, matched after trimming
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnMapping {
    pub order_status: String,
    pub channel: String,
    pub category: String,
    pub order_time: String,
    pub completion_time: String,
    pub commission: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            order_status: "Status do Pedido".to_string(),
            channel: "Canal".to_string(),
            category: "Categoria Global L2".to_string(),
            order_time: "Horário do pedido".to_string(),
            completion_time: "Tempo de conclusão".to_string(),
            commission: "Comissão líquida do afiliado(R$)".to_string(),
            item_id: "ID do item".to_string(),
            item_name: "Nome do Item".to_string(),
            quantity: "Qtd".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommissionConfig {
    /// Prefix stripped from commission cells before parsing
    pub currency_marker: String,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            currency_marker: "R$".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StatusConfig {
    /// Case-insensitive substrings marking a status as completed
    pub completed_markers: Vec<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            completed_markers: vec![
                "concluído".to_string(),
                "concluido".to_string(),
                "completed".to_string(),
            ],
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[upload]
max_bytes = 20971520
max_sessions = 32
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Stores the loaded configuration for the rest of the process
pub fn install(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already installed, keeping the first one");
    }
}

/// Installed configuration, or the built-in defaults before `install`
pub fn current() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upload.max_sessions, 32);
        assert_eq!(config.columns, ColumnMapping::default());
        assert_eq!(config.commission.currency_marker, "R$");
    }

    #[test]
    fn test_partial_columns_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [columns]
            channel = "Channel"

            [statuses]
            completed_markers = ["done"]
            "#,
        )
        .unwrap();
        assert_eq!(config.columns.channel, "Channel");
        assert_eq!(config.columns.order_status, "Status do Pedido");
        assert_eq!(config.statuses.completed_markers, vec!["done".to_string()]);
        assert_eq!(config.server.port, 3000);
    }
}
