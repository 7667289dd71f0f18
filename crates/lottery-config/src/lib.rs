use anyhow::Context;
use lottery_core::{
    Catalog, FieldDefinition, GameDefinition, PackDefinition, PackElement, Recipient, Ticket,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "LOTTERY_RANDOM_CONFIG";

/// Configuration for lottery-random (config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub random_org_api_key: String,

    /// Overrides the public random.org endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_org_endpoint: Option<String>,

    pub azure_email_endpoint: String,
    pub azure_email_key: String,
    pub sender_email: String,
    pub sender_name: String,

    pub games: Vec<GameConfig>,

    #[serde(alias = "packs")]
    pub ticket_packs: Vec<PackConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub name: String,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// How many numbers to draw. Signed so that `n < 1` reaches validation.
    pub n: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    pub name: String,
    pub recipients: Vec<RecipientConfig>,
    pub elements: Vec<ElementConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipientConfig {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementConfig {
    pub game: String,

    #[serde(default)]
    pub number_of_random_tickets: usize,

    /// Each ticket is a list of fields, each field a list of numbers
    #[serde(default)]
    pub permanent_tickets: Vec<Vec<Vec<i64>>>,
}

impl Config {
    /// Load from `path`, or from the resolved default location
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path(),
        };
        Self::load_from(&path)
    }

    /// Parse a config file; `.toml` files are read as TOML, everything else as JSON
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
        let config = if is_toml {
            toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        };
        Ok(config)
    }

    /// Get config file path: `$LOTTERY_RANDOM_CONFIG`, `./config.json`, then the user config dir
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        let local = PathBuf::from("config.json");
        if local.exists() {
            return local;
        }

        if let Some(dirs) =
            directories::ProjectDirs::from("com", "lottery-random", "lottery-random")
        {
            dirs.config_dir().join("config.json")
        } else {
            local
        }
    }

    /// Convert into domain definitions. Validation happens in the engine.
    pub fn catalog(&self) -> Catalog {
        let games = self
            .games
            .iter()
            .map(|game| {
                GameDefinition::new(
                    game.name.clone(),
                    game.fields
                        .iter()
                        .map(|f| FieldDefinition::new(draw_count(f.n), f.min, f.max))
                        .collect(),
                )
            })
            .collect();

        let packs = self
            .ticket_packs
            .iter()
            .map(|pack| {
                PackDefinition::new(
                    pack.name.clone(),
                    pack.recipients
                        .iter()
                        .map(|r| Recipient::new(r.email.clone(), r.name.clone()))
                        .collect(),
                    pack.elements
                        .iter()
                        .map(|e| {
                            PackElement::new(
                                e.game.clone(),
                                e.number_of_random_tickets,
                                e.permanent_tickets
                                    .iter()
                                    .map(|t| {
                                        Ticket::from_numbers(t.iter().map(|f| f.iter().copied()))
                                    })
                                    .collect(),
                            )
                        })
                        .collect(),
                )
            })
            .collect();

        Catalog::new(games, packs)
    }
}

/// Negative counts become 0 and fail validation as `n < 1`
fn draw_count(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}
