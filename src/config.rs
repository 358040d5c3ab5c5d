//! # Generator Configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional `nextapi.toml` file (CLI `--config`)
//! 3. The `config` map of the `generator` block in `schema.prisma`, or CLI `--set key=value`
//!
//! ```prisma
//! generator api {
//!   provider        = "nextapi-gen"
//!   output          = "../app/api"
//!   extension       = "js"
//!   clientModule    = "@/lib/prisma"
//!   uploadDetection = "annotated"
//! }
//! ```
//!
//! ## Keys
//!
//! | key               | default                                            |
//! |-------------------|----------------------------------------------------|
//! | `extension`       | `ts` (`ts` or `js`)                                |
//! | `baseUrl`         | `http://localhost:3000`                            |
//! | `apiPrefix`       | `/api`                                             |
//! | `clientModule`    | unset: a cached client is emitted to `_lib/prisma` |
//! | `publicDir`       | `public`                                           |
//! | `uploadDetection` | `heuristic` (`heuristic` or `annotated`)           |
//! | `uploadPatterns`  | `image,photo,picture,avatar,file,slip,attachment`  |
//! | `docs`            | `true`                                             |

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Substrings that mark a String field as a file upload.
pub const DEFAULT_UPLOAD_PATTERNS: &[&str] = &[
    "image",
    "photo",
    "picture",
    "avatar",
    "file",
    "slip",
    "attachment",
];

/// Configuration error
///
/// Returned when a generator config key is unknown or its value can't be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The key is not a recognised setting
    UnknownKey {
        /// The offending key
        key: String,
    },
    /// The value does not fit the key
    InvalidValue {
        key: String,
        value: String,
        /// Description of accepted values
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownKey { key } => {
                write!(f, "Unknown generator config key '{key}'")
            }
            ConfigError::InvalidValue {
                key,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value '{value}' for generator config key '{key}': expected {expected}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Language of the emitted route files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLanguage {
    TypeScript,
    JavaScript,
}

impl OutputLanguage {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputLanguage::TypeScript => "ts",
            OutputLanguage::JavaScript => "js",
        }
    }
}

/// How upload fields are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadDetection {
    /// Name patterns plus explicit `@upload` annotations
    Heuristic,
    /// Only fields documented with `@upload`
    Annotated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    pub detection: UploadDetection,
    /// Lowercase substrings matched against lowercased field names
    pub patterns: Vec<String>,
}

impl Default for UploadRules {
    fn default() -> Self {
        UploadRules {
            detection: UploadDetection::Heuristic,
            patterns: DEFAULT_UPLOAD_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// A raw config value. Prisma passes strings or string lists; TOML may also carry booleans.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    One(String),
    Many(Vec<String>),
    Flag(bool),
}

impl ConfigValue {
    fn joined(&self) -> String {
        match self {
            ConfigValue::One(s) => s.clone(),
            ConfigValue::Many(items) => items.join(","),
            ConfigValue::Flag(b) => b.to_string(),
        }
    }
}

/// Everything the emitters need to know besides the datamodel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub language: OutputLanguage,
    /// Base URL used in Postman collections and the HTML docs
    pub base_url: String,
    /// URL prefix the output directory is mounted at
    pub api_prefix: String,
    /// Module exporting a shared `prisma` client; `None` emits `_lib/prisma`
    pub client_module: Option<String>,
    /// Directory (relative to the Next.js project root) that receives uploads
    pub public_dir: String,
    pub uploads: UploadRules,
    /// Emit Postman collections and `docs.html`
    pub docs: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            language: OutputLanguage::TypeScript,
            base_url: "http://localhost:3000".to_string(),
            api_prefix: "/api".to_string(),
            client_module: None,
            public_dir: "public".to_string(),
            uploads: UploadRules::default(),
            docs: true,
        }
    }
}

impl GeneratorSettings {
    /// Build settings from a generator `config` map on top of the defaults.
    pub fn from_map(map: &BTreeMap<String, ConfigValue>) -> Result<Self, ConfigError> {
        let mut settings = GeneratorSettings::default();
        settings.merge(map)?;
        Ok(settings)
    }

    /// Load a `nextapi.toml` file. Keys are the same as in the generator block.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
        let map: BTreeMap<String, ConfigValue> = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse generator config: {}", path.display()))?;
        Ok(GeneratorSettings::from_map(&map)?)
    }

    pub fn merge(&mut self, map: &BTreeMap<String, ConfigValue>) -> Result<(), ConfigError> {
        for (key, value) in map {
            self.set(key, &value.joined())?;
        }
        Ok(())
    }

    /// Apply a single `key=value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        };
        match key {
            "extension" => {
                self.language = match value.trim_start_matches('.') {
                    "ts" => OutputLanguage::TypeScript,
                    "js" => OutputLanguage::JavaScript,
                    _ => return Err(invalid("\"ts\" or \"js\"")),
                }
            }
            "baseUrl" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid("an http(s) URL"));
                }
                self.base_url = value.trim_end_matches('/').to_string();
            }
            "apiPrefix" => {
                let trimmed = value.trim_matches('/');
                self.api_prefix = if trimmed.is_empty() {
                    String::new()
                } else {
                    format!("/{trimmed}")
                };
            }
            "clientModule" => {
                self.client_module = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "publicDir" => {
                // uploads are served from this folder, so it must sit inside the project
                if value.starts_with(['/', '\\']) || Path::new(value).is_absolute() {
                    return Err(invalid("a directory relative to the project root"));
                }
                let trimmed = value.trim_end_matches('/');
                if trimmed.is_empty() {
                    return Err(invalid("a directory name"));
                }
                self.public_dir = trimmed.to_string();
            }
            "uploadDetection" => {
                self.uploads.detection = match value {
                    "heuristic" => UploadDetection::Heuristic,
                    "annotated" => UploadDetection::Annotated,
                    _ => return Err(invalid("\"heuristic\" or \"annotated\"")),
                }
            }
            "uploadPatterns" => {
                let patterns: Vec<String> = value
                    .split(',')
                    .map(|p| p.trim().to_lowercase())
                    .filter(|p| !p.is_empty())
                    .collect();
                if patterns.is_empty() {
                    return Err(invalid("a comma-separated list of substrings"));
                }
                self.uploads.patterns = patterns;
            }
            "docs" => {
                self.docs = match value {
                    "true" => true,
                    "false" => false,
                    _ => return Err(invalid("\"true\" or \"false\"")),
                }
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Parse a CLI `key=value` override.
    pub fn set_pair(&mut self, pair: &str) -> anyhow::Result<()> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{pair}'"))?;
        self.set(key.trim(), value.trim())?;
        Ok(())
    }
}
