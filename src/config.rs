//! Loading of the form schema and runtime settings.
//!
//! The schema is a YAML file listing the rules of each form field:
//!
//! ```yaml
//! fields:
//!   image:
//!     - rule: uploaded_image
//!       max_length_kb: 500
//! ```
//!
//! Runtime settings come from the environment (a `.env` file is honoured) and fall
//! back to the values in `consts`.

use std::{collections::BTreeMap, env, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::consts;
use crate::utils::validation::{FieldRule, FormSchema, UploadedImageRule};

/// Declaration of one rule in the schema file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    UploadedImage { max_length_kb: i64 },
}

impl RuleConfig {
    fn build(&self) -> Result<FieldRule> {
        match self {
            RuleConfig::UploadedImage { max_length_kb } => {
                Ok(UploadedImageRule::new(*max_length_kb)?.into())
            }
        }
    }
}

/// Contents of the schema file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<RuleConfig>>,
}

impl SchemaConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse form schema")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form schema {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Builds the rules, rejecting invalid declarations
    pub fn into_schema(self) -> Result<FormSchema> {
        let mut schema = FormSchema::new();
        for (field, rules) in &self.fields {
            for rule in rules {
                let rule = rule
                    .build()
                    .with_context(|| format!("Invalid rule for field '{}'", field))?;
                schema.add_rule(field, rule);
            }
        }
        Ok(schema)
    }
}

/// Settings of the web server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub http_port: u16,
    pub schema_path: PathBuf,
    pub uploads_dir: PathBuf,
}

impl Settings {
    /// Reads the settings from the environment
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT '{}'", port))?,
            Err(_) => consts::HTTP_PORT,
        };

        Ok(Self {
            http_port,
            schema_path: env::var("SCHEMA_PATH")
                .unwrap_or_else(|_| consts::SCHEMA_PATH.to_string())
                .into(),
            uploads_dir: env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| consts::UPLOADS_DIR.to_string())
                .into(),
        })
    }
}

/// Loads the schema file, or the built-in schema when the file does not exist
pub fn load_schema(path: &Path) -> Result<FormSchema> {
    if !path.exists() {
        warn!(
            "No form schema at {}, using the default '{}' field",
            path.display(),
            consts::DEFAULT_UPLOAD_FIELD
        );
        return Ok(FormSchema::default_upload()?);
    }

    let schema = SchemaConfig::load(path)?.into_schema()?;
    info!("Loaded form schema from {}", path.display());
    Ok(schema)
}
