use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{CatalogItem, Company, DocumentError, DocumentNumberSequence, DocumentType};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "DEVIS_CONFIG";

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_company")]
    pub company: Company,
    /// Last issued value per document kind ("quote", "invoice", …).
    #[serde(default = "default_counters")]
    pub counters: BTreeMap<String, u64>,
    #[serde(default = "default_items")]
    pub items: Vec<CatalogItem>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            company: default_company(),
            counters: default_counters(),
            items: default_items(),
        }
    }
}

fn default_company() -> Company {
    Company {
        name: "My Company".into(),
        ..Default::default()
    }
}

fn default_counters() -> BTreeMap<String, u64> {
    [DocumentType::Quote, DocumentType::Invoice]
        .into_iter()
        .map(|t| (t.as_str().to_string(), 0))
        .collect()
}

fn default_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            key: "service".into(),
            label: "Service".into(),
            unit_price: dec!(80.0),
        },
        CatalogItem {
            key: "product".into(),
            label: "Product".into(),
            unit_price: dec!(50.0),
        },
    ]
}

/// JSON-file backed configuration: issuer identity, item catalog and
/// document counters.
///
/// Every mutating call loads the file, applies the change and saves it, so
/// two stores on the same path always see each other's writes.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$DEVIS_CONFIG`, else `<config dir>/devis/config.json`.
    pub fn default_location() -> Result<Self, DocumentError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(Self::new(path));
        }
        let dir = dirs::config_dir().ok_or_else(|| {
            DocumentError::Config("could not determine the user configuration directory".into())
        })?;
        Ok(Self::new(dir.join("devis").join("config.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current configuration, or the defaults if the file does not exist.
    pub fn load(&self) -> Result<AppConfig, DocumentError> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            DocumentError::Config(format!("invalid config {}: {e}", self.path.display()))
        })
    }

    /// Persist `config` as pretty UTF-8 JSON, creating parent directories.
    pub fn save(&self, config: &AppConfig) -> Result<(), DocumentError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| DocumentError::Config(format!("failed to serialize config: {e}")))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut AppConfig) -> T) -> Result<T, DocumentError> {
        let mut config = self.load()?;
        let out = f(&mut config);
        self.save(&config)?;
        Ok(out)
    }

    pub fn company(&self) -> Result<Company, DocumentError> {
        Ok(self.load()?.company)
    }

    pub fn set_company(&self, company: Company) -> Result<(), DocumentError> {
        self.update(|config| config.company = company)
    }

    pub fn set_company_name(&self, name: impl Into<String>) -> Result<(), DocumentError> {
        let name = name.into();
        self.update(|config| config.company.name = name)
    }

    pub fn set_logo_path(&self, path: Option<PathBuf>) -> Result<(), DocumentError> {
        self.update(|config| config.company.logo_path = path)
    }

    pub fn list_items(&self) -> Result<Vec<CatalogItem>, DocumentError> {
        Ok(self.load()?.items)
    }

    /// Catalog item by key.
    pub fn item(&self, key: &str) -> Result<Option<CatalogItem>, DocumentError> {
        Ok(self.load()?.items.into_iter().find(|item| item.key == key))
    }

    /// Insert an item, or update label and price of the item with that key.
    pub fn upsert_item(
        &self,
        key: impl Into<String>,
        label: impl Into<String>,
        unit_price: Decimal,
    ) -> Result<(), DocumentError> {
        let key = key.into();
        let label = label.into();
        self.update(|config| {
            match config.items.iter_mut().find(|item| item.key == key) {
                Some(item) => {
                    item.label = label;
                    item.unit_price = unit_price;
                }
                None => config.items.push(CatalogItem {
                    key,
                    label,
                    unit_price,
                }),
            }
        })
    }

    /// Remove the item with that key. Returns whether an item was removed.
    pub fn delete_item(&self, key: &str) -> Result<bool, DocumentError> {
        self.update(|config| {
            let before = config.items.len();
            config.items.retain(|item| item.key != key);
            config.items.len() != before
        })
    }

    /// Increment the counter of `kind`, persist it, and return the new value
    /// formatted as `prefix` + zero-padded digits.
    ///
    /// Counters of different kinds are independent.
    pub fn next_number(
        &self,
        kind: &str,
        prefix: &str,
        width: usize,
    ) -> Result<String, DocumentError> {
        let mut config = self.load()?;
        let last = config.counters.get(kind).copied().unwrap_or(0);
        let next = last.checked_add(1).ok_or_else(|| {
            DocumentError::Numbering(format!("{kind} counter is exhausted"))
        })?;
        let mut sequence = DocumentNumberSequence::starting_at(prefix, next).with_padding(width);
        let number = sequence.next_number();
        config.counters.insert(kind.to_string(), sequence.last_issued());
        self.save(&config)?;
        tracing::debug!(kind, %number, "issued document number");
        Ok(number)
    }

    /// Next number for a document type with its conventional prefix
    /// ("D-0001" for quotes, "F-0001" for invoices).
    pub fn next_document_number(&self, doc_type: DocumentType) -> Result<String, DocumentError> {
        self.next_number(
            doc_type.as_str(),
            doc_type.number_prefix(),
            crate::core::DEFAULT_NUMBER_WIDTH,
        )
    }
}
