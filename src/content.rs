use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use crate::models::ContentRecord;

/// Errors raised while building or querying a [`ContentCatalog`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("page not found: {0}")]
    NotFound(String),

    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("record '{identifier}' has an empty {field}")]
    EmptyField {
        identifier: String,
        field: &'static str,
    },

    #[error("catalog has no records")]
    Empty,
}

/// Immutable table of page content keyed by identifier
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCatalog {
    records: BTreeMap<String, ContentRecord>,
}

impl ContentCatalog {
    /// The pages shipped with the service: `home`, `about` and `contact`
    pub fn builtin() -> Self {
        let records = [
            (
                "home",
                ContentRecord::new(
                    "Bienvenido al Dashboard",
                    "Esta es la página principal. Aquí monitoreamos el estado del sistema.",
                    "🏠",
                ),
            ),
            (
                "about",
                ContentRecord::new(
                    "Sobre el Proyecto",
                    "Esta aplicación está diseñada para probar Datadog APM en una arquitectura distribuida.",
                    "ℹ️",
                ),
            ),
            (
                "contact",
                ContentRecord::new(
                    "Contáctanos",
                    "Envíanos tus dudas a admin@test.com o llámanos al 555-0199.",
                    "📞",
                ),
            ),
        ];

        Self {
            records: records
                .into_iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect(),
        }
    }

    /// Build a catalog from `(identifier, record)` pairs
    ///
    /// # Errors
    /// Fails on an empty identifier, a repeated identifier, a record with an
    /// empty field, or when no records are given.
    pub fn from_records<I, S>(records: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (S, ContentRecord)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();

        for (identifier, record) in records {
            let identifier = identifier.into();
            if identifier.is_empty() {
                return Err(ContentError::EmptyIdentifier);
            }
            if let Some(field) = record.first_empty_field() {
                return Err(ContentError::EmptyField { identifier, field });
            }
            match table.entry(identifier) {
                Entry::Occupied(entry) => {
                    return Err(ContentError::DuplicateIdentifier(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
            }
        }

        if table.is_empty() {
            return Err(ContentError::Empty);
        }

        Ok(Self { records: table })
    }

    /// Load a catalog from a JSON object of `identifier -> record`
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file {}", path.display()))?;
        let records: BTreeMap<String, ContentRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse content file {}", path.display()))?;

        let catalog = Self::from_records(records)
            .with_context(|| format!("Invalid content file {}", path.display()))?;

        tracing::debug!("Loaded {} pages from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Look up the record for `identifier`
    ///
    /// Unknown identifiers are reported as [`ContentError::NotFound`]; there is
    /// no fallback record.
    pub fn get_content(&self, identifier: &str) -> Result<&ContentRecord, ContentError> {
        if identifier.is_empty() {
            return Err(ContentError::EmptyIdentifier);
        }
        self.records
            .get(identifier)
            .ok_or_else(|| ContentError::NotFound(identifier.to_string()))
    }

    /// Known identifiers in sorted order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
