use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier regex is valid")
});

/// Table and column holding attachment reference paths.
///
/// Both parts are plain SQL identifiers; they are interpolated into the
/// reference query, so anything beyond `[A-Za-z0-9_]` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceColumn {
    table: String,
    column: String,
}

impl ReferenceColumn {
    pub const DEFAULT_TABLE: &'static str = "part";
    pub const DEFAULT_COLUMN: &'static str = "_data";

    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Result<Self, DomainError> {
        let table = table.into();
        let column = column.into();

        for identifier in [&table, &column] {
            if !IDENTIFIER.is_match(identifier) {
                return Err(DomainError::InvalidIdentifier(identifier.clone()));
            }
        }

        Ok(Self { table, column })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Default for ReferenceColumn {
    fn default() -> Self {
        Self {
            table: Self::DEFAULT_TABLE.to_string(),
            column: Self::DEFAULT_COLUMN.to_string(),
        }
    }
}

impl std::fmt::Display for ReferenceColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
