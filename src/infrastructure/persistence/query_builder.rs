use crate::domain::value_objects::ReferenceColumn;

/// How a backend quotes identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierQuote {
    /// `"name"` (PostgreSQL)
    DoubleQuote,
    /// `[name]` (SQLite). SQLite reads an unresolvable `"name"` as a string
    /// literal, which would turn a misconfigured column into a constant.
    Bracket,
}

impl IdentifierQuote {
    fn quote(self, identifier: &str) -> String {
        match self {
            IdentifierQuote::DoubleQuote => format!("\"{identifier}\""),
            IdentifierQuote::Bracket => format!("[{identifier}]"),
        }
    }
}

/// SQL shared by the reference store implementations
pub struct QueryBuilder;

impl QueryBuilder {
    /// Connectivity check
    pub const PING: &'static str = "SELECT 1";

    /// Select every non-null, non-empty path recorded in the reference column.
    ///
    /// Identifiers are validated by [`ReferenceColumn`] and quoted here.
    pub fn select_reference_paths(source: &ReferenceColumn, quote: IdentifierQuote) -> String {
        let table = quote.quote(source.table());
        let column = quote.quote(source.column());
        format!("SELECT {column} FROM {table} WHERE {column} IS NOT NULL AND {column} <> ''")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_reference_paths() {
        let sql = QueryBuilder::select_reference_paths(
            &ReferenceColumn::default(),
            IdentifierQuote::DoubleQuote,
        );
        assert_eq!(
            sql,
            r#"SELECT "_data" FROM "part" WHERE "_data" IS NOT NULL AND "_data" <> ''"#
        );
    }

    #[test]
    fn test_sqlite_quoting() {
        let source = ReferenceColumn::new("pdu_part", "path").unwrap();
        let sql = QueryBuilder::select_reference_paths(&source, IdentifierQuote::Bracket);
        assert_eq!(
            sql,
            "SELECT [path] FROM [pdu_part] WHERE [path] IS NOT NULL AND [path] <> ''"
        );
    }
}
