//! Base and table identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{Error, InvalidInputError};

use super::ServiceUrl;

/// Identifier of a dataset ("base") on the service, e.g. `appe0azTDJhaS30Se`.
///
/// Opaque: the only requirement is that it is not empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseId(String);

impl BaseId {
    /// Create a new base identifier.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(InvalidInputError::EmptyBaseId.into());
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BaseId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BaseId> for String {
    fn from(id: BaseId) -> Self {
        id.0
    }
}

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a table ("sheet") inside a base, e.g. `Table 1`.
///
/// Kept verbatim; encoding happens when the request URL is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Create a new table name.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(InvalidInputError::EmptyTableName.into());
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> Self {
        name.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified address of one table on one service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub service: ServiceUrl,
    pub base: BaseId,
    pub table: TableName,
}

impl TableRef {
    pub fn new(service: ServiceUrl, base: BaseId, table: TableName) -> Self {
        Self {
            service,
            base,
            table,
        }
    }

    /// Returns the endpoint listing every record of this table.
    pub fn records_url(&self) -> Result<Url, Error> {
        self.service
            .records_url(self.base.as_str(), self.table.as_str())
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifiers_rejected() {
        assert!(BaseId::new("").is_err());
        assert!(TableName::new(" ").is_err());
    }

    #[test]
    fn identifiers_are_opaque() {
        assert_eq!(BaseId::new("app 1?").unwrap().as_str(), "app 1?");
        assert_eq!(TableName::new("Table 1").unwrap().as_str(), "Table 1");
    }

    #[test]
    fn table_ref_url() {
        let table = TableRef::new(
            ServiceUrl::default(),
            BaseId::new("appXXXX").unwrap(),
            TableName::new("Table 1").unwrap(),
        );
        assert_eq!(
            table.records_url().unwrap().as_str(),
            "https://api.airtable.com/v0/appXXXX/Table%201"
        );
        assert_eq!(table.to_string(), "appXXXX/Table 1");
    }

    #[test]
    fn deserialize_rejects_empty_base() {
        let result: Result<BaseId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
