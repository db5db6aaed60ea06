//! Logical layer identifiers.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Name does not match any logical layer
    #[error("Unknown layer '{0}' (expected one of: departments, communes, sections)")]
    UnknownLayer(String),

    /// A catalog was built without an entry for this layer
    #[error("Catalog has no entry for layer '{0}'")]
    MissingLayer(LogicalLayer),

    /// A catalog was built with more than one entry for this layer
    #[error("Catalog declares layer '{0}' more than once")]
    DuplicateLayer(LogicalLayer),
}

/// Thematic layer the user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalLayer {
    /// Departement boundaries
    Departments,
    /// Commune boundaries
    Communes,
    /// Cadastral sections
    Sections,
}

impl LogicalLayer {
    /// Every logical layer.
    pub const ALL: [LogicalLayer; 3] = [
        LogicalLayer::Departments,
        LogicalLayer::Communes,
        LogicalLayer::Sections,
    ];

    /// Number of logical layers.
    pub const COUNT: usize = Self::ALL.len();

    /// Lowercase name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::Communes => "communes",
            Self::Sections => "sections",
        }
    }

    /// Dense index in `0..COUNT`.
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Departments => 0,
            Self::Communes => 1,
            Self::Sections => 2,
        }
    }
}

impl fmt::Display for LogicalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalLayer {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|layer| layer.as_str() == lowered)
            .ok_or_else(|| CatalogError::UnknownLayer(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_dense() {
        for (i, layer) in LogicalLayer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for layer in LogicalLayer::ALL {
            assert_eq!(layer.to_string().parse::<LogicalLayer>(), Ok(layer));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "parcels".parse::<LogicalLayer>().unwrap_err();
        assert_eq!(err, CatalogError::UnknownLayer("parcels".to_string()));
        assert!(err.to_string().contains("departments, communes, sections"));
    }
}
