//! StatQuery - String keys like "bonus_armor" routed to per-attribute queries

use crate::config::SchemaConfig;
use crate::error::BuildError;
use crate::types::Attribute;
use std::fmt;

/// Which number of an attribute a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatQuery {
    Total,
    Base,
    Bonus,
    Percent,
    PercentBase,
    PercentBonus,
}

/// Prefix registry; longer prefixes come first so "percent_base_" wins over "percent_"
const QUERY_PREFIXES: &[(&str, StatQuery)] = &[
    ("percent_base_", StatQuery::PercentBase),
    ("percent_bonus_", StatQuery::PercentBonus),
    ("percent_", StatQuery::Percent),
    ("bonus_", StatQuery::Bonus),
    ("base_", StatQuery::Base),
];

impl StatQuery {
    /// Prefix of this query, empty for totals
    pub fn prefix(self) -> &'static str {
        QUERY_PREFIXES
            .iter()
            .find(|(_, query)| *query == self)
            .map_or("", |(prefix, _)| *prefix)
    }

    /// Split a key into a query and an attribute
    ///
    /// A bare attribute key asks for the total and must be a basic attribute.
    pub fn parse(key: &str, schema: &SchemaConfig) -> Result<(StatQuery, Attribute), BuildError> {
        for (prefix, query) in QUERY_PREFIXES {
            if let Some(rest) = key.strip_prefix(prefix) {
                if let Ok(attribute) = rest.parse::<Attribute>() {
                    return Ok((*query, attribute));
                }
            }
        }
        let attribute: Attribute = key.parse()?;
        if !schema.is_basic(attribute) {
            return Err(BuildError::NotBasicAttribute(attribute));
        }
        Ok((StatQuery::Total, attribute))
    }

    /// Key that parses back to this query and attribute
    pub fn key(self, attribute: Attribute) -> String {
        format!("{}{}", self.prefix(), attribute.key())
    }
}

impl fmt::Display for StatQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatQuery::Total => "total",
            StatQuery::Base => "base",
            StatQuery::Bonus => "bonus",
            StatQuery::Percent => "percent",
            StatQuery::PercentBase => "percent_base",
            StatQuery::PercentBonus => "percent_bonus",
        };
        write!(f, "{}", name)
    }
}
