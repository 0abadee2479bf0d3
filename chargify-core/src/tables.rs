//! Static lookup tables consulted during translation.
//!
//! Both tables are immutable once built. The default Chargify tables are
//! `const` slices; custom tables go through [`IdentifierTable::new`] and
//! [`VerbTable::new`], which reject duplicate entries.

use thiserror::Error;

use crate::method::Method;

/// Errors raised when a lookup table violates its uniqueness invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate identifier argument: {0}")]
    DuplicateArgument(&'static str),

    #[error("duplicate anchor segment: {0}")]
    DuplicateAnchor(&'static str),

    #[error("duplicate verb segment: {0}")]
    DuplicateVerb(&'static str),

    #[error("duplicate status code: {0}")]
    DuplicateStatus(u16),
}

/// One identifier argument and the collection segment it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier {
    /// Call-time argument name, e.g. `customer_id`.
    pub argument: &'static str,
    /// Path segment the value is inserted after, e.g. `customers`.
    pub anchor: &'static str,
}

const CHARGIFY_IDENTIFIERS: &[Identifier] = &[
    Identifier {
        argument: "customer_id",
        anchor: "customers",
    },
    Identifier {
        argument: "product_id",
        anchor: "products",
    },
    Identifier {
        argument: "subscription_id",
        anchor: "subscriptions",
    },
    Identifier {
        argument: "component_id",
        anchor: "components",
    },
    Identifier {
        argument: "handle",
        anchor: "handle",
    },
    Identifier {
        argument: "statement_id",
        anchor: "statements",
    },
    Identifier {
        argument: "product_family_id",
        anchor: "product_families",
    },
    Identifier {
        argument: "coupon_id",
        anchor: "coupons",
    },
    Identifier {
        argument: "transaction_id",
        anchor: "transactions",
    },
    Identifier {
        argument: "usage_id",
        anchor: "usages",
    },
    Identifier {
        argument: "migration_id",
        anchor: "migrations",
    },
];

const CHARGIFY_VERBS: &[(&str, Method)] = &[
    ("create", Method::Post),
    ("read", Method::Get),
    ("update", Method::Put),
    ("delete", Method::Delete),
];

/// Mapping from identifier arguments to anchor segments.
///
/// Entries are processed in slice order, which keeps substitution
/// deterministic when several identifiers apply to one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierTable {
    entries: &'static [Identifier],
}

impl IdentifierTable {
    pub fn new(entries: &'static [Identifier]) -> Result<Self, TableError> {
        for (i, entry) in entries.iter().enumerate() {
            let rest = &entries[i + 1..];
            if rest.iter().any(|e| e.argument == entry.argument) {
                return Err(TableError::DuplicateArgument(entry.argument));
            }
            if rest.iter().any(|e| e.anchor == entry.anchor) {
                return Err(TableError::DuplicateAnchor(entry.anchor));
            }
        }
        Ok(Self { entries })
    }

    /// The identifier table of the Chargify API.
    pub const fn chargify() -> Self {
        Self {
            entries: CHARGIFY_IDENTIFIERS,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter()
    }

    pub fn anchor_for(&self, argument: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.argument == argument)
            .map(|e| e.anchor)
    }
}

impl Default for IdentifierTable {
    fn default() -> Self {
        Self::chargify()
    }
}

/// Mapping from terminal segment names to HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbTable {
    entries: &'static [(&'static str, Method)],
}

impl VerbTable {
    pub fn new(entries: &'static [(&'static str, Method)]) -> Result<Self, TableError> {
        for (i, (name, _)) in entries.iter().enumerate() {
            if entries[i + 1..].iter().any(|(other, _)| other == name) {
                return Err(TableError::DuplicateVerb(name));
            }
        }
        Ok(Self { entries })
    }

    /// The verb table of the Chargify API.
    pub const fn chargify() -> Self {
        Self {
            entries: CHARGIFY_VERBS,
        }
    }

    pub fn lookup(&self, segment: &str) -> Option<Method> {
        self.entries
            .iter()
            .find(|(name, _)| *name == segment)
            .map(|(_, method)| *method)
    }
}

impl Default for VerbTable {
    fn default() -> Self {
        Self::chargify()
    }
}
