// Copyright 2025 ORM Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Registry of benchmarked ORM implementations.
//!
//! The orchestrator keys its per-implementation results by a fixed set of
//! wire identifiers. This module provides the identifier set, the static
//! identifier-to-label table used by tabular views, and lookups between the
//! two. The mapping is immutable; unknown identifiers fall back to the raw
//! key for display.

use serde::{Deserialize, Serialize};

/// One of the object-relational mapping implementations being benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Implementation {
    /// Apache Cayenne
    Cayenne,
    /// Ebean ORM
    Ebean,
    /// jOOQ
    Jooq,
    /// Plain JDBC
    Jdbc,
    /// MyBatis
    MyBatis,
    /// Spring Data JPA
    SpringDataJpa,
}

impl Implementation {
    /// All implementations, in the orchestrator's execution order. Result
    /// keys appear in this order when every implementation is requested.
    pub const ALL: [Implementation; 6] = [
        Implementation::MyBatis,
        Implementation::SpringDataJpa,
        Implementation::Cayenne,
        Implementation::Ebean,
        Implementation::Jdbc,
        Implementation::Jooq,
    ];

    /// Raw wire identifier, as it appears in result keys and the
    /// `services` request parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cayenne => "cayenne",
            Self::Ebean => "ebean",
            Self::Jooq => "jooq",
            Self::Jdbc => "jdbc",
            Self::MyBatis => "myBatis",
            Self::SpringDataJpa => "springDataJpa",
        }
    }

    /// Human-readable label for tabular display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cayenne => "Cayenne",
            Self::Ebean => "Ebean",
            Self::Jooq => "JOOQ",
            Self::Jdbc => "JDBC",
            Self::MyBatis => "MyBatis",
            Self::SpringDataJpa => "Spring Data JPA",
        }
    }

    /// Look up an implementation by its wire identifier.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.key() == key)
    }

    /// Display label for a wire identifier, falling back to the raw
    /// identifier when it is not in the registry.
    pub fn label_for(key: &str) -> &str {
        Self::from_key(key).map(|i| i.display_name()).unwrap_or(key)
    }
}

impl std::fmt::Display for Implementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
