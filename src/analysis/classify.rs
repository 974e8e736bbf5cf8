// Heuristic classification for extended mode
//
// Pure, table-driven rules over a file's path, source text, and metadata.
// Rules are ordered and the first match wins; there is no scoring.

use crate::analysis::metadata::Metadata;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Risk level of a file, strict precedence HIGH > MEDIUM > LOW
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            RiskLevel::High => "🔴",
            RiskLevel::Medium => "🟡",
            RiskLevel::Low => "🟢",
        }
    }
}

/// Architectural role of a file, from path conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Controller,
    Model,
    View,
    Utility,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Controller => "Controller (MVC)",
            Role::Model => "Model (Data Layer)",
            Role::View => "View (UI Layer)",
            Role::Utility => "Utility (Helper Functions)",
            Role::Other => "Other",
        }
    }
}

/// Signals of persistent-state mutation: dynamic execution, database
/// access, credentials, destructive filesystem calls
const HIGH_RISK_MARKERS: &[&str] = &[
    "eval(",
    "exec(",
    "__import__",
    "subprocess",
    "os.system",
    "os.remove",
    "shutil.rmtree",
    "sqlalchemy",
    "psycopg",
    "pymongo",
    "oracledb",
    "cursor.execute",
    "db_connection",
    "database",
    "password",
    "secret",
    "api_key",
];

/// Broad exception handling, config/environment access, file or network I/O
const MEDIUM_RISK_MARKERS: &[&str] = &[
    "try:",
    "except",
    "raise",
    "open(",
    "makedirs",
    "requests.",
    "urllib",
    "http",
    "config",
    "settings",
    "environ",
];

/// Ordered keyword table for role detection; first match wins
const ROLE_TABLE: &[(&str, Role)] = &[
    ("controller", Role::Controller),
    ("model", Role::Model),
    ("view", Role::View),
    ("util", Role::Utility),
    ("helper", Role::Utility),
];

/// Classify the risk level of a file's content
pub fn risk_level(source: &str, metadata: &Metadata) -> RiskLevel {
    let content = source.to_lowercase();

    if HIGH_RISK_MARKERS.iter().any(|m| content.contains(m)) {
        return RiskLevel::High;
    }

    if metadata.has_error_handling || MEDIUM_RISK_MARKERS.iter().any(|m| content.contains(m)) {
        return RiskLevel::Medium;
    }

    RiskLevel::Low
}

/// Classify the architectural role from directory and filename tokens
pub fn architectural_role(path: &Path) -> Role {
    let path_str = path.to_string_lossy().to_lowercase().replace('\\', "/");

    for (keyword, role) in ROLE_TABLE {
        if path_str.contains(keyword) {
            return *role;
        }
    }

    Role::Other
}
