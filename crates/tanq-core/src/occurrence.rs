//! The occurrence model: how a clause participates in its enclosing group.

use serde::{Deserialize, Serialize};

/// How a clause participates in the boolean expression of its group.
///
/// Fixed at the moment the clause is added; replacing a clause under the same
/// key installs a fresh occurrence along with the fresh primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occurrence {
    /// The clause must match (boolean AND).
    #[default]
    Always,

    /// The clause may match; matching affects scoring only (boolean OR).
    Sometimes,

    /// The clause must not match (boolean NOT).
    Never,
}
