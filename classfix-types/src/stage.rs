use crate::candidate::Origin;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing stage of one document.
///
/// `Idle -> Splitting -> Locating(Markup) -> Locating(Script) -> Reconciling
/// -> Canonicalizing -> Rewriting -> Done`. Any failure ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "origin", rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Splitting,
    Locating(Origin),
    Reconciling,
    Canonicalizing,
    Rewriting,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => f.write_str("idle"),
            Stage::Splitting => f.write_str("splitting"),
            Stage::Locating(Origin::Markup) => f.write_str("locating markup"),
            Stage::Locating(Origin::Script) => f.write_str("locating script"),
            Stage::Reconciling => f.write_str("reconciling"),
            Stage::Canonicalizing => f.write_str("canonicalizing"),
            Stage::Rewriting => f.write_str("rewriting"),
            Stage::Done => f.write_str("done"),
            Stage::Failed => f.write_str("failed"),
        }
    }
}
