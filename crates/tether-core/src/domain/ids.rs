//! Run identifiers.
//!
//! ULID (Universally Unique Lexicographically Sortable Identifier) を使用:
//! - **時刻でソート可能**: timestamp が先頭にあるため、生成順序でソートできる
//! - **分散生成可能**: 調整なしで複数ノードで生成できる
//! - **UUID互換**: 128-bit で UUID と同じサイズ

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Opaque identifier of a remote run.
///
/// Assigned once when the run is submitted, immutable afterwards. Handles
/// compare and hash by this id, so it doubles as the de-duplication key when
/// handles are collected into sets or maps.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(Ulid);

impl RunId {
    /// Mint a fresh id.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Ulid> for RunId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_run_prefix() {
        let id = RunId::new();
        assert!(id.to_string().starts_with("run-"));
    }

    #[test]
    fn ids_are_sortable_by_creation_time() {
        // ULID は時刻ベースなので、生成順序でソート可能
        let a = RunId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = RunId::new();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let id = RunId::new();
        let s = serde_json::to_string(&id).unwrap();
        let back: RunId = serde_json::from_str(&s).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn same_ulid_means_equal_ids() {
        let ulid = Ulid::new();
        let a = RunId::from_ulid(ulid);
        let b = RunId::from_ulid(ulid);
        assert_eq!(a, b);
        assert_eq!(a.as_ulid(), ulid);
    }
}
