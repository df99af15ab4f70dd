//! Persisted key-value preference store.
//!
//! Keys are flat strings (`slot_3`, `grid_x`, `first_launch_done`); values
//! are strings, booleans or integers. Two backends ship with the crate:
//! [`MemoryPrefs`] for tests and ephemeral sessions, and [`FilePrefs`], a
//! write-through JSON file that survives process restarts.

mod file;
mod memory;

pub use file::FilePrefs;
pub use memory::MemoryPrefs;

use serde::{Deserialize, Serialize};
use tvgrid_types::error::Result;

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PrefValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Abstraction over a persisted key-value store.
///
/// Typed accessors fall back to the supplied default when a key is absent
/// or holds a value of another type.
pub trait PrefStore {
    /// Look up a raw value.
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Store a value, replacing any previous one.
    fn put(&mut self, key: &str, value: PrefValue) -> Result<()>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All stored keys in sorted order.
    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(|v| v.as_int()).unwrap_or(default)
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.put(key, PrefValue::Str(value.to_string()))
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.put(key, PrefValue::Bool(value))
    }

    fn put_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.put(key, PrefValue::Int(value))
    }
}
