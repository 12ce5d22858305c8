use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// ExactKeyFilter
///
/// Explicit set of whole keys; matches by exact key equality.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExactKeyFilter {
    keys: BTreeSet<Key>,
}

impl ExactKeyFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, key: Key) -> bool {
        self.keys.insert(key)
    }

    #[must_use]
    pub fn matches(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<Key> for ExactKeyFilter {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
