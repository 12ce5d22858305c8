use crate::key::{Dimension, Element, ElementId, Key};
use std::collections::{BTreeMap, BTreeSet};

///
/// KeyspaceDimension
///
/// Distinct elements observed for one dimension, in first-seen order.
///

#[derive(Clone, Debug)]
pub struct KeyspaceDimension {
    dimension: Dimension,
    elements: Vec<Element>,
    seen: BTreeSet<ElementId>,
}

impl KeyspaceDimension {
    const fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            elements: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    // Duplicates are ignored; returns whether the element was new.
    fn insert(&mut self, element: &Element) -> bool {
        if !self.seen.insert(element.id().clone()) {
            return false;
        }
        self.elements.push(element.clone());

        true
    }

    #[must_use]
    pub const fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn contains(&self, element: &Element) -> bool {
        element.dimension() == &self.dimension && self.seen.contains(element.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

///
/// Keyspace
///
/// Aggregate of every key added to a job, organized per dimension.
/// Populated once by scanning the input keys; read-only afterwards.
///

#[derive(Clone, Debug, Default)]
pub struct Keyspace {
    dimensions: Vec<KeyspaceDimension>,
    slots: BTreeMap<Dimension, usize>,
    keys: BTreeSet<Key>,
}

impl Keyspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one key; returns `false` if the key was already present.
    pub fn add(&mut self, key: Key) -> bool {
        for element in key.elements() {
            let slot = match self.slots.get(element.dimension()) {
                Some(slot) => *slot,
                None => {
                    let slot = self.dimensions.len();
                    self.dimensions
                        .push(KeyspaceDimension::new(element.dimension().clone()));
                    self.slots.insert(element.dimension().clone(), slot);
                    slot
                }
            };
            self.dimensions[slot].insert(element);
        }

        self.keys.insert(key)
    }

    pub fn extend(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.add(key);
        }
    }

    #[must_use]
    pub fn dimension(&self, dimension: &Dimension) -> Option<&KeyspaceDimension> {
        self.slots
            .get(dimension)
            .map(|slot| &self.dimensions[*slot])
    }

    /// Dimensions in first-seen order.
    #[must_use]
    pub fn dimensions(&self) -> &[KeyspaceDimension] {
        &self.dimensions
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
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

impl FromIterator<Key> for Keyspace {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keyspace = Self::new();
        keyspace.extend(iter);
        keyspace
    }
}
