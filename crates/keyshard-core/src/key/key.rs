use crate::key::{Dimension, Element, KeyError};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// Key
///
/// Set of elements with pairwise-distinct dimensions, addressing one data
/// item (or a group of them). The empty key is the root key.
///
/// Keys compare by their full element set; the derived ordering walks
/// elements in dimension order and gives a stable iteration order.
/// Serialized as a flat list of elements and re-validated on the way in.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(into = "Vec<Element>", try_from = "Vec<Element>")]
pub struct Key {
    elements: BTreeMap<Dimension, Element>,
}

impl Key {
    /// The root key: no elements, narrows into every key.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            elements: BTreeMap::new(),
        }
    }

    pub fn new(elements: impl IntoIterator<Item = Element>) -> Result<Self, KeyError> {
        let mut key = Self::root();
        for element in elements {
            key = key.with(element)?;
        }

        Ok(key)
    }

    /// Return this key extended by `element`.
    pub fn with(mut self, element: Element) -> Result<Self, KeyError> {
        if self.elements.contains_key(element.dimension()) {
            return Err(KeyError::DuplicateDimension {
                dimension: element.dimension().clone(),
            });
        }
        self.elements.insert(element.dimension().clone(), element);

        Ok(self)
    }

    #[must_use]
    pub fn get(&self, dimension: &Dimension) -> Option<&Element> {
        self.elements.get(dimension)
    }

    #[must_use]
    pub fn has_dimension(&self, dimension: &Dimension) -> bool {
        self.elements.contains_key(dimension)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.elements.keys()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// True when every element of `self` is also an element of `other`.
    #[must_use]
    pub fn narrows(&self, other: &Self) -> bool {
        crate::filter::narrows(self, other)
    }

    /// Keep only the elements whose dimension is listed.
    #[must_use]
    pub fn project(&self, dimensions: &[Dimension]) -> Self {
        let elements = self
            .elements
            .iter()
            .filter(|(dimension, _)| dimensions.contains(dimension))
            .map(|(dimension, element)| (dimension.clone(), element.clone()))
            .collect();

        Self { elements }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, element) in self.elements.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("}")
    }
}

impl From<Key> for Vec<Element> {
    fn from(key: Key) -> Self {
        key.elements.into_values().collect()
    }
}

impl TryFrom<Vec<Element>> for Key {
    type Error = KeyError;

    fn try_from(elements: Vec<Element>) -> Result<Self, Self::Error> {
        Self::new(elements)
    }
}
