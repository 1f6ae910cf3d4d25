use crate::ShuffleError;

/// An ordering of the items `0..n`.
///
/// `items[i]` is the item that ends up at position `i` once the deck has been
/// shuffled. Always a bijection on `0..n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    items: Vec<usize>,
}

impl Permutation {
    /// Validate and wrap an explicit ordering
    pub fn new(items: Vec<usize>) -> Result<Self, ShuffleError> {
        let mut seen = vec![false; items.len()];
        for &item in &items {
            match seen.get_mut(item) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ShuffleError::InvalidPermutation(format!(
                        "item {} appears twice",
                        item
                    )))
                }
                None => {
                    return Err(ShuffleError::InvalidPermutation(format!(
                        "item {} is out of range for {} items",
                        item,
                        items.len()
                    )))
                }
            }
        }
        Ok(Permutation { items })
    }

    /// Callers guarantee `items` is a bijection on `0..items.len()`.
    pub(crate) fn from_vec_unchecked(items: Vec<usize>) -> Self {
        debug_assert!(Permutation::new(items.clone()).is_ok());
        Permutation { items }
    }

    /// The unshuffled order `0, 1, ..., n-1`
    pub fn identity(n: usize) -> Self {
        Permutation {
            items: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.items
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, position: usize) -> &usize {
        &self.items[position]
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
