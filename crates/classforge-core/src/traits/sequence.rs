use parking_lot::Mutex;

use super::model::SharedTrait;

/// An ordered collection of traits for one payload type.
///
/// `None` signals "no traits", so callers can pass the object through
/// without touching it. A returned `Vec` is never empty.
pub trait TraitSequence<T> {
    fn sequence(&self) -> Option<Vec<SharedTrait<T>>>;
}

/// Sort by descending priority. The sort is stable: traits of equal
/// priority keep their insertion order.
pub fn sort_traits_by_priority<T>(traits: &mut [SharedTrait<T>]) {
    traits.sort_by(|a, b| a.target().ordering(&b.target()));
}

/// Sequence sorted once at construction.
pub struct ImmutableTraitSequence<T> {
    traits: Vec<SharedTrait<T>>,
}

impl<T> ImmutableTraitSequence<T> {
    pub fn new(mut traits: Vec<SharedTrait<T>>) -> Self {
        sort_traits_by_priority(&mut traits);
        Self { traits }
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

impl<T> TraitSequence<T> for ImmutableTraitSequence<T> {
    fn sequence(&self) -> Option<Vec<SharedTrait<T>>> {
        if self.traits.is_empty() {
            None
        } else {
            Some(self.traits.clone())
        }
    }
}

impl<T> FromIterator<SharedTrait<T>> for ImmutableTraitSequence<T> {
    fn from_iter<I: IntoIterator<Item = SharedTrait<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

struct MutableState<T> {
    traits: Vec<SharedTrait<T>>,
    sorted: bool,
}

/// Sequence that can grow after construction. It is re-sorted lazily, on
/// the first read after a change.
pub struct MutableTraitSequence<T> {
    state: Mutex<MutableState<T>>,
}

impl<T> Default for MutableTraitSequence<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(MutableState {
                traits: Vec::new(),
                sorted: true,
            }),
        }
    }
}

impl<T> MutableTraitSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, trait_: SharedTrait<T>) {
        let mut state = self.state.lock();
        state.traits.push(trait_);
        state.sorted = false;
    }

    pub fn add_all(&self, traits: impl IntoIterator<Item = SharedTrait<T>>) {
        let mut state = self.state.lock();
        state.traits.extend(traits);
        state.sorted = false;
    }

    pub fn len(&self) -> usize {
        self.state.lock().traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().traits.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.traits.clear();
        state.sorted = true;
    }
}

impl<T> TraitSequence<T> for MutableTraitSequence<T> {
    fn sequence(&self) -> Option<Vec<SharedTrait<T>>> {
        let mut state = self.state.lock();
        if !state.sorted {
            sort_traits_by_priority(&mut state.traits);
            state.sorted = true;
        }
        if state.traits.is_empty() {
            None
        } else {
            Some(state.traits.clone())
        }
    }
}

impl<T> FromIterator<SharedTrait<T>> for MutableTraitSequence<T> {
    fn from_iter<I: IntoIterator<Item = SharedTrait<T>>>(iter: I) -> Self {
        let sequence = Self::new();
        sequence.add_all(iter);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{file_trait, Target};

    fn tagged(priority: i32, tag: u8) -> SharedTrait<Vec<u8>> {
        file_trait(Target::all(priority), move |mut bytes, _| {
            bytes.push(tag);
            Ok(bytes)
        })
    }

    fn priorities<T>(traits: &[SharedTrait<T>]) -> Vec<i32> {
        traits.iter().map(|t| t.target().priority).collect()
    }

    #[test]
    fn test_priority_order() {
        let sequence: ImmutableTraitSequence<Vec<u8>> = [1, 10, 0, 100, i32::MAX]
            .into_iter()
            .map(|p| tagged(p, 0))
            .collect();
        let traits = sequence.sequence().unwrap();
        assert_eq!(priorities(&traits), vec![i32::MAX, 100, 10, 1, 0]);
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let mut traits = vec![tagged(5, b'a'), tagged(9, b'z'), tagged(5, b'b'), tagged(5, b'c')];
        sort_traits_by_priority(&mut traits);

        let remapper = classforge_remap::Remapper::identity();
        let tags: Vec<u8> = traits
            .iter()
            .map(|t| t.modify(Vec::new(), &remapper).unwrap()[0])
            .collect();
        assert_eq!(tags, b"zabc");
    }

    #[test]
    fn test_empty_sequences_signal_none() {
        assert!(ImmutableTraitSequence::<Vec<u8>>::new(Vec::new())
            .sequence()
            .is_none());
        let mutable = MutableTraitSequence::<Vec<u8>>::new();
        assert!(mutable.sequence().is_none());
        mutable.add(tagged(1, 0));
        mutable.clear();
        assert!(mutable.sequence().is_none());
        assert!(mutable.is_empty());
    }

    #[test]
    fn test_mutable_sequence_resorts_after_add() {
        let sequence = MutableTraitSequence::new();
        sequence.add(tagged(1, 0));
        sequence.add(tagged(3, 0));
        assert_eq!(priorities(&sequence.sequence().unwrap()), vec![3, 1]);

        sequence.add_all([tagged(2, 0), tagged(7, 0)]);
        assert_eq!(sequence.len(), 4);
        assert_eq!(priorities(&sequence.sequence().unwrap()), vec![7, 3, 2, 1]);
    }
}
