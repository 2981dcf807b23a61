use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lower-case letters proven to be in the title by any guess of the round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredLetters(BTreeSet<char>);

impl DiscoveredLetters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of `self` with every letter of `guess` scored as a hit.
    ///
    /// Never removes letters, so applying the same evaluation twice is a no-op.
    pub fn accumulate(&self, states: &[LetterState], guess: &str) -> Self {
        let mut letters = self.0.clone();
        letters.extend(hit_letters(guess, states).map(|ch| ch.to_ascii_lowercase()));
        Self(letters)
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Sorted concatenation of the letters, `None` while nothing is discovered.
    pub fn seed(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.iter().collect())
    }

    /// Share of the title's distinct letters discovered so far, rounded down.
    pub fn coverage(&self, title: &NormalizedTitle) -> Percent {
        let unique = title.unique_letters();
        if unique.is_empty() {
            return 0;
        }
        let found = unique.intersection(&self.0).count();
        // found <= unique.len(), so the quotient fits
        (found * usize::from(FULL_REVEAL) / unique.len()) as Percent
    }
}

impl FromIterator<char> for DiscoveredLetters {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().map(|ch| ch.to_ascii_lowercase()).collect())
    }
}

/// Slot values and locks derived from the discovered letters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub values: Vec<Option<char>>,
    pub locked: Vec<bool>,
}

impl Prefill {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn locked_count(&self) -> usize {
        self.locked.iter().filter(|&&locked| locked).count()
    }
}

/// Fills and locks every title position whose letter has been discovered.
///
/// Always computed from scratch: a position left open earlier becomes eligible as soon as its letter is found.
pub fn prefill_positions(title: &NormalizedTitle, discovered: &DiscoveredLetters) -> Prefill {
    let (values, locked) = title
        .chars()
        .map(|ch| {
            if discovered.contains(ch) {
                (Some(ch), true)
            } else {
                (None, false)
            }
        })
        .unzip();
    Prefill { values, locked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterState::*;

    #[test]
    fn accumulate_collects_hits_only() {
        let discovered = DiscoveredLetters::new().accumulate(&[Present, Absent, Correct], "PXU");

        assert_eq!(discovered.seed().as_deref(), Some("pu"));
        assert!(discovered.contains('U'));
        assert!(!discovered.contains('x'));
    }

    #[test]
    fn accumulate_is_idempotent() {
        let states = [Correct, Present, Absent];
        let once = DiscoveredLetters::from_iter(['q']).accumulate(&states, "abc");
        let twice = once.accumulate(&states, "abc");

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 3);
    }

    #[test]
    fn accumulate_never_removes_letters() {
        let discovered = DiscoveredLetters::from_iter(['z']).accumulate(&[Absent], "z");
        assert!(discovered.contains('z'));
    }

    #[test]
    fn seed_is_none_when_nothing_discovered() {
        assert_eq!(DiscoveredLetters::new().seed(), None);
    }

    #[test]
    fn coverage_rounds_down_over_distinct_letters() {
        let title = NormalizedTitle::new("Avatar");
        // distinct letters: a, r, t, v
        let discovered = DiscoveredLetters::from_iter(['a', 'x']);
        assert_eq!(discovered.coverage(&title), 25);

        let title = NormalizedTitle::new("Titanic");
        // distinct letters: a, c, i, n, t
        let discovered = DiscoveredLetters::from_iter(['t', 'i']);
        assert_eq!(discovered.coverage(&title), 40);

        let title = NormalizedTitle::new("Toy");
        let discovered = DiscoveredLetters::from_iter(['t']);
        assert_eq!(discovered.coverage(&title), 33);
    }

    #[test]
    fn prefill_locks_every_occurrence_of_discovered_letters() {
        let title = NormalizedTitle::new("Inception");
        let prefill = prefill_positions(&title, &DiscoveredLetters::from_iter(['n', 'o']));

        assert_eq!(
            prefill.values,
            [None, Some('N'), None, None, None, None, None, Some('O'), Some('N')]
        );
        assert_eq!(prefill.locked_count(), 3);
        assert_eq!(prefill.len(), title.len());
    }

    #[test]
    fn prefill_is_recomputed_from_scratch() {
        let title = NormalizedTitle::new("Up");
        let before = prefill_positions(&title, &DiscoveredLetters::from_iter(['p']));
        let after = prefill_positions(&title, &DiscoveredLetters::from_iter(['p', 'u']));

        assert_eq!(before.locked, [false, true]);
        assert_eq!(after.locked, [true, true]);
    }
}
