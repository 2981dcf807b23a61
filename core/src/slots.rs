use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Commands the game issues to whatever collects the player's letters.
pub trait SlotBoard {
    /// Shows per-slot feedback for the last guess.
    fn apply_states(&mut self, states: &[LetterState]);

    /// Empties and unlocks every slot.
    fn clear(&mut self);

    /// Replaces the slot contents with `prefill`, leaving only unlocked slots editable.
    fn prefill(&mut self, prefill: &Prefill);
}

/// One input box per title letter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LetterSlots {
    letters: Vec<Option<char>>,
    states: Vec<LetterState>,
    locked: Vec<bool>,
}

impl LetterSlots {
    pub fn new(len: usize) -> Self {
        Self {
            letters: vec![None; len],
            states: vec![LetterState::Idle; len],
            locked: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied().flatten()
    }

    pub fn state_at(&self, index: usize) -> LetterState {
        self.states.get(index).copied().unwrap_or_default()
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.get(index).copied().unwrap_or(true)
    }

    /// Types `letter` into slot `index`.
    ///
    /// Returns the slot that should receive focus next, or `None` when the input was refused. Only ASCII letters
    /// are accepted and they are stored upper-cased.
    pub fn input(&mut self, index: usize, letter: char) -> Option<usize> {
        if self.is_locked(index) || !letter.is_ascii_alphabetic() {
            return None;
        }
        self.letters[index] = Some(letter.to_ascii_uppercase());
        Some(self.next_unlocked(index + 1).unwrap_or(index))
    }

    /// Backspace on slot `index`: clears it, or moves back when it is already empty.
    pub fn erase(&mut self, index: usize) -> Option<usize> {
        if self.is_locked(index) {
            return None;
        }
        if self.letters[index].take().is_some() {
            Some(index)
        } else {
            index.checked_sub(1).and_then(|prev| self.prev_unlocked(prev))
        }
    }

    /// First unlocked slot at or after `from`.
    pub fn next_unlocked(&self, from: usize) -> Option<usize> {
        (from..self.len()).find(|&index| !self.locked[index])
    }

    /// Last unlocked slot at or before `from`.
    pub fn prev_unlocked(&self, from: usize) -> Option<usize> {
        let end = from.checked_add(1)?.min(self.len());
        (0..end).rev().find(|&index| !self.locked[index])
    }

    /// First unlocked slot that is still empty.
    pub fn first_empty(&self) -> Option<usize> {
        (0..self.len()).find(|&index| !self.locked[index] && self.letters[index].is_none())
    }

    pub fn is_complete(&self) -> bool {
        !self.is_empty() && self.letters.iter().all(Option::is_some)
    }

    /// The guess spelled by the slots once every one of them holds a letter.
    pub fn guess(&self) -> Option<String> {
        self.is_complete()
            .then(|| self.letters.iter().flatten().collect())
    }
}

impl SlotBoard for LetterSlots {
    fn apply_states(&mut self, states: &[LetterState]) {
        for (slot, &state) in self.states.iter_mut().zip(states) {
            *slot = state;
        }
    }

    fn clear(&mut self) {
        let len = self.len();
        *self = Self::new(len);
    }

    fn prefill(&mut self, prefill: &Prefill) {
        if prefill.len() != self.len() {
            log::warn!(
                "Prefill for {} slots applied to {} slots",
                prefill.len(),
                self.len()
            );
        }
        let slots = self
            .letters
            .iter_mut()
            .zip(self.states.iter_mut())
            .zip(self.locked.iter_mut());
        for (((letter, state), locked), (&value, &lock)) in
            slots.zip(prefill.values.iter().zip(&prefill.locked))
        {
            *locked = lock;
            *letter = if lock { value } else { None };
            if !lock {
                *state = LetterState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_word(slots: &mut LetterSlots, word: &str) {
        let mut index = slots.first_empty();
        for letter in word.chars() {
            let Some(at) = index else { break };
            slots.input(at, letter);
            index = slots.first_empty();
        }
    }

    #[test]
    fn input_accepts_letters_and_advances_focus() {
        let mut slots = LetterSlots::new(3);

        assert_eq!(slots.input(0, 'm'), Some(1));
        assert_eq!(slots.letter_at(0), Some('M'));
        assert_eq!(slots.input(1, '7'), None);
        assert_eq!(slots.letter_at(1), None);
    }

    #[test]
    fn guess_is_available_only_when_complete() {
        let mut slots = LetterSlots::new(2);
        slots.input(0, 'u');
        assert_eq!(slots.guess(), None);

        slots.input(1, 'p');
        assert_eq!(slots.guess().as_deref(), Some("UP"));
    }

    #[test]
    fn prefill_locks_slots_and_skips_them_while_typing() {
        let mut slots = LetterSlots::new(4);
        slots.input(0, 'x');
        let prefill = Prefill {
            values: vec![None, Some('O'), None, Some('N')],
            locked: vec![false, true, false, true],
        };

        slots.prefill(&prefill);

        assert_eq!(slots.letter_at(0), None);
        assert!(slots.is_locked(1));
        assert_eq!(slots.input(1, 'a'), None);
        assert_eq!(slots.input(0, 'i'), Some(2));

        slots.input(2, 'o');
        assert_eq!(slots.guess().as_deref(), Some("IOON"));
    }

    #[test]
    fn erase_moves_back_over_locked_slots() {
        let mut slots = LetterSlots::new(3);
        slots.prefill(&Prefill {
            values: vec![None, Some('A'), None],
            locked: vec![false, true, false],
        });
        type_word(&mut slots, "bc");

        assert_eq!(slots.erase(2), Some(2));
        assert_eq!(slots.erase(2), Some(0));
        assert_eq!(slots.erase(1), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut slots = LetterSlots::new(2);
        slots.input(0, 'a');
        slots.apply_states(&[LetterState::Absent, LetterState::Absent]);
        slots.prefill(&Prefill {
            values: vec![None, Some('B')],
            locked: vec![false, true],
        });

        slots.clear();

        assert_eq!(slots, LetterSlots::new(2));
    }
}
