//! Alphabet: bijection between a contiguous symbol range and dense indices.

use crate::error::{EnigmaError, Result};

/// Contiguous range of symbols `first..=last` indexed `0..size`.
///
/// Every other component works on indices; the alphabet is the only place
/// where symbols and indices are translated into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    first: char,
    last: char,
}

impl Default for Alphabet {
    /// The 26 upper-case Latin letters.
    fn default() -> Self {
        Alphabet {
            first: 'A',
            last: 'Z',
        }
    }
}

impl Alphabet {
    /// Creates the alphabet `first..=last`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidAlphabet`] if the range holds fewer than
    /// 2 symbols or crosses the surrogate gap (`U+D800..=U+DFFF`).
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorsim::Alphabet;
    ///
    /// let alpha = Alphabet::new('A', 'Z').unwrap();
    /// assert_eq!(alpha.size(), 26);
    /// assert!(Alphabet::new('Z', 'A').is_err());
    /// ```
    pub fn new(first: char, last: char) -> Result<Self> {
        let lo = first as u32;
        let hi = last as u32;
        if hi <= lo || (lo < 0xD800 && hi > 0xDFFF) {
            return Err(EnigmaError::InvalidAlphabet { first, last });
        }
        Ok(Alphabet { first, last })
    }

    /// Upper-case Latin letters `A..=Z`.
    pub fn upper() -> Self {
        Self::default()
    }

    /// First symbol of the range.
    pub fn first(&self) -> char {
        self.first
    }

    /// Last symbol of the range.
    pub fn last(&self) -> char {
        self.last
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        (self.last as u32 - self.first as u32 + 1) as usize
    }

    /// Returns true iff `symbol` belongs to the range.
    pub fn contains(&self, symbol: char) -> bool {
        (self.first..=self.last).contains(&symbol)
    }

    /// Returns the index of `symbol`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `symbol` is outside the range.
    pub fn index_of(&self, symbol: char) -> Result<usize> {
        if !self.contains(symbol) {
            return Err(EnigmaError::InvalidSymbol { symbol });
        }
        Ok((symbol as u32 - self.first as u32) as usize)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn symbol_at(&self, index: usize) -> Result<char> {
        let size = self.size();
        if index >= size {
            return Err(EnigmaError::IndexOutOfRange { index, size });
        }
        // Range was checked against the surrogate gap in `new`.
        char::from_u32(self.first as u32 + index as u32)
            .ok_or(EnigmaError::IndexOutOfRange { index, size })
    }

    /// Reduces `p` modulo `size()`, always non-negative.
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }
}
