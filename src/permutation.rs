//! Permutation: a permutation of alphabet indices written as disjoint cycles.
//!
//! A cycle `c0 c1 ... cm` maps `c0 → c1 → ... → cm → c0`. Indices that appear
//! in no cycle are fixed points, and a 1-cycle `(x)` names a fixed point
//! explicitly. Forward and inverse lookup tables are rebuilt whenever a cycle
//! is added so `permute`/`invert` are O(1) in the signal path.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// Permutation of the index space of an [`Alphabet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Alphabet,
    cycles: Vec<Vec<usize>>,
    forward: Vec<usize>,
    backward: Vec<usize>,
}

impl Permutation {
    /// Creates the identity permutation (no cycles).
    pub fn identity(alphabet: Alphabet) -> Self {
        let table: Vec<usize> = (0..alphabet.size()).collect();
        Permutation {
            alphabet,
            cycles: Vec::new(),
            forward: table.clone(),
            backward: table,
        }
    }

    /// Creates a permutation from cycles given as symbol strings.
    ///
    /// Each entry lists the symbols of one cycle without parentheses, so the
    /// cycle notation `(AELTPHQXRU) (BKNW)` is passed as
    /// `["AELTPHQXRU", "BKNW"]`. Whitespace inside an entry is ignored.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidSymbol`] if a cycle contains a symbol outside
    ///   the alphabet.
    /// - [`EnigmaError::BadPermutationSpec`] if a cycle is empty, repeats a
    ///   symbol, or shares a symbol with an earlier cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorsim::{Alphabet, Permutation};
    ///
    /// let perm = Permutation::from_cycles(Alphabet::upper(), &["ABC", "QUF"]).unwrap();
    /// assert_eq!(perm.permute_symbol('C').unwrap(), 'A');
    /// assert_eq!(perm.invert_symbol('U').unwrap(), 'Q');
    /// ```
    pub fn from_cycles<S: AsRef<str>>(alphabet: Alphabet, cycles: &[S]) -> Result<Self> {
        let mut perm = Self::identity(alphabet);
        for cycle in cycles {
            perm.add_cycle_symbols(cycle.as_ref())?;
        }
        Ok(perm)
    }

    /// Appends the cycle `cycle[0] → cycle[1] → ... → cycle[0]`.
    ///
    /// The permutation is left unchanged on error.
    ///
    /// # Errors
    /// - [`EnigmaError::IndexOutOfRange`] if an index is `>= size()`.
    /// - [`EnigmaError::BadPermutationSpec`] if the cycle is empty, repeats
    ///   an index, or overlaps an existing cycle.
    pub fn add_cycle(&mut self, cycle: &[usize]) -> Result<()> {
        if cycle.is_empty() {
            return Err(EnigmaError::permutation("empty cycle"));
        }
        let size = self.size();
        for (pos, &index) in cycle.iter().enumerate() {
            if index >= size {
                return Err(EnigmaError::IndexOutOfRange { index, size });
            }
            if cycle[..pos].contains(&index) {
                return Err(EnigmaError::permutation(format!(
                    "index {} repeated within one cycle",
                    index
                )));
            }
            if self.cycles.iter().any(|c| c.contains(&index)) {
                return Err(EnigmaError::permutation(format!(
                    "index {} already belongs to another cycle",
                    index
                )));
            }
        }

        let len = cycle.len();
        for (pos, &index) in cycle.iter().enumerate() {
            let next = cycle[(pos + 1) % len];
            self.forward[index] = next;
            self.backward[next] = index;
        }
        self.cycles.push(cycle.to_vec());
        Ok(())
    }

    /// Appends a cycle written as a string of alphabet symbols.
    ///
    /// # Errors
    /// See [`from_cycles`](Self::from_cycles).
    pub fn add_cycle_symbols(&mut self, cycle: &str) -> Result<()> {
        let indices = cycle
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| self.alphabet.index_of(c))
            .collect::<Result<Vec<usize>>>()?;
        self.add_cycle(&indices)
    }

    /// Returns `p` modulo `size()`, always non-negative.
    pub fn wrap(&self, p: isize) -> usize {
        self.alphabet.wrap(p)
    }

    /// Size of the permuted alphabet.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Alphabet this permutation acts on.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Cycles in insertion order.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// Applies the permutation to `p` (taken modulo `size()`).
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p % self.size()]
    }

    /// Applies the inverse permutation to `c` (taken modulo `size()`).
    pub fn invert(&self, c: usize) -> usize {
        self.backward[c % self.size()]
    }

    /// Applies the permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `p` is not in the alphabet.
    pub fn permute_symbol(&self, p: char) -> Result<char> {
        let index = self.alphabet.index_of(p)?;
        self.alphabet.symbol_at(self.permute(index))
    }

    /// Applies the inverse permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `c` is not in the alphabet.
    pub fn invert_symbol(&self, c: char) -> Result<char> {
        let index = self.alphabet.index_of(c)?;
        self.alphabet.symbol_at(self.invert(index))
    }

    /// Returns true iff no cycle is a 1-cycle.
    ///
    /// Fixed points left implicit (in no cycle) are not counted, matching
    /// how reflectors are written with one 2-cycle per symbol pair.
    pub fn derangement(&self) -> bool {
        self.cycles.iter().all(|c| c.len() >= 2)
    }
}
