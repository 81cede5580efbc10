//! Rotor: a permutation mounted at a rotational offset.
//!
//! The permutation describes the wiring at setting 0. At setting `s` a
//! signal entering at contact `p` meets the wiring at `p + s` and leaves
//! shifted back by `s`, which is what turning the physical rotor does.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Stepping and reflecting behaviour of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Never rotates. Occupies slot 0 and sends the signal back.
    Reflector,
    /// Never rotates. Only takes part in the signal path.
    Fixed,
    /// Rotates when stepped, and lets its left neighbour step while its
    /// setting is one of `notches`.
    Moving { notches: Vec<usize> },
}

/// A rotor with its wiring, kind and current setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    setting: usize,
}

impl Rotor {
    fn build(name: impl Into<String>, permutation: Permutation, kind: RotorKind) -> Self {
        Rotor {
            name: name.into(),
            permutation,
            kind,
            setting: 0,
        }
    }

    /// Creates a reflector.
    ///
    /// The wiring should be a derangement; [`MachineConfig`] enforces it,
    /// direct callers are responsible for it.
    ///
    /// [`MachineConfig`]: crate::config::MachineConfig
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::build(name, permutation, RotorKind::Reflector)
    }

    /// Creates a non-moving rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::build(name, permutation, RotorKind::Fixed)
    }

    /// Creates a moving rotor whose notches are the symbols of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if a notch symbol is not in the
    /// permutation's alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorsim::{Alphabet, Permutation, Rotor};
    ///
    /// let wiring = Permutation::from_cycles(Alphabet::upper(), &["ABDHPEJT", "CFLVMZOYQIRWUKXSG", "N"]).unwrap();
    /// let mut rotor = Rotor::moving("III", wiring, "V").unwrap();
    /// rotor.set_symbol('V').unwrap();
    /// assert!(rotor.at_notch());
    /// rotor.advance();
    /// assert_eq!(rotor.setting_symbol(), 'W');
    /// ```
    pub fn moving(name: impl Into<String>, permutation: Permutation, notches: &str) -> Result<Self> {
        let alphabet = *permutation.alphabet();
        let mut indices = notches
            .chars()
            .map(|c| alphabet.index_of(c))
            .collect::<Result<Vec<usize>>>()?;
        indices.sort_unstable();
        indices.dedup();
        Ok(Self::build(
            name,
            permutation,
            RotorKind::Moving { notches: indices },
        ))
    }

    /// Rotor name, as used to select it from a pool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the rotor.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Alphabet of the wiring.
    pub fn alphabet(&self) -> &Alphabet {
        self.permutation.alphabet()
    }

    /// Wiring at setting 0.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Alphabet size.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// True iff the rotor has a ratchet and can move.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// True iff the rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Notch indices; empty unless the rotor moves.
    pub fn notches(&self) -> &[usize] {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            RotorKind::Reflector | RotorKind::Fixed => &[],
        }
    }

    /// Current setting.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Current setting as the symbol shown in the window.
    pub fn setting_symbol(&self) -> char {
        // `setting` is kept in 0..size() by every mutator.
        self.alphabet()
            .symbol_at(self.setting)
            .unwrap_or_else(|_| self.alphabet().first())
    }

    /// Sets the setting to `posn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `posn >= size()`.
    pub fn set(&mut self, posn: usize) -> Result<()> {
        let size = self.size();
        if posn >= size {
            return Err(EnigmaError::IndexOutOfRange { index: posn, size });
        }
        self.setting = posn;
        Ok(())
    }

    /// Sets the setting to the index of symbol `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `cposn` is not in the alphabet.
    pub fn set_symbol(&mut self, cposn: char) -> Result<()> {
        let posn = self.alphabet().index_of(cposn)?;
        self.set(posn)
    }

    /// Converts contact `p` right-to-left through the wiring.
    pub fn convert_forward(&self, p: usize) -> usize {
        let shift = self.setting as isize;
        let entry = self.permutation.wrap(p as isize + shift);
        self.permutation
            .wrap(self.permutation.permute(entry) as isize - shift)
    }

    /// Converts contact `e` left-to-right through the inverse wiring.
    pub fn convert_backward(&self, e: usize) -> usize {
        let shift = self.setting as isize;
        let entry = self.permutation.wrap(e as isize + shift);
        self.permutation
            .wrap(self.permutation.invert(entry) as isize - shift)
    }

    /// True iff the rotor sits at one of its notches.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            RotorKind::Reflector | RotorKind::Fixed => false,
        }
    }

    /// Advances one position if the rotor moves; otherwise does nothing.
    pub fn advance(&mut self) {
        match self.kind {
            RotorKind::Moving { .. } => {
                self.setting = self.permutation.wrap(self.setting as isize + 1);
            }
            RotorKind::Reflector | RotorKind::Fixed => {}
        }
    }
}

impl std::fmt::Display for Rotor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rotor {}", self.name)
    }
}
