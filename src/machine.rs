//! Machine: the rotor stack, plugboard and per-keypress stepping.
//!
//! Each keypress first decides which rotors step using the notch state seen
//! *before* anything moves, advances them, and only then sends the signal
//! through the stack:
//!
//! ```text
//! key → plugboard → slot N-1 … slot 1 → reflector (slot 0)
//!                                          ↓
//! lamp ← plugboard ← slot N-1 … slot 1 ←───┘
//! ```
//!
//! A moving rotor steps when its right neighbour sits at a notch, and that
//! neighbour steps with it. The middle rotor of a three-rotor stack can
//! therefore move on two consecutive keypresses (double stepping).

use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::pool::RotorPool;
use crate::rotor::Rotor;

/// One character of a message, classified before any rotor moves.
enum Key {
    Symbol(usize),
    Space(char),
}

/// A complete rotor machine.
///
/// Rotors are selected by name from a shared [`RotorPool`] with
/// [`insert_rotors`](Self::insert_rotors). The machine owns the inserted
/// copies, so several machines built from one pool never share settings.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Alphabet,
    num_rotors: usize,
    num_pawls: usize,
    pool: Arc<RotorPool>,
    rotors: Vec<Rotor>,
    plugboard: Option<Permutation>,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots and `num_pawls` pawls.
    ///
    /// The machine has no rotors until [`insert_rotors`](Self::insert_rotors)
    /// is called.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadMachineShape`] unless `1 < num_rotors` and
    /// `num_pawls < num_rotors`.
    pub fn new(
        alphabet: Alphabet,
        num_rotors: usize,
        num_pawls: usize,
        pool: Arc<RotorPool>,
    ) -> Result<Self> {
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(EnigmaError::BadMachineShape {
                rotors: num_rotors,
                pawls: num_pawls,
            });
        }
        debug!(
            num_rotors,
            num_pawls,
            pool_size = pool.len(),
            "Machine created"
        );
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            pool,
            rotors: Vec::with_capacity(num_rotors),
            plugboard: None,
        })
    }

    /// Alphabet of the machine.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of rotor slots, reflector included.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Maximum number of moving rotors.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Pool the rotors are drawn from.
    pub fn pool(&self) -> &Arc<RotorPool> {
        &self.pool
    }

    /// Inserted rotors, slot 0 (the reflector) first. Empty before
    /// [`insert_rotors`](Self::insert_rotors).
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// True iff a plugboard is set.
    pub fn has_plugboard(&self) -> bool {
        self.plugboard.is_some()
    }

    /// Plugboard permutation, if any.
    pub fn plugboard(&self) -> Option<&Permutation> {
        self.plugboard.as_ref()
    }

    /// Current window letters, leftmost non-reflector rotor first.
    pub fn settings(&self) -> String {
        self.rotors
            .iter()
            .skip(1)
            .map(Rotor::setting_symbol)
            .collect()
    }

    /// Fills the slots with the pool rotors named `names`; `names[0]` must be
    /// a reflector. Inserted rotors start at setting 0.
    ///
    /// The current stack is kept if the assignment is rejected.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadRotorAssignment`] if the number of names is
    /// not `num_rotors()`, a name is unknown or repeated, slot 0 is not a
    /// reflector, a reflector appears in another slot, a rotor uses another
    /// alphabet, or more moving rotors are named than there are pawls.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::assignment(format!(
                "expected {} rotors, got {}",
                self.num_rotors,
                names.len()
            )));
        }

        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        let mut stack: Vec<Rotor> = Vec::with_capacity(self.num_rotors);
        for (slot, &name) in names.iter().enumerate() {
            let rotor = self
                .pool
                .get(name)
                .ok_or_else(|| EnigmaError::assignment(format!("unknown rotor {}", name)))?;
            if stack.iter().any(|r| r.name() == name) {
                return Err(EnigmaError::assignment(format!(
                    "rotor {} used twice",
                    name
                )));
            }
            if slot == 0 && !rotor.reflecting() {
                return Err(EnigmaError::assignment(format!(
                    "slot 0 needs a reflector, {} is not one",
                    name
                )));
            }
            if slot > 0 && rotor.reflecting() {
                return Err(EnigmaError::assignment(format!(
                    "reflector {} placed in slot {}",
                    name, slot
                )));
            }
            if *rotor.alphabet() != self.alphabet {
                return Err(EnigmaError::assignment(format!(
                    "rotor {} uses a different alphabet",
                    name
                )));
            }
            let mut rotor = rotor.clone();
            rotor.set(0)?;
            stack.push(rotor);
        }

        let moving = stack.iter().filter(|r| r.rotates()).count();
        if moving > self.num_pawls {
            return Err(EnigmaError::assignment(format!(
                "{} moving rotors but only {} pawls",
                moving, self.num_pawls
            )));
        }

        debug!(rotors = ?names, "Rotors inserted");
        self.rotors = stack;
        Ok(())
    }

    /// Sets the non-reflector rotors from `setting`, one symbol per slot,
    /// leftmost first.
    ///
    /// # Errors
    /// - [`EnigmaError::NotConfigured`] if no rotors are inserted.
    /// - [`EnigmaError::BadSetting`] if `setting` does not hold exactly
    ///   `num_rotors() - 1` alphabet symbols. No rotor is changed then.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        if self.rotors.is_empty() {
            return Err(EnigmaError::NotConfigured);
        }
        let expected = self.num_rotors - 1;
        let count = setting.chars().count();
        if count != expected {
            return Err(EnigmaError::setting(
                setting,
                format!("expected {} symbols, got {}", expected, count),
            ));
        }
        let positions = setting
            .chars()
            .map(|c| {
                self.alphabet.index_of(c).map_err(|_| {
                    EnigmaError::setting(setting, format!("{:?} is not in the alphabet", c))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        for (rotor, posn) in self.rotors.iter_mut().skip(1).zip(positions) {
            rotor.set(posn)?;
        }
        debug!(setting, "Rotor settings applied");
        Ok(())
    }

    /// Installs `plugboard`, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadPermutationSpec`] if the plugboard permutes
    /// a different alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if *plugboard.alphabet() != self.alphabet {
            return Err(EnigmaError::permutation(
                "plugboard alphabet differs from the machine alphabet",
            ));
        }
        debug!(pairs = plugboard.cycles().len(), "Plugboard set");
        self.plugboard = Some(plugboard);
        Ok(())
    }

    /// Removes the plugboard.
    pub fn clear_plugboard(&mut self) {
        if self.plugboard.take().is_some() {
            debug!("Plugboard cleared");
        }
    }

    /// Steps the machine, then converts index `c`.
    ///
    /// # Errors
    /// - [`EnigmaError::NotConfigured`] if no rotors are inserted.
    /// - [`EnigmaError::IndexOutOfRange`] if `c >= alphabet().size()`.
    ///
    /// The machine is not stepped when an error is returned.
    pub fn convert(&mut self, c: usize) -> Result<usize> {
        if self.rotors.is_empty() {
            return Err(EnigmaError::NotConfigured);
        }
        let size = self.alphabet.size();
        if c >= size {
            return Err(EnigmaError::IndexOutOfRange { index: c, size });
        }
        Ok(self.keypress(c))
    }

    /// Converts `msg`, stepping once per non-whitespace symbol.
    ///
    /// Input is upper-cased first. Whitespace is copied to the output at its
    /// position and does not step the rotors.
    ///
    /// # Errors
    /// - [`EnigmaError::NotConfigured`] if no rotors are inserted.
    /// - [`EnigmaError::InvalidSymbol`] for the first character that is
    ///   neither whitespace nor in the alphabet. The whole message is checked
    ///   before any rotor moves.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorsim::MachineConfig;
    ///
    /// let mut machine = MachineConfig::enigma_m3().build().unwrap();
    /// machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    /// machine.set_rotors("AAA").unwrap();
    /// assert_eq!(machine.convert_message("aaaaa").unwrap(), "BDZGO");
    /// ```
    pub fn convert_message(&mut self, msg: &str) -> Result<String> {
        if self.rotors.is_empty() {
            return Err(EnigmaError::NotConfigured);
        }
        let keys = msg
            .chars()
            .flat_map(char::to_uppercase)
            .map(|c| {
                if c.is_whitespace() {
                    Ok(Key::Space(c))
                } else {
                    self.alphabet.index_of(c).map(Key::Symbol)
                }
            })
            .collect::<Result<Vec<Key>>>()?;

        let mut output = String::with_capacity(msg.len());
        for key in keys {
            match key {
                Key::Symbol(index) => {
                    let converted = self.keypress(index);
                    output.push(self.alphabet.symbol_at(converted)?);
                }
                Key::Space(space) => output.push(space),
            }
        }
        Ok(output)
    }

    /// Advances the rotors for one keypress and runs the signal path.
    /// Requires a full stack and `c < size`.
    fn keypress(&mut self, c: usize) -> usize {
        self.step();

        let mut curr = c;
        if let Some(plugboard) = &self.plugboard {
            curr = plugboard.permute(curr);
        }
        for rotor in self.rotors.iter().rev() {
            curr = rotor.convert_forward(curr);
        }
        for rotor in self.rotors.iter().skip(1) {
            curr = rotor.convert_backward(curr);
        }
        if let Some(plugboard) = &self.plugboard {
            curr = plugboard.invert(curr);
        }
        curr
    }

    /// Decides which rotors move from the current notch state, then moves
    /// each of them exactly once.
    fn step(&mut self) {
        let fast = self.rotors.len() - 1;
        let mut advance = vec![false; self.rotors.len()];
        advance[fast] = true;
        for i in (1..fast).rev() {
            if self.rotors[i].rotates() && self.rotors[i + 1].at_notch() {
                advance[i] = true;
                advance[i + 1] = true;
            }
        }
        for (rotor, &adv) in self.rotors.iter_mut().zip(&advance) {
            if adv {
                rotor.advance();
            }
        }
        trace!(stepped = ?advance, settings = %self.settings(), "Keypress");
    }
}
