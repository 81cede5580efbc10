//! Rotor cipher machine simulator.
//!
//! Models an Enigma-style machine: a reflector, a stack of fixed and moving
//! rotors and an optional plugboard. Every keypress steps the rotors (with
//! the historical double-stepping of the middle rotor) and then sends the
//! symbol through the stack and back, so one configuration both encrypts and
//! decrypts.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol ↔ index bijection over a contiguous range)
//!     ↓
//! Permutation  (disjoint cycles, forward/inverse lookup)
//!     ↓
//! Rotor        (permutation + setting; reflector / fixed / moving)
//!     ↓ drawn by name from a shared RotorPool
//! Machine      (stepping, plugboard → rotors → reflector → rotors → plugboard)
//! ```
//!
//! [`MachineConfig`] is the serde-facing way to describe all of the above.
//!
//! # Examples
//!
//! Encrypt and decrypt with the same settings:
//!
//! ```
//! use rotorsim::MachineConfig;
//!
//! let mut machine = MachineConfig::enigma_m3().build().unwrap();
//! machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
//!
//! machine.set_rotors("AAA").unwrap();
//! let cipher = machine.convert_message("HELLO WORLD").unwrap();
//! assert_eq!(cipher, "ILBDA AMTAZ");
//!
//! machine.set_rotors("AAA").unwrap();
//! assert_eq!(machine.convert_message(&cipher).unwrap(), "HELLO WORLD");
//! ```
//!
//! Build a machine by hand from a rotor pool:
//!
//! ```
//! use std::sync::Arc;
//! use rotorsim::{Alphabet, Machine, Permutation, Rotor, RotorPool};
//!
//! let alpha = Alphabet::new('A', 'D').unwrap();
//! let pool = RotorPool::new(vec![
//!     Rotor::reflector("R", Permutation::from_cycles(alpha, &["AB", "CD"]).unwrap()),
//!     Rotor::moving("M", Permutation::from_cycles(alpha, &["ACBD"]).unwrap(), "D").unwrap(),
//! ])
//! .unwrap();
//!
//! let mut machine = Machine::new(alpha, 2, 1, Arc::new(pool)).unwrap();
//! machine.insert_rotors(&["R", "M"]).unwrap();
//! machine.set_rotors("A").unwrap();
//! let out = machine.convert(0).unwrap();
//! assert_ne!(out, 0);
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod pool;
pub mod rotor;

pub use alphabet::Alphabet;
pub use config::{AlphabetConfig, MachineConfig, RotorConfig, RotorKindConfig};
pub use error::{EnigmaError, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use pool::RotorPool;
pub use rotor::{Rotor, RotorKind};
