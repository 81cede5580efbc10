//! Error types for the rotor machine library.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors produced while configuring or driving a rotor machine.
///
/// Every variant describes a configuration or input problem. None of them
/// is transient: retrying the same call with the same arguments fails again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// Alphabet bounds do not describe a range of at least 2 symbols.
    #[error("Invalid alphabet range {first:?}-{last:?}")]
    InvalidAlphabet { first: char, last: char },

    /// Symbol is not a member of the alphabet.
    #[error("Symbol {symbol:?} is not in the alphabet")]
    InvalidSymbol { symbol: char },

    /// Index is outside `0..size`.
    #[error("Index {index} is outside the alphabet range 0..{size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Cycle description is malformed or overlaps another cycle.
    #[error("Bad permutation: {reason}")]
    BadPermutationSpec { reason: String },

    /// Slot/pawl counts violate `1 < rotors` and `pawls < rotors`.
    #[error("Bad machine shape: {rotors} rotor slots with {pawls} pawls")]
    BadMachineShape { rotors: usize, pawls: usize },

    /// Rotor names cannot populate the machine's slots.
    #[error("Bad rotor assignment: {reason}")]
    BadRotorAssignment { reason: String },

    /// Initial rotor settings are the wrong length or contain foreign symbols.
    #[error("Bad rotor setting {setting:?}: {reason}")]
    BadSetting { setting: String, reason: String },

    /// Machine has no rotors inserted yet.
    #[error("Machine has no rotors inserted")]
    NotConfigured,
}

impl EnigmaError {
    pub(crate) fn permutation(reason: impl Into<String>) -> Self {
        EnigmaError::BadPermutationSpec {
            reason: reason.into(),
        }
    }

    pub(crate) fn assignment(reason: impl Into<String>) -> Self {
        EnigmaError::BadRotorAssignment {
            reason: reason.into(),
        }
    }

    pub(crate) fn setting(setting: &str, reason: impl Into<String>) -> Self {
        EnigmaError::BadSetting {
            setting: setting.to_string(),
            reason: reason.into(),
        }
    }
}
