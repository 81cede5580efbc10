//! Machine configuration as plain serde values.
//!
//! A [`MachineConfig`] describes the alphabet, the slot and pawl counts and
//! every available rotor. It can be carried by any serde format and is
//! validated in one step by [`MachineConfig::build`]: nothing reaches the
//! core types unchecked.
//!
//! ```
//! use rotorsim::MachineConfig;
//!
//! let json = r#"{
//!     "num_rotors": 3,
//!     "num_pawls": 1,
//!     "rotors": [
//!         { "name": "R", "kind": "reflector", "cycles": ["AB", "CD", "EF", "GH", "IJ", "KL", "MN", "OP", "QR", "ST", "UV", "WX", "YZ"] },
//!         { "name": "F", "kind": "fixed", "cycles": ["ACEG"] },
//!         { "name": "M", "kind": "moving", "notches": "Z", "cycles": ["BDFH"] }
//!     ]
//! }"#;
//! let config: MachineConfig = serde_json::from_str(json).unwrap();
//! let mut machine = config.build().unwrap();
//! machine.insert_rotors(&["R", "F", "M"]).unwrap();
//! machine.set_rotors("AA").unwrap();
//! assert_eq!(machine.convert_message("HI").unwrap().len(), 2);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::pool::RotorPool;
use crate::rotor::Rotor;

/// Bounds of a contiguous alphabet. Defaults to `A..=Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlphabetConfig {
    pub first: char,
    pub last: char,
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        AlphabetConfig {
            first: 'A',
            last: 'Z',
        }
    }
}

/// Rotor kind as written in a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotorKindConfig {
    Reflector,
    Fixed,
    Moving,
}

/// One rotor definition.
///
/// `cycles` lists the wiring in cycle notation without parentheses, one
/// string per cycle. `notches` lists notch symbols and is only allowed on
/// moving rotors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotorConfig {
    pub name: String,
    pub kind: RotorKindConfig,
    #[serde(default)]
    pub notches: String,
    #[serde(default)]
    pub cycles: Vec<String>,
}

impl RotorConfig {
    fn new(name: &str, kind: RotorKindConfig, notches: &str, cycles: &[&str]) -> Self {
        RotorConfig {
            name: name.to_string(),
            kind,
            notches: notches.to_string(),
            cycles: cycles.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Validates the definition and builds the rotor over `alphabet`.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidSymbol`] for a cycle or notch symbol outside
    ///   the alphabet.
    /// - [`EnigmaError::BadPermutationSpec`] for malformed or overlapping
    ///   cycles, or a reflector that leaves any symbol in place.
    /// - [`EnigmaError::BadRotorAssignment`] for an empty name or notches on
    ///   a rotor that does not move.
    pub fn build(&self, alphabet: Alphabet) -> Result<Rotor> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EnigmaError::assignment("rotor with an empty name"));
        }
        let permutation = Permutation::from_cycles(alphabet, &self.cycles)?;
        if self.kind != RotorKindConfig::Moving && !self.notches.is_empty() {
            return Err(EnigmaError::assignment(format!(
                "rotor {} has notches but does not move",
                name
            )));
        }

        match self.kind {
            RotorKindConfig::Reflector => {
                let covers_all = (0..permutation.size()).all(|i| permutation.permute(i) != i);
                if !permutation.derangement() || !covers_all {
                    return Err(EnigmaError::permutation(format!(
                        "reflector {} must map every symbol elsewhere",
                        name
                    )));
                }
                Ok(Rotor::reflector(name, permutation))
            }
            RotorKindConfig::Fixed => Ok(Rotor::fixed(name, permutation)),
            RotorKindConfig::Moving => Rotor::moving(name, permutation, &self.notches),
        }
    }
}

/// Complete description of a machine and the rotors it may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    #[serde(default)]
    pub alphabet: AlphabetConfig,
    pub num_rotors: usize,
    pub num_pawls: usize,
    pub rotors: Vec<RotorConfig>,
}

impl MachineConfig {
    /// Validates the alphabet and every rotor, and builds the shared pool.
    ///
    /// Use this to build several machines over one pool.
    ///
    /// # Errors
    /// Any error from [`Alphabet::new`], [`RotorConfig::build`] or
    /// [`RotorPool::new`].
    pub fn build_pool(&self) -> Result<(Alphabet, Arc<RotorPool>)> {
        let alphabet = Alphabet::new(self.alphabet.first, self.alphabet.last)?;
        let rotors = self
            .rotors
            .iter()
            .map(|r| r.build(alphabet))
            .collect::<Result<Vec<Rotor>>>()?;
        let pool = RotorPool::new(rotors)?;
        debug!(
            first = %alphabet.first(),
            last = %alphabet.last(),
            rotors = pool.len(),
            "Rotor pool built"
        );
        Ok((alphabet, Arc::new(pool)))
    }

    /// Validates the whole configuration and builds a machine with no
    /// rotors inserted.
    ///
    /// # Errors
    /// Any error from [`build_pool`](Self::build_pool) or [`Machine::new`].
    pub fn build(&self) -> Result<Machine> {
        let (alphabet, pool) = self.build_pool()?;
        Machine::new(alphabet, self.num_rotors, self.num_pawls, pool)
    }

    /// Three-rotor Enigma (4 slots, 3 pawls) with the historical rotor set.
    pub fn enigma_m3() -> Self {
        MachineConfig {
            alphabet: AlphabetConfig::default(),
            num_rotors: 4,
            num_pawls: 3,
            rotors: historical_rotors(),
        }
    }

    /// Naval four-rotor Enigma (5 slots, 3 pawls) with the historical rotor
    /// set. The fourth (leftmost) rotor is Beta or Gamma and never moves; it
    /// is normally paired with reflector `B-Thin` or `C-Thin`.
    pub fn enigma_m4() -> Self {
        MachineConfig {
            num_rotors: 5,
            ..Self::enigma_m3()
        }
    }
}

/// Wirings of rotors I-VIII, Beta, Gamma, the wide reflectors B and C and
/// the thin reflectors used with Beta and Gamma.
fn historical_rotors() -> Vec<RotorConfig> {
    use RotorKindConfig::{Fixed, Moving, Reflector};
    vec![
        RotorConfig::new(
            "I",
            Moving,
            "Q",
            &["AELTPHQXRU", "BKNW", "CMOY", "DFG", "IV", "JZ", "S"],
        ),
        RotorConfig::new(
            "II",
            Moving,
            "E",
            &["FIXVYOMW", "CDKLHUP", "ESZ", "BJ", "GR", "NT", "A", "Q"],
        ),
        RotorConfig::new("III", Moving, "V", &["ABDHPEJT", "CFLVMZOYQIRWUKXSG", "N"]),
        RotorConfig::new("IV", Moving, "J", &["AEPLIYWCOXMRFZBSTGJQNH", "DV", "KU"]),
        RotorConfig::new("V", Moving, "Z", &["AVOLDRWFIUQ", "BZKSMNHYC", "EGTJPX"]),
        RotorConfig::new("VI", Moving, "ZM", &["AJQDVLEOZWIYTS", "CGMNHFUX", "BPRK"]),
        RotorConfig::new("VII", Moving, "ZM", &["ANOUPFRIMBZTLWKSVEGCJYDHXQ"]),
        RotorConfig::new(
            "VIII",
            Moving,
            "ZM",
            &["AFLSETWUNDHOZVICQ", "BKJ", "GXY", "MPR"],
        ),
        RotorConfig::new("Beta", Fixed, "", &["ALBEVFCYODJWUGNMQTZSKPR", "HIX"]),
        RotorConfig::new("Gamma", Fixed, "", &["AFNIRLBSQWVXGUZDKMTPCOYJHE"]),
        RotorConfig::new(
            "B",
            Reflector,
            "",
            &[
                "AY", "BR", "CU", "DH", "EQ", "FS", "GL", "IP", "JX", "KN", "MO", "TZ", "VW",
            ],
        ),
        RotorConfig::new(
            "C",
            Reflector,
            "",
            &[
                "AF", "BV", "CP", "DJ", "EI", "GO", "HY", "KR", "LZ", "MX", "NW", "QT", "SU",
            ],
        ),
        RotorConfig::new(
            "B-Thin",
            Reflector,
            "",
            &[
                "AE", "BN", "CK", "DQ", "FU", "GY", "HW", "IJ", "LO", "MP", "RX", "SZ", "TV",
            ],
        ),
        RotorConfig::new(
            "C-Thin",
            Reflector,
            "",
            &[
                "AR", "BD", "CO", "EJ", "FN", "GT", "HK", "IV", "LM", "PW", "QZ", "SX", "UY",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_build() {
        let m3 = MachineConfig::enigma_m3().build().unwrap();
        assert_eq!(m3.num_rotors(), 4);
        assert_eq!(m3.num_pawls(), 3);
        assert_eq!(m3.pool().len(), 14);

        let m4 = MachineConfig::enigma_m4().build().unwrap();
        assert_eq!(m4.num_rotors(), 5);
    }

    #[test]
    fn test_historical_wirings_are_permutations_of_the_alphabet() {
        let (_, pool) = MachineConfig::enigma_m3().build_pool().unwrap();
        for name in pool.names() {
            let Some(rotor) = pool.get(name) else {
                panic!("missing rotor {}", name);
            };
            let covered: usize = rotor.permutation().cycles().iter().map(Vec::len).sum();
            if !rotor.reflecting() {
                assert_eq!(covered, 26, "rotor {} does not list all 26 symbols", name);
            }
        }
    }

    #[test]
    fn test_rotor_kinds_and_notches() {
        let (_, pool) = MachineConfig::enigma_m3().build_pool().unwrap();
        let vi = pool.get("VI").unwrap();
        assert!(vi.rotates());
        assert_eq!(vi.notches(), &[12, 25]);
        assert!(!pool.get("Beta").unwrap().rotates());
        assert!(pool.get("C").unwrap().reflecting());
    }

    #[test]
    fn test_reflector_must_move_every_symbol() {
        let alpha = Alphabet::upper();
        let partial = RotorConfig::new("R", RotorKindConfig::Reflector, "", &["AE"]);
        assert!(matches!(
            partial.build(alpha),
            Err(EnigmaError::BadPermutationSpec { .. })
        ));

        let fixed_point = RotorConfig::new("R", RotorKindConfig::Reflector, "", &["A", "BC"]);
        assert!(matches!(
            fixed_point.build(alpha),
            Err(EnigmaError::BadPermutationSpec { .. })
        ));
    }

    #[test]
    fn test_notches_on_fixed_rotor_rejected() {
        let rotor = RotorConfig::new("F", RotorKindConfig::Fixed, "A", &[]);
        assert!(matches!(
            rotor.build(Alphabet::upper()),
            Err(EnigmaError::BadRotorAssignment { .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let rotor = RotorConfig::new("  ", RotorKindConfig::Fixed, "", &[]);
        assert!(matches!(
            rotor.build(Alphabet::upper()),
            Err(EnigmaError::BadRotorAssignment { .. })
        ));
    }

    #[test]
    fn test_bad_cycle_symbol() {
        let rotor = RotorConfig::new("M", RotorKindConfig::Moving, "A", &["AB3"]);
        assert_eq!(
            rotor.build(Alphabet::upper()),
            Err(EnigmaError::InvalidSymbol { symbol: '3' })
        );
    }

    #[test]
    fn test_duplicate_rotor_names() {
        let mut config = MachineConfig::enigma_m3();
        config.rotors.push(config.rotors[0].clone());
        assert!(matches!(
            config.build(),
            Err(EnigmaError::BadRotorAssignment { .. })
        ));
    }

    #[test]
    fn test_bad_shape() {
        let mut config = MachineConfig::enigma_m3();
        config.num_pawls = 4;
        assert_eq!(
            config.build().err(),
            Some(EnigmaError::BadMachineShape {
                rotors: 4,
                pawls: 4
            })
        );
    }

    #[test]
    fn test_bad_alphabet() {
        let mut config = MachineConfig::enigma_m3();
        config.alphabet = AlphabetConfig {
            first: 'Z',
            last: 'A',
        };
        assert_eq!(
            config.build().err(),
            Some(EnigmaError::InvalidAlphabet {
                first: 'Z',
                last: 'A'
            })
        );
    }
}
