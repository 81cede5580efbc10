//! Configuration loading and re-keying error paths through the public API.

use std::sync::Arc;
use std::thread;

use rotorsim::{EnigmaError, Machine, MachineConfig, RotorKindConfig};

const SMALL_MACHINE: &str = r#"{
    "alphabet": { "first": "A", "last": "H" },
    "num_rotors": 4,
    "num_pawls": 2,
    "rotors": [
        { "name": "R", "kind": "reflector", "cycles": ["AE", "BF", "CG", "DH"] },
        { "name": "F", "kind": "fixed", "cycles": ["ABC", "DEFGH"] },
        { "name": "M1", "kind": "moving", "notches": "C", "cycles": ["AHGFEDCB"] },
        { "name": "M2", "kind": "moving", "notches": "AE", "cycles": ["ACE", "BDF", "G", "H"] }
    ]
}"#;

fn small_machine() -> Machine {
    let config: MachineConfig = serde_json::from_str(SMALL_MACHINE).unwrap();
    config.build().unwrap()
}

#[test]
fn json_config_builds_machine() {
    let config: MachineConfig = serde_json::from_str(SMALL_MACHINE).unwrap();
    assert_eq!(config.rotors.len(), 4);
    assert_eq!(config.rotors[3].kind, RotorKindConfig::Moving);

    let machine = config.build().unwrap();
    assert_eq!(machine.alphabet().size(), 8);
    assert_eq!(machine.num_rotors(), 4);
    assert_eq!(machine.num_pawls(), 2);
    assert_eq!(
        machine.pool().names().collect::<Vec<_>>(),
        vec!["R", "F", "M1", "M2"]
    );
    assert!(machine.rotors().is_empty());
}

#[test]
fn json_config_round_trips_messages() {
    let mut machine = small_machine();
    machine.insert_rotors(&["R", "F", "M1", "M2"]).unwrap();
    machine.set_rotors("ABC").unwrap();
    let cipher = machine.convert_message("HEAD BADGE").unwrap();
    assert_eq!(cipher.chars().nth(4), Some(' '));

    machine.set_rotors("ABC").unwrap();
    assert_eq!(machine.convert_message(&cipher).unwrap(), "HEAD BADGE");
}

#[test]
fn stepping_on_small_alphabet() {
    let mut machine = small_machine();
    machine.insert_rotors(&["R", "F", "M1", "M2"]).unwrap();
    machine.set_rotors("AAD").unwrap();

    // M2 at D steps to its notch E; next key carries M1 along with it.
    machine.convert(0).unwrap();
    assert_eq!(machine.settings(), "AAE");
    machine.convert(0).unwrap();
    assert_eq!(machine.settings(), "ABF");
    // Fixed rotor F never moves even when M1 reaches its notch C.
    machine.set_rotors("ACF").unwrap();
    machine.convert(0).unwrap();
    assert_eq!(machine.settings(), "ACG");
}

#[test]
fn alphabet_defaults_to_upper_case_letters() {
    let json = r#"{
        "num_rotors": 2,
        "num_pawls": 1,
        "rotors": [
            { "name": "R", "kind": "reflector", "cycles": ["AB", "CD", "EF", "GH", "IJ", "KL", "MN", "OP", "QR", "ST", "UV", "WX", "YZ"] },
            { "name": "M", "kind": "moving", "notches": "Z" }
        ]
    }"#;
    let config: MachineConfig = serde_json::from_str(json).unwrap();
    let mut machine = config.build().unwrap();
    assert_eq!(machine.alphabet().size(), 26);

    // Identity rotor after the reflector: setting shifts the pairs.
    machine.insert_rotors(&["R", "M"]).unwrap();
    machine.set_rotors("Z").unwrap();
    assert_eq!(machine.convert_message("A").unwrap(), "B");
    assert_eq!(machine.settings(), "A");
}

#[test]
fn unknown_fields_rejected() {
    let json = r#"{ "num_rotors": 2, "num_pawls": 1, "rotors": [], "rings": "AA" }"#;
    assert!(serde_json::from_str::<MachineConfig>(json).is_err());
}

#[test]
fn unknown_rotor_kind_rejected() {
    let json = r#"{ "num_rotors": 2, "num_pawls": 1, "rotors": [ { "name": "X", "kind": "spinning" } ] }"#;
    assert!(serde_json::from_str::<MachineConfig>(json).is_err());
}

#[test]
fn overlapping_cycles_rejected() {
    let json = r#"{
        "num_rotors": 2,
        "num_pawls": 1,
        "rotors": [ { "name": "M", "kind": "moving", "cycles": ["ABC", "CDE"] } ]
    }"#;
    let config: MachineConfig = serde_json::from_str(json).unwrap();
    assert!(matches!(
        config.build(),
        Err(EnigmaError::BadPermutationSpec { .. })
    ));
}

#[test]
fn notch_outside_alphabet_rejected() {
    let json = r#"{
        "alphabet": { "first": "A", "last": "D" },
        "num_rotors": 2,
        "num_pawls": 1,
        "rotors": [ { "name": "M", "kind": "moving", "notches": "Z", "cycles": ["AB"] } ]
    }"#;
    let config: MachineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.build().err(),
        Some(EnigmaError::InvalidSymbol { symbol: 'Z' })
    );
}

#[test]
fn errors_describe_the_problem() {
    let mut machine = MachineConfig::enigma_m3().build().unwrap();
    let err = machine.insert_rotors(&["B", "I", "II", "IX"]).unwrap_err();
    assert_eq!(err.to_string(), "Bad rotor assignment: unknown rotor IX");

    machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    let err = machine.set_rotors("AB").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Bad rotor setting \"AB\": expected 3 symbols, got 2"
    );
}

#[test]
fn machines_share_one_pool_across_threads() {
    let config = MachineConfig::enigma_m3();
    let (alphabet, pool) = config.build_pool().unwrap();

    let handles: Vec<_> = ["AAA", "QEV", "ZZZ", "MCK"]
        .into_iter()
        .map(|setting| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let mut machine = Machine::new(alphabet, 4, 3, pool).unwrap();
                machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
                machine.set_rotors(setting).unwrap();
                let cipher = machine.convert_message("ATTACK AT DAWN").unwrap();
                machine.set_rotors(setting).unwrap();
                machine.convert_message(&cipher).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "ATTACK AT DAWN");
    }
    // Pool rotors were cloned into each machine and never moved.
    assert!(pool.names().all(|n| pool.get(n).map(|r| r.setting()) == Some(0)));
}
