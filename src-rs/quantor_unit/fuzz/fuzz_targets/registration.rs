#![no_main]

use libfuzzer_sys::{arbitrary, fuzz_target};
use quantor_unit::{Scale, SiPrefixes, UnitBase, UnitBuilder, UnitSystem};

const IDS: [&str; 6] = ["m", "km", "mm", "ft", "yd", "in"];

#[derive(Debug, arbitrary::Arbitrary)]
enum Operation {
    Register {
        id: u8,
        abbreviation: u8,
        factor: u8,
        system: UnitSystem,
        prefixes: SiPrefixes,
    },
    Unregister {
        id: u8,
    },
}

fn pick(index: u8) -> &'static str {
    IDS[usize::from(index) % IDS.len()]
}

fuzz_target!(|operations: Vec<Operation>| {
    let base = UnitBase::new("Length", "m").expect("valid signature");

    for operation in operations {
        match operation {
            Operation::Register {
                id,
                abbreviation,
                factor,
                system,
                prefixes,
            } => {
                let Ok(scale) = Scale::linear(f64::from(factor) + 1.0) else {
                    continue;
                };
                let _ = UnitBuilder::new(pick(id), pick(id))
                    .abbreviation(pick(abbreviation))
                    .unit_system(system)
                    .scale(scale)
                    .si_prefixes(prefixes)
                    .base(&base)
                    .register();
            }
            Operation::Unregister { id } => {
                base.unregister(pick(id));
            }
        }

        for unit in base.units() {
            let found = base
                .lookup_by_id(unit.id())
                .expect("listed units are registered");
            assert_eq!(found, unit);
        }
        for id in IDS {
            if let Some(unit) = base.lookup_by_abbreviation(id) {
                assert!(unit.abbreviations().iter().any(|abbreviation| abbreviation == id));
                assert!(base.lookup_by_id(unit.id()).is_some());
            }
        }
    }
});
