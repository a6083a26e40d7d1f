#![no_main]

use libfuzzer_sys::{arbitrary, fuzz_target};
use quantor_unit::Scale;

#[derive(Debug, arbitrary::Arbitrary)]
enum FuzzData {
    Linear { factor: f64, value: f64 },
    OffsetLinear { ratio: f64, offset: f64, value: f64 },
    Composed { own: f64, reference: f64, offset: f64, value: f64 },
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * f64::max(1.0, f64::max(a.abs(), b.abs()))
}

fn in_range(value: f64) -> bool {
    value.is_finite() && (1e-6..1e6).contains(&value.abs())
}

fuzz_target!(|data: FuzzData| {
    match data {
        FuzzData::Linear { factor, value } => {
            let Ok(scale) = Scale::linear(factor) else {
                assert!(!factor.is_finite() || factor == 0.0);
                return;
            };
            if in_range(factor) && value.is_finite() && value.abs() < 1e6 {
                assert!(close(scale.from_standard(scale.to_standard(value)), value));
            }
        }
        FuzzData::OffsetLinear {
            ratio,
            offset,
            value,
        } => {
            let Ok(scale) = Scale::offset_linear(ratio, offset) else {
                return;
            };
            if in_range(ratio) && offset.abs() < 1e6 && value.is_finite() && value.abs() < 1e6 {
                assert!(close(scale.from_standard(scale.to_standard(value)), value));
            }
        }
        FuzzData::Composed {
            own,
            reference,
            offset,
            value,
        } => {
            if !(in_range(own) && in_range(reference) && offset.abs() < 1e6) {
                return;
            }
            if !(value.is_finite() && value.abs() < 1e6) {
                return;
            }
            let (Ok(own), Ok(reference)) = (
                Scale::linear(own),
                Scale::offset_linear(reference, offset),
            ) else {
                return;
            };
            let composed = own
                .relative_to(&reference)
                .expect("linear on top of offset linear should compose");
            let chained = reference.to_standard(own.to_standard(value));
            assert!(close(composed.to_standard(value), chained));
        }
    }
});
