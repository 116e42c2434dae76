#![no_main]
use dialin_core::{BrewParameters, GrindScale, RoastLevel, SteppedRange, compute_calibration};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Debug, arbitrary::Arbitrary)]
struct Shot {
    roast: u8,
    grind: f64,
    dose: f64,
    time: f64,
    yield_g: f64,
    taste: f64,
    scale: u8,
    step: f64,
    lo: f64,
    hi: f64,
}

fuzz_target!(|shot: Shot| {
    let params = BrewParameters {
        roast: RoastLevel::from_percent(f64::from(shot.roast % 101)),
        grind_size: shot.grind,
        dose_g: shot.dose,
        brew_time_s: shot.time,
        yield_g: shot.yield_g,
        taste_balance: shot.taste,
    };
    let scale = match shot.scale % 4 {
        0 => None,
        1 => Some(GrindScale::Continuous { step_size: shot.step }),
        2 => Some(GrindScale::Stepped(SteppedRange::Numeric {
            min: shot.lo,
            max: shot.hi,
        })),
        _ => Some(GrindScale::ClickBased),
    };
    if let Ok(result) = compute_calibration(&params, scale.as_ref()) {
        assert!(!result.grind_adjustment.is_empty());
        if let Some(d) = result.grind_decision {
            assert!(d.steps >= 1);
        }
    }
});
