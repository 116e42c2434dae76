#![no_main]
use libfuzzer_sys::fuzz_target;

// Arbitrary TOML must either fail to parse, fail validation, or map onto a
// calibrator. None of these steps may panic.
fuzz_target!(|data: &str| {
    let Ok(cfg) = toml::from_str::<dialin_config::Config>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    let scale = match cfg.grinder.as_ref().map(dialin_core::GrindScale::try_from).transpose() {
        Ok(s) => s,
        Err(_) => return,
    };
    let _ = dialin_core::Calibrator::builder()
        .with_policy((&cfg.policy).into())
        .with_optional_grind_scale(scale)
        .try_build();
});
