use dialin_core::{
    BuildError, CalibrationPolicy, Calibrator, GrindScale, SteppedRange,
};
use rstest::rstest;

#[rstest]
fn invalid_policy_yields_typed_build_error() {
    let err = Calibrator::builder()
        .with_policy(CalibrationPolicy {
            dead_zone: 60.0,
            ..CalibrationPolicy::default()
        })
        .try_build()
        .expect_err("should fail with InvalidPolicy");

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::InvalidPolicy(fields)) => assert!(fields.contains("dead_zone")),
        other => panic!("expected InvalidPolicy, got: {other:?}"),
    }
}

#[rstest]
#[case(CalibrationPolicy { target_ratio: 0.0, ..CalibrationPolicy::default() }, "target_ratio")]
#[case(CalibrationPolicy { brew_time_pivot_s: 40.0, ..CalibrationPolicy::default() }, "brew_time_pivot_s")]
#[case(CalibrationPolicy { yield_weight: -1.0, ..CalibrationPolicy::default() }, "yield_weight")]
#[case(CalibrationPolicy { fine_grind_below: 40.0, ..CalibrationPolicy::default() }, "fine_grind_below")]
fn policy_fields_are_named(#[case] policy: CalibrationPolicy, #[case] field: &str) {
    let errs = policy.validate().expect_err("invalid policy");
    assert!(errs.contains(field), "expected {field} in {errs}");
}

#[rstest]
fn invalid_scale_yields_typed_build_error() {
    let err = Calibrator::builder()
        .with_grind_scale(GrindScale::Stepped(SteppedRange::Lettered {
            min: 'Z',
            max: 'A',
        }))
        .try_build()
        .expect_err("should fail with InvalidGrindScale");

    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidGrindScale(_))
    ));
}

#[rstest]
fn defaults_build_a_generic_calibrator() {
    let c = Calibrator::builder().try_build().unwrap();
    assert_eq!(c.policy(), &CalibrationPolicy::default());
    assert!(c.grind_scale().is_none());

    let c = Calibrator::builder()
        .with_grind_scale(GrindScale::ClickBased)
        .with_optional_grind_scale(None)
        .try_build()
        .unwrap();
    assert!(c.grind_scale().is_none());
}

fn build_from_toml(toml: &str) -> eyre::Result<Calibrator> {
    let cfg = dialin_config::load_toml(toml).expect("parse TOML");
    let scale = cfg
        .grinder
        .as_ref()
        .map(GrindScale::try_from)
        .transpose()
        .map_err(eyre::Report::new)?;
    Calibrator::builder()
        .with_policy((&cfg.policy).into())
        .with_optional_grind_scale(scale)
        .try_build()
}

#[rstest]
#[case("[grinder]\ntype = \"continuous\"\nstep_size = 0.0\n", "scale", "step_size must be a positive number")]
#[case("[grinder]\ntype = \"continuous\"\nstep_size = 12.0\n", "scale", "step_size cannot be larger than 10")]
#[case("[grinder]\ntype = \"stepped\"\nmin = 1\nmax = 10\n", "config", "grinder.unit is required")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"numbers\"\nmin = 1\n", "config", "required for stepped")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"numbers\"\nmin = 10\nmax = 10\n", "scale", "max_value must be greater")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"numbers\"\nmin = \"A\"\nmax = 10\n", "config", "both be numbers")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"numbers\"\nmin = 1\nmax = 70000\n", "scale", "max_value must be between 0 and 65535")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"letters\"\nmin = \"a\"\nmax = \"Z\"\n", "config", "uppercase")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"letters\"\nmin = \"K\"\nmax = \"C\"\n", "scale", "max_value must be greater")]
#[case("[policy]\ndead_zone = 50.0\n", "policy", "dead_zone")]
#[case("[policy]\ntarget_ratio = 0.0\n", "policy", "target_ratio")]
#[case("[policy]\nbrew_time_pivot_s = 40.0\n", "policy", "brew_time_pivot_s")]
fn config_sections_are_checked_at_build(
    #[case] toml: &str,
    #[case] kind: &str,
    #[case] needle: &str,
) {
    let err = build_from_toml(toml).expect_err("should be rejected");
    let be = err
        .downcast_ref::<BuildError>()
        .unwrap_or_else(|| panic!("expected BuildError, got {err:?}"));
    let actual = match be {
        BuildError::InvalidGrindScale(_) => "scale",
        BuildError::InvalidConfig(_) => "config",
        BuildError::InvalidPolicy(_) => "policy",
    };
    assert_eq!(actual, kind, "{be}");
    assert!(be.to_string().contains(needle), "{be} should mention {needle:?}");
}

#[rstest]
#[case("[grinder]\ntype = \"clicked\"\n")]
#[case("[grinder]\ntype = \"absolute\"\nstep_size = 0.5\n")]
#[case("[grinder]\ntype = \"stepped\"\nunit = \"letters\"\nmin = \"A\"\nmax = \"Z\"\n")]
#[case("[policy]\ndead_zone = 8.0\n")]
fn valid_sections_build(#[case] toml: &str) {
    build_from_toml(toml).expect("valid config builds");
}
