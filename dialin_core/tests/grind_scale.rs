use dialin_core::grind::format;
use dialin_core::{AdjustmentRange, Direction, GrindScale, SteppedRange, range_for};
use rstest::rstest;

fn numeric(min: f64, max: f64) -> GrindScale {
    GrindScale::Stepped(SteppedRange::Numeric { min, max })
}

fn lettered(min: char, max: char) -> GrindScale {
    GrindScale::Stepped(SteppedRange::Lettered { min, max })
}

#[rstest]
#[case(GrindScale::Continuous { step_size: 0.5 }, 0.5, 1.5, 0.5)]
#[case(GrindScale::Continuous { step_size: 2.0 }, 2.0, 6.0, 2.0)]
#[case(numeric(1.0, 40.0), 1.0, 7.0, 1.0)]
#[case(numeric(0.0, 100.0), 1.0, 20.0, 1.0)]
#[case(numeric(1.0, 5.0), 1.0, 1.0, 1.0)]
#[case(lettered('A', 'Z'), 1.0, 1.0, 1.0)]
#[case(GrindScale::ClickBased, 1.0, 4.0, 1.0)]
fn range_per_grinder(
    #[case] scale: GrindScale,
    #[case] min: f64,
    #[case] max: f64,
    #[case] default: f64,
) {
    assert_eq!(
        range_for(&scale),
        AdjustmentRange {
            min_steps: min,
            max_steps: max,
            default_step: default,
        }
    );
}

#[rstest]
#[case(Direction::Finer, 1, GrindScale::ClickBased, "Turn right 1 click")]
#[case(Direction::Coarser, 2, GrindScale::ClickBased, "Turn left 2 clicks")]
#[case(Direction::Finer, 3, numeric(1.0, 40.0), "Move down 3 numbers")]
#[case(Direction::Coarser, 1, numeric(1.0, 40.0), "Move up 1 number")]
#[case(Direction::Coarser, 1, lettered('A', 'Z'), "Move up 1 letter")]
#[case(Direction::Finer, 2, lettered('A', 'Z'), "Move down 2 letters")]
#[case(Direction::Finer, 1, GrindScale::Continuous { step_size: 1.0 }, "Adjust grinder finer by 1 step")]
#[case(Direction::Coarser, 3, GrindScale::Continuous { step_size: 0.5 }, "Adjust grinder coarser by 1.5 steps")]
#[case(Direction::Finer, 2, GrindScale::Continuous { step_size: 0.5 }, "Adjust grinder finer by 1 steps")]
#[case(Direction::Finer, 1, GrindScale::Continuous { step_size: 0.1 }, "Adjust grinder finer by 0.1 step")]
#[case(Direction::Coarser, 1, GrindScale::Continuous { step_size: 2.5 }, "Adjust grinder coarser by 2.5 step")]
fn phrasing_per_grinder(
    #[case] direction: Direction,
    #[case] steps: u32,
    #[case] scale: GrindScale,
    #[case] expected: &str,
) {
    assert_eq!(format(direction, steps, &scale), expected);
}

#[rstest]
#[case(GrindScale::Continuous { step_size: 0.5 }, "Continuous with 0.5 step size")]
#[case(numeric(1.0, 40.0), "Stepped (numbers) from 1 to 40")]
#[case(lettered('A', 'K'), "Stepped (letters) from A to K")]
#[case(GrindScale::ClickBased, "Click-based adjustments")]
fn grinder_descriptions(#[case] scale: GrindScale, #[case] expected: &str) {
    assert_eq!(scale.describe(), expected);
}

#[rstest]
#[case(GrindScale::Continuous { step_size: 0.0 }, "step_size")]
#[case(GrindScale::Continuous { step_size: 10.5 }, "step_size")]
#[case(numeric(10.0, 10.0), "max_value")]
#[case(numeric(-1.0, 10.0), "min_value")]
#[case(numeric(1.0, 70_000.0), "max_value")]
#[case(lettered('K', 'C'), "max_value")]
#[case(lettered('a', 'Z'), "min_value")]
fn invalid_scales_name_the_field(#[case] scale: GrindScale, #[case] field: &str) {
    let errs = scale.validate().expect_err("should be rejected");
    assert!(errs.contains(field), "expected {field} in {errs}");
}

#[test]
fn valid_scales_pass() {
    for scale in [
        GrindScale::Continuous { step_size: 10.0 },
        numeric(0.0, 65_535.0),
        lettered('A', 'B'),
        GrindScale::ClickBased,
    ] {
        scale.validate().unwrap();
    }
}
