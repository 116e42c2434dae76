//! Small numeric and text helpers shared by the engine and the grind adapter.

/// Render a quantity rounded to two decimals without trailing zeros
/// (`2.0` → `"2"`, `1.50` → `"1.5"`).
pub fn fmt_amount(x: f64) -> String {
    let r = (x * 100.0).round() / 100.0;
    // avoid "-0"
    if r == 0.0 {
        return "0".to_string();
    }
    format!("{r}")
}

/// `singular` for exactly one step, else `plural`.
#[inline]
pub fn plural<'a>(steps: u32, singular: &'a str, plural: &'a str) -> &'a str {
    if steps == 1 { singular } else { plural }
}

/// Slider bounds for the yield input, derived from the dose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// `min = dose`, `default = 2 × dose`, `max = 1.5 × default`.
pub fn yield_range_for(dose_g: f64) -> YieldRange {
    let default = dose_g * 2.0;
    YieldRange {
        min: dose_g,
        max: default * 1.5,
        default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_drop_trailing_zeros() {
        assert_eq!(fmt_amount(2.0), "2");
        assert_eq!(fmt_amount(1.5), "1.5");
        assert_eq!(fmt_amount(0.1 * 3.0), "0.3");
        assert_eq!(fmt_amount(-0.001), "0");
    }

    #[test]
    fn plural_follows_step_count() {
        assert_eq!(plural(1, "step", "steps"), "step");
        assert_eq!(plural(0, "step", "steps"), "steps");
        assert_eq!(plural(2, "step", "steps"), "steps");
    }

    #[test]
    fn yield_range_for_standard_dose() {
        let r = yield_range_for(18.0);
        assert_eq!(r.min, 18.0);
        assert_eq!(r.default, 36.0);
        assert_eq!(r.max, 54.0);
    }
}
