//! Human-readable error descriptions and structured JSON error formatting.

use dialin_core::ValidationErrors;
use serde_json::{Map, Value, json};

fn field_lines(fields: &ValidationErrors) -> String {
    fields
        .iter()
        .map(|(field, reason)| format!("  - {field}: {reason}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_json(fields: &ValidationErrors) -> Value {
    let mut map = Map::new();
    for (field, reason) in fields.iter() {
        map.insert(field.to_string(), Value::String(reason.to_string()));
    }
    Value::Object(map)
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use dialin_core::error::{BuildError, CalibrationError};

    // Typed matches first
    if let Some(ce) = err.downcast_ref::<CalibrationError>() {
        return match ce {
            CalibrationError::Invalid(fields) => format!(
                "What happened: The shot parameters were rejected.\n{}\nHow to fix: Check the values you entered (dose, yield and brew time must be positive; taste is 0-100).",
                field_lines(fields)
            ),
            CalibrationError::InvalidScale(fields) => format!(
                "What happened: The grinder description is invalid.\n{}\nHow to fix: Edit [grinder] in the config file, then rerun.",
                field_lines(fields)
            ),
        };
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidPolicy(fields) => format!(
                "What happened: The calibration policy is invalid.\n{}\nHow to fix: Edit [policy] in the config file, then rerun.",
                field_lines(fields)
            ),
            BuildError::InvalidGrindScale(fields) => format!(
                "What happened: The grinder description is invalid.\n{}\nHow to fix: Edit [grinder] in the config file, then rerun.",
                field_lines(fields)
            ),
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or mismatched values in the TOML.\nHow to fix: Edit the config file, then rerun. See README for a sample."
            ),
        };
    }

    // String-based heuristics for errors coming from config or CSV loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("shot csv must have headers") {
        return format!(
            "Invalid headers in shot CSV. Expected '{}'.",
            dialin_config::SHOT_HEADERS.join(",")
        );
    }

    if lower.contains("invalid configuration") || lower.contains("read config") {
        let cause = err
            .chain()
            .nth(1)
            .map(|c| format!("\nCause: {c}"))
            .unwrap_or_default();
        return format!(
            "What happened: Configuration is invalid or unreadable.{cause}\nHow to fix: Edit the TOML config and try again."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.chain().nth(1) {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: rejected input 2, invalid grinder or policy 3, anything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use dialin_core::error::{BuildError, CalibrationError};
    if let Some(ce) = err.downcast_ref::<CalibrationError>() {
        return match ce {
            CalibrationError::Invalid(_) => 2,
            CalibrationError::InvalidScale(_) => 3,
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return 3;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use dialin_core::error::{BuildError, CalibrationError};

    let typed = match err.downcast_ref::<CalibrationError>() {
        Some(CalibrationError::Invalid(f)) => Some(("InvalidInput", f)),
        Some(CalibrationError::InvalidScale(f)) => Some(("InvalidGrinder", f)),
        None => match err.downcast_ref::<BuildError>() {
            Some(BuildError::InvalidPolicy(f)) => Some(("InvalidPolicy", f)),
            Some(BuildError::InvalidGrindScale(f)) => Some(("InvalidGrinder", f)),
            _ => None,
        },
    };

    match typed {
        Some((reason, fields)) => json!({
            "reason": reason,
            "fields": field_json(fields),
            "message": humanize(err),
        })
        .to_string(),
        None => json!({ "reason": "Error", "message": humanize(err) }).to_string(),
    }
}
