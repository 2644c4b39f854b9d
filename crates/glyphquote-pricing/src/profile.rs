// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pricing payload parsing.

use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::{PricingProfile, ProfileKind};
use serde_json::{Map, Value};

use crate::surcharge::SurchargeRule;

const WIDTH_KEY: &str = "width_of_letter";
const COLORS_KEY: &str = "colors";
const DEFAULT_LETTER_WIDTH_CM: i64 = 6;

/// Parse a profile name and its JSON parameters.
///
/// `null` parameters are treated as an empty object, so every field takes
/// its default.
pub fn parse_profile(name: &str, params: &Value) -> Result<PricingProfile> {
    let kind = ProfileKind::from_name(name)?;
    let empty = Map::new();
    let fields = match params {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(QuoteError::InvalidPricingParameters(format!(
                "parameters must be a JSON object, got {other}"
            )));
        }
    };

    let size = match SurchargeRule::for_kind(kind) {
        SurchargeRule::BySize {
            field,
            default_size,
            ..
        } => integer_field(fields, field.key(), default_size)?,
        SurchargeRule::None => 0,
    };
    let letter_width_cm = integer_field(fields, WIDTH_KEY, DEFAULT_LETTER_WIDTH_CM)?;

    let color_count = match fields.get(COLORS_KEY) {
        None | Some(Value::Null) => 0,
        Some(Value::Array(colors)) => colors.len(),
        Some(other) => {
            return Err(QuoteError::InvalidPricingParameters(format!(
                "`{COLORS_KEY}` must be a list, got {other}"
            )));
        }
    };

    Ok(PricingProfile {
        kind,
        size,
        letter_width_cm,
        color_count,
    })
}

/// Read an integer leniently: JSON integers, floats (truncated) and strings
/// holding an integer are accepted. Floats outside the `i64` range are not.
fn integer_field(fields: &Map<String, Value>, key: &str, default: i64) -> Result<i64> {
    let invalid = |value: &Value| {
        QuoteError::InvalidPricingParameters(format!("`{key}` is not an integer: {value}"))
    };

    match fields.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate_to_i64))
            .ok_or_else(|| invalid(value)),
        Some(value @ Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(value)),
        Some(other) => Err(invalid(other)),
    }
}

fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MIN is exactly representable; i64::MAX rounds up to 2^63.
    (truncated >= i64::MIN as f64 && truncated < i64::MAX as f64).then_some(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_per_profile() {
        let a = parse_profile("Aluminium Doosletter", &json!({})).unwrap();
        assert_eq!((a.size, a.letter_width_cm, a.color_count), (3, 6, 0));

        let c = parse_profile("Profiel 3 LUX", &Value::Null).unwrap();
        assert_eq!(c.size, 10);

        let d = parse_profile("profiel 4", &json!({})).unwrap();
        assert_eq!(d.size, 3);
    }

    #[test]
    fn reads_the_profile_specific_field() {
        let params = json!({ "thickness_pricing": 8, "plexi_size": 20 });
        assert_eq!(parse_profile("a", &params).unwrap().size, 8);
        assert_eq!(parse_profile("c", &params).unwrap().size, 20);
        assert_eq!(parse_profile("b", &params).unwrap().size, 0);
    }

    #[test]
    fn numbers_are_lenient() {
        let params = json!({ "thickness_pricing": "5", "width_of_letter": 7.9 });
        let profile = parse_profile("a", &params).unwrap();
        assert_eq!((profile.size, profile.letter_width_cm), (5, 7));
    }

    #[test]
    fn unparseable_fields_are_rejected() {
        for params in [
            json!({ "thickness_pricing": "thick" }),
            json!({ "width_of_letter": [6] }),
            json!({ "width_of_letter": true }),
            json!({ "colors": "red" }),
            json!({ "width_of_letter": -1e300 }),
            json!({ "thickness_pricing": 1e19 }),
            json!([1, 2]),
        ] {
            assert!(
                matches!(
                    parse_profile("a", &params),
                    Err(QuoteError::InvalidPricingParameters(_))
                ),
                "{params} should be rejected"
            );
        }
    }

    #[test]
    fn counts_colors() {
        let params = json!({ "colors": ["red", "white", "blue"] });
        assert_eq!(parse_profile("b", &params).unwrap().color_count, 3);
    }

    #[test]
    fn unknown_profile_name() {
        assert!(matches!(
            parse_profile("Neon Deluxe", &json!({})),
            Err(QuoteError::UnknownProfile(_))
        ));
    }
}
