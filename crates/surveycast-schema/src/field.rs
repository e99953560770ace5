//! Field kinds and the per-field value check.

use serde::Serialize;
use serde_json::Value;

/// How a field is constrained and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Two-value enum, "0" or "1". Captions are shown next to the radio buttons.
    Binary { no: &'static str, yes: &'static str },
    /// Closed integer enum `min..=max`; `options[i]` captions value `min + i`.
    Ordinal { min: i64, max: i64, options: &'static [&'static str] },
    /// Inclusive integer range. `max: None` means unbounded above.
    Numeric { min: i64, max: Option<i64> },
}

/// JSON type a field is sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub wire: WireType,
}

const REQUIRED: &str = "This field is required";

/// Optional sign followed by ASCII digits only.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl FieldSpec {
    pub const fn binary(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Binary { no: "No", yes: "Yes" }, wire: WireType::Text }
    }

    pub const fn ordinal(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        wire: WireType,
    ) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Ordinal { min: 1, max: options.len() as i64, options },
            wire,
        }
    }

    pub const fn numeric(key: &'static str, label: &'static str, min: i64, max: Option<i64>) -> Self {
        Self { key, label, kind: FieldKind::Numeric { min, max }, wire: WireType::Number }
    }

    /// Parse and check one raw form value. The error is the inline message
    /// shown under the field.
    pub fn check(&self, raw: Option<&str>) -> Result<i64, String> {
        let raw = match raw.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Err(REQUIRED.to_string()),
        };

        match self.kind {
            FieldKind::Binary { no, yes } => match raw {
                "0" => Ok(0),
                "1" => Ok(1),
                _ => Err(format!("Select {} or {}", yes, no)),
            },
            FieldKind::Ordinal { min, max, .. } => {
                let v: i64 = raw.parse().map_err(|_| "Choose one of the options".to_string())?;
                if v < min || v > max {
                    return Err(format!("Choose a value between {} and {}", min, max));
                }
                Ok(v)
            }
            FieldKind::Numeric { min, max } => {
                let v: i64 = match raw.parse() {
                    Ok(v) => v,
                    Err(_) if is_integer_literal(raw) => {
                        // Beyond i64, so beyond any bound.
                        return Err(match (raw.starts_with('-'), max) {
                            (true, _)        => format!("Must be at least {}", min),
                            (false, Some(m)) => format!("Must be at most {}", m),
                            (false, None)    => "Number is too large".to_string(),
                        });
                    }
                    Err(_) if raw.parse::<f64>().is_ok_and(f64::is_finite) => {
                        return Err("Enter a whole number".to_string())
                    }
                    Err(_) => return Err("Enter a number".to_string()),
                };
                if v < min {
                    return Err(format!("Must be at least {}", min));
                }
                if let Some(max) = max {
                    if v > max {
                        return Err(format!("Must be at most {}", max));
                    }
                }
                Ok(v)
            }
        }
    }

    /// Encode a checked value as its wire JSON type.
    pub fn wire_value(&self, v: i64) -> Value {
        match self.wire {
            WireType::Text   => Value::String(v.to_string()),
            WireType::Number => Value::from(v),
        }
    }

    /// Caption for an ordinal/binary value, if any.
    pub fn caption(&self, v: i64) -> Option<&'static str> {
        match self.kind {
            FieldKind::Binary { no, yes } => match v {
                0 => Some(no),
                1 => Some(yes),
                _ => None,
            },
            FieldKind::Ordinal { min, options, .. } => {
                usize::try_from(v - min).ok().and_then(|i| options.get(i).copied())
            }
            FieldKind::Numeric { .. } => None,
        }
    }
}
