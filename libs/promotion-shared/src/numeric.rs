use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Integer field value as typed into the console.
///
/// Coercion never fails: input that does not start with a number becomes
/// `NotANumber`, which travels to the service as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    Int(i64),
    NotANumber,
}

impl Numeric {
    /// Text written back into a form field. The sentinel has no textual form.
    pub fn to_field_value(self) -> String {
        match self {
            Numeric::Int(v) => v.to_string(),
            Numeric::NotANumber => String::new(),
        }
    }
}

// Used when the value is spliced into a URL path, e.g. `/promotions/NaN`.
impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{}", v),
            Numeric::NotANumber => f.write_str("NaN"),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Int(v) => serializer.serialize_i64(*v),
            Numeric::NotANumber => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let numeric = match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Numeric::Int(v),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| Numeric::Int(f as i64))
                    .unwrap_or(Numeric::NotANumber),
            },
            _ => Numeric::NotANumber,
        };
        Ok(numeric)
    }
}

/// Permissive integer coercion.
///
/// Leading whitespace and an optional sign are accepted, `0x`/`0X` switches to
/// hexadecimal, and parsing stops at the first character that is not a digit,
/// so `"12abc"` yields 12. Blank input, input without leading digits and values
/// outside the `i64` range yield [`Numeric::NotANumber`].
pub fn parse_int(input: &str) -> Numeric {
    let rest = input.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Numeric::NotANumber;
    }

    let parsed = if negative {
        i64::from_str_radix(&format!("-{}", digits), radix)
    } else {
        i64::from_str_radix(digits, radix)
    };
    parsed.map(Numeric::Int).unwrap_or(Numeric::NotANumber)
}
