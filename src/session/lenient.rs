//! Forgiving readers for stored fields that other clients write loosely.
//!
//! A malformed value degrades to `None` (or zero blinds) for that one
//! record instead of failing the whole document.
use crate::Millis;
use crate::Money;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::IgnoredAny;

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

/// Epoch milliseconds. Integral floats (`1.7e12`) are accepted; strings,
/// fractions, nulls and the like read as `None`.
pub fn millis<'de, D>(deserializer: D) -> Result<Option<Millis>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Number::deserialize(deserializer)? {
        Number::Int(n) => Some(n),
        Number::Float(x) if x.is_finite() && x.fract() == 0.0 => Some(x as Millis),
        Number::Float(_) | Number::Other(_) => None,
    })
}

/// Amount that may be absent, null or garbage.
pub fn money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Number::deserialize(deserializer)? {
        Number::Int(n) => Some(n as Money),
        Number::Float(x) if x.is_finite() => Some(x),
        Number::Float(_) | Number::Other(_) => None,
    })
}

/// Blind amount; anything unreadable counts as no blind.
pub fn blind<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    money(deserializer).map(|m| m.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Stamp {
        #[serde(default, deserialize_with = "millis")]
        time: Option<Millis>,
    }

    fn time(json: &str) -> Option<Millis> {
        serde_json::from_str::<Stamp>(json).unwrap().time
    }

    #[test]
    fn integers_and_integral_floats_are_times() {
        assert_eq!(time(r#"{"time": 1700000000000}"#), Some(1_700_000_000_000));
        assert_eq!(time(r#"{"time": 1.7e12}"#), Some(1_700_000_000_000));
    }

    #[test]
    fn everything_else_is_no_time() {
        assert_eq!(time(r#"{"time": "oops"}"#), None);
        assert_eq!(time(r#"{"time": null}"#), None);
        assert_eq!(time(r#"{"time": 12.5}"#), None);
        assert_eq!(time(r#"{"time": {"seconds": 1}}"#), None);
        assert_eq!(time(r#"{}"#), None);
    }
}
