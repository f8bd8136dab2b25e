use crate::Money;

/// Blind structure of a session.
///
/// Missing or unreadable blinds deserialize to zero so that malformed records
/// still load; anything normalized by the big blind then degrades to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakes {
    #[serde(default, deserialize_with = "super::lenient::blind")]
    small_blind: Money,
    #[serde(default, deserialize_with = "super::lenient::blind")]
    big_blind: Money,
    #[serde(
        default,
        deserialize_with = "super::lenient::money",
        skip_serializing_if = "Option::is_none"
    )]
    ante: Option<Money>,
}

impl Stakes {
    pub fn new(small_blind: Money, big_blind: Money, ante: Option<Money>) -> Self {
        Self {
            small_blind,
            big_blind,
            ante,
        }
    }
    pub fn small_blind(&self) -> Money {
        self.small_blind
    }
    pub fn big_blind(&self) -> Money {
        self.big_blind
    }
    pub fn ante(&self) -> Option<Money> {
        self.ante
    }
    /// Express an amount in big blinds. `None` when the big blind
    /// cannot be divided by.
    pub fn in_big_blinds(&self, amount: Money) -> Option<f64> {
        match self.big_blind.is_finite() && self.big_blind != 0.0 {
            true => Some(amount / self.big_blind),
            false => None,
        }
    }
}

/// `1/2` or `1/2 (0.5)` when an ante is posted.
impl std::fmt::Display for Stakes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.small_blind, self.big_blind)?;
        match self.ante {
            Some(ante) if ante != 0.0 => write!(f, " ({})", ante),
            _ => Ok(()),
        }
    }
}
