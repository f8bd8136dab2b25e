//! Presentation-time formatting. Nothing here feeds back into computation.
use crate::CURRENCY;
use crate::Millis;
use crate::Money;

/// Round to cents and drop trailing zeros: `200`, `120.5`, `0.33`.
pub fn format_money(amount: Money) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// `₪200`
pub fn money(amount: Money) -> String {
    format!("{}{}", CURRENCY, format_money(amount))
}

/// `+₪50`, `-₪20`, `₪0`
pub fn signed_money(amount: Money) -> String {
    match amount {
        x if x > 0.0 => format!("+{}", money(x)),
        x if x < 0.0 => format!("-{}", money(x.abs())),
        _ => money(0.0),
    }
}

/// Big-blind result to one decimal: `+25.0`, `-3.5`.
pub fn signed_bb(bb: f64) -> String {
    match bb > 0.0 {
        true => format!("+{:.1}", bb),
        false => format!("{:.1}", bb),
    }
}

/// `~120`, or `-` when no estimate exists.
pub fn format_hands(hands: Option<u32>) -> String {
    hands.map_or_else(|| "-".to_string(), |n| format!("~{}", n))
}

/// `dd/mm/yyyy` in UTC.
pub fn format_date(time: Millis) -> String {
    chrono::DateTime::from_timestamp_millis(time)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_drops_needless_decimals() {
        assert_eq!(format_money(200.0), "200");
        assert_eq!(format_money(120.5), "120.5");
        assert_eq!(format_money(1.0 / 3.0), "0.33");
        assert_eq!(format_money(-0.001), "0");
        assert_eq!(money(180.0), "₪180");
    }

    #[test]
    fn signs() {
        assert_eq!(signed_money(50.0), "+₪50");
        assert_eq!(signed_money(-20.0), "-₪20");
        assert_eq!(signed_money(0.0), "₪0");
        assert_eq!(signed_bb(25.0), "+25.0");
        assert_eq!(signed_bb(-3.54), "-3.5");
    }

    #[test]
    fn hands_and_dates() {
        assert_eq!(format_hands(None), "-");
        assert_eq!(format_hands(Some(42)), "~42");
        assert_eq!(format_date(1_709_251_200_000), "01/03/2024");
    }
}
