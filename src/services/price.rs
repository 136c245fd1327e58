//! Price notation conversion (억/천만/만 shorthand)
//!
//! Pure bidirectional conversion between raw won amounts and the compact
//! Korean notation used in price inputs. Parsing distinguishes "no value"
//! (`None`) from zero — an unspecified bound is not a zero bound.

const EOK: i64 = 100_000_000;
const CHEONMAN: i64 = 10_000_000;
const MAN: i64 = 10_000;

/// Parse a price input into a raw amount.
///
/// Recognized patterns, tried in order: plain digits, `{n}억`, `{n}천만`,
/// `{n}만` (each with an optional fractional prefix), and comma-separated
/// digits. Anything else — including mixed-unit strings like "3억5천만" —
/// yields `None`.
pub fn parse(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        return input.parse().ok();
    }

    if let Some(prefix) = input.strip_suffix('억') {
        return scaled(prefix, EOK);
    }
    if let Some(prefix) = input.strip_suffix("천만") {
        return scaled(prefix, CHEONMAN);
    }
    if let Some(prefix) = input.strip_suffix('만') {
        return scaled(prefix, MAN);
    }

    if input.contains(',') && input.chars().all(|c| c.is_ascii_digit() || c == ',') {
        let stripped: String = input.chars().filter(char::is_ascii_digit).collect();
        return stripped.parse().ok();
    }

    None
}

/// Multiply a numeric prefix by a unit, flooring fractional inputs
/// ("3.5억" → 350,000,000).
fn scaled(prefix: &str, unit: i64) -> Option<i64> {
    let value: f64 = prefix.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * unit as f64).floor() as i64)
}

/// Unit-compressed rendering for live input assistance. Zero renders empty.
pub fn format_display(amount: i64) -> String {
    if amount <= 0 {
        return String::new();
    }

    if amount >= EOK {
        let eok = amount / EOK;
        let rem = amount % EOK;
        if rem == 0 {
            format!("{}억", eok)
        } else if rem % CHEONMAN == 0 {
            format!("{}억{}천만", eok, rem / CHEONMAN)
        } else {
            format!("{}억{}", eok, format_thousands(rem))
        }
    } else if amount >= CHEONMAN {
        let cheon = amount / CHEONMAN;
        let rem = amount % CHEONMAN;
        if rem == 0 {
            format!("{}천만", cheon)
        } else {
            format!("{}천만{}", cheon, format_thousands(rem))
        }
    } else if amount >= MAN {
        let man = amount / MAN;
        let rem = amount % MAN;
        if rem == 0 {
            format!("{}만", man)
        } else {
            format!("{}만{}", man, format_thousands(rem))
        }
    } else {
        format_thousands(amount)
    }
}

/// Plain thousands-separated rendering for applied (confirmed) filter values.
/// No unit compression — this is deliberately distinct from `format_display`.
pub fn format_applied(amount: i64) -> String {
    if amount < 0 {
        return String::new();
    }
    format_thousands(amount)
}

fn format_thousands(amount: i64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
