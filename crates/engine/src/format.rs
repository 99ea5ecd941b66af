//! Number rendering for chip labels, actions and trace reasons.

/// Shortest round-trip rendering: `450`, `2.5`, `0.72`.
pub fn number(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.0 as well.
        return "0".into();
    }
    format!("{n}")
}

/// Enough fractional digits to print any `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Exactly `digits` decimal places.
///
/// A value lying exactly halfway between two candidates rounds away from
/// zero (`2.25` → `2.3`), matching JavaScript's `toFixed`. Everything else
/// rounds to the nearest candidate.
pub fn fixed(n: f64, digits: usize) -> String {
    if !n.is_finite() {
        return format!("{n:.digits$}");
    }
    let exact = format!("{:.*}", EXACT_DIGITS, n.abs());
    let Some((int, frac)) = exact.split_once('.') else {
        return format!("{n:.digits$}");
    };
    let (kept, rest) = frac.split_at(digits.min(frac.len()));
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{n:.digits$}");
    }

    let mut out = increment_digits(&format!("{int}{kept}"));
    if digits > 0 {
        out.insert(out.len() - digits, '.');
    }
    if n.is_sign_negative() {
        out.insert(0, '-');
    }
    out
}

/// Add one to a string of ASCII decimal digits.
fn increment_digits(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    bytes.insert(0, b'1');
    String::from_utf8_lossy(&bytes).into_owned()
}

/// `$450` for whole amounts, `$449.50` otherwise.
pub fn price(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("${}", number(n))
    } else {
        format!("${}", fixed(n, 2))
    }
}

/// A ratio in `[0, 1]` as a whole-number percentage: `0.72` → `72`.
pub fn percent(ratio: f64) -> String {
    fixed(ratio * 100.0, 0)
}
