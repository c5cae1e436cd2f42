//! Level formatting: roman numerals below a threshold, decimals otherwise.

use enchantlore_core::NumeralPolicy;

/// Largest level with a roman numeral.
pub const MAX_NUMERAL: i32 = 3999;

const NUMERALS: &[(i32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral for `1..=3999`, `None` outside that range.
pub fn to_numeral(level: i32) -> Option<String> {
    if !(1..=MAX_NUMERAL).contains(&level) {
        return None;
    }
    let mut remaining = level;
    let mut out = String::new();
    for &(value, symbol) in NUMERALS {
        while remaining >= value {
            out.push_str(symbol);
            remaining -= value;
        }
    }
    Some(out)
}

/// Format a level for display.
///
/// Numerals are used when enabled and `level < threshold`; levels without a
/// numeral fall back to decimal.
pub fn format_level(level: i32, use_numerals: bool, threshold: i32) -> String {
    if use_numerals && level < threshold {
        if let Some(numeral) = to_numeral(level) {
            return numeral;
        }
    }
    level.to_string()
}

/// [`format_level`] driven by a configured policy.
pub fn format_with(level: i32, policy: &NumeralPolicy) -> String {
    format_level(level, policy.enabled, policy.threshold)
}
