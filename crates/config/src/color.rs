//! Alternate colour-code translation.
//!
//! Language files write colours as `&c`, `&l` and so on; the host renders
//! `§c`. Only recognised codes are translated, everything else is kept.

/// The host's colour-code introducer.
pub const SECTION: char = '§';

const CODES: &str = "0123456789abcdefklmnorx";

/// Replace `alt` followed by a valid code with `§` and the lowercased code.
pub fn translate_color_codes(alt: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == alt {
            if let Some(&next) = chars.peek() {
                let lower = next.to_ascii_lowercase();
                if CODES.contains(lower) {
                    out.push(SECTION);
                    out.push(lower);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
