//! Packing many tag lines into fewer comma-separated lines.

use crate::marker::MarkerLine;

/// Separator between entries of a packed line.
pub const SEPARATOR: &str = ", ";

/// Group `lines` into chunks of `per_line` and join each chunk into one line.
///
/// The last chunk may be smaller. A `per_line` of zero is treated as one.
pub fn partition(lines: &[MarkerLine], per_line: usize) -> Vec<MarkerLine> {
    lines
        .chunks(per_line.max(1))
        .map(|chunk| MarkerLine::join(chunk, SEPARATOR))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<MarkerLine> {
        (1..=n).map(|i| MarkerLine::colored("§7", &format!("T{i}"))).collect()
    }

    #[test]
    fn seven_lines_three_per_line() {
        let packed = partition(&lines(7), 3);
        assert_eq!(packed.len(), 3);
        assert_eq!(packed[0].as_str(), "§w§7T1, §w§7T2, §w§7T3");
        assert_eq!(packed[1].as_str(), "§w§7T4, §w§7T5, §w§7T6");
        assert_eq!(packed[2].as_str(), "§w§7T7");
        assert!(packed.iter().all(|l| !l.as_str().ends_with(SEPARATOR)));
    }

    #[test]
    fn exact_multiple() {
        let packed = partition(&lines(4), 2);
        assert_eq!(packed.len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(partition(&[], 3).is_empty());
    }

    #[test]
    fn zero_per_line_is_identity() {
        let input = lines(3);
        assert_eq!(partition(&input, 0), input);
    }
}
