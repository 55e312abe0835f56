//! Boilerplate removal and blank-line normalization for workout bodies.

/// Booking boilerplate the source page appends under every day's schedule.
/// Matched case-insensitively against each line.
const NOISE_PHRASES: [&str; 2] = [
    // no-show / cancellation notice
    "cancel your booking",
    // late-arrival notice
    "late arrivals",
];

/// Strip known boilerplate lines and normalize blank runs.
///
/// Any line containing one of the fixed phrases is dropped. A run of three or
/// more consecutive blank lines collapses to exactly one blank line; shorter
/// runs are kept as-is. The result carries no leading or trailing whitespace.
/// Pure function, deterministic.
pub fn clean(text: &str) -> String {
    let kept = text.lines().filter(|line| {
        let lowered = line.to_lowercase();
        !NOISE_PHRASES.iter().any(|p| lowered.contains(p))
    });

    let mut out: Vec<&str> = Vec::new();
    let mut blanks = 0usize;
    for line in kept {
        if line.trim().is_empty() {
            blanks += 1;
            continue;
        }
        if blanks > 0 {
            let emit = if blanks >= 3 { 1 } else { blanks };
            out.extend(std::iter::repeat_n("", emit));
            blanks = 0;
        }
        out.push(line);
    }
    // a trailing blank run falls off with the final trim
    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_boilerplate_lines_case_insensitively() {
        let body = "Warm up\nPlease CANCEL YOUR BOOKING if you cannot attend.\n5 rounds\nLate arrivals will not be admitted.\n";
        assert_eq!(clean(body), "Warm up\n5 rounds");
    }

    #[test]
    fn collapses_long_blank_runs_to_one() {
        let body = "Part A\n\n\n\n\nPart B";
        assert_eq!(clean(body), "Part A\n\nPart B");
    }

    #[test]
    fn keeps_short_blank_runs() {
        let body = "Part A\n\nPart B\n\n\nPart C";
        assert_eq!(clean(body), "Part A\n\nPart B\n\nPart C");
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        let body = "\n\n\nWarm up\n5 rounds\n\n\n\n";
        assert_eq!(clean(body), "Warm up\n5 rounds");
    }

    #[test]
    fn boilerplate_removal_can_merge_blank_runs() {
        // dropping the notice joins two blank runs into one long run
        let body = "Warm up\n\n\nlate arrivals lose their slot\n\n5 rounds";
        assert_eq!(clean(body), "Warm up\n\n5 rounds");
    }

    #[test]
    fn empty_and_noise_only_input_cleans_to_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("Cancel your booking early!\n\n\n"), "");
    }
}
