//! Text shaping for event cards and list summaries.

use super::theme::symbols;

/// Collapse line breaks and whitespace runs into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap to `width` columns. A word longer than `width` gets a
/// line of its own rather than being split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `s` to at most `max` characters, ending in an ellipsis when cut.
pub fn truncate(s: &str, max: usize, unicode: bool) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let ellipsis = symbols::ELLIPSIS.get(unicode);
    let keep = max.saturating_sub(ellipsis.chars().count());
    let head: String = s.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), ellipsis)
}

/// "1 event" / "3 events".
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_collapses_whitespace() {
        assert_eq!(single_line("Apollo 11\nlands  on\tthe Moon"), "Apollo 11 lands on the Moon");
    }

    #[test]
    fn test_wrap_card_text() {
        let lines = wrap("The Battle of Stamford Bridge marks the end", 16);
        assert_eq!(lines, vec!["The Battle of", "Stamford Bridge", "marks the end"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let lines = wrap("see Vasco_Núñez_de_Balboa now", 10);
        assert_eq!(lines, vec!["see", "Vasco_Núñez_de_Balboa", "now"]);
    }

    #[test]
    fn test_truncate_leaves_short_titles() {
        assert_eq!(truncate("Viking era", 40, true), "Viking era");
    }

    #[test]
    fn test_truncate_counts_chars_and_picks_ellipsis() {
        assert_eq!(truncate("Vasco Núñez de Balboa", 11, true), "Vasco Núñe\u{2026}");
        assert_eq!(truncate("Vasco Núñez de Balboa", 11, false), "Vasco Nú...");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "event"), "1 event");
        assert_eq!(plural(0, "event"), "0 events");
        assert_eq!(plural(3, "event"), "3 events");
    }
}
