//! Term matching shared by the classifier, registries, and scoring tables.

/// Lowercase and collapse whitespace so phrase lookups see a single spacing.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `term` occurs in the already-normalized `haystack` as a whole term.
///
/// An alphanumeric edge of `term` must meet a non-alphanumeric neighbour, so `board`
/// does not fire inside `dashboard`. A trailing plural `s` is tolerated (`boards`).
/// Edges that are punctuation (`$`, `/month`) match as plain substrings.
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    let check_left = term.chars().next().is_some_and(char::is_alphanumeric);
    let check_right = term.chars().last().is_some_and(char::is_alphanumeric);

    haystack.match_indices(term).any(|(start, _)| {
        let left_ok = !check_left
            || haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());

        let rest = &haystack[start + term.len()..];
        let right_ok = !check_right || {
            let mut tail = rest.chars();
            match tail.next() {
                None => true,
                Some('s') => tail.next().map_or(true, |c| !c.is_alphanumeric()),
                Some(c) => !c.is_alphanumeric(),
            }
        };

        left_ok && right_ok
    })
}

pub(crate) fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_term(haystack, term))
}

/// First dollar amount in the text (`$29`, `$1,200.50`), if any.
pub(crate) fn extract_price(haystack: &str) -> Option<f64> {
    haystack.match_indices('$').find_map(|(index, _)| {
        let digits: String = haystack[index + 1..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .filter(|c| *c != ',')
            .collect();
        let digits = digits.trim_end_matches('.');
        digits.parse::<f64>().ok().filter(|price| price.is_finite())
    })
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_respect_word_boundaries() {
        let text = normalize("Shared KANBAN boards with a Dashboard");
        assert!(contains_term(&text, "kanban"));
        assert!(contains_term(&text, "board"));
        assert!(contains_term(&text, "dashboard"));
        assert!(!contains_term(&normalize("an onboarding dashboard"), "board"));
        assert!(!contains_term(&normalize("crmx"), "crm"));
    }

    #[test]
    fn punctuation_terms_match_as_substrings() {
        let text = normalize("Only $29/month");
        assert!(contains_term(&text, "/month"));
        assert!(contains_term(&text, "$"));
    }

    #[test]
    fn extracts_first_dollar_amount() {
        assert_eq!(extract_price("plans from $29/month"), Some(29.0));
        assert_eq!(extract_price("a $1,200. setup fee"), Some(1200.0));
        assert_eq!(extract_price("free forever"), None);
        assert_eq!(extract_price("costs $ nothing"), None);
    }
}
