//! printf-style positional substitution.

/// Substitute `%s` (sequential) and `%N$s` (explicit, 1-based) placeholders.
///
/// `%%` yields a literal percent sign. Missing arguments render as empty
/// strings; unknown conversions are copied through unchanged.
pub fn sprintf(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0usize;
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().map(|(_, c)| *c) {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                out.push_str(args.get(next).copied().unwrap_or_default());
                next += 1;
            }
            Some(d) if d.is_ascii_digit() => {
                // Look ahead for `N$s` without consuming on mismatch.
                let rest: String = chars.clone().map(|(_, c)| c).take_while(|c| c.is_ascii_digit()).collect();
                let mut lookahead = chars.clone();
                for _ in 0..rest.len() {
                    lookahead.next();
                }
                let is_positional = matches!(lookahead.next(), Some((_, '$')))
                    && matches!(lookahead.next(), Some((_, 's')));

                if is_positional {
                    let position: usize = rest.parse().unwrap_or(0);
                    if let Some(arg) = position.checked_sub(1).and_then(|i| args.get(i)) {
                        out.push_str(arg);
                    }
                    chars = lookahead;
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_placeholders() {
        assert_eq!(sprintf("Welcome to %s!", &["Hello"]), "Welcome to Hello!");
        assert_eq!(sprintf("%s and %s", &["a", "b"]), "a and b");
    }

    #[test]
    fn positional_placeholders() {
        assert_eq!(sprintf("%2$s before %1$s", &["one", "two"]), "two before one");
    }

    #[test]
    fn missing_arguments_are_empty() {
        assert_eq!(sprintf("%s Here's your special greeting: ", &[]), " Here's your special greeting: ");
    }

    #[test]
    fn percent_escapes_and_unknown_conversions() {
        assert_eq!(sprintf("100%% sure", &[]), "100% sure");
        assert_eq!(sprintf("%d items", &["3"]), "%d items");
        assert_eq!(sprintf("trailing %", &[]), "trailing %");
        assert_eq!(sprintf("%5 apples", &[]), "%5 apples");
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(sprintf("こんにちは %s", &["世界"]), "こんにちは 世界");
    }
}
