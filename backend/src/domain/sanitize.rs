//! Input sanitisation applied to every inbound text field.
//!
//! Values are trimmed and HTML-significant characters are escaped before
//! they are persisted or echoed back into a form. The escape is
//! idempotent: entity sequences this module emits are recognised on a
//! later pass and left intact, so re-sanitising a stored value never
//! double-escapes it.

/// Entity sequences produced by [`sanitize`], checked to keep the escape
/// idempotent.
const ESCAPED_SEQUENCES: [&str; 8] = [
    "&amp;", "&lt;", "&gt;", "&quot;", "&#x27;", "&#x2F;", "&#x5C;", "&#96;",
];

/// Trim surrounding whitespace and escape HTML-significant characters.
///
/// # Examples
/// ```
/// use grocer_backend::domain::sanitize::sanitize;
///
/// assert_eq!(sanitize("  Produce  "), "Produce");
/// assert_eq!(sanitize("<b>Deli</b>"), "&lt;b&gt;Deli&lt;&#x2F;b&gt;");
/// ```
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut escaped = String::with_capacity(trimmed.len());
    let mut rest = trimmed;
    while let Some(ch) = rest.chars().next() {
        let advance = ch.len_utf8();
        match ch {
            '&' if starts_with_escaped_sequence(rest) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
        rest = rest.get(advance..).unwrap_or_default();
    }
    escaped
}

fn starts_with_escaped_sequence(value: &str) -> bool {
    ESCAPED_SEQUENCES
        .iter()
        .any(|sequence| value.starts_with(sequence))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::sanitize;

    #[rstest]
    #[case("  Produce  ", "Produce")]
    #[case("\tBakery\n", "Bakery")]
    #[case("Dairy", "Dairy")]
    fn trims_surrounding_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[rstest]
    #[case("<script>", "&lt;script&gt;")]
    #[case("Fruit & Veg", "Fruit &amp; Veg")]
    #[case("say \"cheese\"", "say &quot;cheese&quot;")]
    #[case("O'Brien", "O&#x27;Brien")]
    #[case("a/b\\c", "a&#x2F;b&#x5C;c")]
    #[case("`tick`", "&#96;tick&#96;")]
    fn escapes_markup_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[rstest]
    #[case("Fruit & Veg")]
    #[case("<b>Deli</b>")]
    #[case("plain text")]
    #[case("O'Brien & Sons / \"Fine\" Foods")]
    fn escaping_is_idempotent(#[case] input: &str) {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }

    #[rstest]
    fn already_escaped_sequences_are_preserved() {
        assert_eq!(sanitize("Fruit &amp; Veg"), "Fruit &amp; Veg");
        assert_eq!(sanitize("&lt;b&gt;"), "&lt;b&gt;");
    }

    #[rstest]
    #[case("", "")]
    #[case("   ", "")]
    fn blank_input_sanitises_to_empty(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }
}
