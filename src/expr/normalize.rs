//! Rewrite the many operator spellings into the canonical keyword form
//!
//! The substitution is purely lexical: each symbol is replaced in place, padded with
//! spaces for binary operators, and the result is lowercased and trimmed.

/// Symbol spellings and their canonical replacement
const SPELLINGS: [(char, &str); 18] = [
    // Not
    ('\'', "!"),
    ('\u{00AF}', "!"),
    ('\u{0305}', "!"),
    ('\u{203E}', "!"),
    // Nor
    ('⊽', " nor "),
    ('↓', " nor "),
    // Nand
    ('⊼', " nand "),
    ('↑', " nand "),
    // Xor
    ('⊕', " xor "),
    ('^', " xor "),
    // Xnor
    ('⊙', " xnor "),
    ('≡', " xnor "),
    // Or
    ('|', " or "),
    ('+', " or "),
    // And
    ('&', " and "),
    ('*', " and "),
    ('·', " and "),
    ('⋅', " and "),
];

fn canonical_spelling(c: char) -> Option<&'static str> {
    SPELLINGS.iter().find(|(s, _)| *s == c).map(|(_, r)| *r)
}

/// Normalize an expression to the canonical lowercase keyword form
///
/// ```
/// # use boolcmos::expr::normalize;
/// assert_eq!(normalize("A*B+C'"), "a and b or c!");
/// ```
pub fn normalize(expr: &str) -> String {
    let mut ret = String::with_capacity(expr.len());
    for c in expr.chars() {
        match canonical_spelling(c) {
            Some(r) => ret.push_str(r),
            None => ret.push(c),
        }
    }
    ret.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A'", "a!"; "prime")]
    #[test_case("A\u{0305}", "a!"; "combining overline")]
    #[test_case("¯A", "!a"; "macron")]
    #[test_case("A|B", "a or b"; "pipe")]
    #[test_case("A+B", "a or b"; "plus")]
    #[test_case("A&B", "a and b"; "ampersand")]
    #[test_case("A*B", "a and b"; "star")]
    #[test_case("A·B", "a and b"; "middle dot")]
    #[test_case("A⊼B", "a nand b"; "nand symbol")]
    #[test_case("A↑B", "a nand b"; "up arrow")]
    #[test_case("A⊽B", "a nor b"; "nor symbol")]
    #[test_case("A↓B", "a nor b"; "down arrow")]
    #[test_case("A⊕B", "a xor b"; "circled plus")]
    #[test_case("A^B", "a xor b"; "caret")]
    #[test_case("A⊙B", "a xnor b"; "circled dot")]
    #[test_case("A≡B", "a xnor b"; "equivalence")]
    #[test_case("  A AND NOT b ", "a and not b"; "keywords")]
    fn test_spellings(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_unknown_symbols_kept() {
        // Rejection is the tokenizer's job
        assert_eq!(normalize("a $ b"), "a $ b");
        assert_eq!(normalize(""), "");
    }
}
