//! Alias matching
//!
//! A user-typed token resolves to at most one alias, tried in this order:
//!
//! 1. **Exact** - the token is an alias name.
//! 2. **Index** - the token is an integer `n` with `1 <= n <= count`; it picks
//!    the `n`th alias in list order. A numeric token outside that range fails
//!    outright and is never retried as a prefix.
//! 3. **Prefix** - exactly one alias starts with the token (case-sensitive).
//!
//! Because exact matching runs first, an alias literally named `"2"` shadows
//! index 2.

/// Outcome of resolving a token against an ordered list of aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Position of the alias equal to the token
    Exact(usize),
    /// Position selected by a 1-based numeric token
    Index(usize),
    /// Position of the only alias starting with the token
    Prefix(usize),
    None(NoMatch),
}

/// Why a token did not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatch {
    /// No alias starts with the token
    Unknown,
    /// Several aliases start with the token
    Ambiguous(usize),
    /// The token is numeric but not a valid 1-based index
    OutOfRange,
}

impl Match {
    /// Position of the resolved alias, if any
    pub fn position(&self) -> Option<usize> {
        match *self {
            Match::Exact(pos) | Match::Index(pos) | Match::Prefix(pos) => Some(pos),
            Match::None(_) => None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.position().is_some()
    }

    /// Short label for diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Match::Exact(_) => "exact match",
            Match::Index(_) => "index match",
            Match::Prefix(_) => "prefix match",
            Match::None(NoMatch::Unknown) => "no alias matches",
            Match::None(NoMatch::Ambiguous(_)) => "ambiguous prefix",
            Match::None(NoMatch::OutOfRange) => "index out of range",
        }
    }
}

/// A token that looks like an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numeral {
    Value(usize),
    /// Negative, or too large to be any position
    Unrepresentable,
}

/// Recognizes `[+-]digits`, ignoring surrounding whitespace
fn parse_numeral(token: &str) -> Option<Numeral> {
    let trimmed = token.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(Numeral::Unrepresentable);
    }

    Some(
        digits
            .parse::<usize>()
            .map(Numeral::Value)
            .unwrap_or(Numeral::Unrepresentable),
    )
}

/// Resolves `token` against `aliases`, which must be in list order
pub fn match_alias<T: AsRef<str>>(aliases: &[T], token: &str) -> Match {
    if let Some(pos) = aliases.iter().position(|a| a.as_ref() == token) {
        return Match::Exact(pos);
    }

    if let Some(numeral) = parse_numeral(token) {
        return match numeral {
            Numeral::Value(n) if (1..=aliases.len()).contains(&n) => Match::Index(n - 1),
            _ => Match::None(NoMatch::OutOfRange),
        };
    }

    let mut candidates = aliases
        .iter()
        .enumerate()
        .filter(|(_, a)| a.as_ref().starts_with(token))
        .map(|(pos, _)| pos);

    match (candidates.next(), candidates.count()) {
        (Some(pos), 0) => Match::Prefix(pos),
        (Some(_), rest) => Match::None(NoMatch::Ambiguous(rest + 1)),
        (None, _) => Match::None(NoMatch::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALIASES: [&str; 4] = ["work", "home", "foo", "foobar"];

    #[test]
    fn exact_match_wins() {
        assert_eq!(match_alias(&ALIASES, "foo"), Match::Exact(2));
    }

    #[test]
    fn ambiguous_prefix_fails() {
        assert_eq!(match_alias(&ALIASES, "fo"), Match::None(NoMatch::Ambiguous(2)));
    }

    #[test]
    fn unique_prefix_resolves() {
        assert_eq!(match_alias(&ALIASES, "w"), Match::Prefix(0));
        assert_eq!(match_alias(&ALIASES, "foob"), Match::Prefix(3));
    }

    #[test]
    fn unknown_prefix_fails() {
        assert_eq!(match_alias(&ALIASES, "x"), Match::None(NoMatch::Unknown));
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(match_alias(&ALIASES, "W"), Match::None(NoMatch::Unknown));
    }

    #[test]
    fn one_based_index() {
        assert_eq!(match_alias(&ALIASES, "1"), Match::Index(0));
        assert_eq!(match_alias(&ALIASES, "4"), Match::Index(3));
        assert_eq!(match_alias(&ALIASES, " 2 "), Match::Index(1));
        assert_eq!(match_alias(&ALIASES, "+3"), Match::Index(2));
    }

    #[test]
    fn out_of_range_index_does_not_fall_back_to_prefix() {
        let aliases = ["10-downloads", "music"];
        assert_eq!(match_alias(&aliases, "10"), Match::None(NoMatch::OutOfRange));
        assert_eq!(match_alias(&aliases, "0"), Match::None(NoMatch::OutOfRange));
        assert_eq!(match_alias(&aliases, "-1"), Match::None(NoMatch::OutOfRange));
        assert_eq!(
            match_alias(&aliases, "99999999999999999999999"),
            Match::None(NoMatch::OutOfRange)
        );
    }

    #[test]
    fn numeric_alias_shadows_index() {
        let aliases = ["a", "b", "1"];
        assert_eq!(match_alias(&aliases, "1"), Match::Exact(2));
        assert_eq!(match_alias(&aliases, "2"), Match::Index(1));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let aliases: [&str; 0] = [];
        assert_eq!(match_alias(&aliases, "a"), Match::None(NoMatch::Unknown));
        assert_eq!(match_alias(&aliases, "1"), Match::None(NoMatch::OutOfRange));
    }

    #[test]
    fn numeral_recognition() {
        assert_eq!(parse_numeral("12"), Some(Numeral::Value(12)));
        assert_eq!(parse_numeral("-4"), Some(Numeral::Unrepresentable));
        assert_eq!(parse_numeral("1a"), None);
        assert_eq!(parse_numeral("+"), None);
        assert_eq!(parse_numeral(""), None);
    }

    fn alias_set() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-z0-9]{1,6}", 0..12)
            .prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn every_alias_matches_itself(aliases in alias_set()) {
            for (pos, alias) in aliases.iter().enumerate() {
                prop_assert_eq!(match_alias(&aliases, alias), Match::Exact(pos));
            }
        }

        #[test]
        fn in_range_numbers_select_by_position(aliases in alias_set()) {
            for n in 1..=aliases.len() {
                let token = n.to_string();
                let resolved = match_alias(&aliases, &token);
                if aliases.contains(&token) {
                    prop_assert!(matches!(resolved, Match::Exact(_)));
                } else {
                    prop_assert_eq!(resolved, Match::Index(n - 1));
                }
            }
        }

        #[test]
        fn out_of_range_numbers_never_match(aliases in alias_set(), extra in 1usize..1000) {
            let token = (aliases.len() + extra).to_string();
            prop_assume!(!aliases.contains(&token));
            prop_assert_eq!(match_alias(&aliases, &token), Match::None(NoMatch::OutOfRange));
        }

        #[test]
        fn prefix_resolves_only_when_unique(aliases in alias_set(), token in "[a-z]{1,3}") {
            prop_assume!(!aliases.contains(&token));
            let hits: Vec<usize> = aliases
                .iter()
                .enumerate()
                .filter(|(_, a)| a.starts_with(&token))
                .map(|(pos, _)| pos)
                .collect();
            let resolved = match_alias(&aliases, &token);
            if hits.len() == 1 {
                prop_assert_eq!(resolved, Match::Prefix(hits[0]));
            } else {
                prop_assert!(!resolved.is_match());
            }
        }
    }
}
