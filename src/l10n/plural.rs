//! Plural form selection.
//!
//! A plural placeholder lists its forms in a fixed order; the rule picked
//! from the rendered locale maps a count to an index into that list.

/// Plural policy for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// `one | other`. The fallback for every locale without a known rule.
    Binary,
    /// `one | few | many` as used by East Slavic languages.
    Slavic,
}

impl PluralRule {
    /// Pick the rule for a locale tag such as `ru_RU`, `uk-UA` or `en`.
    ///
    /// Only the language subtag is considered.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['_', '-'])
            .next()
            .unwrap_or(locale)
            .to_ascii_lowercase();

        match language.as_str() {
            "ru" | "uk" | "be" => Self::Slavic,
            _ => Self::Binary,
        }
    }

    /// Number of forms a placeholder must list for this rule.
    pub const fn forms(self) -> usize {
        match self {
            Self::Binary => 2,
            Self::Slavic => 3,
        }
    }

    /// Index of the form to use for `n`.
    pub fn select(self, n: f64) -> usize {
        match self {
            Self::Binary => {
                if n == 1.0 {
                    0
                } else {
                    1
                }
            }
            Self::Slavic => {
                let m10 = n % 10.0;
                let m100 = n % 100.0;
                if m10 == 1.0 && m100 != 11.0 {
                    0
                } else if (2.0..=4.0).contains(&m10) && !(10.0..20.0).contains(&m100) {
                    1
                } else {
                    2
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_for_locale() {
        assert_eq!(PluralRule::for_locale("ru_RU"), PluralRule::Slavic);
        assert_eq!(PluralRule::for_locale("uk-UA"), PluralRule::Slavic);
        assert_eq!(PluralRule::for_locale("be"), PluralRule::Slavic);
        assert_eq!(PluralRule::for_locale("en_US"), PluralRule::Binary);
        assert_eq!(PluralRule::for_locale("xx"), PluralRule::Binary);
        assert_eq!(PluralRule::for_locale(""), PluralRule::Binary);
    }

    #[test]
    fn test_binary() {
        let rule = PluralRule::Binary;
        assert_eq!(rule.select(1.0), 0);
        assert_eq!(rule.select(0.0), 1);
        assert_eq!(rule.select(2.0), 1);
        assert_eq!(rule.select(21.0), 1);
        assert_eq!(rule.forms(), 2);
    }

    #[test]
    fn test_slavic() {
        let rule = PluralRule::Slavic;
        for (n, form) in [
            (1.0, 0),
            (21.0, 0),
            (101.0, 0),
            (11.0, 2),
            (2.0, 1),
            (3.0, 1),
            (4.0, 1),
            (22.0, 1),
            (12.0, 2),
            (14.0, 2),
            (5.0, 2),
            (0.0, 2),
            (111.0, 2),
            (112.0, 2),
        ] {
            assert_eq!(rule.select(n), form, "n = {n}");
        }
        assert_eq!(rule.forms(), 3);
    }
}
