use serde::{Deserialize, Serialize};

/// How much a user wants to play a game. Pure identity, the weights live in
/// the scorer and the wire forms live in the table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    #[default]
    Unrated,
    WontPlay,
    DontOwn,
    PrefNot,
    NoPref,
    WantPlay,
}

struct PreferenceInfo {
    preference: Preference,
    display: &'static str,
    symbol: &'static str,
    tokens: &'static [&'static str],
}

// Same order as the enum declaration, `info` indexes by discriminant.
const TABLE: &[PreferenceInfo] = &[
    PreferenceInfo {
        preference: Preference::Unrated,
        display: "not rated",
        symbol: "\u{1F7E4}",
        tokens: &["clear", "unrated"],
    },
    PreferenceInfo {
        preference: Preference::WontPlay,
        display: "can't/won't play",
        symbol: "\u{274C}",
        tokens: &["wontplay", "cantplay", "wontrun"],
    },
    PreferenceInfo {
        preference: Preference::DontOwn,
        display: "doesn't own",
        symbol: "\u{1F4B8}",
        tokens: &["dontown"],
    },
    PreferenceInfo {
        preference: Preference::PrefNot,
        display: "prefers not to play",
        symbol: "\u{2B07}",
        tokens: &["prefnot", "prefernot"],
    },
    PreferenceInfo {
        preference: Preference::NoPref,
        display: "no preference",
        symbol: "\u{1F937}",
        tokens: &["nopref", "nopreference"],
    },
    PreferenceInfo {
        preference: Preference::WantPlay,
        display: "want to play",
        symbol: "\u{2B06}",
        tokens: &["wantplay", "wanttoplay", "favorite"],
    },
];

impl Preference {
    /// Resolves a symbol or word form. Word forms are case-insensitive.
    /// Unknown input is `None`, never silently Unrated.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let word = token.to_lowercase();
        TABLE
            .iter()
            .find(|info| info.symbol == token || info.tokens.contains(&word.as_str()))
            .map(|info| info.preference)
    }

    fn info(self) -> &'static PreferenceInfo {
        &TABLE[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.info().display
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn canonical_token(self) -> &'static str {
        self.info().tokens[0]
    }

    pub fn all() -> impl Iterator<Item = Preference> {
        TABLE.iter().map(|info| info.preference)
    }

    /// Everything a user can actually answer with, i.e. all but Unrated.
    pub fn rateable() -> impl Iterator<Item = Preference> {
        Self::all().filter(|preference| *preference != Preference::Unrated)
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum_order() {
        for (index, info) in TABLE.iter().enumerate() {
            assert_eq!(info.preference as usize, index);
        }
    }

    #[test]
    fn every_symbol_round_trips() {
        for preference in Preference::all() {
            assert_eq!(Preference::from_token(preference.symbol()), Some(preference));
        }
    }

    #[test]
    fn every_canonical_token_round_trips() {
        for preference in Preference::all() {
            assert_eq!(Preference::from_token(preference.canonical_token()), Some(preference));
        }
    }

    #[test]
    fn word_forms_are_case_insensitive() {
        assert_eq!(Preference::from_token("WontPlay"), Some(Preference::WontPlay));
        assert_eq!(Preference::from_token("  PREFERNOT  "), Some(Preference::PrefNot));
        assert_eq!(Preference::from_token("Favorite"), Some(Preference::WantPlay));
    }

    #[test]
    fn clear_maps_to_unrated() {
        assert_eq!(Preference::from_token("clear"), Some(Preference::Unrated));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(Preference::from_token("maybe"), None);
        assert_eq!(Preference::from_token(""), None);
        assert_eq!(Preference::from_token("🎲"), None);
    }

    #[test]
    fn default_is_unrated() {
        assert_eq!(Preference::default(), Preference::Unrated);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let encoded = serde_json::to_string(&Preference::WantPlay).unwrap();
        assert_eq!(encoded, "\"wantplay\"");
        let decoded: Preference = serde_json::from_str("\"prefnot\"").unwrap();
        assert_eq!(decoded, Preference::PrefNot);
    }

    #[test]
    fn rateable_excludes_unrated() {
        assert_eq!(Preference::rateable().count(), 5);
        assert!(Preference::rateable().all(|preference| preference != Preference::Unrated));
    }
}
