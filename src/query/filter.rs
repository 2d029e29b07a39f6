/// Store-level predicate over the `name` field of a state.
///
/// Built from the raw filter argument of a query. The filter text is always
/// treated literally; pattern metacharacters carry no meaning here and each
/// backend is responsible for escaping them when compiling the predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameFilter {
    /// Match every stored state.
    Any,
    /// Match states whose name starts with the given text, ignoring case.
    Prefix(String),
}

impl NameFilter {
    /// Build a predicate from filter text. An empty filter selects everything.
    pub fn from_text(filter: &str) -> Self {
        if filter.is_empty() {
            Self::Any
        } else {
            Self::Prefix(filter.to_string())
        }
    }

    /// Reference matching semantics: anchored, case-insensitive, literal.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Prefix(prefix) => name.to_lowercase().starts_with(&prefix.to_lowercase()),
        }
    }
}
