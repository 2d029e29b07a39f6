use crate::query::NameFilter;

/// A stored state or territory. The name is the whole record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub name: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub trait Storage {
    /// Execute a name predicate and return the matching states in store order.
    fn find_states(&self, filter: &NameFilter) -> anyhow::Result<Vec<State>>;

    /// Clear the collection, then insert the given states. The two steps are
    /// not atomic; a reader may briefly observe an empty collection.
    fn replace_all(&self, states: &[State]) -> anyhow::Result<()>;
}
