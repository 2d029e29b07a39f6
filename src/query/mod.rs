pub mod filter;
pub mod request;
pub mod resolver;

pub use filter::NameFilter;
pub use request::{RequestError, StatesRequest};
pub use resolver::{QueryError, StatesResolver};
