//! HTTP Request domain types

mod method;
mod query;
mod spec;

pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::{RequestSpec, validate_base_url};
