pub mod client;
pub mod sanitize;
pub mod transport;
pub mod types;

pub use client::StoplossDataClient;
pub use transport::{HttpTransport, StoplossTransport};
pub use types::{StoplossQueryParams, StoplossResult};
