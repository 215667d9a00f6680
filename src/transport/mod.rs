pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod traits;

pub use http::HttpTransport;
pub use traits::{HttpResponse, Transport};
