//! Typed client for the Data API: transport seam, session, pagination.

mod cancel;
mod error;
mod paginate;
mod query;
mod session;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cancel::CancelToken;
pub use error::{ApiError, ApiResult, FetchResult, PartialFetch};
pub use paginate::{Page, Pages, collect_all};
pub use query::{ListQuery, SearchQuery, SortOrder};
pub use session::Session;
pub(crate) use session::{decode, require_success};
pub use transport::{
    DEFAULT_HOST, HttpTransport, Method, REQUEST_TIMEOUT, Request, Response, Transport,
    TransportError,
};
