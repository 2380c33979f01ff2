// Inkpress runtime API client: request signing, endpoint calls, and
// response-shape normalization.

pub mod client;
pub mod error;
pub mod models;
pub mod signing;
pub mod transport;

pub use client::{DEFAULT_API_URL, DEFAULT_RASTER_URL, RuntimeClient};
pub use error::Error;
pub use models::{Category, Design};
pub use signing::{Credentials, SignedRequest};
pub use transport::TransportConfig;
