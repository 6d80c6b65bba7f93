//! Uniform generation contract shared by every huoyuan provider.
//!
//! A caller builds a [`GenerationRequest`], resolves an [`Adapter`] through the
//! [`Registry`], and receives either a [`GenerationResult`] or a lazy
//! [`DeltaStream`]. Vendor crates implement [`Adapter`] on top of
//! [`HttpTransport`] and the shared SSE normalizer in [`sse`].

pub use adapter::{Adapter, Generation};
pub use error::{Error, Result};
pub use http::HttpTransport;
pub use options::{AdapterOptions, Endpoint, Environment, ProcessEnv, Timeouts};
pub use profile::{ProviderProfile, WireFormat};
pub use registry::{Constructor, Registry};
pub use request::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationRequest, MAX_TOKENS_RANGE,
    TEMPERATURE_RANGE,
};
pub use reqwest::{self, Client};
pub use response::{GenerationResult, Usage};
pub use stream::{DeltaStream, StreamDelta, collect_text};

mod adapter;
mod error;
mod http;
mod options;
mod profile;
mod registry;
mod request;
mod response;
pub mod sse;
mod stream;
