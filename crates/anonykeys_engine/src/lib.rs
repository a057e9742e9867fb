//! AnonyKeys engine: page loading for the embedded frame and the HTTP proxy.
mod decode;
mod document;
mod engine;
mod fetch;
mod privacy;
pub mod proxy;
mod rewrite;
mod types;

pub use decode::{charset_of, decode_body, media_type_of, DecodedBody};
pub use document::{DocumentRenderer, FrameDocument, FrameLink, LinkKind};
pub use engine::{build_frame_page, EngineHandle};
pub use fetch::{
    ChannelProgressSink, FetchRequest, FetchSettings, Fetcher, NullProgressSink, ProgressSink,
    ReqwestFetcher,
};
pub use privacy::{
    privacy_headers, spoofed_canadian_address, PrivacyOptions, DEFAULT_USER_AGENT,
    INCOGNITO_USER_AGENT,
};
pub use proxy::{handle_proxy_request, ProxyRequest, ProxyResponse};
pub use rewrite::{origin_of, rewrite_root_relative};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, FramePage, LoadId,
    LoadProgress, Stage,
};
