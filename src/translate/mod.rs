pub mod interface;
pub mod client;

pub use interface::{TranslateRequest, TranslateResponse, TranslationProvider, UpstreamRequest};
pub use client::DeepTranslateClient;
