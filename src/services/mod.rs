pub mod fallback_generator;
pub mod response_parser;
pub mod text_service;

pub use fallback_generator::FallbackGenerator;
pub use response_parser::ResponseParser;
pub use text_service::{normalize, SentenceSegmenter};
