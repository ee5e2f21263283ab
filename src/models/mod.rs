//! Request and response types for the image generation API.

pub mod generation;

pub use generation::{GeneratedImage, GenerateImageRequest, GenerateImageResponse, MAX_PROMPT_CHARS};
