//! Call assistant STT (Speech-to-Text)
//!
//! Hosted transcription behind the `Transcriber` trait

pub mod assemblyai;
pub mod transcriber;
pub mod types;

// Re-export main types
pub use assemblyai::AssemblyAiClient;
pub use transcriber::Transcriber;
pub use types::{count_words, Transcript, TranscriptionOptions};
