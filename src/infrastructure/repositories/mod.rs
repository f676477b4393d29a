pub mod murf_speech_repository;
pub mod speech_repository;

pub use murf_speech_repository::{MurfSettings, MurfSpeechRepository};
pub use speech_repository::{
    ExportResponse, ExportStatusReport, ProviderError, SpeechRepository, SynthesisResponse,
};
