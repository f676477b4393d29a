pub mod error;
pub mod model;
pub mod service;
pub mod voice;

pub use error::NarrationError;
pub use model::{
    JobStatus, NarrationOutcome, NarrationRequest, NarrationResponse, SynthesisJob,
};
pub use service::{NarrationService, NarrationServiceApi, PollPolicy};
pub use voice::{default_voices, parse_voice_catalogue, VoiceOption};
