/// A voice offered in the landing page selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOption {
    pub id: String,
    pub label: String,
}

impl VoiceOption {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Murf voices offered when no catalogue is configured
pub fn default_voices() -> Vec<VoiceOption> {
    vec![
        VoiceOption::new("en-US-natalie", "Natalie (English, US)"),
        VoiceOption::new("en-US-terrell", "Terrell (English, US)"),
        VoiceOption::new("en-UK-hazel", "Hazel (English, UK)"),
        VoiceOption::new("es-ES-elvira", "Elvira (Spanish)"),
        VoiceOption::new("fr-FR-axel", "Axel (French)"),
        VoiceOption::new("de-DE-matthias", "Matthias (German)"),
    ]
}

/// Parse a catalogue of the form `id=Label,id=Label`.
///
/// An entry without `=` uses the id as its label.
pub fn parse_voice_catalogue(raw: &str) -> Result<Vec<VoiceOption>, String> {
    let voices: Vec<VoiceOption> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((id, label)) => VoiceOption::new(id.trim(), label.trim()),
            None => VoiceOption::new(entry, entry),
        })
        .collect();

    if let Some(voice) = voices.iter().find(|v| v.id.is_empty()) {
        return Err(format!("voice entry '{}' has an empty id", voice.label));
    }

    if voices.is_empty() {
        return Err("voice catalogue is empty".to_string());
    }

    Ok(voices)
}
