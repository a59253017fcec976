use serde::Serialize;

const NARRATORS: [(&str, &str); 3] = [
    ("3AMU7jXQuQa3oRvRqUmb", "Viraj"),
    ("0s2MqkqwzPYZVFGZpMXE", "Sravani"),
    ("Sm1seazb4gs7RSlUVw7c", "Anika"),
];

#[derive(Debug, Clone, Serialize)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub default: bool,
}

pub fn catalog(default_voice: &str) -> Vec<VoiceInfo> {
    let mut voices: Vec<VoiceInfo> = NARRATORS
        .iter()
        .map(|(id, name)| VoiceInfo {
            id: id.to_string(),
            name: name.to_string(),
            default: *id == default_voice,
        })
        .collect();

    // A configured default outside the known set is still listed.
    if !voices.iter().any(|v| v.default) {
        voices.push(VoiceInfo {
            id: default_voice.to_string(),
            name: "Custom".to_string(),
            default: true,
        });
    }

    voices
}
