//! Label vocabularies and the scene bucket taxonomy
//!
//! The emotion classifier maps model output onto a fixed six-label
//! vocabulary. The scene classifier collapses the audio-event model's
//! fine-grained taxonomy (AudioSet display names) into five coarse buckets
//! by exact-name membership in each bucket's keyword set. The mapping lives
//! here as a static table so it stays testable independent of the
//! classification logic.

/// Fixed application-level emotion vocabulary.
///
/// Order matters: when a model label has no literal match in this list, the
/// classifier falls back to mapping the label's output position onto this
/// order.
pub const EMOTION_LABELS: [&str; 6] = [
    "neutral",
    "happy",
    "angry",
    "sad",
    "frustrated",
    "surprised",
];

/// Scene buckets in declared order. Argmax ties resolve to the earliest.
pub const SCENE_BUCKETS: [&str; 5] = ["speech", "music", "silence", "noise", "other"];

/// Bucket membership by AudioSet display name. Any class matching no set
/// accrues to "other", which therefore carries no keyword set of its own.
const BUCKET_MEMBERS: &[(&str, &[&str])] = &[
    (
        "speech",
        &[
            "Speech",
            "Child speech, kid speaking",
            "Conversation",
            "Narration, monologue",
            "Male speech, man speaking",
            "Female speech, woman speaking",
            "Speech synthesizer",
            "Shout",
            "Whispering",
            "Babbling",
        ],
    ),
    (
        "music",
        &[
            "Music",
            "Musical instrument",
            "Singing",
            "Choir",
            "Humming",
            "Rapping",
            "Guitar",
            "Piano",
            "Drum",
            "Violin, fiddle",
            "Synthesizer",
            "Theme music",
            "Background music",
            "Pop music",
            "Electronic music",
        ],
    ),
    ("silence", &["Silence"]),
    (
        "noise",
        &[
            "Noise",
            "White noise",
            "Pink noise",
            "Static",
            "Hum",
            "Engine",
            "Vehicle",
            "Traffic noise, roadway noise",
            "Air conditioning",
            "Mechanical fan",
            "Idling",
            "Environmental noise",
        ],
    ),
];

/// Find the bucket owning an exact class name. `None` means "other".
pub fn bucket_for(class_name: &str) -> Option<&'static str> {
    BUCKET_MEMBERS
        .iter()
        .find(|(_, members)| members.contains(&class_name))
        .map(|(bucket, _)| *bucket)
}
