//! Inbound payload acceptance rules.
//!
//! The chat transport itself is an external collaborator; this module only
//! fixes the boundary contract every transport applies before submitting:
//! native video attachments are accepted, documents are accepted when their
//! declared MIME type is `video/mp4`, everything else is silently ignored.

/// What a transport received, as far as job acceptance is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A native video attachment.
    Video,
    /// A generic document with an optional declared MIME type.
    Document { mime: Option<String> },
    /// Anything else (text, images, stickers, ...).
    Other,
}

/// Whether a payload should enter the job pipeline. Rejected payloads are
/// ignored without a user-visible error.
pub fn accepts(payload: &Payload) -> bool {
    match payload {
        Payload::Video => true,
        Payload::Document { mime } => mime.as_deref() == Some("video/mp4"),
        Payload::Other => false,
    }
}

/// Classify a local file for transports that submit by path (e.g. the CLI).
/// Any recognized video container counts as a native video attachment;
/// everything else is `Other` and gets ignored by `accepts`.
pub fn payload_for_file(file_name: &str) -> Payload {
    match guess_mime(file_name) {
        Some(_) => Payload::Video,
        None => Payload::Other,
    }
}

/// Guess a declared MIME type from a file name.
pub fn guess_mime(file_name: &str) -> Option<&'static str> {
    let extension = std::path::Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match extension.as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        "mkv" => Some("video/x-matroska"),
        "webm" => Some("video/webm"),
        _ => None,
    }
}
