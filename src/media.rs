/// Extension-based media recognition.
///
/// Used only when the known-extensions allow-list is switched on in the
/// configuration; by default every non-directory entry is a candidate.
///
/// # Examples
///
/// ```
/// use sortphotos::media::MediaExtensions;
/// use std::path::Path;
///
/// let known = MediaExtensions::default();
/// assert!(known.contains("JPG"));
/// assert!(known.contains("mov"));
/// assert!(!known.matches(Path::new("report.pdf")));
/// ```
use std::collections::HashSet;
use std::path::Path;

/// Still images and camera RAW formats.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "heic", "heif", "avif", "dng",
    "cr2", "cr3", "nef", "arw", "orf", "rw2", "raf",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "mkv", "avi", "wmv", "webm", "3gp", "mts", "m2ts",
];

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a", "opus"];

/// Set of lowercase extensions recognized as media.
#[derive(Debug, Clone)]
pub struct MediaExtensions {
    extensions: HashSet<String>,
}

impl MediaExtensions {
    /// Creates a set holding the standard image, video and audio extensions.
    pub fn new() -> Self {
        let mut known = Self {
            extensions: HashSet::new(),
        };
        for ext in IMAGE_EXTENSIONS
            .iter()
            .chain(VIDEO_EXTENSIONS)
            .chain(AUDIO_EXTENSIONS)
        {
            known.add(ext);
        }
        known
    }

    /// Adds an extension, ignoring a leading dot. Matching is case-insensitive.
    pub fn add(&mut self, ext: &str) {
        self.extensions
            .insert(ext.trim_start_matches('.').to_lowercase());
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(&ext.to_lowercase())
    }

    /// Whether `path` has a known media extension. Files without one never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.contains(ext))
    }
}

impl Default for MediaExtensions {
    fn default() -> Self {
        Self::new()
    }
}
