//! Candidate filtering configuration.
//!
//! By default every non-directory entry in the source folder is sorted. A TOML
//! configuration file can narrow that down:
//! - Exact filename matching
//! - Glob pattern matching
//! - File extension matching
//! - Regex pattern matching
//! - Include (whitelist) rules that override exclude rules
//! - A known-media-extension allow-list
//!
//! # Configuration File Format
//!
//! ```toml
//! [filters]
//! enable_hidden_files = true
//!
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.tmp"]
//! extensions = ["xmp"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//!
//! [media]
//! known_extensions_only = true
//! extra_extensions = ["insv"]
//! ```

use crate::media::MediaExtensions;
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".sortphotosrc.toml";

/// Errors that can occur during configuration loading and filtering.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub filters: FilterRules,
    #[serde(default)]
    pub media: MediaRules,
}

/// Root-level filter rules configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether entries starting with "." are candidates. Defaults to true.
    #[serde(default = "default_enable_hidden_files")]
    pub enable_hidden_files: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist, overrides every other rule.
    #[serde(default)]
    pub include: IncludeRules,
}

fn default_enable_hidden_files() -> bool {
    true
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            enable_hidden_files: default_enable_hidden_files(),
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

/// Rules for excluding entries from sorting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns, matched against the entry name.
    #[serde(default)]
    pub patterns: Vec<String>,

    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub regex: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Media allow-list settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaRules {
    /// Only sort entries whose extension is a known media extension.
    #[serde(default)]
    pub known_extensions_only: bool,

    /// Extensions to treat as images on top of the built-in table.
    #[serde(default)]
    pub extra_extensions: Vec<String>,
}

impl SortConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if provided
    /// 2. `.sortphotosrc.toml` in the current directory
    /// 3. `~/.config/sortphotos/config.toml`
    /// 4. Default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortphotos")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile configuration into a [`CandidateFilter`].
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile(self) -> Result<CandidateFilter, ConfigError> {
        CandidateFilter::new(self.filters, self.media)
    }
}

/// Pre-compiled rules deciding which entries are sorting candidates.
pub struct CandidateFilter {
    enable_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
    media_extensions: Option<MediaExtensions>,
}

impl CandidateFilter {
    fn new(rules: FilterRules, media: MediaRules) -> Result<Self, ConfigError> {
        let exclude_patterns = compile_globs(&rules.exclude.patterns)?;
        let include_patterns = compile_globs(&rules.include.patterns)?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let media_extensions = media.known_extensions_only.then(|| {
            let mut known = MediaExtensions::default();
            for ext in &media.extra_extensions {
                known.add(ext);
            }
            known
        });

        Ok(Self {
            enable_hidden_files: rules.enable_hidden_files,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
            media_extensions,
        })
    }

    /// Filter that accepts every entry.
    pub fn accept_all() -> Self {
        Self {
            enable_hidden_files: true,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_patterns: Vec::new(),
            exclude_regexes: Vec::new(),
            include_patterns: Vec::new(),
            media_extensions: None,
        }
    }

    /// Check whether an entry name is a sorting candidate.
    ///
    /// The local configuration file itself is never a candidate. Other checks
    /// are performed in this order, with early termination:
    /// 1. Include patterns (whitelist) - if matched, always include
    /// 2. Hidden file filter
    /// 3. Exact filename match
    /// 4. File extension match
    /// 5. Glob pattern match
    /// 6. Regex pattern match
    /// 7. Known media extension, when the allow-list is on
    pub fn should_include(&self, file_name: &str) -> bool {
        if file_name == LOCAL_CONFIG_FILE {
            return false;
        }

        let name_path = Path::new(file_name);

        if self
            .include_patterns
            .iter()
            .any(|pattern| pattern.matches_path(name_path))
        {
            return true;
        }

        if !self.enable_hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name) {
            return false;
        }

        if let Some(ext) = name_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(name_path))
        {
            return false;
        }

        if self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(file_name))
        {
            return false;
        }

        match &self.media_extensions {
            Some(known) => known.matches(name_path),
            None => true,
        }
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(config: SortConfig) -> CandidateFilter {
        config.compile().expect("config should compile")
    }

    #[test]
    fn test_default_config_accepts_everything() {
        let filter = compile(SortConfig::default());

        assert!(filter.should_include("IMG_0001.jpg"));
        assert!(filter.should_include(".DS_Store"));
        assert!(filter.should_include("notes.txt"));
        assert!(filter.should_include("no_extension"));
        assert!(!filter.should_include(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn test_hidden_files_excluded_when_disabled() {
        let config = SortConfig::from_toml("[filters]\nenable_hidden_files = false\n").unwrap();
        let filter = compile(config);

        assert!(!filter.should_include(".DS_Store"));
        assert!(filter.should_include("photo.png"));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let config = SortConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    filenames: vec!["Thumbs.db".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filter = compile(config);

        assert!(!filter.should_include("Thumbs.db"));
        assert!(filter.should_include("image.jpg"));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let config = SortConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    extensions: vec!["xmp".to_string(), ".tmp".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filter = compile(config);

        assert!(!filter.should_include("IMG_1.XMP"));
        assert!(!filter.should_include("partial.tmp"));
        assert!(filter.should_include("IMG_1.jpg"));
    }

    #[test]
    fn test_exclude_glob_patterns() {
        let config = SortConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["[0-9]*.tmp".to_string(), "file?.txt".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filter = compile(config);

        assert!(!filter.should_include("1cache.tmp"));
        assert!(!filter.should_include("file1.txt"));
        assert!(filter.should_include("cache.tmp"));
        assert!(filter.should_include("file12.txt"));
    }

    #[test]
    fn test_exclude_regex() {
        let config = SortConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    regex: vec![r"^\._".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filter = compile(config);

        assert!(!filter.should_include("._IMG_0001.jpg"));
        assert!(filter.should_include("IMG_0001.jpg"));
    }

    #[test]
    fn test_include_overrides_exclude() {
        let config = SortConfig {
            filters: FilterRules {
                enable_hidden_files: false,
                include: IncludeRules {
                    patterns: vec![".keep*".to_string()],
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filter = compile(config);

        assert!(filter.should_include(".keep.jpg"));
        assert!(!filter.should_include(".other"));
    }

    #[test]
    fn test_known_extensions_only() {
        let config = SortConfig::from_toml(
            r#"
            [media]
            known_extensions_only = true
            extra_extensions = ["insv"]
            "#,
        )
        .unwrap();
        let filter = compile(config);

        assert!(filter.should_include("IMG_0001.JPG"));
        assert!(filter.should_include("clip.mov"));
        assert!(filter.should_include("VID_360.insv"));
        assert!(!filter.should_include("notes.txt"));
        assert!(!filter.should_include("README"));
    }

    #[test]
    fn test_invalid_regex_returns_error() {
        let config = SortConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    regex: vec!["[invalid(".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidRegexPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_glob_pattern_returns_error() {
        let config = SortConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["[invalid".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidGlobPattern(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SortConfig::from_toml("[filters\n"),
            Err(ConfigError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = SortConfig::load(Some(Path::new("/non/existent/sortphotos.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
