/// Source directory scanning.
///
/// Enumerates the entries directly inside a source folder and captures the
/// filesystem metadata each strategy needs.
use crate::config::CandidateFilter;
use crate::error::{SortError, SortResult};
use chrono::{DateTime, Local, Utc};
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// One candidate file and the metadata captured at scan time.
#[derive(Debug, Clone)]
pub struct MediaRecord {
    /// Absolute location of the file when it was scanned.
    pub source_path: PathBuf,
    /// File name exactly as stored on disk, reused verbatim at the destination.
    pub file_name: OsString,
    /// Lossy UTF-8 form of `file_name`, for display and filter matching.
    pub name: String,
    pub size: u64,
    pub modified: SystemTime,
    pub created: SystemTime,
    pub accessed: SystemTime,
    /// `created` converted to local calendar time.
    pub creation_date: DateTime<Local>,
}

impl MediaRecord {
    /// Builds a record from raw timestamps, deriving `creation_date` once.
    ///
    /// Fails with [`SortError::Io`] when `created` lies outside the range a
    /// calendar date can represent.
    pub fn from_times(
        source_path: PathBuf,
        size: u64,
        modified: SystemTime,
        created: SystemTime,
        accessed: SystemTime,
    ) -> SortResult<Self> {
        let file_name = source_path.file_name().map(OsString::from).unwrap_or_default();
        let name = file_name.to_string_lossy().to_string();
        let creation_date = local_date_time(created).ok_or_else(|| {
            SortError::io(
                &source_path,
                std::io::Error::new(ErrorKind::InvalidData, "creation time out of range"),
            )
        })?;

        Ok(Self {
            source_path,
            file_name,
            name,
            size,
            modified,
            created,
            accessed,
            creation_date,
        })
    }

    /// When the filesystem does not report a birth time, the modification
    /// time stands in for it.
    fn from_metadata(path: PathBuf, metadata: &Metadata) -> SortResult<Self> {
        let modified = metadata.modified().map_err(|e| SortError::io(&path, e))?;
        let accessed = metadata.accessed().map_err(|e| SortError::io(&path, e))?;
        let created = match metadata.created() {
            Ok(created) => created,
            Err(e) if e.kind() == ErrorKind::Unsupported => modified,
            Err(e) => return Err(SortError::io(&path, e)),
        };

        Self::from_times(path, metadata.len(), modified, created, accessed)
    }
}

/// Checked `SystemTime` to local time conversion; `None` when out of range.
fn local_date_time(time: SystemTime) -> Option<DateTime<Local>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (secs.checked_neg()?, 0),
                n => (secs.checked_neg()?.checked_sub(1)?, 1_000_000_000 - n),
            }
        }
    };
    DateTime::<Utc>::from_timestamp(secs, nanos).map(|utc| utc.with_timezone(&Local))
}

/// Scans `src_folder` for candidates, sorted by file name.
///
/// Directories are skipped and the scan is not recursive. Entries rejected by
/// `filter` are skipped before their metadata is read. Any metadata failure
/// fails the whole scan with [`SortError::Io`] naming the offending entry.
///
/// # Examples
///
/// ```no_run
/// use sortphotos::config::CandidateFilter;
/// use sortphotos::scanner::scan_media;
/// use std::path::Path;
///
/// let records = scan_media(Path::new("/path/to/photos"), &CandidateFilter::accept_all())?;
/// for record in &records {
///     println!("{} created {}", record.name, record.creation_date);
/// }
/// # Ok::<(), sortphotos::SortError>(())
/// ```
pub fn scan_media(src_folder: &Path, filter: &CandidateFilter) -> SortResult<Vec<MediaRecord>> {
    let entries = fs::read_dir(src_folder).map_err(|e| SortError::io(src_folder, e))?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SortError::io(src_folder, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if !filter.should_include(&name) {
            continue;
        }

        let metadata = fs::metadata(&path).map_err(|e| SortError::io(&path, e))?;
        if metadata.is_dir() {
            continue;
        }

        records.push(MediaRecord::from_metadata(path, &metadata)?);
    }

    records.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(records)
}
