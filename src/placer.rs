/// Placement of scanned records into their date-derived directories.
///
/// The placer owns every filesystem side effect of a run: creating the
/// destination directory chain and moving the file into it. Strategies stay
/// pure.
use crate::error::{SortError, SortResult};
use crate::scanner::MediaRecord;
use crate::strategy::{RelativePath, Strategy};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Records where a single candidate was (or would be) moved.
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub source_path: PathBuf,
    pub destination: PathBuf,
    /// Subpath under the destination root, e.g. `2023/March/21st`.
    pub relative: RelativePath,
    /// False when the placement was only planned (dry run).
    pub moved: bool,
}

/// Creates `path` and every missing parent. An existing chain is not an error.
pub fn ensure_dir_chain(path: &Path) -> SortResult<()> {
    fs::create_dir_all(path).map_err(|e| SortError::io(path, e))
}

/// Moves `source` to `destination` without ever replacing an existing entry.
///
/// The destination is claimed with a hard link, which fails atomically when
/// the name is taken, and the source link is removed afterwards. Filesystems
/// without hard links (and cross-device moves, which then fail as before) fall
/// back to `fs::rename`; only that fallback leaves a window between the
/// caller's existence check and the rename.
pub fn move_no_replace(source: &Path, destination: &Path) -> SortResult<()> {
    match fs::hard_link(source, destination) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(source) {
                // Leave the file where it was rather than in two places.
                let _ = fs::remove_file(destination);
                return Err(SortError::io(source, e));
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(SortError::DestinationCollision {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SortError::io(source, e)),
        Err(_) => fs::rename(source, destination).map_err(|e| SortError::io(source, e)),
    }
}

/// Moves records under a destination root using one strategy.
pub struct Placer {
    dest_root: PathBuf,
    strategy: Strategy,
    dry_run: bool,
}

impl Placer {
    pub fn new(dest_root: impl Into<PathBuf>, strategy: Strategy) -> Self {
        Self {
            dest_root: dest_root.into(),
            strategy,
            dry_run: false,
        }
    }

    /// Plan placements without creating directories or moving files.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Computes the destination of `record` without touching the filesystem.
    pub fn destination_for(&self, record: &MediaRecord) -> (RelativePath, PathBuf) {
        let relative = (self.strategy)(record);
        let destination = relative.join_onto(&self.dest_root).join(&record.file_name);
        (relative, destination)
    }

    /// Places one record.
    ///
    /// Anything already present at the destination path, including the record
    /// itself when it is already sorted, is a
    /// [`SortError::DestinationCollision`]; nothing is moved or overwritten in
    /// that case, even when the destination appears between the check and the
    /// move. Directory creation and move failures surface as [`SortError::Io`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortphotos::config::CandidateFilter;
    /// use sortphotos::placer::Placer;
    /// use sortphotos::scanner::scan_media;
    /// use sortphotos::strategy::Operation;
    /// use std::path::Path;
    ///
    /// let placer = Placer::new("/path/to/sorted", Operation::NumDayNest.strategy());
    /// for record in scan_media(Path::new("/path/to/photos"), &CandidateFilter::accept_all())? {
    ///     match placer.place(&record) {
    ///         Ok(p) => println!("{} -> {}", record.name, p.relative),
    ///         Err(e) => eprintln!("{}", e),
    ///     }
    /// }
    /// # Ok::<(), sortphotos::SortError>(())
    /// ```
    pub fn place(&self, record: &MediaRecord) -> SortResult<Placement> {
        let (relative, destination) = self.destination_for(record);

        match fs::symlink_metadata(&destination) {
            Ok(_) => {
                return Err(SortError::DestinationCollision {
                    source: record.source_path.clone(),
                    destination,
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(SortError::io(&destination, e)),
        }

        if !self.dry_run {
            ensure_dir_chain(&relative.join_onto(&self.dest_root))?;

            move_no_replace(&record.source_path, &destination)?;
        }

        Ok(Placement {
            source_path: record.source_path.clone(),
            destination,
            relative,
            moved: !self.dry_run,
        })
    }
}
