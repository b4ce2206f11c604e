use crate::archive::{ArchiveError, EntryName};
use crate::catalog::ViewSet;
use crate::matrix::Matrix;
use crate::source::StatSource;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tar::{Builder, EntryType, Header};
use tracing::{debug, error, info, warn};

const BLOCK_SIZE: u64 = 512;

/// Every view sampled in one collection cycle.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub taken_at: DateTime<Local>,
    pub matrices: BTreeMap<String, Matrix>,
}

/// How often and how many times to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub interval: Duration,
    /// `None` samples until stopped.
    pub count: Option<u64>,
}

/// Appends snapshots to a tar archive.
pub struct Recorder {
    path: PathBuf,
    builder: Builder<File>,
}

impl Recorder {
    /// Open `path` for recording.
    ///
    /// Without `append` the file is created or truncated. With `append` an
    /// existing archive is cut back to the end of its last complete entry,
    /// dropping the end-of-archive marker and any half-written entry, and new
    /// entries continue from there. A non-empty file that is not a tar
    /// archive is refused rather than overwritten.
    pub fn open(path: impl AsRef<Path>, append: bool) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();

        let file = if append && path.exists() {
            let end = complete_entries_end(&path)?;
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&path)
                .map_err(|e| ArchiveError::open(&path, e))?;

            file.set_len(end).map_err(|e| ArchiveError::open(&path, e))?;
            file.seek(SeekFrom::Start(end))
                .map_err(|e| ArchiveError::open(&path, e))?;

            info!(path = %path.display(), offset = end, "appending to archive");
            file
        } else {
            info!(path = %path.display(), "creating archive");
            File::create(&path).map_err(|e| ArchiveError::open(&path, e))?
        };

        Ok(Self {
            path,
            builder: Builder::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run every view's query. Any failure aborts the whole cycle.
    pub fn collect<S: StatSource + ?Sized>(
        &self,
        source: &mut S,
        views: &ViewSet,
    ) -> Result<Snapshot, ArchiveError> {
        let taken_at = Local::now();
        let mut matrices = BTreeMap::new();

        for view in views.iter() {
            let matrix = source
                .query(&view.query)
                .map_err(|source| ArchiveError::Collect {
                    view: view.name.clone(),
                    source,
                })?;
            matrices.insert(view.name.clone(), matrix);
        }

        Ok(Snapshot { taken_at, matrices })
    }

    /// Append one entry per view.
    pub fn write(&mut self, snapshot: &Snapshot) -> Result<(), ArchiveError> {
        let mtime = snapshot.taken_at.timestamp().max(0) as u64;

        for (view, matrix) in &snapshot.matrices {
            let name = EntryName::for_sample(view, snapshot.taken_at).to_string();
            let body = matrix.to_json().map_err(|source| ArchiveError::Encode {
                view: view.clone(),
                source,
            })?;

            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Regular);
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(mtime);

            self.builder
                .append_data(&mut header, &name, body.as_slice())
                .map_err(|source| ArchiveError::Write {
                    entry: name.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    /// Finish the archive and flush it to disk.
    ///
    /// A failure writing the end-of-archive marker is only logged: every
    /// complete entry is already on disk and append mode does not need the
    /// marker. A failure syncing the file is returned.
    pub fn close(mut self) -> Result<(), ArchiveError> {
        if let Err(err) = self.builder.finish() {
            error!(path = %self.path.display(), error = %err, "failed to finish archive");
        }

        let file = self.builder.into_inner().map_err(|source| ArchiveError::Sync {
            path: self.path.clone(),
            source,
        })?;

        file.sync_all().map_err(|source| ArchiveError::Sync {
            path: self.path.clone(),
            source,
        })
    }

    /// Sample `views` on `schedule` until the count is reached or `stop`
    /// receives a message. Returns the number of cycles written.
    ///
    /// Stop is checked before each cycle and while waiting for the next
    /// tick, so a cycle is either written whole or not started.
    pub fn run<S: StatSource + ?Sized>(
        &mut self,
        source: &mut S,
        views: &ViewSet,
        schedule: Schedule,
        stop: &Receiver<()>,
    ) -> Result<u64, ArchiveError> {
        let mut written = 0u64;

        loop {
            if stop_requested(stop) {
                debug!("stop requested before collection");
                break;
            }

            let started = Instant::now();
            let snapshot = self.collect(source, views)?;
            self.write(&snapshot)?;
            written += 1;
            debug!(cycle = written, views = snapshot.matrices.len(), "sample written");

            if schedule.count.is_some_and(|count| written >= count) {
                break;
            }

            let wait = schedule.interval.saturating_sub(started.elapsed());
            match stop.recv_timeout(wait) {
                Ok(()) => {
                    debug!("stop requested while waiting");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                // nobody can ask us to stop any more
                Err(RecvTimeoutError::Disconnected) => thread::sleep(wait),
            }
        }

        Ok(written)
    }
}

fn stop_requested(stop: &Receiver<()>) -> bool {
    match stop.try_recv() {
        Ok(()) => true,
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => false,
    }
}

/// Byte offset just past the last entry whose header and data are both present.
///
/// A file whose first header does not parse is not an archive at all and is
/// left untouched.
fn complete_entries_end(path: &Path) -> Result<u64, ArchiveError> {
    let file = File::open(path).map_err(|e| ArchiveError::open(path, e))?;
    let file_len = file
        .metadata()
        .map_err(|e| ArchiveError::open(path, e))?
        .len();

    let mut archive = tar::Archive::new(file);
    let entries = archive.entries().map_err(ArchiveError::read)?;

    let mut end = 0u64;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if end == 0 => {
                return Err(ArchiveError::NotAnArchive {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "archive has a damaged tail, truncating");
                break;
            }
        };

        let data_end = entry.raw_file_position() + padded(entry.size());
        if data_end > file_len {
            warn!(path = %path.display(), "last archive entry is incomplete, truncating");
            break;
        }
        end = data_end;
    }

    Ok(end)
}

fn padded(size: u64) -> u64 {
    size.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}
