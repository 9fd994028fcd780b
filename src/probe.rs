//! Lightweight media file probing.
//!
//! [`MediaProbe`] reads subtitle stream descriptors without keeping the
//! demuxer open. This is useful for inspecting many files (e.g. a whole
//! season) before deciding which ones to process.

use std::path::Path;

use crate::error::SubselectError;
use crate::media_file::MediaFile;
use crate::metadata::MediaMetadata;

/// Lightweight media file probe.
///
/// # Example
///
/// ```no_run
/// use subselect::MediaProbe;
///
/// let metadata = MediaProbe::probe("episode.mkv")?;
/// for stream in &metadata.subtitle_streams {
///     println!("#{} {} {:?}", stream.index, stream.codec_name, stream.language);
/// }
/// # Ok::<(), subselect::SubselectError>(())
/// ```
pub struct MediaProbe;

impl MediaProbe {
    /// Probe a media file and return its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SubselectError::FileOpen`] if the file cannot be opened or
    /// recognised as a media file.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<MediaMetadata, SubselectError> {
        let media = MediaFile::open(path)?;
        Ok(media.metadata)
    }

    /// Probe multiple media files.
    ///
    /// Files that cannot be probed produce an `Err` entry rather than
    /// aborting the batch.
    pub fn probe_many<P: AsRef<Path>>(paths: &[P]) -> Vec<Result<MediaMetadata, SubselectError>> {
        paths.iter().map(Self::probe).collect()
    }
}
