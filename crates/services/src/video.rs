use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use learningstack_core::model::{MAX_VIDEO_BYTES, VideoError, VideoFile};

/// Reads size and duration of a local video before it is attached to a
/// lesson module.
pub trait VideoProbe: Send + Sync {
    /// # Errors
    ///
    /// Returns `VideoError::TooLarge` for files over the upload ceiling and
    /// `VideoError::Unreadable` when metadata cannot be read.
    fn probe(&self, path: &Path) -> Result<VideoFile, VideoError>;
}

/// Probe for MP4 containers; duration comes from the `moov` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp4Probe;

impl VideoProbe for Mp4Probe {
    fn probe(&self, path: &Path) -> Result<VideoFile, VideoError> {
        let file = File::open(path).map_err(|err| VideoError::Unreadable(err.to_string()))?;
        let size = file
            .metadata()
            .map_err(|err| VideoError::Unreadable(err.to_string()))?
            .len();
        // Size is checked before the header is parsed.
        if size > MAX_VIDEO_BYTES {
            return Err(VideoError::TooLarge { size_bytes: size });
        }

        let header = mp4::Mp4Reader::read_header(BufReader::new(file), size)
            .map_err(|err| VideoError::Unreadable(err.to_string()))?;
        VideoFile::new(path, size, header.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_unreadable() {
        let err = Mp4Probe
            .probe(Path::new("/definitely/not/here.mp4"))
            .unwrap_err();
        assert!(matches!(err, VideoError::Unreadable(_)));
    }

    #[test]
    fn oversized_file_is_rejected_before_parsing() {
        use std::io::Write as _;

        let path = std::env::temp_dir().join(format!("learningstack-big-{}.mp4", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(b"not an mp4 container").unwrap();
        file.set_len(MAX_VIDEO_BYTES + 1).unwrap();
        drop(file);

        let err = Mp4Probe.probe(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(
            matches!(err, VideoError::TooLarge { size_bytes } if size_bytes == MAX_VIDEO_BYTES + 1),
            "got {err:?}"
        );
    }
}
