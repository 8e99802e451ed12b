//! Opening generated pages in the default viewer.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Time the viewer gets to pick up the file before the process exits.
const VIEWER_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Error returned when the viewer cannot be launched.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PreviewError {
    #[error("Failed to open {} in the default viewer: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Open `path` with the platform's default viewer.
///
/// The viewer is spawned detached; there is no retry and no way to observe it
/// afterwards.
pub(crate) fn open_in_viewer(path: &Path) -> Result<(), PreviewError> {
    open::that_detached(path).map_err(|source| PreviewError::Launch {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Opened page in default viewer");

    std::thread::sleep(VIEWER_GRACE_PERIOD);
    Ok(())
}
