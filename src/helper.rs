use crate::error::Result;
use crate::render::RenderedArtifact;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

/// Directory used by [`save_artifact`] when none is given.
pub const DEFAULT_DIRECTORY: &str = "generated";

/// Writes a rendered artifact to a file and returns its path.
///
/// # Arguments
///
/// * `artifact` - The artifact to save.
/// * `directory_path` - Optional. The directory to save into, created if missing. Defaults to "generated".
/// * `filename` - Optional. The file name without extension. If not provided, a timestamp-based name is used.
///
/// The extension always comes from the artifact's format.
///
/// # Errors
///
/// Returns [`RenderError::Io`](crate::error::RenderError::Io) if the directory or file cannot be written.
///
/// # Example
///
/// ```rust,no_run
/// use qirender::helper::save_artifact;
/// use qirender::render::{generate, QrRequest};
/// use qirender::matrix::{EcLevel, ModuleMatrix};
///
/// let encoder = |_: &str, _: EcLevel| -> Result<ModuleMatrix, String> {
///     Ok(ModuleMatrix::from_fn(21, |x, y| x == y))
/// };
/// let artifact = generate(&encoder, &QrRequest::new("Hello, World!", "png")).unwrap();
/// let path = save_artifact(&artifact, Some("images"), Some("qr_code")).unwrap();
/// assert_eq!(path.extension().unwrap(), "png");
/// ```
pub fn save_artifact(
    artifact: &RenderedArtifact,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let directory_path = Path::new(directory_path.unwrap_or(DEFAULT_DIRECTORY));
    let filename = match filename {
        Some(name) => name.to_string(),
        None => timestamp_name(),
    };
    let file_path = directory_path.join(format!("{}.{}", filename, artifact.format().extension()));

    // Check if the directory exists, create it if it doesn't
    if !directory_path.exists() {
        fs::create_dir_all(directory_path)?;
    }

    fs::write(&file_path, artifact.bytes())?;
    log::debug!("wrote {} bytes to {}", artifact.bytes().len(), file_path.display());
    Ok(file_path)
}

fn timestamp_name() -> String {
    // A clock before the epoch only affects the name.
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("qr_{}", millis)
}
