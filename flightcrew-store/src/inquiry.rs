use flightcrew_core::{CoreError, CoreResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read the free-text travel inquiry that becomes the report goal.
pub fn load_inquiry(path: &Path) -> CoreResult<String> {
    debug!("Loading inquiry from {}", path.display());
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            CoreError::Configuration(format!("No inquiry found at {}.", path.display()))
        }
        _ => CoreError::Configuration(format!(
            "An error occurred while loading the inquiry file: {}",
            e
        )),
    })
}
