//! Session persistence between `openmeal` invocations.
//!
//! The session is kept as JSON in a single file. A missing file is a
//! signed-out session.

use std::path::Path;

use openmeal_client::Session;

pub const DEFAULT_SESSION_FILE: &str = ".openmeal-session.json";

pub fn load(path: &Path) -> Result<Session, String> {
    if !path.exists() {
        return Ok(Session::new());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read session file '{}': {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("invalid session file '{}': {}", path.display(), e))
}

pub fn save(path: &Path, session: &Session) -> Result<(), String> {
    let content = serde_json::to_string_pretty(session)
        .map_err(|e| format!("failed to serialize session: {}", e))?;
    std::fs::write(path, content)
        .map_err(|e| format!("failed to write session file '{}': {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

pub fn clear(path: &Path) -> Result<(), String> {
    if path.exists() {
        std::fs::remove_file(path)
            .map_err(|e| format!("failed to remove session file '{}': {}", path.display(), e))?;
    }
    Ok(())
}
