pub mod check;
pub mod play;
pub mod validate;

use std::path::Path;

use loom_engine::ContentModule;

/// Load a content module, turning failures into a printable message.
fn load_module(dir: &Path) -> Result<ContentModule, String> {
    ContentModule::load(dir).map_err(|e| format!("failed to load '{}': {e}", dir.display()))
}
