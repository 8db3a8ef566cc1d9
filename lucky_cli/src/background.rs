use std::path::Path;

use lucky_shared::{Backdrop, Platform};
use tracing::{info, warn};

/// Backdrop plus the banner text to print when a background file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenery {
    pub backdrop: Backdrop,
    pub banner: Option<String>,
}

/// Loads the optional background banner. A missing or unreadable file is
/// logged and the plain backdrop is used instead.
pub fn load(path: Option<&Path>) -> Scenery {
    let banner = path.and_then(|p| match std::fs::read_to_string(p) {
        Ok(text) => {
            info!(path = %p.display(), "loaded background");
            Some(text)
        }
        Err(err) => {
            warn!(path = %p.display(), %err, "background unavailable, using plain backdrop");
            None
        }
    });
    let source = banner
        .as_ref()
        .and(path.map(|p| p.display().to_string()));
    Scenery {
        backdrop: Backdrop::resolve(Platform::Native, source),
        banner,
    }
}
