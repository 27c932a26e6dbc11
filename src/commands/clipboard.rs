//! Copy built prompts to the system clipboard.

use tracing::{debug, warn};

/// Copy `text` to the clipboard. A missing or unusable clipboard (headless
/// sessions, no display server) only warns. Returns whether the copy worked.
pub fn copy_prompt(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));

    match result {
        Ok(()) => {
            debug!("Copied {} characters to the clipboard", text.chars().count());
            println!("  [DONE] Prompt copied to the clipboard");
            true
        }
        Err(e) => {
            warn!("Could not copy the prompt to the clipboard: {}", e);
            println!("Could not copy the prompt to the clipboard.");
            false
        }
    }
}
