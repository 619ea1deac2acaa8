//! Clipboard writes with a "copied" indicator that reverts after a fixed
//! interval.

use std::time::{Duration, Instant};

use arboard::Clipboard;

pub const COPIED_RESET_AFTER: Duration = Duration::from_secs(2);

/// Clipboard handle kept for the whole interactive session. On X11 and
/// Wayland the copied text is only served while a handle is alive.
#[derive(Default)]
pub struct SessionClipboard {
    inner: Option<Clipboard>,
}

impl SessionClipboard {
    pub fn copy(&mut self, text: &str) -> Result<(), String> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|err| err.to_string())?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_string())
            .map_err(|err| err.to_string())
    }
}

/// Copies `text` for a process that exits right afterwards. On Linux this
/// blocks until another program takes over the clipboard.
pub fn copy_and_hold(text: &str) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    set_and_hold(&mut clipboard, text).map_err(|err| err.to_string())
}

#[cfg(target_os = "linux")]
fn set_and_hold(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text.to_string())
}

#[cfg(not(target_os = "linux"))]
fn set_and_hold(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_string())
}

#[derive(Debug, Clone, Copy)]
pub struct CopyIndicator {
    copied_at: Option<Instant>,
    reset_after: Duration,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(COPIED_RESET_AFTER)
    }
}

impl CopyIndicator {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            copied_at: None,
            reset_after,
        }
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.reset_after)
    }

    pub fn reset(&mut self) {
        self.copied_at = None;
    }
}
