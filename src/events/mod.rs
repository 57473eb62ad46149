//! Subscriber handle for the shortcut event stream
//!
//! A `ShortcutStream` sees every action emitted after it was created, in
//! emission order, through its own unbounded queue. When it is dropped it
//! runs a detach hook so the owner can re-evaluate its listener count.

use tokio::sync::mpsc;

type DetachHook = Box<dyn FnOnce() + Send + Sync>;

/// One listener attached to the shortcut event stream
pub struct ShortcutStream {
    rx: Option<mpsc::UnboundedReceiver<String>>,
    on_detach: Option<DetachHook>,
}

impl ShortcutStream {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<String>, on_detach: DetachHook) -> Self {
        Self {
            rx: Some(rx),
            on_detach: Some(on_detach),
        }
    }

    /// Wait for the next action.
    ///
    /// Returns `None` once the stream has been closed and drained.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.as_mut()?.recv().await
    }

    /// Next action if one is already buffered
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.as_mut()?.try_recv().ok()
    }

    /// Stop accepting new actions.
    ///
    /// Actions already buffered can still be read.
    pub fn close(&mut self) {
        if let Some(rx) = self.rx.as_mut() {
            rx.close();
        }
    }
}

impl std::fmt::Debug for ShortcutStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutStream")
            .field("attached", &self.rx.is_some())
            .finish()
    }
}

impl Drop for ShortcutStream {
    fn drop(&mut self) {
        // Release the receiver first so the hook observes a closed sender
        drop(self.rx.take());
        if let Some(hook) = self.on_detach.take() {
            hook();
        }
    }
}
