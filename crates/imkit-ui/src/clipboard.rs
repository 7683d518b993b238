//! Host clipboard access

/// Clipboard provided by the host application.
pub trait Clipboard {
    fn copy(&mut self, text: &str);

    fn paste(&mut self) -> Option<String>;
}

/// Clipboard kept in process memory; useful for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }

    fn paste(&mut self) -> Option<String> {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trips_text() {
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.paste(), None);
        clipboard.copy("hello");
        assert_eq!(clipboard.paste().as_deref(), Some("hello"));
    }
}
