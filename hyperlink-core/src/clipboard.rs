/// System clipboard access using arboard
use crate::capture::Pasteboard;
use anyhow::Result;

/// Cross-platform clipboard
pub struct Clipboard {
    ctx: arboard::Clipboard,
}

impl Clipboard {
    /// Create a new clipboard instance
    pub fn new() -> Result<Self> {
        let ctx = arboard::Clipboard::new()?;
        Ok(Self { ctx })
    }

    /// Set clipboard text content
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.ctx.set_text(text)?;
        Ok(())
    }

    /// Get clipboard text content; `None` when the clipboard holds no text
    pub fn get_text(&mut self) -> Result<Option<String>> {
        match self.ctx.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Pasteboard for Clipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        self.get_text()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.set_text(text)
    }
}
