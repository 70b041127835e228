use crate::error::GlobeResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates every frame and keeps the last one around, so tests can
/// inspect fills, scales and tooltip content without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_path_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    /// Returns the fill of a country in the last rendered frame.
    #[must_use]
    pub fn last_fill_hex(&self, key: &str) -> Option<String> {
        self.last_frame
            .as_ref()
            .and_then(|frame| frame.path(key))
            .map(|path| path.fill.to_hex())
    }

    /// Returns all texts of the last rendered frame, in draw order.
    #[must_use]
    pub fn last_texts(&self) -> Vec<String> {
        self.last_frame
            .as_ref()
            .map(|frame| frame.texts.iter().map(|text| text.text.clone()).collect())
            .unwrap_or_default()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GlobeResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_path_count = frame.paths.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
