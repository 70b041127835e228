use crate::core::Viewport;
use crate::error::{GlobeError, GlobeResult};
use crate::render::{CirclePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one globe draw pass.
///
/// Draw order is fixed: ocean, country paths, outline, rects, texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub ocean: Option<CirclePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub outline: Option<CirclePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ocean: None,
            paths: Vec::new(),
            outline: None,
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    /// Looks up a country path by its uppercase key.
    #[must_use]
    pub fn path(&self, key: &str) -> Option<&PathPrimitive> {
        self.paths.iter().find(|path| path.key == key)
    }

    pub fn validate(&self) -> GlobeResult<()> {
        if !self.viewport.is_valid() {
            return Err(GlobeError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for circle in self.ocean.iter().chain(self.outline.iter()) {
            circle.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ocean.is_none()
            && self.outline.is_none()
            && self.paths.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
    }
}
