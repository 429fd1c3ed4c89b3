// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative layout attributes.
//!
//! The tree does no layout arithmetic beyond turning fixed absolute attributes
//! into a frame. It only has to notice configurations that cannot produce a
//! frame at all, and it reports those as [`LayoutError`] when the frame is read.

use kurbo::{Point, Rect, Size};

/// One axis extent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Dimension {
    /// A fixed length in layout units.
    Fixed(f64),
    /// Sized by content; only meaningful under [`LayoutMode::Static`].
    Auto,
}

/// How a node's [`Layout`] is interpreted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LayoutMode {
    /// Attributes describe an explicit frame relative to the parent.
    #[default]
    Absolute,
    /// The backend flows the node; the engine has no frame for it.
    Static,
}

/// Layout attributes of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Offset from the parent's left edge.
    pub left: f64,
    /// Offset from the parent's top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: Dimension,
    /// Vertical extent.
    pub height: Dimension,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: Dimension::Fixed(0.0),
            height: Dimension::Fixed(0.0),
        }
    }
}

/// Layout configuration that cannot be honored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// `width` is [`Dimension::Auto`] under [`LayoutMode::Absolute`].
    #[error("auto width requires the static layout mode")]
    AutoWidth,
    /// `height` is [`Dimension::Auto`] under [`LayoutMode::Absolute`].
    #[error("auto height requires the static layout mode")]
    AutoHeight,
    /// The node id is stale.
    #[error("node is not alive")]
    DeadNode,
}

impl Layout {
    /// A fixed absolute frame.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: rect.x0,
            top: rect.y0,
            width: Dimension::Fixed(rect.width()),
            height: Dimension::Fixed(rect.height()),
        }
    }

    /// Resolve the frame under `mode`.
    ///
    /// Returns `Ok(None)` for static layouts, whose frame only the backend knows.
    pub fn frame(&self, mode: LayoutMode) -> Result<Option<Rect>, LayoutError> {
        if mode == LayoutMode::Static {
            return Ok(None);
        }
        let Dimension::Fixed(width) = self.width else {
            return Err(LayoutError::AutoWidth);
        };
        let Dimension::Fixed(height) = self.height else {
            return Err(LayoutError::AutoHeight);
        };
        Ok(Some(Rect::from_origin_size(
            Point::new(self.left, self.top),
            Size::new(width, height),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_frame() {
        let layout = Layout::from_rect(Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(
            layout.frame(LayoutMode::Absolute),
            Ok(Some(Rect::new(10.0, 20.0, 110.0, 70.0)))
        );
    }

    #[test]
    fn auto_is_fatal_outside_static_mode() {
        let layout = Layout {
            width: Dimension::Auto,
            ..Default::default()
        };
        assert_eq!(
            layout.frame(LayoutMode::Absolute),
            Err(LayoutError::AutoWidth)
        );
        let layout = Layout {
            height: Dimension::Auto,
            ..Default::default()
        };
        assert_eq!(
            layout.frame(LayoutMode::Absolute),
            Err(LayoutError::AutoHeight)
        );
    }

    #[test]
    fn static_mode_accepts_auto() {
        let layout = Layout {
            width: Dimension::Auto,
            height: Dimension::Auto,
            ..Default::default()
        };
        assert_eq!(layout.frame(LayoutMode::Static), Ok(None));
    }
}
