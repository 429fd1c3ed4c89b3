// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering backend contract.

use crate::layout::Layout;
use crate::types::NodeId;

/// A refresh the tree asks the backend to apply to an existing element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Refresh<'a> {
    /// Re-render the element's content.
    Content,
    /// Re-apply the node's layout attributes.
    Layout(&'a Layout),
    /// Re-apply the node's visibility request.
    Visibility(bool),
}

/// Turns nodes into concrete elements and arranges them.
///
/// The tree decides *when* these primitives run; the backend decides *what*
/// they do. Elements are plain handles owned by the backend.
pub trait Backend {
    /// Handle to a concrete element.
    type Element: Copy + Eq + core::fmt::Debug;

    /// Build the element for `node`.
    fn construct(&mut self, node: NodeId) -> Self::Element;

    /// Tear down an element. It is not inserted anywhere when this is called,
    /// except inside an element being destroyed in the same pass.
    fn destroy(&mut self, element: Self::Element);

    /// Insert `child` into `parent`, before `before` or last.
    fn insert(
        &mut self,
        parent: Self::Element,
        child: Self::Element,
        before: Option<Self::Element>,
    );

    /// Remove an element from whatever it is inserted into.
    fn remove(&mut self, element: Self::Element);

    /// Apply a refresh to an element.
    fn refresh(&mut self, element: Self::Element, refresh: Refresh<'_>) {
        let _ = (element, refresh);
    }
}
