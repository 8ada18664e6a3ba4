// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while compositing a frame.

use core::error::Error;
use core::fmt;

use crate::drawable::HookError;

/// Which drawable hook failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// [`Drawable::pre_draw`](crate::Drawable::pre_draw).
    PreDraw,
    /// [`Drawable::is_opaque_over`](crate::Drawable::is_opaque_over).
    OpaqueQuery,
    /// [`Drawable::draw`](crate::Drawable::draw).
    Draw,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreDraw => "pre_draw",
            Self::OpaqueQuery => "is_opaque_over",
            Self::Draw => "draw",
        })
    }
}

/// Failure of a compositing pass.
///
/// Layer-shape errors are reported before any drawable is touched. Hook
/// failures abort the frame where they happen; state already applied to
/// earlier drawables (their `was_visible` flag, cleared dirty lists) is kept.
#[derive(Debug)]
pub enum CompositeError {
    /// The layer key at `position` has no entry in the graphics mapping.
    MissingLayer {
        /// Index into the layer key list.
        position: usize,
    },
    /// The layer key at `position` repeats an earlier key.
    DuplicateLayer {
        /// Index into the layer key list.
        position: usize,
    },
    /// A drawable hook returned an error.
    Hook {
        /// The hook that failed.
        hook: Hook,
        /// Layer index, 0 being topmost.
        layer: usize,
        /// Position of the drawable within its layer.
        index: usize,
        /// The drawable's error.
        source: HookError,
    },
}

impl CompositeError {
    pub(crate) fn hook(hook: Hook, layer: usize, index: usize) -> impl FnOnce(HookError) -> Self {
        move |source| Self::Hook {
            hook,
            layer,
            index,
            source,
        }
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLayer { position } => {
                write!(f, "layer key at position {position} has no graphics")
            }
            Self::DuplicateLayer { position } => {
                write!(f, "layer key at position {position} is listed more than once")
            }
            Self::Hook {
                hook, layer, index, ..
            } => write!(f, "`{hook}` failed for graphic {index} in layer {layer}"),
        }
    }
}

impl Error for CompositeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hook { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(
            CompositeError::MissingLayer { position: 2 }.to_string(),
            "layer key at position 2 has no graphics"
        );
        assert_eq!(
            CompositeError::DuplicateLayer { position: 1 }.to_string(),
            "layer key at position 1 is listed more than once"
        );
        let err = CompositeError::hook(Hook::Draw, 3, 0)(HookError::msg("no surface"));
        assert_eq!(err.to_string(), "`draw` failed for graphic 0 in layer 3");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("no surface"));
    }

    #[test]
    fn shape_errors_have_no_source() {
        assert!(CompositeError::MissingLayer { position: 0 }.source().is_none());
    }
}
