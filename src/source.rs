//! Source buffer ownership for a single compile.
//!
//! A compile may read several files: the entry file plus every file pulled
//! in through `include(...)`. The [`SourceMap`] owns all of those buffers
//! for the lifetime of the compile, and tokens refer back into them with a
//! [`SourceId`] plus byte offsets instead of holding string data themselves.
//!
//! # See Also
//!
//! * [`crate::token`] - Tokens carry a `SourceId` and byte offsets
//! * [`crate::parser`] - Registers included files as they are parsed

use crate::token::Token;

/// An opaque handle identifying one registered source file.
///
/// Created by [`SourceMap::add`]; valid only for the map that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u32);

/// One source file: a display name and the full text.
#[derive(Debug)]
struct SourceFile {
    name: String,
    text: String,
}

/// Owns every source buffer read during a compile.
///
/// Buffers are append-only: once added, a file's text never moves or
/// changes, so offsets stored in tokens stay valid until the map is
/// dropped.
#[derive(Default, Debug)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty source map.
    pub fn new() -> Self {
        SourceMap { files: Vec::new() }
    }

    /// Registers a source file and returns its handle.
    ///
    /// # Arguments
    ///
    /// * `name` - A display name for diagnostics (usually the path)
    /// * `text` - The full file contents
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> SourceId {
        let id = SourceId(self.files.len() as u32);
        self.files.push(SourceFile {
            name: name.into(),
            text: text.into(),
        });
        id
    }

    /// Returns the full text of a registered file.
    pub fn text(&self, id: SourceId) -> &str {
        &self.files[id.0 as usize].text
    }

    /// Returns the display name of a registered file.
    pub fn name(&self, id: SourceId) -> &str {
        &self.files[id.0 as usize].name
    }

    /// Returns the text a token covers in its source buffer.
    pub fn token_text(&self, token: &Token) -> &str {
        &self.text(token.source)[token.span.start..token.span.end]
    }
}
