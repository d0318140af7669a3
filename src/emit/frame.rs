//! Per-function stack frames.
//!
//! Each function reserves `sp_size` bytes below `SP` for its locals and
//! spilled parameters. Slots are 8 bytes each and grow downward: the first
//! local lives at `[SP, #-8]`, the second at `[SP, #-16]`, and so on.

use crate::ast::{Block, Stmt};

/// The size of one local or parameter slot, in bytes.
pub(super) const SLOT_SIZE: i64 = 8;

/// Emission state for the function currently being lowered.
pub(super) struct Frame {
    /// The reserved frame size in bytes; a 16-byte multiple, at least 16.
    pub(super) sp_size: i64,
    /// The offset of the most recently allocated slot, relative to `SP`.
    next_offset: i64,
}

impl Frame {
    /// Creates a frame reserving `sp_size` bytes.
    pub(super) fn new(sp_size: i64) -> Self {
        Frame {
            sp_size,
            next_offset: 0,
        }
    }

    /// Allocates the next 8-byte slot and returns its offset.
    pub(super) fn allocate_slot(&mut self) -> i64 {
        self.next_offset -= SLOT_SIZE;
        self.next_offset
    }
}

/// Returns the bytes needed for the direct declarations of a body.
///
/// Only direct statements count: a declaration inside a nested block or a
/// nested function body belongs to that block's accounting in the original
/// scheme and is not reserved here.
pub(super) fn storage_size(block: &Block) -> i64 {
    block
        .statements
        .iter()
        .filter(|statement| matches!(statement, Stmt::Declare(_)))
        .count() as i64
        * SLOT_SIZE
}

/// Rounds a frame's real size up to a 16-byte multiple, minimum 16.
pub(super) fn frame_size(real_size: i64) -> i64 {
    let mut size = 16;
    while real_size > size {
        size += 16;
    }
    size
}
