//! Global allocator.
//!
//! The binary routes every allocation, including the streaming buffers and the
//! per-file digest tasks, through mimalloc.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
