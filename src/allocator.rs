//! Memory allocator configuration.
//!
//! Uses mimalloc as the global allocator for its randomized allocation
//! patterns and better behavior with the many small, short-lived buffers
//! this application churns through.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
