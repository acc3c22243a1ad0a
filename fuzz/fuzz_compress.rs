//! Fuzz target for the compression engine.
//!
//! Run with: cargo +nightly fuzz run fuzz_compress
//!
//! The engine accepts any text. The first byte picks the passes and the
//! language family; the rest is the file.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcpack_core::compress::{CompressOptions, process};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest);
    let options = CompressOptions {
        compress: flags & 1 != 0,
        remove_comments: flags & 2 != 0,
        remove_empty_lines: flags & 4 != 0,
    };
    let ext = if flags & 8 != 0 { "py" } else { "cpp" };

    let out = process(&text, ext, options);
    assert!(out.ends_with('\n'));
    assert_eq!(out, process(&text, ext, options));
});
