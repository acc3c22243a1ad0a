//! Fuzz target for the TOML configuration parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary text through `AppConfig::parse()`; parsing and validation
//! must reject bad input with an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = rcpack_config::AppConfig::parse(s) {
            // A config that validated must render back to TOML.
            let _ = config.to_toml();
        }
    }
});
