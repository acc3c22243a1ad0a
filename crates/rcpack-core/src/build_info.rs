//! Build-time metadata embedded by the build script, printed by
//! `rcpack version`.

/// Short git commit hash at build time, or `unknown` outside a checkout.
pub const GIT_HASH: &str = env!("RCPACK_GIT_HASH");

/// Build timestamp as Unix epoch seconds.
pub const BUILD_TIMESTAMP: &str = env!("RCPACK_BUILD_TIMESTAMP");

/// Cargo build profile (`debug` or `release`).
pub const BUILD_PROFILE: &str = env!("RCPACK_BUILD_PROFILE");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line for the `version` subcommand, e.g. `0.1.0 (abc1234, debug)`.
pub fn version_string() -> String {
    format!("{VERSION} ({GIT_HASH}, {BUILD_PROFILE})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_mentions_all_parts() {
        let v = version_string();
        assert!(v.starts_with(VERSION));
        assert!(v.contains(GIT_HASH));
        assert!(v.ends_with(&format!("{BUILD_PROFILE})")));
    }

    #[test]
    fn test_timestamp_is_numeric() {
        assert!(BUILD_TIMESTAMP.parse::<u64>().is_ok());
    }
}
