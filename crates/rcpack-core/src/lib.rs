#![deny(unsafe_code)]

//! rcpack core: packs a repository into one LLM-friendly Markdown document.
//!
//! The [`compress`] engine reduces source files to their signatures and
//! documentation. The remaining modules are the pipeline around it: the
//! repository [`scan`], the size-capped [`reader`], [`git`] metadata, the
//! Markdown [`format`] and the [`pack`] orchestration.

/// Compile-time build metadata (version, git hash, profile).
pub mod build_info;
/// Signature-extracting compression engine.
pub mod compress;
/// Markdown document writer.
pub mod format;
/// Git metadata collection.
pub mod git;
/// End-to-end pack pipeline.
pub mod pack;
/// Path normalization and repository root discovery.
pub mod paths;
/// Include pattern helpers.
pub mod patterns;
/// Size-capped file reader.
pub mod reader;
/// Repository scanner.
pub mod scan;

pub use compress::{CompressOptions, LanguageFamily, process};
pub use format::{OutputFormatter, PackedFile};
pub use git::{GitInfo, GitInfoCollector};
pub use pack::{PackError, PackedRepository, Packer};
pub use reader::{FileContent, FileReader, ReadError};
pub use scan::{FileEntry, RepositoryScanner, ScanResult};
