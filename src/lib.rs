//! # libbart - Shared helpers for network automation scripts
//!
//! A collection of small, independent utilities used by scripts that talk
//! to routers and switches.
//!
//! ## Key Features
//!
//! - **Config Chunking**: Split large device configurations into chunks that
//!   never cut a `!`-delimited block in half
//! - **IP Helpers**: Address validation, IP list files, reverse-DNS (PTR) names
//! - **NETCONF Replies**: XML to JSON conversion and nested dictionary lookups
//! - **Credentials**: Environment lookup with an interactive fallback
//! - **Call Wrappers**: Timing and debug tracing of function calls
//!
//! ## Architecture
//!
//! - `chunker`: Block-aware configuration chunker
//! - `config`: Settings structures and validation
//! - `config_loader`: Settings file loading
//! - `credentials`: Credential lookup
//! - `utils`: IP, text, dictionary, XML, output and timing helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use libbart::chunker::{split_lines_inclusive, ConfigChunker};
//!
//! let config = "hostname r1\n!\ninterface lo0\n ip address 10.0.0.1 255.255.255.255\n!\nend\n";
//! let lines = split_lines_inclusive(config);
//! let chunker = ConfigChunker::new(2)?;
//!
//! for chunk in chunker.chunks(&lines) {
//!     print!("--- chunk ---\n{}", chunk.concat());
//! }
//! # Ok::<(), libbart::chunker::ChunkError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library modules return typed errors built with `thiserror`. Expected
//! "not found" conditions are reported as `None`/`false` rather than errors.
//! The `bart` binary and the settings loader use `color_eyre` for reporting.

pub mod chunker;
pub mod config;
pub mod config_loader;
pub mod credentials;
pub mod utils;

pub use chunker::{conf_range_gen, ChunkError, ConfigChunker, ConfigChunks};
pub use config::{Settings, ValidationError};
pub use credentials::{get_env, CredentialSettings, Credentials, Prompt, StdinPrompt};
