//! Resilient JSONL (JSON Lines) reading and atomic writing.
//!
//! This library handles the JSONL snapshot format used by task trackers:
//! one JSON object per line, no enclosing array. Reading can be strict
//! (first bad line aborts) or resilient (bad lines are skipped and
//! reported as warnings with their line numbers). Writing goes through a
//! temp-file-then-rename sequence so a crash never leaves a half-written
//! file behind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod read;
pub mod write;

pub use error::{Error, Result};
pub use read::{parse_jsonl_str, read_jsonl, read_jsonl_resilient, ParseWarning};
pub use write::{write_json_atomic, write_jsonl, write_jsonl_atomic, JsonlWriter};
