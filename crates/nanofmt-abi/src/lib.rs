#![feature(c_variadic)]
//! extern "C" boundary for `nanofmt-core`.
//!
//! `nanofmt-core` is deliberately ignorant of how a caller's variadic
//! arguments are actually stored (spec.md §1: "the thin wrappers that
//! adapt the sink ... are treated as external collaborators"). This
//! crate supplies the two collaborators spec.md draws outside the
//! engine's scope:
//!
//! - `va_puller`: adapts a real C `VaList` into `nanofmt_core::ArgPuller`,
//!   grounded on `frankenlibc-abi/src/stdio_abi.rs`'s own
//!   `extract_va_args!` macro (pull every slot's raw register-width word
//!   up front, interpret it afterward) -- necessary here too, since only
//!   the inference pass knows ahead of time which slots are float-typed
//!   and so must come from the SSE/float register class rather than the
//!   general-purpose one.
//! - `transcoder`: a concrete UTF-8/UTF-16 codepoint iterator
//!   implementing `nanofmt_core::Transcoder`, for the rare case an
//!   `%s`/`%ls` argument's code-unit width doesn't match the sink's.
//!
//! `stdio_abi` composes both into the two external operations spec.md §6
//! names (`verify`, `render_to_buffer`) as `extern "C"` symbols with a
//! `snprintf`-shaped signature. `bin/nanofmt.rs` is a small CLI exposing
//! the same two operations to a shell, for exercising the engine without
//! writing a C caller.
#![allow(clippy::missing_safety_doc)]

pub mod cli_puller;
pub mod stdio_abi;
pub mod transcoder;
pub mod va_puller;

pub use stdio_abi::{nanofmt_verify, nanofmt_vsnprintf};
pub use transcoder::Utf8Utf16Transcoder;
pub use va_puller::RawWordPuller;
