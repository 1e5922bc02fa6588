//! `nanofmt-core`: an allocation-free, bounded-stack, positional-aware
//! printf-style format engine.
//!
//! The engine runs in two passes over a format string (spec.md §2):
//!
//! 1. **Inference** (`infer`): walk the format string against a *trusted
//!    reference* format, filling in an argument type vector. No values
//!    are read yet, only shapes.
//! 2. **Render** (`render`): walk the (possibly different, but
//!    previously verified) untrusted format string a second time,
//!    pulling argument values according to the inferred types and
//!    writing formatted text to a sink.
//!
//! `verify` runs pass 1 twice (once for the reference format, once for
//! the untrusted format) and checks the resulting type vectors match
//! slot-for-slot before any value is ever touched (spec.md §4.6). This
//! is the crate's whole reason for existing: a format string is only
//! ever rendered after it has been shown to demand the same argument
//! shapes as a format the caller already trusts.
//!
//! No heap allocation occurs anywhere in this crate; every intermediate
//! buffer is a fixed-size stack array sized at compile time (`EngineConfig`)
//! or by a const generic (`infer::TypeVector`).
#![no_std]
#![deny(unsafe_code)]

extern crate core;

pub mod bind;
pub mod config;
pub mod floatconv;
pub mod infer;
pub mod intconv;
pub mod render;
pub mod source;
pub mod spec;
pub mod types;
pub mod unit;
pub mod value;
pub mod verify;

pub use bind::{BindError, bind};
pub use config::{CompactConfig, ConfigError, DefaultConfig, EngineConfig};
pub use infer::{InferError, TypeVector, infer};
pub use render::{RenderError, Sink, Transcoder, render_to_buffer, render_to_sink};
pub use source::{ArgPuller, SliceArgPuller};
pub use unit::CodeUnit;
pub use value::ArgValue;
pub use verify::verify;
