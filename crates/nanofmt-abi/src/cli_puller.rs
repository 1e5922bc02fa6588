//! An `ArgPuller` for `bin/nanofmt.rs`: a CLI invocation has no real
//! variadic call to pull from, only the separate `--int`/`--str`/
//! `--float` lists `clap` already parsed into typed `Vec`s. Grounded on
//! `nanofmt_core::source::SliceArgPuller` -- the same idea (a puller
//! backed by pre-typed Rust values rather than a `va_list`), just with
//! one independent cursor per argument kind instead of one shared
//! cursor over a single `SlotValue` enum, since the CLI's three flags
//! are naturally already separated by kind before this type ever sees
//! them.
//!
//! `bind::bind` dispatches to exactly one of `pull_int`/`pull_float`/
//! `pull_char`/`pull_str`/`pull_pointer`/`pull_writeback` per slot,
//! according to the type the reference format's inference pass already
//! decided -- so consuming each kind's list in encounter order here,
//! independent of the others, reproduces the same per-kind ordering a
//! real caller's variadic argument list would have, as long as the
//! caller supplied `--int`/`--str`/`--float` in the same relative order
//! as the directives that consume them.

use nanofmt_core::source::ArgPuller;
use nanofmt_core::types::{IntWidth, WritebackTarget};
use nanofmt_core::value::{StrPayload, Writeback};

/// How many `%n` directives a single CLI invocation may use. Generous
/// for a command-line formatting tool; `bin/nanofmt.rs` doesn't expose
/// a way to raise it.
const MAX_WRITEBACKS: usize = 16;

/// Backing storage for `%n` writeback targets, owned by the caller
/// (`bin/nanofmt.rs`'s `main`) and outliving the `CliArgPuller` borrowed
/// from it -- unlike a real `va_list` target, the CLI has no actual
/// caller memory to write into, so it supplies its own and reports the
/// written values afterward.
#[derive(Debug, Default)]
pub struct WritebackCells {
    i8: [i8; MAX_WRITEBACKS],
    i16: [i16; MAX_WRITEBACKS],
    i32: [i32; MAX_WRITEBACKS],
    i64: [i64; MAX_WRITEBACKS],
    isize: [isize; MAX_WRITEBACKS],
    f64: [f64; MAX_WRITEBACKS],
    next: usize,
}

impl WritebackCells {
    pub fn new() -> Self {
        Self::default()
    }
}

/// An `ArgPuller` over the CLI's already-parsed `--int`/`--str`/
/// `--float` lists.
pub struct CliArgPuller<'a> {
    ints: &'a [i64],
    int_cursor: usize,
    strs: &'a [String],
    str_cursor: usize,
    floats: &'a [f64],
    float_cursor: usize,
    cells: &'a mut WritebackCells,
}

impl<'a> CliArgPuller<'a> {
    pub fn new(ints: &'a [i64], strs: &'a [String], floats: &'a [f64], cells: &'a mut WritebackCells) -> Self {
        CliArgPuller {
            ints,
            int_cursor: 0,
            strs,
            str_cursor: 0,
            floats,
            float_cursor: 0,
            cells,
        }
    }

    fn next_int(&mut self) -> i64 {
        let v = self.ints.get(self.int_cursor).copied().unwrap_or(0);
        self.int_cursor += 1;
        v
    }
}

impl<'a> ArgPuller<'a, u8> for CliArgPuller<'a> {
    fn pull_int(&mut self, _width: IntWidth) -> i64 {
        self.next_int()
    }

    fn pull_float(&mut self) -> f64 {
        let v = self.floats.get(self.float_cursor).copied().unwrap_or(0.0);
        self.float_cursor += 1;
        v
    }

    fn pull_char(&mut self) -> u32 {
        self.next_int() as u32
    }

    fn pull_str(&mut self) -> StrPayload<'a, u8> {
        let v = self
            .strs
            .get(self.str_cursor)
            .map(|s| s.as_bytes())
            .unwrap_or(b"");
        self.str_cursor += 1;
        StrPayload::Native(v)
    }

    fn pull_pointer(&mut self) -> usize {
        self.next_int() as usize
    }

    fn pull_writeback(&mut self, target: WritebackTarget) -> Writeback<'a> {
        let i = self.cells.next % MAX_WRITEBACKS;
        self.cells.next += 1;
        match target {
            WritebackTarget::I8 => Writeback::I8(&mut self.cells.i8[i]),
            WritebackTarget::I16 => Writeback::I16(&mut self.cells.i16[i]),
            WritebackTarget::I32 => Writeback::I32(&mut self.cells.i32[i]),
            WritebackTarget::I64 => Writeback::I64(&mut self.cells.i64[i]),
            WritebackTarget::ISize => Writeback::ISize(&mut self.cells.isize[i]),
            WritebackTarget::F64 => Writeback::F64(&mut self.cells.f64[i]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_ints_and_strs_independently_in_order() {
        let ints = vec![1, 2];
        let strs = vec!["a".to_string(), "b".to_string()];
        let floats = vec![];
        let mut cells = WritebackCells::new();
        let mut puller = CliArgPuller::new(&ints, &strs, &floats, &mut cells);

        assert_eq!(puller.pull_int(IntWidth::I32), 1);
        match puller.pull_str() {
            StrPayload::Native(s) => assert_eq!(s, b"a"),
            _ => panic!("expected native"),
        }
        assert_eq!(puller.pull_int(IntWidth::I32), 2);
    }

    #[test]
    fn exhausted_list_yields_zero_value() {
        let ints: Vec<i64> = vec![];
        let strs = vec![];
        let floats = vec![];
        let mut cells = WritebackCells::new();
        let mut puller = CliArgPuller::new(&ints, &strs, &floats, &mut cells);
        assert_eq!(puller.pull_int(IntWidth::I32), 0);
    }

    #[test]
    fn writeback_stores_into_owned_cell() {
        let ints = vec![];
        let strs = vec![];
        let floats = vec![];
        let mut cells = WritebackCells::new();
        let mut puller = CliArgPuller::new(&ints, &strs, &floats, &mut cells);
        let mut wb = puller.pull_writeback(WritebackTarget::I32);
        wb.store(5);
        assert_eq!(cells.i32[0], 5);
    }
}
