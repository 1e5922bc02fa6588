//! CLI entrypoint exercising `nanofmt-core` without a real C variadic
//! caller, in the style of `glibc-rs-harness`'s own `harness` binary.

use clap::{Parser, Subcommand};

use nanofmt_abi::Utf8Utf16Transcoder;
use nanofmt_abi::cli_puller::{CliArgPuller, WritebackCells};
use nanofmt_core::render::render_to_buffer;
use nanofmt_core::verify::verify;

const MAX_ARGS: usize = 64;
const OUT_BUF: usize = 4096;

/// Exercise nanofmt-core's verify/render operations from a shell.
#[derive(Debug, Parser)]
#[command(name = "nanofmt")]
#[command(about = "Verify and render printf-style format strings without an allocator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that a candidate format demands no argument shape the
    /// reference format didn't already establish.
    Verify {
        /// The trusted reference format string.
        reference: String,
        /// The candidate format string; defaults to the reference itself.
        #[arg(long)]
        format: Option<String>,
    },
    /// Render a format string against the given typed argument lists.
    Render {
        /// The trusted reference format string.
        reference: String,
        /// The format string actually rendered; defaults to the reference.
        #[arg(long)]
        format: Option<String>,
        /// Integer arguments, consumed in order by integer/char/pointer/`%n` slots.
        #[arg(long = "int")]
        ints: Vec<i64>,
        /// String arguments, consumed in order by `%s` slots.
        #[arg(long = "str")]
        strs: Vec<String>,
        /// Floating-point arguments, consumed in order by float slots.
        #[arg(long = "float")]
        floats: Vec<f64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify { reference, format } => {
            let ok = verify::<u8, MAX_ARGS>(reference.as_bytes(), format.as_deref().map(str::as_bytes));
            println!("{ok}");
            if !ok {
                std::process::exit(1);
            }
        }
        Command::Render {
            reference,
            format,
            ints,
            strs,
            floats,
        } => {
            let mut cells = WritebackCells::new();
            let mut puller = CliArgPuller::new(&ints, &strs, &floats, &mut cells);
            let transcoder = Utf8Utf16Transcoder;

            let mut buf = [0u8; OUT_BUF];
            let n = render_to_buffer::<u8, _, MAX_ARGS>(
                &mut buf,
                reference.as_bytes(),
                format.as_deref().map(str::as_bytes),
                &mut puller,
                Some(&transcoder),
            );

            // `n == 0` covers both a legitimately empty rendering and a
            // verification/binding failure (spec.md §7 reports both the
            // same way); a CLI caller distinguishes the two by running
            // `verify` first, as `Command::Verify` above does.
            let written = (n as usize).min(OUT_BUF.saturating_sub(1));
            print!("{}", String::from_utf8_lossy(&buf[..written]));
            if written < n as usize {
                eprintln!(
                    "\n(truncated: {} of {} code units shown, increase OUT_BUF to see more)",
                    written, n
                );
            }
        }
    }

    Ok(())
}
