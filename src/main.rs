//! Demo binary for `framesink`.
//!
//! Reads a file, cuts it into frames and reassembles it through a
//! [`ByteArrayMessageSink`], reporting the outcome through the diagnostics
//! appender.

mod cli;

use std::process::ExitCode;

use bytes::Bytes;
use chrono::Utc;
use clap::Parser;
use framesink::{
    ByteArrayMessageSink,
    FailurePolicy,
    Frame,
    HandlerError,
    OpCode,
    SessionConfig,
    diagnostics::{
        Appender,
        Cause,
        DiagnosticsConfig,
        DiagnosticsLogger,
        FormatMode,
        Level,
        Record,
    },
    pump,
};
use log::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let Some(config) = diagnostics_config(&cli) else {
        eprintln!("invalid --utc-offset: {}", cli.utc_offset);
        return ExitCode::FAILURE;
    };
    let max_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = DiagnosticsLogger::new(Appender::new(config, std::io::stderr()), max_level).install() {
        eprintln!("failed to install logger: {err}");
    }
    let reporter = Appender::new(config, std::io::stderr());

    let data = match tokio::fs::read(&cli.input).await {
        Ok(data) => Bytes::from(data),
        Err(err) => {
            report(&reporter, "cannot read {}", &cli.input.display(), &Cause::from_error(&err));
            return ExitCode::FAILURE;
        }
    };

    let frames = split_into_frames(data, cli.frame_size.max(1));
    let handler = |_: &[u8], _: usize, len: usize| -> Result<(), HandlerError> {
        println!("assembled message: {len} bytes");
        Ok(())
    };
    let mut sink = ByteArrayMessageSink::new(SessionConfig::new(cli.max_message_size), handler);

    match pump(&mut sink, futures::stream::iter(frames), FailurePolicy::Abort).await {
        Ok(stats) => {
            log::info!(
                "assembled {} message(s) from {} frame(s)",
                stats.messages,
                stats.frames
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&reporter, "assembly of {} failed", &cli.input.display(), &Cause::from_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn diagnostics_config(cli: &cli::Cli) -> Option<DiagnosticsConfig> {
    let mode = if cli.legacy_format {
        FormatMode::Legacy
    } else {
        FormatMode::Strict
    };
    DiagnosticsConfig::default()
        .with_escape_messages(!cli.no_escape)
        .with_format_mode(mode)
        .with_offset_seconds(cli.utc_offset)
}

/// Cut `data` into `frame_size` chunks; the last chunk carries the fin flag.
fn split_into_frames(data: Bytes, frame_size: usize) -> Vec<Frame> {
    if data.is_empty() {
        return vec![Frame::empty_fin(OpCode::Binary)];
    }
    let count = data.len().div_ceil(frame_size);
    (0..count)
        .map(|i| {
            let start = i * frame_size;
            let end = (start + frame_size).min(data.len());
            let opcode = if i == 0 {
                OpCode::Binary
            } else {
                OpCode::Continuation
            };
            Frame::new(opcode, Some(data.slice(start..end)), i + 1 == count)
        })
        .collect()
}

fn report(
    reporter: &Appender<std::io::Stderr>,
    template: &str,
    arg: &dyn std::fmt::Display,
    cause: &Cause,
) {
    let thread = std::thread::current();
    let args = [arg];
    let record = Record::new(
        Utc::now(),
        Level::Error,
        module_path!(),
        thread.name().unwrap_or("main"),
    )
    .with_template(template)
    .with_args(&args)
    .with_cause(cause);
    if let Err(err) = reporter.emit(&record) {
        eprintln!("failed to write diagnostics: {err}");
    }
}
