//! `tracing` output routed to the browser console.
//!
//! [`console_layer`] is a `tracing-subscriber` fmt layer without timestamps or
//! ANSI colors. Each formatted event is buffered by a [`ConsoleWriter`] and
//! handed to a [`ConsoleSink`] in one piece, tagged with the event level so
//! the sink can pick `console.error`, `console.warn` and so on.

use std::io;

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;

/// Destination for finished log lines.
pub trait ConsoleSink: Clone + Send + Sync + 'static {
    fn emit(&self, level: Level, line: &str);
}

/// [`MakeWriter`] producing one [`ConsoleWriter`] per event.
#[derive(Debug, Clone)]
pub struct ConsoleMakeWriter<S> {
    sink: S,
}

impl<S: ConsoleSink> ConsoleMakeWriter<S> {
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

/// Buffers one formatted event; emits it on drop.
#[derive(Debug)]
pub struct ConsoleWriter<S: ConsoleSink> {
    sink: S,
    level: Level,
    buf: Vec<u8>,
}

impl<S: ConsoleSink> io::Write for ConsoleWriter<S> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: ConsoleSink> Drop for ConsoleWriter<S> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        self.sink.emit(self.level, line.trim_end());
    }
}

impl<'a, S: ConsoleSink> MakeWriter<'a> for ConsoleMakeWriter<S> {
    type Writer = ConsoleWriter<S>;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            sink: self.sink.clone(),
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            sink: self.sink.clone(),
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Fmt layer writing events at `max_level` and above to `sink`.
pub fn console_layer<S, Sub>(sink: S, max_level: Level) -> impl Layer<Sub>
where
    S: ConsoleSink,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(ConsoleMakeWriter::new(sink))
        .with_filter(LevelFilter::from_level(max_level))
}
