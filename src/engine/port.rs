//! I/O port contract.
//!
//! An 'O' cell sitting under two stacked crates and over a `b` or `c` tag
//! emits the crates' combined byte when it is evaluated. The engine only
//! decides when and what; where it goes is up to the sink.

use std::io::{self, Write};

use log::trace;

/// One value produced by an I/O port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emission {
    /// Tagged `b`: printed as a decimal number.
    Number(u8),
    /// Tagged `c`: printed as a raw byte.
    Char(u8),
}

impl Emission {
    /// Bytes this emission puts on a plain output stream.
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            Emission::Number(d) => format!("{} ", d).into_bytes(),
            Emission::Char(c) => vec![c],
        }
    }
}

/// Receiver of I/O port emissions, in evaluation order.
pub trait OutputSink {
    fn emit(&mut self, emission: Emission);

    /// Push buffered output through and report the first failure, if any.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects emissions in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub emissions: Vec<Emission>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, as it would appear on a plain stream.
    pub fn text(&self) -> String {
        let bytes: Vec<u8> = self.emissions.iter().flat_map(|e| e.to_bytes()).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, emission: Emission) {
        self.emissions.push(emission);
    }
}

/// Writes emissions to any `io::Write` (stdout, a file).
///
/// `emit` cannot fail, so the first write error is kept and reported by
/// `flush`; later emissions are discarded.
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, error: None }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, emission: Emission) {
        if self.error.is_some() {
            return;
        }
        trace!("[Port] Writing {:?}", emission);
        if let Err(e) = self.writer.write_all(&emission.to_bytes()) {
            self.error = Some(e);
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_followed_by_a_space() {
        let mut sink = MemorySink::new();
        sink.emit(Emission::Number(16));
        sink.emit(Emission::Char(b'A'));
        assert_eq!(sink.text(), "16 A");
    }

    #[test]
    fn writer_sink_writes_raw_bytes() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(Emission::Char(b'h'));
        sink.emit(Emission::Char(b'i'));
        sink.emit(Emission::Number(255));
        sink.flush().unwrap();
        assert_eq!(sink.into_inner(), b"hi255 ".to_vec());
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_reports_first_error_on_flush() {
        let mut sink = WriterSink::new(Broken);
        sink.emit(Emission::Number(1));
        sink.emit(Emission::Number(2));
        let err = sink.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(sink.flush().is_ok());
    }
}
