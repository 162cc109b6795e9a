//! Fault-tagging writer.
//!
//! When a copy from a reader into a writer fails, the `io::Error` alone does
//! not say which side raised it. [`TaggedWriter`] marks every error its inner
//! writer produces with a tag unique to that wrapper instance, so the caller
//! can later ask "was this mine?" by identity rather than by message.

use std::io::{self, Write};

use thiserror::Error;
use uuid::Uuid;

/// Carrier placed inside an `io::Error` raised by a [`TaggedWriter`].
#[derive(Debug, Error)]
#[error("{source}")]
struct TaggedIoError {
    tag: Uuid,
    source: io::Error,
}

/// A [`Write`] wrapper that tags the errors of its inner writer.
///
/// Tagged errors keep the inner error's [`io::ErrorKind`], so retry logic in
/// `write_all` and friends behaves as it would without the wrapper. An inner
/// writer that accepts zero bytes of a non-empty buffer is reported as a
/// tagged [`io::ErrorKind::WriteZero`].
#[derive(Debug)]
pub struct TaggedWriter<W> {
    inner: W,
    tag: Uuid,
}

impl<W: Write> TaggedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            tag: Uuid::new_v4(),
        }
    }

    /// Whether `err` was raised by this wrapper's inner writer.
    pub fn is_cause_of(&self, err: &io::Error) -> bool {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<TaggedIoError>())
            .is_some_and(|tagged| tagged.tag == self.tag)
    }

    /// Recover the original error if this wrapper raised `err`.
    ///
    /// Returns `Ok(cause)` for errors tagged by this instance and hands back
    /// every other error unchanged as `Err`.
    pub fn untag(&self, err: io::Error) -> Result<io::Error, io::Error> {
        if !self.is_cause_of(&err) {
            return Err(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<TaggedIoError>()) {
            Some(Ok(tagged)) => Ok(tagged.source),
            Some(Err(inner)) => Err(io::Error::new(kind, inner)),
            None => Err(io::Error::from(kind)),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn tag_error(&self, source: io::Error) -> io::Error {
        io::Error::new(
            source.kind(),
            TaggedIoError {
                tag: self.tag,
                source,
            },
        )
    }
}

impl<W: Write> Write for TaggedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.write(buf) {
            Ok(0) if !buf.is_empty() => Err(self.tag_error(io::Error::new(
                io::ErrorKind::WriteZero,
                "destination accepted no bytes",
            ))),
            Ok(n) => Ok(n),
            Err(e) => Err(self.tag_error(e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().map_err(|e| self.tag_error(e))
    }
}
