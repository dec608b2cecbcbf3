//! Redaction of private-key material in log output.

use regex::Regex;
use std::fmt;
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing_subscriber::fmt::MakeWriter;

// Raw or `\n`-escaped PEM blocks.
static PEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-----BEGIN [A-Z ]*PRIVATE KEY-----(?s:.*?)-----END [A-Z ]*PRIVATE KEY-----")
        .expect("PEM pattern is valid")
});

// `private_key=...`, `"private_key": "..."`, `FIREBASE_PRIVATE_KEY=...`
static KEY_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']?((?:firebase_)?private_key)["']?\s*[:=]\s*["']?[^"'\s,}]+["']?"#)
        .expect("key field pattern is valid")
});

/// Redacts private-key material from log text
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a new secret scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = PEM_PATTERN.replace_all(message, "[PRIVATE_KEY_REDACTED]");
        KEY_FIELD_PATTERN
            .replace_all(&scrubbed, "${1}=[REDACTED]")
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

/// `MakeWriter` wrapper that scrubs every formatted event before it reaches
/// the underlying sink.
///
/// The fmt layer renders a whole event into one buffer and hands it over in a
/// single `write_all`, so patterns never straddle two writes.
#[derive(Debug, Clone)]
pub struct ScrubbingWriter<M> {
    inner: M,
    scrubber: SecretScrubber,
}

impl<M> ScrubbingWriter<M> {
    /// Wrap `inner` so everything written through it is scrubbed.
    pub const fn new(inner: M) -> Self {
        Self {
            inner,
            scrubber: SecretScrubber::new(),
        }
    }
}

impl<'a, M> MakeWriter<'a> for ScrubbingWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = ScrubbedWrite<'a, M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        ScrubbedWrite {
            inner: self.inner.make_writer(),
            scrubber: &self.scrubber,
        }
    }
}

/// Writer handed out by [`ScrubbingWriter`].
pub struct ScrubbedWrite<'a, W> {
    inner: W,
    scrubber: &'a SecretScrubber,
}

impl<W: Write> Write for ScrubbedWrite<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let scrubbed = self.scrubber.scrub_message(&text);
        self.inner.write_all(scrubbed.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
