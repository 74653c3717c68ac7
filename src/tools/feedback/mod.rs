//! Feedback Tools
//!
//! Projects sites into launcher result items and hands the payload to a sink.

pub mod types;

pub use types::*;

use std::io::Write;

use crate::error::Result;
use crate::types::Site;

impl From<&Site> for Item {
    fn from(site: &Site) -> Self {
        Item {
            title: site.name.clone(),
            subtitle: site.description.clone(),
            arg: site.url.clone(),
            autocomplete: site.name.clone(),
            valid: true,
            icon: (!site.icon.is_empty()).then(|| Icon {
                path: site.icon.clone(),
            }),
        }
    }
}

impl Feedback {
    pub fn from_sites(sites: &[Site]) -> Self {
        Feedback {
            items: sites.iter().map(Item::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Where the feedback payload goes.
pub trait FeedbackSink {
    fn send(&mut self, feedback: &Feedback) -> Result<()>;
}

/// Writes the payload as JSON, followed by a newline.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FeedbackSink for WriterSink<W> {
    fn send(&mut self, feedback: &Feedback) -> Result<()> {
        serde_json::to_writer(&mut self.out, feedback)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Sink for the real launcher: stdout.
pub type StdoutSink = WriterSink<std::io::Stdout>;

impl Default for StdoutSink {
    fn default() -> Self {
        WriterSink::new(std::io::stdout())
    }
}

/// Keeps every payload it is sent.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub sent: Vec<Feedback>,
}

impl MemorySink {
    pub fn last(&self) -> Option<&Feedback> {
        self.sent.last()
    }
}

impl FeedbackSink for MemorySink {
    fn send(&mut self, feedback: &Feedback) -> Result<()> {
        self.sent.push(feedback.clone());
        Ok(())
    }
}
