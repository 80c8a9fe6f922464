use std::io::Write;

use crate::{appender::Filter, item::Item, Appender};

/// Writes rendered lines to stderr, stdout stays free for the operator.
pub struct ConsoleAppender {
    rendername: String,
    filter: Box<dyn Filter>,
}

impl Appender for ConsoleAppender {
    fn renderer(&self) -> &str {
        &self.rendername
    }

    fn filter(&self, item: &Item) -> bool {
        self.filter.filter(item)
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        std::io::stderr().write_all(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()
    }
}

impl ConsoleAppender {
    pub fn new(renderer: &str, filter: Box<dyn Filter>) -> Self {
        Self {
            rendername: renderer.to_string(),
            filter,
        }
    }
}
