use std::io::Write;

use utils::anyhow;

use crate::{appender::Appender, appender::Filter, item::Item};

pub struct FileAppender {
    inner: std::io::LineWriter<std::fs::File>,
    filter: Box<dyn Filter>,
    render_name: String,
}

impl Appender for FileAppender {
    #[inline]
    fn renderer(&self) -> &str {
        &self.render_name
    }

    #[inline]
    fn filter(&self, item: &Item) -> bool {
        self.filter.filter(item)
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl FileAppender {
    pub fn new(fp: &str, renderer: &str, filter: Box<dyn Filter>) -> anyhow::Result<Self> {
        let file = anyhow::result(
            std::fs::File::options()
                .append(true)
                .create(true)
                .open(fp),
        )?;

        Ok(Self {
            inner: std::io::LineWriter::new(file),
            render_name: renderer.to_string(),
            filter,
        })
    }
}
