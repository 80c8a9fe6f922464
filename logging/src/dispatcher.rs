use std::sync::Mutex;

use utils::anyhow;

use crate::{appender::Renderer, item::Item, Appender};

pub(crate) struct Consumer {
    appenders: Vec<Box<dyn Appender>>,
    renderers: Vec<Box<dyn Renderer>>,
    // appender index -> renderer index
    map: Vec<usize>,
    bufs: Vec<Vec<u8>>,
}

impl Consumer {
    pub(crate) fn new(
        appenders: Vec<Box<dyn Appender>>,
        renderers: Vec<Box<dyn Renderer>>,
    ) -> anyhow::Result<Self> {
        if renderers.is_empty() {
            return anyhow::error("logging: empty renderers");
        }
        if appenders.is_empty() {
            return anyhow::error("logging: empty appenders");
        }

        let mut map = Vec::with_capacity(appenders.len());
        for appender in appenders.iter() {
            match renderers
                .iter()
                .position(|r| r.name().eq_ignore_ascii_case(appender.renderer()))
            {
                Some(ridx) => map.push(ridx),
                None => {
                    return anyhow::error(&format!(
                        "logging: renderer `{}` not found",
                        appender.renderer()
                    ));
                }
            }
        }

        let bufs = renderers.iter().map(|_| Vec::with_capacity(256)).collect();
        Ok(Self {
            appenders,
            renderers,
            map,
            bufs,
        })
    }

    pub(crate) fn consume(&mut self, item: &Item) {
        for buf in self.bufs.iter_mut() {
            buf.clear();
        }

        for (aidx, appender) in self.appenders.iter_mut().enumerate() {
            if !appender.filter(item) {
                continue;
            }
            let ridx = self.map[aidx];
            let buf = &mut self.bufs[ridx];
            if buf.is_empty() {
                self.renderers[ridx].render(item, buf);
            }
            if let Err(e) = appender.write_all(buf) {
                eprintln!("logging: write failed, {}", e);
            }
        }
    }

    pub(crate) fn flush(&mut self) {
        for appender in self.appenders.iter_mut() {
            if let Err(e) = appender.flush() {
                eprintln!("logging: flush failed, {}", e);
            }
        }
    }
}

pub struct Dispatcher {
    level: log::Level,
    consumer: Mutex<Consumer>,
}

impl log::Log for Dispatcher {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let item = Item::from(record);
        if let Ok(mut consumer) = self.consumer.lock() {
            consumer.consume(&item);
        }
    }

    fn flush(&self) {
        if let Ok(mut consumer) = self.consumer.lock() {
            consumer.flush();
        }
    }
}

/// Installs the process-wide logger. Fails if one is already set.
pub fn init(
    level: log::Level,
    appenders: Vec<Box<dyn Appender>>,
    renderers: Vec<Box<dyn Renderer>>,
) -> anyhow::Result<()> {
    let consumer = Consumer::new(appenders, renderers)?;
    let dispatcher = Box::new(Dispatcher {
        level,
        consumer: Mutex::new(consumer),
    });

    anyhow::result(log::set_logger(Box::leak(dispatcher)))?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use log::Level;

    use super::Consumer;
    use crate::{
        item::item, Appender, JsonLineRenderer, LevelFilter, LineRendererBuilder, Renderer,
    };
    use crate::{appender::Filter, item::Item};

    struct MemAppender {
        renderer: String,
        filter: LevelFilter,
        out: Arc<Mutex<Vec<u8>>>,
    }

    impl Appender for MemAppender {
        fn renderer(&self) -> &str {
            &self.renderer
        }

        fn filter(&self, item: &Item) -> bool {
            self.filter.filter(item)
        }

        fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
            self.out.lock().unwrap().extend_from_slice(buf);
            Ok(())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn line_renderer() -> Box<dyn Renderer> {
        let mut builder = LineRendererBuilder::new();
        builder.with_name("line").with_timelayout("T");
        Box::new(builder.finish())
    }

    #[test]
    fn test_unknown_renderer() {
        let out = Arc::new(Mutex::new(vec![]));
        let appender = MemAppender {
            renderer: "nope".to_string(),
            filter: LevelFilter(Level::Info),
            out,
        };
        assert!(Consumer::new(vec![Box::new(appender)], vec![line_renderer()]).is_err());
    }

    #[test]
    fn test_filter_and_fanout() {
        let errors = Arc::new(Mutex::new(vec![]));
        let all = Arc::new(Mutex::new(vec![]));
        let mut consumer = Consumer::new(
            vec![
                Box::new(MemAppender {
                    renderer: "line".to_string(),
                    filter: LevelFilter(Level::Error),
                    out: errors.clone(),
                }),
                Box::new(MemAppender {
                    renderer: "JSON".to_string(),
                    filter: LevelFilter(Level::Info),
                    out: all.clone(),
                }),
            ],
            vec![line_renderer(), Box::new(JsonLineRenderer::new("json", "T"))],
        )
        .unwrap();

        consumer.consume(&item(Level::Info, "hello", &[]));
        consumer.consume(&item(Level::Error, "boom", &[]));
        consumer.consume(&item(Level::Debug, "hidden", &[]));

        let errors = String::from_utf8(errors.lock().unwrap().clone()).unwrap();
        assert_eq!(errors, "[T] ERROR: boom\n");

        let all = String::from_utf8(all.lock().unwrap().clone()).unwrap();
        assert_eq!(all.lines().count(), 2);
        assert!(all.contains("\"message\":\"hello\""));
        assert!(!all.contains("hidden"));
    }
}
