use utils::luxon;

use crate::{
    appender::Renderer,
    color::{with_color, ColorScheme},
    item::Item,
};

/// `[2024-01-02 03:04:05] INFO: message { key: value }`
#[derive(Default)]
pub struct LineRenderer {
    name: String,
    scheme: Option<ColorScheme>,
    timelayout: String,
}

impl Renderer for LineRenderer {
    fn name(&self) -> &str {
        if self.name.is_empty() {
            return "LineRenderer";
        }
        &self.name
    }

    fn render(&self, item: &Item, buf: &mut Vec<u8>) {
        let scheme = self.scheme.as_ref();
        let level = scheme
            .and_then(|s| s.levels.as_ref())
            .and_then(|colors| colors.get(item.level));

        let time_in_txt = if self.timelayout.is_empty() {
            luxon::fmtlocal(item.time, luxon::DEFAULT_TIME_LAYOUT)
        } else {
            luxon::fmtlocal(item.time, &self.timelayout)
        };
        buf.push(b'[');
        with_color(buf, &time_in_txt, scheme.and_then(|s| s.time));
        buf.extend("] ".as_bytes());

        with_color(buf, item.level.as_str(), level);
        buf.extend(": ".as_bytes());
        buf.extend(item.msg.as_bytes());

        if item.kvs.is_empty() {
            buf.push(b'\n');
            return;
        }

        buf.extend(" { ".as_bytes());
        let last = item.kvs.len() - 1;
        for (idx, pair) in item.kvs.iter().enumerate() {
            with_color(buf, pair.0.as_str(), scheme.and_then(|s| s.key));
            buf.extend(": ".as_bytes());
            with_color(buf, pair.1.as_str(), scheme.and_then(|s| s.value));
            if idx != last {
                buf.extend(", ".as_bytes());
            }
        }
        buf.extend(" }\n".as_bytes());
    }
}

pub struct LineRendererBuilder {
    ins: LineRenderer,
}

impl LineRendererBuilder {
    pub fn new() -> Self {
        Self {
            ins: Default::default(),
        }
    }

    pub fn with_name(&mut self, name: &str) -> &mut Self {
        self.ins.name = name.to_string();
        self
    }

    pub fn with_scheme(&mut self, scheme: ColorScheme) -> &mut Self {
        self.ins.scheme = Some(scheme);
        self
    }

    pub fn with_timelayout(&mut self, layout: &str) -> &mut Self {
        self.ins.timelayout = layout.to_string();
        self
    }

    pub fn finish(self) -> LineRenderer {
        self.ins
    }
}

impl Default for LineRendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::LineRendererBuilder;
    use crate::{item::item, ColorScheme, Renderer};

    #[test]
    fn test_plain_line() {
        let mut builder = LineRendererBuilder::new();
        builder.with_timelayout("T");
        let renderer = builder.finish();

        let mut buf = vec![];
        renderer.render(&item(Level::Info, "Port set to 9000", &[]), &mut buf);
        assert_eq!(String::from_utf8(buf).unwrap(), "[T] INFO: Port set to 9000\n");
    }

    #[test]
    fn test_kvs() {
        let mut builder = LineRendererBuilder::new();
        builder.with_timelayout("T");
        let renderer = builder.finish();

        let mut buf = vec![];
        renderer.render(
            &item(Level::Error, "bind failed", &[("port", "80"), ("host", "\"::\"")]),
            &mut buf,
        );
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[T] ERROR: bind failed { port: 80, host: \"::\" }\n"
        );
    }

    #[test]
    fn test_colors() {
        let mut builder = LineRendererBuilder::new();
        builder.with_scheme(ColorScheme::default()).with_name("color");
        let renderer = builder.finish();
        assert_eq!(renderer.name(), "color");

        let mut buf = vec![];
        renderer.render(&item(Level::Warn, "careful", &[]), &mut buf);
        let line = String::from_utf8(buf).unwrap();
        assert!(line.contains("\x1b[1;33mWARN\x1b[0m"));
        assert!(line.ends_with("careful\n"));
    }
}
