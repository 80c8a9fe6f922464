use utils::luxon;

use crate::{item::Item, Renderer};

#[derive(Debug, Default)]
pub struct JsonLineRenderer {
    name: String,
    timelayout: String,
}

impl JsonLineRenderer {
    pub fn new(name: &str, timelayout: &str) -> Self {
        Self {
            name: name.to_string(),
            timelayout: timelayout.to_string(),
        }
    }
}

fn push_str(buf: &mut Vec<u8>, v: &str) {
    match serde_json::to_string(v) {
        Ok(quoted) => buf.extend(quoted.as_bytes()),
        Err(_) => buf.extend("\"\"".as_bytes()),
    }
}

impl Renderer for JsonLineRenderer {
    fn name(&self) -> &str {
        if self.name.is_empty() {
            return "JsonLineRenderer";
        }
        &self.name
    }

    fn render(&self, item: &Item, buf: &mut Vec<u8>) {
        let time_in_txt = if self.timelayout.is_empty() {
            luxon::fmtlocal(item.time, luxon::DEFAULT_TIME_LAYOUT)
        } else {
            luxon::fmtlocal(item.time, &self.timelayout)
        };

        buf.extend("{\"level\":".as_bytes());
        push_str(buf, item.level.as_str());
        buf.extend(",\"time\":".as_bytes());
        push_str(buf, &time_in_txt);
        if !item.target.is_empty() {
            buf.extend(",\"target\":".as_bytes());
            push_str(buf, &item.target);
        }
        buf.extend(",\"lineno\":".as_bytes());
        push_str(buf, &format!("{}:{}", item.file, item.line));
        buf.extend(",\"message\":".as_bytes());
        push_str(buf, &item.msg);

        if item.kvs.is_empty() {
            buf.extend("}\n".as_bytes());
            return;
        }

        buf.extend(",\"kvs\":{".as_bytes());
        let last = item.kvs.len() - 1;
        for (idx, pair) in item.kvs.iter().enumerate() {
            push_str(buf, &pair.0);
            buf.push(b':');
            buf.extend(pair.1.as_bytes());
            if idx != last {
                buf.push(b',');
            }
        }
        buf.extend("}}\n".as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::JsonLineRenderer;
    use crate::{item::item, Renderer};

    #[test]
    fn test_json_line() {
        let renderer = JsonLineRenderer::new("", "T");
        assert_eq!(renderer.name(), "JsonLineRenderer");

        let mut buf = vec![];
        renderer.render(
            &item(Level::Info, "upload \"a\"", &[("size", "12")]),
            &mut buf,
        );
        let line = String::from_utf8(buf).unwrap();
        let v: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["message"], "upload \"a\"");
        assert_eq!(v["kvs"]["size"], 12);
    }
}
