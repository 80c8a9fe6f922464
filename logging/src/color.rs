use log::Level;

/// A basic SGR style: one of the 8 ANSI foreground colours, optionally bold
/// or bright. Truecolor is skipped, most consoles that show a log tail do
/// not support it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Bright(&'static Color),
    Bold(&'static Color),
}

impl Color {
    fn code(&self, out: &mut String) {
        match self {
            Color::Black => out.push_str("30"),
            Color::Red => out.push_str("31"),
            Color::Green => out.push_str("32"),
            Color::Yellow => out.push_str("33"),
            Color::Blue => out.push_str("34"),
            Color::Magenta => out.push_str("35"),
            Color::Cyan => out.push_str("36"),
            Color::White => out.push_str("37"),
            Color::Bright(inner) => {
                // 3x -> 9x
                let mut base = String::new();
                inner.code(&mut base);
                match base.strip_prefix('3') {
                    Some(rest) => {
                        out.push('9');
                        out.push_str(rest);
                    }
                    None => out.push_str(&base),
                }
            }
            Color::Bold(inner) => {
                out.push_str("1;");
                inner.code(out);
            }
        }
    }
}

#[derive(Debug)]
pub struct LevelColors {
    pub trace: Option<Color>,
    pub debug: Option<Color>,
    pub info: Option<Color>,
    pub warn: Option<Color>,
    pub error: Option<Color>,
}

impl LevelColors {
    pub fn get(&self, level: Level) -> Option<Color> {
        match level {
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        }
    }
}

impl Default for LevelColors {
    fn default() -> Self {
        Self {
            trace: Some(Color::Bright(&Color::Black)),
            debug: Some(Color::Blue),
            info: Some(Color::Green),
            warn: Some(Color::Bold(&Color::Yellow)),
            error: Some(Color::Bold(&Color::Red)),
        }
    }
}

#[derive(Debug)]
pub struct ColorScheme {
    pub levels: Option<LevelColors>,
    pub time: Option<Color>,
    pub key: Option<Color>,
    pub value: Option<Color>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            levels: Some(Default::default()),
            time: Some(Color::Bright(&Color::Black)),
            key: Some(Color::Magenta),
            value: Some(Color::Cyan),
        }
    }
}

pub(crate) fn with_color(buf: &mut Vec<u8>, txt: &str, color: Option<Color>) {
    match color {
        Some(color) => {
            let mut code = String::with_capacity(8);
            color.code(&mut code);
            buf.extend(format!("\x1b[{}m", code).as_bytes());
            buf.extend(txt.as_bytes());
            buf.extend("\x1b[0m".as_bytes());
        }
        None => {
            buf.extend(txt.as_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{with_color, Color};

    fn paint(color: Option<Color>) -> String {
        let mut buf = vec![];
        with_color(&mut buf, "x", color);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_with_color() {
        assert_eq!(paint(None), "x");
        assert_eq!(paint(Some(Color::Green)), "\x1b[32mx\x1b[0m");
        assert_eq!(paint(Some(Color::Bright(&Color::Black))), "\x1b[90mx\x1b[0m");
        assert_eq!(paint(Some(Color::Bold(&Color::Red))), "\x1b[1;31mx\x1b[0m");
    }
}
