use crate::item::Item;

pub trait Renderer: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, item: &Item, buf: &mut Vec<u8>);
}

pub trait Filter: Send + Sync {
    fn filter(&self, item: &Item) -> bool;
}

impl<F: Fn(&Item) -> bool + Send + Sync> Filter for F {
    fn filter(&self, item: &Item) -> bool {
        self(item)
    }
}

/// Passes items at `level` or more severe.
#[derive(Clone, Copy, Debug)]
pub struct LevelFilter(pub log::Level);

impl Filter for LevelFilter {
    fn filter(&self, item: &Item) -> bool {
        item.level <= self.0
    }
}

pub trait Appender: Send {
    fn renderer(&self) -> &str; // renderer name
    fn filter(&self, item: &Item) -> bool;
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;
    fn flush(&mut self) -> std::io::Result<()>;
}
