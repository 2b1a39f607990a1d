use crate::BlockId;
use crc32fast::Hasher;

/// Hands out block ids for one page.
///
/// Ids look like `<crc32 of title>-<n>`. A fresh generator for the same
/// title replays the same sequence, so callers holding a loaded tree pass
/// in which ids are already taken.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(page_title: &str) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(page_title.as_bytes());

        Self {
            prefix: format!("{:08x}", hasher.finalize()),
            count: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next id in the sequence for which `taken` is false
    pub fn next_free(&mut self, taken: impl Fn(&BlockId) -> bool) -> BlockId {
        loop {
            self.count += 1;
            let id = BlockId::new(format!("{}-{}", self.prefix, self.count));
            if !taken(&id) {
                return id;
            }
        }
    }
}
