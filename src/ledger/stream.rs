// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Paginated block source consumed by the audit scan.

use crate::error::Result;
use crate::ledger::block::Block;
use serde::{Deserialize, Serialize};

/// Status code reported by a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStatus {
    Ok,
    /// No block follows the last one delivered.
    EndOfChain,
    Failed { code: u32, message: String },
}

impl PageStatus {
    pub const OK_CODE: u32 = 0;
    pub const END_OF_CHAIN_CODE: u32 = 1;

    /// Maps a raw status code as sent by the block service.
    pub fn from_code(code: u32, message: &str) -> Self {
        match code {
            Self::OK_CODE => PageStatus::Ok,
            Self::END_OF_CHAIN_CODE => PageStatus::EndOfChain,
            _ => PageStatus::Failed {
                code,
                message: message.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub status: PageStatus,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn end() -> Self {
        Self {
            status: PageStatus::EndOfChain,
            blocks: Vec::new(),
        }
    }
}

/// A source of pages. Each call may block waiting on the remote end.
pub trait BlockStream {
    fn next_page(&mut self) -> Result<Page>;
}

impl<S: BlockStream + ?Sized> BlockStream for &mut S {
    fn next_page(&mut self) -> Result<Page> {
        (**self).next_page()
    }
}

/// Serves a fixed list of blocks, `page_size` at a time.
pub struct VecBlockStream {
    blocks: Vec<Block>,
    cursor: usize,
    page_size: usize,
    repeat: bool,
    fail_at_page: Option<(usize, u32, String)>,
    pages_served: usize,
}

impl VecBlockStream {
    pub fn new(blocks: Vec<Block>, page_size: usize) -> Self {
        Self {
            blocks,
            cursor: 0,
            page_size: page_size.max(1),
            repeat: false,
            fail_at_page: None,
            pages_served: 0,
        }
    }

    /// Never reports end of chain: wraps around to the first block.
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Reports `code` instead of data on page number `page` (0-based).
    pub fn failing_at(mut self, page: usize, code: u32, message: &str) -> Self {
        self.fail_at_page = Some((page, code, message.to_string()));
        self
    }

    pub fn pages_served(&self) -> usize {
        self.pages_served
    }
}

impl BlockStream for VecBlockStream {
    fn next_page(&mut self) -> Result<Page> {
        let page_number = self.pages_served;
        self.pages_served += 1;

        if let Some((page, code, message)) = &self.fail_at_page {
            if *page == page_number {
                return Ok(Page {
                    status: PageStatus::from_code(*code, message),
                    blocks: Vec::new(),
                });
            }
        }

        if self.repeat && self.cursor >= self.blocks.len() {
            self.cursor = 0;
        }

        if self.cursor >= self.blocks.len() {
            return Ok(Page::end());
        }

        let end = (self.cursor + self.page_size).min(self.blocks.len());
        let blocks = self.blocks[self.cursor..end].to_vec();
        self.cursor = end;

        Ok(Page {
            status: PageStatus::Ok,
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(n: u64) -> Vec<Block> {
        (0..n).map(|i| Block::new(i, &[]).unwrap()).collect()
    }

    #[test]
    fn test_pages_then_end() {
        let mut stream = VecBlockStream::new(blocks(5), 2);

        assert_eq!(stream.next_page().unwrap().blocks.len(), 2);
        assert_eq!(stream.next_page().unwrap().blocks.len(), 2);
        assert_eq!(stream.next_page().unwrap().blocks.len(), 1);
        assert_eq!(stream.next_page().unwrap().status, PageStatus::EndOfChain);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PageStatus::from_code(0, ""), PageStatus::Ok);
        assert_eq!(PageStatus::from_code(1, ""), PageStatus::EndOfChain);
        assert!(matches!(PageStatus::from_code(4, "boom"), PageStatus::Failed { code: 4, .. }));
    }

    #[test]
    fn test_repeating_never_ends() {
        let mut stream = VecBlockStream::new(blocks(1), 1).repeating();
        for _ in 0..10 {
            assert_eq!(stream.next_page().unwrap().status, PageStatus::Ok);
        }
    }
}
