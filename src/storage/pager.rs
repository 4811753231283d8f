use std::{collections::HashMap, path::Path};

use tracing::{debug, trace};

use crate::{
    storage::{eviction::FrequencyList, file_handler::FileHandler},
    types::{PAGE_SIZE, PageId, error::DatabaseError, page::Page},
};

/// Bounded page cache in front of a single store file.
///
/// Every page read or write of a store goes through here. Pages are loaded on
/// first reference and evicted least-frequently-used first, oldest first among
/// equals. Eviction never writes a page back: callers flush explicitly after
/// each mutation.
pub struct Pager {
    file_handler: FileHandler,
    capacity: usize,
    pages: HashMap<PageId, Page>,
    frequencies: FrequencyList,
}

fn last_page_of(page_count: u64) -> PageId {
    PageId::try_from(page_count.saturating_sub(1)).unwrap_or(PageId::MAX)
}

impl Pager {
    pub fn new(file_handler: FileHandler, capacity: usize) -> Result<Self, DatabaseError> {
        if capacity == 0 {
            return Err(DatabaseError::InvalidCacheCapacity);
        }
        Ok(Self {
            file_handler,
            capacity,
            pages: HashMap::with_capacity(capacity),
            frequencies: FrequencyList::new(),
        })
    }

    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self, DatabaseError> {
        Self::new(FileHandler::open(path)?, capacity)
    }

    fn page_offset(page_number: PageId) -> u64 {
        page_number as u64 * PAGE_SIZE as u64
    }

    fn load_from_disk(&mut self, page_number: PageId) -> Result<Page, DatabaseError> {
        let mut buffer = vec![0u8; PAGE_SIZE];
        self.file_handler
            .read_at(Self::page_offset(page_number), &mut buffer)?;
        Page::from_bytes(page_number, &buffer)
    }

    fn load_page(&mut self, page_number: PageId) -> Result<(), DatabaseError> {
        let page = self.load_from_disk(page_number)?;

        if self.pages.len() >= self.capacity {
            if let Some(victim) = self.frequencies.pop_least_frequent() {
                self.pages.remove(&victim);
                debug!(page = victim, "pager.evict");
            }
        }

        self.frequencies.insert(page_number);
        self.pages.insert(page_number, page);
        debug!(page = page_number, cached = self.pages.len(), "pager.load");
        Ok(())
    }

    /// Returns the cached page, loading it from disk on a miss.
    pub fn get_page(&mut self, page_number: PageId) -> Result<&mut Page, DatabaseError> {
        if self.pages.contains_key(&page_number) {
            self.frequencies.touch(page_number);
            trace!(page = page_number, "pager.hit");
        } else {
            self.load_page(page_number)?;
        }

        self.pages
            .get_mut(&page_number)
            .ok_or(DatabaseError::PageNotCached {
                page_id: page_number,
            })
    }

    /// Writes the full image of a resident page back to its slot in the file.
    pub fn flush_page(&mut self, page_number: PageId) -> Result<(), DatabaseError> {
        let page = self
            .pages
            .get(&page_number)
            .ok_or(DatabaseError::PageNotCached {
                page_id: page_number,
            })?;
        self.file_handler
            .write_at(Self::page_offset(page_number), page.as_bytes())?;
        trace!(page = page_number, "pager.flush");
        Ok(())
    }

    /// Highest page number implied by the file length, 0 for an empty file.
    /// Files longer than the page id space report `PageId::MAX`.
    pub fn last_page(&self) -> PageId {
        last_page_of(self.page_count())
    }

    pub fn page_count(&self) -> u64 {
        self.file_handler.len() / PAGE_SIZE as u64
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn is_cached(&self, page_number: PageId) -> bool {
        self.pages.contains_key(&page_number)
    }

    pub fn access_count(&self, page_number: PageId) -> Option<u64> {
        self.frequencies.frequency(page_number)
    }
}
