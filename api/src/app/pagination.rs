//! Pagination value objects
//!
//! `PageRequest` describes a zero-based page; `PageResponse` carries one page of results
//! together with the navigation metadata derived from the total element count.

use serde::Serialize;

use crate::error::DomainError;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Build a request, rejecting sizes outside 1..=100
    pub fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::InvalidArgument(
                "Size must be positive".to_string(),
            ));
        }
        if size > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidArgument(format!(
                "Size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements to skip
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
        }
    }

    /// Previous page, or this one when already on the first page
    pub fn previous(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    pub fn of(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size));
        let page = u64::from(request.page);

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            has_next: page + 1 < total_pages,
            has_previous: request.page > 0,
        }
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self {
            content: Vec::new(),
            page: request.page,
            size: request.size,
            total_elements: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    /// Convert the content while keeping the metadata
    pub fn map<U, F>(self, f: F) -> PageResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
