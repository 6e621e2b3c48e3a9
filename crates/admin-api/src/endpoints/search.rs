use admin_core::models::{DocumentDto, DocumentSearch, Page};

use super::DEFAULT_PAGE_SIZE;
use crate::client::ApiClient;
use crate::error::ApiError;

pub struct Search<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn search(&self) -> Search<'_> {
        Search { client: self }
    }
}

fn page_query(page: u32, size: u32) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.to_string()),
        ("size".to_string(), size.to_string()),
    ]
}

impl Search<'_> {
    pub async fn documents(&self, params: &DocumentSearch) -> Result<Page<DocumentDto>, ApiError> {
        self.client
            .get_with_query("/api/search/documents", params.to_query())
            .await
    }

    /// Full-text search over document contents.
    pub async fn content(&self, text: &str) -> Result<Vec<DocumentDto>, ApiError> {
        self.client
            .get_with_query(
                "/api/search/content",
                vec![("text".to_string(), text.to_string())],
            )
            .await
    }

    pub async fn recent(&self) -> Result<Vec<DocumentDto>, ApiError> {
        self.client.get("/api/search/recent").await
    }

    pub async fn most_viewed(&self, page: u32, size: u32) -> Result<Vec<DocumentDto>, ApiError> {
        self.client
            .get_with_query("/api/search/most-viewed", page_query(page, size))
            .await
    }

    pub async fn recommended(&self, page: u32, size: u32) -> Result<Vec<DocumentDto>, ApiError> {
        self.client
            .get_with_query("/api/search/recommended", page_query(page, size))
            .await
    }

    /// First page of most-viewed documents at the default size.
    pub async fn most_viewed_first_page(&self) -> Result<Vec<DocumentDto>, ApiError> {
        self.most_viewed(0, DEFAULT_PAGE_SIZE).await
    }
}
