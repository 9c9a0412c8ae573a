use super::paginator::DEFAULT_PAGE_SIZE;

/// Everything a [`Collector`](super::Collector) needs to know about the forge it harvests
#[derive(Clone)]
pub struct HarvestConfig {
    /// API root, e.g. `https://gitlab.com/api/v4`
    pub base_url: String,

    /// Personal access token sent with the pipeline and detail lookups
    pub token: Option<String>,

    /// Projects requested per listing page
    pub page_size: u8,

    /// Maximum number of projects enriched at the same time
    pub concurrency: usize,
}

impl HarvestConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: 1,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

impl core::fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("page_size", &self.page_size)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
