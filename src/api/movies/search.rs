use serde::Serialize;

use crate::error::RequestError;
use crate::models::SearchResults;
use crate::ApiClient;

const SEARCH_ENDPOINT: &str = "/search";

/// What a search looks through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Movies and actors.
    #[default]
    All,
    /// Movie titles only.
    Movies,
    /// Actor names only.
    Actors,
}

impl SearchType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movies => "movies",
            Self::Actors => "actors",
        }
    }
}

/// Builder for a catalog search.
pub struct SearchBuilder<'a> {
    client: &'a ApiClient,
    query: &'a str,
    search_type: SearchType,
    limit: Option<u32>,
}

impl ApiClient {
    /// Search movie titles and actor names.
    ///
    /// Matches are words or titles starting with `query`. Queries shorter than
    /// three characters are capped to three results by the backend.
    ///
    /// # Example
    /// ```rust,ignore
    /// let results = api
    ///     .search("godf")
    ///     .search_type(SearchType::Movies)
    ///     .call()
    ///     .await?;
    /// ```
    #[must_use]
    pub const fn search<'a>(&'a self, query: &'a str) -> SearchBuilder<'a> {
        SearchBuilder {
            client: self,
            query,
            search_type: SearchType::All,
            limit: None,
        }
    }
}

impl SearchBuilder<'_> {
    /// Restrict the search to movies or actors *(default to both)*.
    #[must_use]
    pub const fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    /// Maximum number of results per kind *(default to 10)*.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute the search.
    pub async fn call(self) -> Result<SearchResults, RequestError> {
        let query = self.query.trim();

        if query.is_empty() {
            return Err(RequestError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }

        let limit = self.limit.map(|limit| limit.to_string());

        let mut query_parameters: Vec<(&str, &str)> =
            vec![("q", query), ("search_type", self.search_type.as_str())];

        if let Some(limit) = limit.as_deref() {
            query_parameters.push(("limit", limit));
        }

        let request = self
            .client
            .request_get(SEARCH_ENDPOINT, Some(query_parameters));

        self.client.execute_json(SEARCH_ENDPOINT, request).await
    }
}
