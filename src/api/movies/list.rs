use super::MOVIES_ENDPOINT;
use crate::error::RequestError;
use crate::locale::Locale;
use crate::models::Movie;
use crate::ApiClient;

/// Builder for fetching the list of popular movies.
pub struct MovieListBuilder<'a> {
    client: &'a ApiClient,
    lang: Option<Locale>,
    skip: Option<u32>,
    limit: Option<u32>,
}

impl ApiClient {
    /// Fetch movies ordered by popularity, most popular first.
    ///
    /// # Example
    /// ```rust,ignore
    /// let movies = api
    ///     .movies()
    ///     .lang(Locale::Tr)
    ///     .limit(10)
    ///     .call()
    ///     .await?;
    /// ```
    #[must_use]
    pub const fn movies(&self) -> MovieListBuilder<'_> {
        MovieListBuilder {
            client: self,
            lang: None,
            skip: None,
            limit: None,
        }
    }
}

impl MovieListBuilder<'_> {
    /// Language the titles and summaries should be served in.
    #[must_use]
    pub const fn lang(mut self, lang: Locale) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Number of movies to skip *(default to 0)*.
    #[must_use]
    pub const fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Maximum number of movies returned *(default to 20)*.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute the request and return the movies in the order the API sent them.
    pub async fn call(self) -> Result<Vec<Movie>, RequestError> {
        let skip = self.skip.map(|skip| skip.to_string());
        let limit = self.limit.map(|limit| limit.to_string());

        let mut query_parameters: Vec<(&str, &str)> = vec![];

        if let Some(lang) = self.lang {
            query_parameters.push(("lang", lang.code()));
        }

        if let Some(skip) = skip.as_deref() {
            query_parameters.push(("skip", skip));
        }

        if let Some(limit) = limit.as_deref() {
            query_parameters.push(("limit", limit));
        }

        let params = (!query_parameters.is_empty()).then_some(query_parameters);
        let request = self.client.request_get(MOVIES_ENDPOINT, params);

        self.client.execute_json(MOVIES_ENDPOINT, request).await
    }
}
