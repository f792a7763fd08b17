use super::MOVIES_ENDPOINT;
use crate::error::RequestError;
use crate::models::MovieDetail;
use crate::ApiClient;

impl ApiClient {
    /// Fetch a movie with its cast, ratings and rating summary.
    ///
    /// Each call counts as a view on the backend.
    ///
    /// # Example
    /// ```rust,ignore
    /// let detail = api.movie(42).await?;
    ///
    /// for part in &detail.actors {
    ///     println!("{} as {:?}", part.actor.name, part.character_name);
    /// }
    /// ```
    pub async fn movie(&self, movie_id: i64) -> Result<MovieDetail, RequestError> {
        let path = format!("{MOVIES_ENDPOINT}/{movie_id}");
        let request = self.request_get(&path, None);

        self.execute_json(&path, request).await
    }
}
