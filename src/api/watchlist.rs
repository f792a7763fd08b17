use crate::error::RequestError;
use crate::models::{MessageResponse, WatchlistItem};
use crate::ApiClient;

const WATCHLIST_ENDPOINT: &str = "/me/watchlist";

impl ApiClient {
    /// Save a movie to the signed-in user's watchlist.
    ///
    /// Requires a session. Adding a movie twice is rejected with
    /// [`RequestError::BadRequest`].
    pub async fn add_to_watchlist(&self, movie_id: i64) -> Result<MessageResponse, RequestError> {
        let path = format!("/movies/{movie_id}/watchlist");
        let request = self.request_post(&path);

        self.execute_json(&path, request).await
    }

    /// Fetch the signed-in user's watchlist.
    ///
    /// Requires a session.
    pub async fn watchlist(&self) -> Result<Vec<WatchlistItem>, RequestError> {
        let request = self.request_get(WATCHLIST_ENDPOINT, None);

        self.execute_json(WATCHLIST_ENDPOINT, request).await
    }
}
