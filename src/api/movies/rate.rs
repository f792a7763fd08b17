use serde::Serialize;

use super::MOVIES_ENDPOINT;
use crate::error::RequestError;
use crate::models::Rating;
use crate::ApiClient;

/// A score, and optionally a review, for a movie.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RatingInput {
    /// Score between 1 and 10.
    pub rating: f64,
    /// Optional review text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RatingInput {
    /// A bare score.
    #[must_use]
    pub const fn new(rating: f64) -> Self {
        Self {
            rating,
            comment: None,
        }
    }

    /// Attaches a review.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl ApiClient {
    /// Rate a movie. Rating the same movie again replaces the previous rating.
    ///
    /// Requires a session.
    ///
    /// # Example
    /// ```rust,ignore
    /// api.rate_movie(42, &RatingInput::new(8.5).comment("Great pacing"))
    ///     .await?;
    /// ```
    pub async fn rate_movie(&self, movie_id: i64, rating: &RatingInput) -> Result<Rating, RequestError> {
        let path = format!("{MOVIES_ENDPOINT}/{movie_id}/rate");
        let request = self.request_post_json(&path, rating);

        self.execute_json(&path, request).await
    }
}
