//! Records exchanged with the catalog API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A registered user.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    /// The user's unique ID.
    pub id: i64,
    /// The user's email address.
    pub email: String,
    /// Country key picked at registration.
    #[serde(default)]
    pub country: Option<String>,
    /// City key picked at registration.
    #[serde(default)]
    pub city: Option<String>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Profile photo, either a URL or inline base64 data.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// When the account was created.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Summary of a movie, as listed on the home and search pages.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    /// The movie's unique ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Short plot summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Year of release.
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Running time in minutes.
    #[serde(default)]
    pub duration: Option<i32>,
    /// Poster URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Trailer URL.
    #[serde(default)]
    pub trailer_url: Option<String>,
    /// IMDb score, out of 10.
    #[serde(default)]
    pub imdb_score: Option<f64>,
    /// Popularity computed by the backend from ratings and views.
    #[serde(default)]
    pub popularity_score: f64,
    /// How many times the detail page was opened.
    #[serde(default)]
    pub view_count: i64,
    /// When the movie was added to the catalog.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An actor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Actor {
    /// The actor's unique ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Portrait URL.
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// An actor's part in a movie.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MovieActor {
    /// The actor.
    pub actor: Actor,
    /// Name of the character played.
    #[serde(default)]
    pub character_name: Option<String>,
}

/// A user's rating of a movie.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Rating {
    /// The rating's unique ID.
    pub id: i64,
    /// Author of the rating.
    pub user_id: i64,
    /// Rated movie.
    pub movie_id: i64,
    /// Score between 1 and 10.
    pub rating: f64,
    /// Optional review text.
    #[serde(default)]
    pub comment: Option<String>,
    /// When the rating was submitted.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Author details, when the backend embeds them.
    #[serde(default)]
    pub user: Option<User>,
}

/// Everything shown on a movie's detail page.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MovieDetail {
    /// The movie itself.
    #[serde(flatten)]
    pub movie: Movie,
    /// Cast.
    #[serde(default)]
    pub actors: Vec<MovieActor>,
    /// Ratings left by users.
    #[serde(default)]
    pub ratings: Vec<Rating>,
    /// Mean of all ratings, if there is at least one.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Number of ratings.
    #[serde(default)]
    pub total_ratings: i64,
}

/// Result of a catalog search.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchResults {
    /// Matching movies.
    #[serde(default)]
    pub movies: Vec<Movie>,
    /// Matching actors.
    #[serde(default)]
    pub actors: Vec<Actor>,
}

/// A movie saved to the user's watchlist.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WatchlistItem {
    /// The watchlist entry ID.
    pub id: i64,
    /// The saved movie.
    pub movie: Movie,
    /// When the movie was saved.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub added_at: Option<DateTime<Utc>>,
}

/// Acknowledgement returned by endpoints that have nothing else to say.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    /// Readable confirmation.
    pub message: String,
}

const fn default_true() -> bool {
    true
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 ones, which are taken as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
