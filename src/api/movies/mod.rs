pub use list::MovieListBuilder;
pub use rate::RatingInput;
pub use search::{SearchBuilder, SearchType};

mod detail;
mod list;
mod rate;
mod search;

pub(crate) const MOVIES_ENDPOINT: &str = "/movies";
