pub mod auth;
pub mod movies;
pub mod profile;
pub mod watchlist;
