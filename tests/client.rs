mod common;

use httpmock::prelude::*;
use movie_catalog_client::{
    ApiClient, ErrorDetail, Locale, RatingInput, RequestError, SearchType, TokenStorage,
};
use serde_json::json;

use common::{harness, movie_json, user_json};

#[tokio::test]
async fn stored_token_is_attached_to_requests() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/me/watchlist")
                .header("Authorization", "Bearer stored-token");
            then.status(200).json_body(json!([]));
        })
        .await;

    let h = harness(&server.base_url(), Some("stored-token"));
    let watchlist = h.api.watchlist().await.unwrap();

    assert!(watchlist.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn clearing_the_token_stops_attaching_it() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/movies").header_exists("Authorization");
            then.status(200).json_body(json!([]));
        })
        .await;

    let h = harness(&server.base_url(), None);

    h.api.set_auth_token(Some("abc"));
    h.api.movies().call().await.unwrap();

    h.api.set_auth_token(None);
    let unmatched = h.api.movies().call().await;

    assert!(matches!(unmatched, Err(RequestError::NotFound(_))));
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn json_content_type_is_sent_with_a_custom_reqwest_client() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/movies")
                .header("content-type", "application/json");
            then.status(200).json_body(json!([]));
        })
        .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/movies/3/watchlist")
                .header("content-type", "application/json");
            then.status(200)
                .json_body(json!({"message": "Movie added to watchlist"}));
        })
        .await;

    let api = ApiClient::builder(&server.base_url())
        .reqwest_client(reqwest::Client::new())
        .build()
        .unwrap();

    api.movies().call().await.unwrap();
    api.add_to_watchlist(3).await.unwrap();

    list.assert_async().await;
    add.assert_async().await;
}

#[tokio::test]
async fn unauthorized_on_protected_endpoint_discards_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me/watchlist");
            then.status(401)
                .json_body(json!({"detail": "Could not validate credentials"}));
        })
        .await;

    let h = harness(&server.base_url(), Some("expired"));
    let error = h.api.watchlist().await.unwrap_err();

    assert!(matches!(
        &error,
        RequestError::Unauthorized(Some(ErrorDetail::Message(message))) if message == "Could not validate credentials"
    ));
    assert_eq!(h.storage.get().unwrap(), None);
    assert!(!h.api.has_auth_token());
    assert_eq!(h.navigator.location().as_deref(), Some("/login"));
}

#[tokio::test]
async fn unauthorized_on_login_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(401)
                .json_body(json!({"detail": "Incorrect email or password"}));
        })
        .await;

    let h = harness(&server.base_url(), Some("still-valid"));
    let result = h
        .api
        .login(&movie_catalog_client::Credentials::new("a@b.com", "wrong"))
        .await;

    assert!(matches!(result, Err(RequestError::Unauthorized(_))));
    assert_eq!(h.storage.get().unwrap().as_deref(), Some("still-valid"));
    assert!(h.api.has_auth_token());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn unauthorized_without_stored_token_does_not_navigate() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/movies/5/watchlist");
            then.status(401).json_body(json!({"detail": "Not authenticated"}));
        })
        .await;

    let h = harness(&server.base_url(), None);
    let result = h.api.add_to_watchlist(5).await;

    assert!(matches!(result, Err(RequestError::Unauthorized(_))));
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn unreachable_server_is_reported() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let h = harness(&format!("http://127.0.0.1:{port}"), None);
    let result = h.api.movies().call().await;

    assert!(matches!(result, Err(RequestError::Unreachable(_))));
}

#[tokio::test]
async fn movie_list_sends_query_and_keeps_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/movies")
                .query_param("lang", "tr")
                .query_param("skip", "20")
                .query_param("limit", "2");
            then.status(200).json_body(json!([
                movie_json(2, "The Godfather"),
                movie_json(1, "The Shawshank Redemption"),
            ]));
        })
        .await;

    let h = harness(&server.base_url(), None);
    let movies = h
        .api
        .movies()
        .lang(Locale::Tr)
        .skip(20)
        .limit(2)
        .call()
        .await
        .unwrap();

    mock.assert_async().await;
    let titles: Vec<_> = movies.iter().map(|movie| movie.title.as_str()).collect();
    assert_eq!(titles, ["The Godfather", "The Shawshank Redemption"]);
}

#[tokio::test]
async fn unexpected_body_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movies");
            then.status(200).json_body(json!({"items": []}));
        })
        .await;

    let h = harness(&server.base_url(), None);

    assert!(matches!(
        h.api.movies().call().await,
        Err(RequestError::ParseError(_))
    ));
}

#[tokio::test]
async fn movie_detail_includes_cast_and_ratings() {
    let server = MockServer::start_async().await;
    let mut body = movie_json(9, "Alien");
    body["actors"] = json!([{"actor": {"id": 1, "name": "Sigourney Weaver", "bio": null, "photo_url": null}, "character_name": "Ripley"}]);
    body["ratings"] = json!([{
        "id": 4, "user_id": 1, "movie_id": 9, "rating": 9.0, "comment": "Classic",
        "created_at": "2024-03-02T10:00:00", "user": user_json(1, "a@b.com")
    }]);
    body["average_rating"] = json!(9.0);
    body["total_ratings"] = json!(1);

    server
        .mock_async(move |when, then| {
            when.method(GET).path("/movies/9");
            then.status(200).json_body(body);
        })
        .await;

    let h = harness(&server.base_url(), None);
    let detail = h.api.movie(9).await.unwrap();

    assert_eq!(detail.movie.title, "Alien");
    assert_eq!(detail.actors[0].actor.name, "Sigourney Weaver");
    assert_eq!(detail.ratings[0].user.as_ref().map(|u| u.email.as_str()), Some("a@b.com"));
    assert_eq!(detail.total_ratings, 1);
}

#[tokio::test]
async fn movie_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movies/404");
            then.status(404).json_body(json!({"detail": "Movie not found"}));
        })
        .await;

    let h = harness(&server.base_url(), None);
    let error = h.api.movie(404).await.unwrap_err();

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.detail_message(), Some("Movie not found"));
}

#[tokio::test]
async fn search_sends_type_and_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "god")
                .query_param("search_type", "movies")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "movies": [movie_json(2, "The Godfather")],
                "actors": []
            }));
        })
        .await;

    let h = harness(&server.base_url(), None);
    let results = h
        .api
        .search(" god ")
        .search_type(SearchType::Movies)
        .limit(5)
        .call()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(results.movies.len(), 1);
    assert!(results.actors.is_empty());
}

#[tokio::test]
async fn empty_search_is_rejected_locally() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/search");
            then.status(200).json_body(json!({}));
        })
        .await;

    let h = harness(&server.base_url(), None);
    let result = h.api.search("   ").call().await;

    assert!(matches!(result, Err(RequestError::InvalidInput(_))));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn rating_is_posted_as_json() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/movies/3/rate")
                .header("Authorization", "Bearer abc")
                .json_body(json!({"rating": 8.5, "comment": "Tense"}));
            then.status(200).json_body(json!({
                "id": 11, "user_id": 1, "movie_id": 3, "rating": 8.5, "comment": "Tense",
                "created_at": "2024-03-02T10:00:00+00:00"
            }));
        })
        .await;

    let h = harness(&server.base_url(), Some("abc"));
    let rating = h
        .api
        .rate_movie(3, &RatingInput::new(8.5).comment("Tense"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(rating.id, 11);
    assert!(rating.user.is_none());
}

#[tokio::test]
async fn watchlist_duplicate_is_a_bad_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/movies/3/watchlist");
            then.status(400)
                .json_body(json!({"detail": "Movie already in your watchlist"}));
        })
        .await;

    let h = harness(&server.base_url(), Some("abc"));
    let error = h.api.add_to_watchlist(3).await.unwrap_err();

    assert!(matches!(error, RequestError::BadRequest(_)));
    assert_eq!(error.detail_message(), Some("Movie already in your watchlist"));
    assert!(h.api.has_auth_token());
}

#[tokio::test]
async fn watchlist_items_are_decoded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me/watchlist");
            then.status(200).json_body(json!([{
                "id": 1, "user_id": 1, "movie_id": 2,
                "movie": movie_json(2, "The Godfather"),
                "added_at": "2024-03-05T08:00:00"
            }]));
        })
        .await;

    let h = harness(&server.base_url(), Some("abc"));
    let items = h.api.watchlist().await.unwrap();

    assert_eq!(items[0].movie.title, "The Godfather");
    assert!(items[0].added_at.is_some());
}

#[tokio::test]
async fn photo_upload_is_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/upload-photo")
                .header("Authorization", "Bearer abc")
                .body_contains("me.jpg");
            then.status(200).json_body(json!({
                "filename": "user_1_me.jpg",
                "message": "Photo uploaded successfully"
            }));
        })
        .await;

    let h = harness(&server.base_url(), Some("abc"));
    let upload = h
        .api
        .upload_photo("me.jpg", b"fake-jpeg-bytes".to_vec(), "image/jpeg")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(upload.filename, "user_1_me.jpg");
}

#[tokio::test]
async fn invalid_mime_type_is_rejected_locally() {
    let h = harness("http://localhost:8000", None);
    let result = h.api.upload_photo("me.jpg", vec![1, 2, 3], "not a mime").await;

    assert!(matches!(result, Err(RequestError::InvalidInput(_))));
}
