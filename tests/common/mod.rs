#![allow(dead_code)]

use std::sync::Arc;

use movie_catalog_client::{ApiClient, MemoryNavigator, MemoryTokenStorage};
use serde_json::{json, Value};

pub struct Harness {
    pub api: ApiClient,
    pub storage: Arc<MemoryTokenStorage>,
    pub navigator: Arc<MemoryNavigator>,
}

pub fn harness(base_url: &str, stored_token: Option<&str>) -> Harness {
    let storage = Arc::new(match stored_token {
        Some(token) => MemoryTokenStorage::with_token(token),
        None => MemoryTokenStorage::new(),
    });
    let navigator = Arc::new(MemoryNavigator::new());

    let api = ApiClient::builder(base_url)
        .storage(storage.clone())
        .navigator(navigator.clone())
        .build()
        .unwrap();

    Harness {
        api,
        storage,
        navigator,
    }
}

pub fn user_json(id: i64, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "country": "TR",
        "city": "Istanbul",
        "is_active": true,
        "photo_url": null,
        "created_at": "2024-03-01T09:30:00"
    })
}

pub fn movie_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "summary": null,
        "release_year": 1994,
        "duration": 142,
        "image_url": null,
        "trailer_url": null,
        "imdb_score": 9.3,
        "popularity_score": 55.0,
        "view_count": 12,
        "created_at": "2024-03-01T09:30:00.000123"
    })
}
