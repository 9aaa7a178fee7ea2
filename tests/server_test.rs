mod common;

use std::sync::Arc;

use common::*;
use playlist_insights::server::{AppState, router};
use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::{Value, json};

async fn app(spotify: Arc<MockSpotify>, keys: &[&str]) -> String {
    let spotify = spotify_client(spotify).await;
    let background = remover_service(Arc::new(MockRemover::default()), keys).await;
    spawn(router(Arc::new(AppState::new(spotify, background)))).await
}

fn no_redirect_client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

fn sample_playlist() -> Arc<MockSpotify> {
    Arc::new(MockSpotify::with_items(vec![
        track("around", &[(&artist_id(1), "Daft Punk")]),
        track("robot", &[(&artist_id(1), "Daft Punk")]),
        track("dance", &[(&artist_id(2), "Justice")]),
        episode("talk"),
    ]))
}

#[tokio::test]
async fn test_health() {
    let base = app(Arc::new(MockSpotify::default()), &[]).await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_validate_playlist_redirects_to_playlist_page() {
    let base = app(Arc::new(MockSpotify::default()), &[]).await;

    let res = no_redirect_client()
        .post(format!("{base}/api/validate-playlist"))
        .form(&[(
            "playlistUrl",
            "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=x",
        )])
        .send()
        .await
        .unwrap();

    assert!(res.status().is_redirection());
    assert_eq!(
        res.headers()["location"],
        "/playlist/37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[tokio::test]
async fn test_validate_playlist_rejects_invalid_url() {
    let base = app(Arc::new(MockSpotify::default()), &[]).await;

    let res = no_redirect_client()
        .post(format!("{base}/api/validate-playlist"))
        .form(&[("playlistUrl", "https://example.com/nothing")])
        .send()
        .await
        .unwrap();

    assert!(res.status().is_redirection());
    assert_eq!(res.headers()["location"], "/?error=invalid-url");
}

#[tokio::test]
async fn test_remove_background_requires_image_url() {
    let base = app(Arc::new(MockSpotify::default()), &[GOOD_KEY]).await;
    let client = Client::new();

    let res = client
        .post(format!("{base}/api/remove-background"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Image URL is required");

    let res = client
        .post(format!("{base}/api/remove-background"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_remove_background_returns_processed_url() {
    let base = app(Arc::new(MockSpotify::default()), &[GOOD_KEY]).await;

    let body: Value = Client::new()
        .post(format!("{base}/api/remove-background"))
        .json(&json!({ "imageUrl": "https://img.test/a" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["processedUrl"], "https://img.test/a-nobg");
}

#[tokio::test]
async fn test_playlist_json_with_search_and_order() {
    let base = app(sample_playlist(), &[]).await;

    let body: Value = reqwest::get(format!(
        "{base}/api/playlist/{PLAYLIST_ID}?order=ascending"
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();

    assert_eq!(body["name"], "Mock Mix");
    assert_eq!(body["totalItems"], 4);
    assert_eq!(body["contentBreakdown"]["episodes"], 1);
    assert_eq!(body["artists"][0]["name"], "Justice");
    assert_eq!(body["artists"][1]["name"], "Daft Punk");

    let body: Value = reqwest::get(format!("{base}/api/playlist/{PLAYLIST_ID}?search=daft"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0]["contentCount"], 2);
}

#[tokio::test]
async fn test_empty_or_unknown_order_sorts_descending() {
    let base = app(sample_playlist(), &[]).await;

    for query in ["search=&order=", "order=desc", "order=DESCENDING"] {
        let res = reqwest::get(format!("{base}/api/playlist/{PLAYLIST_ID}?{query}"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "query {query}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["artists"][0]["name"], "Daft Punk", "query {query}");
        assert_eq!(body["artists"].as_array().unwrap().len(), 2, "query {query}");
    }

    let res = reqwest::get(format!("{base}/playlist/{PLAYLIST_ID}?search=&order="))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_playlist_is_404() {
    let base = app(Arc::new(MockSpotify::default()), &[]).await;

    let res = reqwest::get(format!("{base}/api/playlist/missing")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = reqwest::get(format!("{base}/playlist/missing")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_playlist_page_lists_artists() {
    let base = app(sample_playlist(), &[]).await;

    let html = reqwest::get(format!("{base}/playlist/{PLAYLIST_ID}"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("<h1>Mock Mix</h1>"));
    assert!(html.contains(&format!("/playlist/{PLAYLIST_ID}/artist/daft%20punk")));
    assert!(html.contains("50.00%"));
    assert!(html.find("Daft Punk").unwrap() < html.find("Justice").unwrap());
}

#[tokio::test]
async fn test_artist_page_uses_processed_image() {
    let base = app(sample_playlist(), &[GOOD_KEY]).await;

    let res = reqwest::get(format!("{base}/playlist/{PLAYLIST_ID}/artist/daft%20punk"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();

    assert!(html.contains(&format!("https://img.test/artist/{}-nobg", artist_id(1))));
    assert!(html.contains("around"));
    assert!(html.contains("robot"));
    assert!(!html.contains("dance"));

    let res = reqwest::get(format!("{base}/playlist/{PLAYLIST_ID}/artist/nobody"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_shows_error_banner() {
    let base = app(Arc::new(MockSpotify::default()), &[]).await;

    let html = reqwest::get(format!("{base}/?error=invalid-url"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("action=\"/api/validate-playlist\""));
}
