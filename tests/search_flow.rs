//! End-to-end search lifecycle: submitted term -> request URL -> fetch ->
//! reducer transitions, driven through the app's action channel exactly as
//! the event loop drives it.

use std::time::Duration;

use hacker_stories_tui::config::AppConfig;
use hacker_stories_tui::internal::saved_search::SavedSearch;
use hacker_stories_tui::internal::stories::StoriesAction;
use hacker_stories_tui::internal::ui::app::{Action, App};

fn app_against(server: &mockito::ServerGuard, term: &str) -> App {
    let mut config = AppConfig::default();
    config.api.endpoint = format!("{}/api/v1/search?query=", server.url());
    App::with_parts(config, SavedSearch::new(term, None))
}

/// Receive the next action from the app channel and apply it, as the event
/// loop would.
async fn pump(app: &mut App) {
    let action = tokio::time::timeout(Duration::from_secs(5), app.action_rx.recv())
        .await
        .expect("timed out waiting for an action")
        .expect("action channel closed");
    app.handle_action(action);
}

fn two_stories_body() -> &'static str {
    r#"{
        "hits": [
            {
                "objectID": "0",
                "title": "React",
                "url": "https://reactjs.org/",
                "author": "Jordan Walke",
                "num_comments": 3,
                "points": 4
            },
            {
                "objectID": "1",
                "title": "Redux",
                "url": "https://redux.js.org/",
                "author": "Dan Abramov, Andrew Clark",
                "num_comments": 2,
                "points": 5
            }
        ]
    }"#
}

#[tokio::test]
async fn test_search_success_then_dismiss() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/search")
        .match_query(mockito::Matcher::UrlEncoded("query".into(), "React".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(two_stories_body())
        .create_async()
        .await;

    let mut app = app_against(&server, "React");

    app.handle_action(Action::SubmitSearch);
    assert!(app.stories.is_loading);
    assert!(!app.stories.is_error);

    // Terminal action arrives through the channel
    pump(&mut app).await;
    assert!(!app.stories.is_loading);
    assert!(!app.stories.is_error);
    assert_eq!(app.stories.data.len(), 2);

    // Dismiss the first story; the survivor keeps its identity
    let dismissed = app.stories.data[0].clone();
    app.handle_action(Action::Stories(StoriesAction::RemoveStory(dismissed)));
    assert_eq!(app.stories.data.len(), 1);
    assert_eq!(app.stories.data[0].object_id, "1");
}

#[tokio::test]
async fn test_search_failure_keeps_previous_data() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/api/v1/search")
        .match_query(mockito::Matcher::UrlEncoded("query".into(), "React".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(two_stories_body())
        .create_async()
        .await;
    let _bad = server
        .mock("GET", "/api/v1/search")
        .match_query(mockito::Matcher::UrlEncoded("query".into(), "Xyz".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("definitely not json")
        .create_async()
        .await;

    let mut app = app_against(&server, "React");

    app.handle_action(Action::SubmitSearch);
    pump(&mut app).await;
    assert_eq!(app.stories.data.len(), 2);

    // Second search fails; flags flip but data survives
    app.handle_action(Action::RepeatSearch("Xyz".to_string()));
    assert!(app.stories.is_loading);
    pump(&mut app).await;

    assert!(!app.stories.is_loading);
    assert!(app.stories.is_error);
    assert_eq!(app.stories.data.len(), 2);
}

#[tokio::test]
async fn test_url_history_drives_last_searches() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"hits": []}"#)
        .expect_at_least(3)
        .create_async()
        .await;

    let mut app = app_against(&server, "a");

    app.handle_action(Action::SubmitSearch);
    pump(&mut app).await;
    app.handle_action(Action::RepeatSearch("a".to_string()));
    pump(&mut app).await;
    app.handle_action(Action::RepeatSearch("b".to_string()));
    pump(&mut app).await;
    app.handle_action(Action::RepeatSearch("c".to_string()));
    pump(&mut app).await;

    // Consecutive "a" collapsed, current "c" dropped
    assert_eq!(app.last_searches(), vec!["a", "b"]);
}

/// Overlapping fetches race by design: there is no cancellation and no
/// generation counter, so the terminal action that arrives last wins.
/// This pins down the documented weak spot rather than fixing it.
#[tokio::test]
async fn test_overlapping_fetches_last_write_wins() {
    let mut app = app_against(&mockito::Server::new_async().await, "React");

    let first = vec![hacker_stories_tui::internal::models::Story {
        object_id: "first".to_string(),
        title: "first".to_string(),
        url: "https://example.com/first".to_string(),
        author: "a".to_string(),
        num_comments: 0,
        points: 0,
    }];
    let second = vec![hacker_stories_tui::internal::models::Story {
        object_id: "second".to_string(),
        title: "second".to_string(),
        url: "https://example.com/second".to_string(),
        author: "b".to_string(),
        num_comments: 0,
        points: 0,
    }];

    // Two searches in flight at once...
    app.handle_action(Action::Stories(StoriesAction::FetchInit));
    app.handle_action(Action::Stories(StoriesAction::FetchInit));

    // ...whose terminal actions arrive out of submission order.
    app.handle_action(Action::Stories(StoriesAction::FetchSuccess(second)));
    app.handle_action(Action::Stories(StoriesAction::FetchSuccess(first)));

    assert_eq!(app.stories.data[0].object_id, "first");
    assert!(!app.stories.is_loading);
}
