use std::time::Duration;

use lexis_io::SelectionFeed;
use lexis_types::{AppEvent, LookupKey, Selection, TextSource};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::io::selection_io;

const QUIET: Duration = Duration::from_millis(500);

fn key(word: &str) -> Option<LookupKey> {
    LookupKey::new(word)
}

#[tokio::test(start_paused = true)]
async fn test_publish_from_sync_callback_settles_key() {
    let feed = SelectionFeed::new();
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    tokio::spawn(selection_io(feed.clone(), QUIET, cancel.clone(), tx));
    tokio::task::yield_now().await;

    // Source adapters publish from plain closures
    let on_text = {
        let feed = feed.clone();
        move |text: &str| feed.publish(Selection::text(text), TextSource::Clipboard)
    };
    on_text("  Hello, world");

    let result = timeout(Duration::from_secs(2), rx.recv()).await;
    match result {
        Ok(Ok(AppEvent::KeySettled(settled))) => assert_eq!(settled, key("Hello")),
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - key never settled"),
    }

    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_burst_settles_only_last_key() {
    let feed = SelectionFeed::new();
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    tokio::spawn(selection_io(feed.clone(), QUIET, cancel.clone(), tx));
    tokio::task::yield_now().await;

    for word in ["alpha", "beta", "gamma"] {
        feed.publish(Selection::text(word), TextSource::Manual);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let settled = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timeout")
        .expect("recv failed");
    assert!(matches!(settled, AppEvent::KeySettled(k) if k == key("gamma")));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.is_empty(), "intermediate keys must not settle");

    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_non_text_selection_settles_absent_key() {
    let feed = SelectionFeed::new();
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    tokio::spawn(selection_io(feed.clone(), QUIET, cancel.clone(), tx));
    tokio::task::yield_now().await;

    feed.publish(Selection::text("word"), TextSource::Manual);
    let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert!(matches!(first, AppEvent::KeySettled(k) if k == key("word")));

    feed.publish(Selection::Other, TextSource::Websocket);
    let second = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert!(matches!(second, AppEvent::KeySettled(None)));

    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_same_word_in_new_selection_is_not_resent() {
    let feed = SelectionFeed::new();
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    tokio::spawn(selection_io(feed.clone(), QUIET, cancel.clone(), tx));
    tokio::task::yield_now().await;

    feed.publish(Selection::text("cat naps"), TextSource::Manual);
    let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert!(matches!(first, AppEvent::KeySettled(k) if k == key("cat")));

    feed.publish(Selection::text("cat sleeps"), TextSource::Manual);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.is_empty());

    cancel.cancel();
}
