//! Live updates: REST mutations reach connected WebSocket clients.

mod support;

use std::time::Duration;

use awc::BoxedSocket;
use awc::ws::{Codec, Frame};
use futures::{SinkExt, StreamExt};
use rstest::rstest;
use serde_json::{Value, json};

type Socket = actix_codec::Framed<BoxedSocket, Codec>;

async fn connect(url: &str) -> Socket {
    let (_resp, socket) = awc::Client::default()
        .ws(url)
        .connect()
        .await
        .expect("websocket connect");
    socket
}

async fn next_event(socket: &mut Socket) -> Value {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let frame = socket.next().await.expect("response frame").expect("frame");
            match frame {
                Frame::Text(bytes) => return serde_json::from_slice(&bytes).expect("json frame"),
                Frame::Ping(_) | Frame::Pong(_) => continue,
                other => panic!("expected text frame, got {other:?}"),
            }
        }
    })
    .await
    .expect("event within timeout")
}

async fn post_json(base_url: &str, path: &str, body: Value) -> Value {
    let mut res = awc::Client::default()
        .post(format!("{base_url}{path}"))
        .send_json(&body)
        .await
        .expect("request sent");
    res.json().await.expect("json body")
}

#[rstest]
#[actix_rt::test]
async fn every_client_sees_every_change() {
    let store = support::store();
    let server = support::spawn_server(store.clone());
    let mut first = connect(&server.ws_url).await;
    let mut second = connect(&server.ws_url).await;
    assert_eq!(store.subscriber_count(), 2);

    let created = post_json(
        &server.base_url,
        "/polls",
        json!({ "question": "Best color?", "options": ["Red", "Blue"] }),
    )
    .await;
    let id = created["poll"]["id"].as_str().expect("poll id").to_owned();
    post_json(
        &server.base_url,
        &format!("/polls/{id}/vote"),
        json!({ "optionIndex": 1 }),
    )
    .await;
    post_json(&server.base_url, &format!("/polls/{id}/close"), json!({})).await;

    for socket in [&mut first, &mut second] {
        let new_poll = next_event(socket).await;
        assert_eq!(new_poll["type"], "NEW_POLL");
        assert_eq!(new_poll["poll"]["id"], id.as_str());
        assert!(new_poll["poll"].get("votes").is_none());
        assert_eq!(
            next_event(socket).await,
            json!({ "type": "VOTE", "pollId": id, "results": [0, 1] })
        );
        assert_eq!(
            next_event(socket).await,
            json!({ "type": "CLOSED", "pollId": id })
        );
    }

    server.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn departed_clients_stop_receiving() {
    let store = support::store();
    let server = support::spawn_server(store.clone());
    let mut staying = connect(&server.ws_url).await;
    let mut leaving = connect(&server.ws_url).await;

    leaving
        .send(awc::ws::Message::Close(None))
        .await
        .expect("send close");
    drop(leaving);
    tokio::time::timeout(Duration::from_secs(2), async {
        while store.subscriber_count() != 1 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("departed client unsubscribed");

    post_json(
        &server.base_url,
        "/polls",
        json!({ "question": "Q", "options": ["a", "b"] }),
    )
    .await;

    assert_eq!(next_event(&mut staying).await["type"], "NEW_POLL");
    server.handle.stop(false).await;
}
