//! Draining behaviour of a live server.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use wordgame_web::config::WordLoadMode;
use wordgame_web::http::{AppState, HttpServer};
use wordgame_web::lifecycle::{Lifecycle, LifecyclePhase, ShutdownError};
use wordgame_web::templates::{TemplateSet, TemplateStore};
use wordgame_web::words::{Dictionary, Multiplexer, WordList, WordSource, WordsError};

mod common;
use common::Fixture;

/// A word source that takes `delay` to load.
struct SlowWords {
    delay: Duration,
}

impl WordSource for SlowWords {
    fn load(&self) -> Result<Multiplexer, WordsError> {
        std::thread::sleep(self.delay);
        let list: Arc<dyn WordList> = Arc::new(Dictionary::from_words(common::WORDS));
        Ok(Multiplexer::new(vec![list]))
    }
}

fn slow_server(fixture: &Fixture, delay: Duration) -> HttpServer {
    let state = AppState {
        templates: TemplateStore::new(TemplateSet::load(fixture.template_dir()).unwrap()),
        words: Arc::new(SlowWords { delay }),
        exif: None,
    };
    HttpServer::new(&fixture.config, state)
}

async fn wait_until_active(server_inflight: &wordgame_web::http::InFlight) {
    for _ in 0..200 {
        if server_inflight.active() > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request never reached the server");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn in_flight_request_completes_during_drain() {
    let fixture = Fixture::new(WordLoadMode::PerRequest);
    let server = slow_server(&fixture, Duration::from_millis(1000));
    let inflight = server.inflight();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let lifecycle = Lifecycle::new(Duration::from_secs(5));

    let (stop, stopped) = oneshot::channel::<()>();
    let serve = tokio::spawn(server.run(listener, lifecycle.clone(), async move {
        let _ = stopped.await;
    }));

    let request = tokio::spawn(async move {
        let res = reqwest::get(format!("http://{addr}/anagram?input=listen"))
            .await
            .unwrap();
        let status = res.status().as_u16();
        (status, res.json::<serde_json::Value>().await.unwrap())
    });

    wait_until_active(&inflight).await;
    assert_eq!(lifecycle.phase(), LifecyclePhase::Serving);
    let _ = stop.send(());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(lifecycle.phase(), LifecyclePhase::Draining);
    assert!(
        TcpStream::connect(addr).await.is_err(),
        "listener must be closed while draining"
    );

    let (status, body) = request.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["result"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("silent")));

    serve.await.unwrap().unwrap();
    assert_eq!(lifecycle.phase(), LifecyclePhase::Stopped);
    assert_eq!(inflight.active(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn idle_server_stops_promptly() {
    let fixture = Fixture::new(WordLoadMode::Cached);
    let server = HttpServer::new(&fixture.config, fixture.state(None));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let lifecycle = Lifecycle::new(Duration::from_secs(5));

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        server.run(listener, lifecycle.clone(), async {}),
    )
    .await
    .expect("idle drain should not wait for the deadline");

    assert!(result.is_ok());
    assert_eq!(lifecycle.phase(), LifecyclePhase::Stopped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn drain_past_deadline_is_an_error() {
    let fixture = Fixture::new(WordLoadMode::PerRequest);
    let server = slow_server(&fixture, Duration::from_secs(2));
    let inflight = server.inflight();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let lifecycle = Lifecycle::new(Duration::from_millis(100));

    let (stop, stopped) = oneshot::channel::<()>();
    let serve = tokio::spawn(server.run(listener, lifecycle.clone(), async move {
        let _ = stopped.await;
    }));

    let request = tokio::spawn(async move {
        let _ = reqwest::get(format!("http://{addr}/match?input=c%3Ft")).await;
    });

    wait_until_active(&inflight).await;
    let _ = stop.send(());

    let err = serve.await.unwrap().unwrap_err();
    assert!(matches!(err, ShutdownError::DeadlineExceeded(d) if d == Duration::from_millis(100)));
    assert_eq!(lifecycle.phase(), LifecyclePhase::Stopped);

    request.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn slow_lookup_times_out_with_408() {
    use tower::ServiceExt;

    let mut fixture = Fixture::new(WordLoadMode::PerRequest);
    fixture.config.listener.request_timeout_secs = 1;
    let server = slow_server(&fixture, Duration::from_secs(3));

    let res = server
        .router()
        .oneshot(common::get("/anagram?input=listen"))
        .await
        .unwrap();
    assert_eq!(res.status(), axum::http::StatusCode::REQUEST_TIMEOUT);
}
