//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

use wordgame_web::config::{ServerConfig, WordLoadMode};
use wordgame_web::exif::ExifExtractor;
use wordgame_web::http::{AppState, HttpServer};
use wordgame_web::templates::{TemplateSet, TemplateStore, INDEX, SCRIPT, STYLESHEET};
use wordgame_web::words::{source_from_config, WordSource};

pub const WORDS: &[&str] = &[
    "enlist", "listen", "silent", "tinsel", "inlets", "cat", "act", "cot", "dog",
];

/// A temp tree with templates, static files and a word list, plus a config
/// pointing at it.
pub struct Fixture {
    pub root: TempDir,
    pub config: ServerConfig,
}

impl Fixture {
    pub fn new(mode: WordLoadMode) -> Self {
        let root = tempfile::tempdir().unwrap();
        let templates = root.path().join("templates");
        let static_dir = root.path().join("static");
        fs::create_dir_all(&templates).unwrap();
        fs::create_dir_all(&static_dir).unwrap();

        write_templates(&templates, "v1");
        fs::write(static_dir.join("app.txt"), "static asset").unwrap();
        fs::write(static_dir.join("favicon.ico"), [0u8, 0, 1, 0]).unwrap();

        let words = root.path().join("words.txt");
        fs::write(&words, WORDS.join("\n")).unwrap();

        let mut config = ServerConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.templates.dir = templates;
        config.templates.static_dir = static_dir;
        config.words.paths = vec![words];
        config.words.mode = mode;

        Self { root, config }
    }

    pub fn template_dir(&self) -> &Path {
        &self.config.templates.dir
    }

    pub fn word_list(&self) -> &PathBuf {
        &self.config.words.paths[0]
    }

    pub fn words(&self) -> Arc<dyn WordSource> {
        source_from_config(&self.config.words).unwrap()
    }

    pub fn state(&self, exif: Option<Arc<dyn ExifExtractor>>) -> AppState {
        AppState {
            templates: TemplateStore::new(TemplateSet::load(self.template_dir()).unwrap()),
            words: self.words(),
            exif,
        }
    }

    pub fn router(&self) -> Router {
        HttpServer::new(&self.config, self.state(None)).router()
    }
}

pub fn write_templates(dir: &Path, marker: &str) {
    fs::write(dir.join(INDEX), format!("<main>{}</main>", marker)).unwrap();
    fs::write(dir.join(STYLESHEET), format!("body {{ --marker: {}; }}", marker)).unwrap();
    fs::write(dir.join(SCRIPT), format!("const marker = '{}';", marker)).unwrap();
}

/// Replace the templates with rename, so the watcher never sees a half-written file.
pub fn replace_templates(dir: &Path, marker: &str) {
    let staging = dir.with_file_name("staging");
    fs::create_dir_all(&staging).unwrap();
    write_templates(&staging, marker);
    for name in [STYLESHEET, SCRIPT, INDEX] {
        fs::rename(staging.join(name), dir.join(name)).unwrap();
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart request carrying one file part named `field`.
pub fn multipart(uri: &str, field: &str, contents: &[u8]) -> Request<Body> {
    let disposition = format!(
        "form-data; name=\"{field}\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg"
    );
    multipart_part(uri, &disposition, contents)
}

/// Multipart request carrying one plain text part named `field`.
pub fn multipart_text(uri: &str, field: &str, value: &str) -> Request<Body> {
    multipart_part(uri, &format!("form-data; name=\"{field}\""), value.as_bytes())
}

fn multipart_part(uri: &str, disposition: &str, contents: &[u8]) -> Request<Body> {
    let boundary = "wordgame-test-boundary";
    let mut body =
        format!("--{boundary}\r\nContent-Disposition: {disposition}\r\n\r\n").into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

/// Start a metadata service that answers every upload with `status` and a
/// JSON body echoing the upload size.
pub async fn start_metadata_service(status: StatusCode) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/exif",
        post(move |body: Bytes| async move {
            (status, Json(serde_json::json!({ "bytes": body.len(), "camera": "test" })))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}
