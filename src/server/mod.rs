//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::commands::generate;
use crate::helpers::{open_browser, search_url};
use crate::NewTab;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    search_url: String,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the development server
pub async fn start(app: &NewTab, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    // Create broadcast channel for live reload notifications
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: app.public_dir.clone(),
        search_url: app.config.search.url.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app_router = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let watched = app.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(watched, reload_tx).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app_router).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/search", get(search_handler))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Watch the source directory and config, regenerate and notify clients
async fn watch_and_reload(app: NewTab, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (_watcher, mut rx) = generate::watch_changes(&app, generate::DEBOUNCE)?;

    while let Some(changed) = rx.recv().await {
        println!();
        for path in &changed {
            println!("📝 File changed: {}", path.display());
        }

        println!("\n🔄 Regenerating...");
        match generate::reload(&app).await {
            Ok(_) => {
                println!("✅ Regenerated successfully!");
                // Notify all connected clients to reload
                let _ = reload_tx.send(());
            }
            Err(e) => {
                println!("❌ Generation failed: {}", e);
            }
        }
    }

    Ok(())
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Redirect `/search?q=...` to the configured search engine
async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Redirect {
    let term = params.q.unwrap_or_default();
    match search_url(&state.search_url, &term) {
        Some(url) => Redirect::to(&url),
        None => Redirect::to("/"),
    }
}

/// Fallback handler that serves files and injects live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();

    if path.split('/').any(|segment| segment == "..") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    let file_path = if path == "/" {
        state.public_dir.join("index.html")
    } else {
        let candidate = state.public_dir.join(path.trim_start_matches('/'));
        if candidate.is_dir() {
            candidate.join("index.html")
        } else {
            candidate
        }
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Inject live reload script into HTML content
///
/// Card bodies are inserted unescaped and may contain a literal `</body>`,
/// so the page's own closing tag is the last one.
fn inject_live_reload(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + LIVE_RELOAD_SCRIPT.len());
            out.push_str(&html[..at]);
            out.push_str(LIVE_RELOAD_SCRIPT);
            out.push_str(&html[at + "</body>".len()..]);
            out
        }
        None => format!("{}{}", html, LIVE_RELOAD_SCRIPT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;
    use std::fs;
    use tempfile::TempDir;

    fn state(public_dir: PathBuf, live_reload: bool) -> Arc<ServerState> {
        let (reload_tx, _) = broadcast::channel(1);
        Arc::new(ServerState {
            public_dir,
            search_url: "https://www.bing.com/search?q={query}".to_string(),
            reload_tx,
            live_reload,
        })
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("/__livereload"));
        assert!(html.ends_with("</body>\n</html>"));
        assert_eq!(html.matches("</body>").count(), 1);

        let page = inject_live_reload(
            "<html><body><script>document.write('</body>')</script></body></html>",
        );
        assert!(page.contains("document.write('</body>')</script>"));
        let script_at = page.find("/__livereload").unwrap();
        assert!(script_at > page.find("document.write").unwrap());
        assert!(page.ends_with("</body>\n</html>"));

        let fragment = inject_live_reload("<p>x</p>");
        assert!(fragment.starts_with("<p>x</p>"));
        assert!(fragment.contains("/__livereload"));
    }

    #[tokio::test]
    async fn test_search_redirect() {
        let temp = TempDir::new().unwrap();
        let state = state(temp.path().to_path_buf(), false);

        let redirect = search_handler(
            State(state.clone()),
            Query(SearchParams {
                q: Some(" rust & tokio ".to_string()),
            }),
        )
        .await
        .into_response();
        assert_eq!(
            redirect.headers()[LOCATION],
            "https://www.bing.com/search?q=rust%20%26%20tokio"
        );

        let blank = search_handler(State(state), Query(SearchParams { q: None }))
            .await
            .into_response();
        assert_eq!(blank.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn test_index_served_with_live_reload() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("index.html"),
            "<html><body>cards</body></html>",
        )
        .unwrap();
        let state = state(temp.path().to_path_buf(), true);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = fallback_handler(State(state.clone()), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/../secret.txt")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
