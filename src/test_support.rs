//! Local stand-in for the portal, shared by the async tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

pub const ARCHIVE_SIZE: usize = 4096;

/// Counts the requests the fake portal receives.
#[derive(Default)]
pub struct Portal {
    heads: AtomicUsize,
    gets: AtomicUsize,
}

impl Portal {
    pub fn heads(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    fn count(&self, method: &Method) {
        if *method == Method::HEAD {
            self.heads.fetch_add(1, Ordering::SeqCst);
        } else {
            self.gets.fetch_add(1, Ordering::SeqCst);
        }
    }
}

async fn archive_2015(method: Method, State(portal): State<Arc<Portal>>) -> impl IntoResponse {
    portal.count(&method);
    (
        [(header::LAST_MODIFIED, "Wed, 21 Oct 2015 07:28:00 GMT")],
        vec![7u8; ARCHIVE_SIZE],
    )
}

async fn archive_without_date(method: Method, State(portal): State<Arc<Portal>>) -> impl IntoResponse {
    portal.count(&method);
    (StatusCode::OK, vec![1u8; 16])
}

async fn archive_with_odd_date(method: Method, State(portal): State<Arc<Portal>>) -> impl IntoResponse {
    portal.count(&method);
    ([(header::LAST_MODIFIED, "2015-10-21T07:28:00Z")], vec![1u8; 16])
}

/// Serves a fake portal on a random local port and returns its base URL.
///
/// `2015.zip` is a 4096 byte archive dated 21 Oct 2015, `1999.zip` has no
/// `Last-Modified` header and `1998.zip` has one in the wrong format. Every
/// other year is a 404.
pub async fn spawn_portal(portal: Arc<Portal>) -> String {
    let app = Router::new()
        .route("/uploads/dadoshistoricos/2015.zip", get(archive_2015))
        .route("/uploads/dadoshistoricos/1999.zip", get(archive_without_date))
        .route("/uploads/dadoshistoricos/1998.zip", get(archive_with_odd_date))
        .with_state(portal);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/uploads/dadoshistoricos", addr)
}
