use crate::api_client::PromotionApi;
use crate::services::console_service::ConsoleService;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "console_session";

struct Session {
    console: ConsoleService,
    last_seen: Instant,
}

/// One console per browser session, keyed by the session cookie.
#[derive(Clone)]
pub struct SessionStore {
    api: Arc<dyn PromotionApi>,
    idle: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn PromotionApi>, idle: Duration) -> Self {
        Self {
            api,
            idle,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the console behind the request's session cookie, opening a new
    /// session when the cookie is missing, malformed or expired. The returned
    /// jar carries the cookie to set on the response.
    pub async fn open(&self, jar: CookieJar) -> (CookieJar, ConsoleService) {
        let mut sessions = self.sessions.lock().await;
        let idle = self.idle;
        sessions.retain(|id, session| {
            let live = session.last_seen.elapsed() < idle;
            if !live {
                debug!(session = %id, "dropping idle console session");
            }
            live
        });

        let known = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());
        if let Some(session) = known.and_then(|id| sessions.get_mut(&id)) {
            session.last_seen = Instant::now();
            return (jar, session.console.clone());
        }

        let id = Uuid::new_v4();
        let console = ConsoleService::new(self.api.clone());
        sessions.insert(
            id,
            Session {
                console: console.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!(session = %id, "opened console session");

        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        (jar.add(cookie), console)
    }
}
