//! Session management.
//!
//! Sessions live in process memory. The kiosk host owns authentication
//! end to end and keeps no external state, so nothing durable is needed.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Build the session layer applied around the whole router.
pub fn create_session_layer(same_site: SameSite) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        // Kiosk terminals serve plain HTTP on the local network.
        .with_secure(false)
        .with_http_only(true)
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            DEFAULT_SESSION_EXPIRY_HOURS,
        )))
}

/// Parse the configured SameSite policy, defaulting to strict.
pub fn same_site_from_config(value: &str) -> SameSite {
    match value {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_parsing() {
        assert_eq!(same_site_from_config("lax"), SameSite::Lax);
        assert_eq!(same_site_from_config("none"), SameSite::None);
        assert_eq!(same_site_from_config("strict"), SameSite::Strict);
        assert_eq!(same_site_from_config("bogus"), SameSite::Strict);
    }
}
