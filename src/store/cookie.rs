use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::time::Duration;

use super::KeyValueStore;

/// Per-visitor persistence backed by private cookies.
///
/// `session` cookies carry no expiry, so the browser drops them when the
/// session ends. `persistent` cookies outlive the session and hold
/// per-browser preferences.
pub struct CookieStore<'a, 'r> {
    jar: &'a CookieJar<'r>,
    max_age: Option<Duration>,
    same_site: SameSite,
}

impl<'a, 'r> CookieStore<'a, 'r> {
    pub fn session(jar: &'a CookieJar<'r>) -> Self {
        CookieStore { jar, max_age: None, same_site: SameSite::Strict }
    }

    pub fn persistent(jar: &'a CookieJar<'r>) -> Self {
        CookieStore { jar, max_age: Some(Duration::days(365)), same_site: SameSite::Lax }
    }
}

impl KeyValueStore for CookieStore<'_, '_> {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get_private(key).map(|c| c.value().to_string())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut cookie = Cookie::new(key.to_string(), value.to_string());
        cookie.set_http_only(true);
        cookie.set_same_site(self.same_site);
        cookie.set_path("/");
        if let Some(max_age) = self.max_age {
            cookie.set_max_age(max_age);
        }
        self.jar.add_private(cookie);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.jar.remove_private(Cookie::from(key.to_string()));
        Ok(())
    }
}
