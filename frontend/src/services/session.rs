//! Bearer-token session persisted by the login flow in `localStorage`.

use gloo::storage::{LocalStorage, Storage};
use shared::Session;

pub const TOKEN_KEY: &str = "oims.token";
pub const ROLE_KEY: &str = "oims.role";
pub const BRANCH_KEY: &str = "oims.branchId";

pub struct SessionStore;

impl SessionStore {
    fn read(key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    pub fn token() -> Option<String> {
        Self::read(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    /// Current session, if a token and a recognised role are stored
    pub fn load() -> Option<Session> {
        Session::from_parts(Self::read(TOKEN_KEY), Self::read(ROLE_KEY), Self::read(BRANCH_KEY))
    }

    pub fn clear() {
        for key in [TOKEN_KEY, ROLE_KEY, BRANCH_KEY] {
            LocalStorage::delete(key);
        }
    }
}
