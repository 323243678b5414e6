use crate::api::AuthClient;
use crate::models::AccountInfo;
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub auth: RwSignal<AuthClient>,
    pub current_user: RwSignal<Option<AccountInfo>>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_client = AuthClient::load_from_storage();
        let stored_user = load_user_from_storage();

        Self {
            auth: RwSignal::new(stored_client),
            current_user: RwSignal::new(stored_user),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
