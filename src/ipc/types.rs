use serde::Deserialize;

use crate::auth::{Authenticator, Session, StubAuthenticator};
use crate::config::Config;
use crate::model::Drafts;
use crate::seed;
use crate::store::Store;
use crate::view::View;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: Store,
    pub drafts: Drafts,
    pub view: View,
    /// Survey picked from the survey list; survives stepping back to it.
    pub selected_survey: Option<String>,
    pub session: Option<Session>,
    pub authenticator: Box<dyn Authenticator>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let store = if config.seed_demo {
            seed::demo_store()
        } else {
            Store::new()
        };
        Self {
            store,
            drafts: Drafts::default(),
            view: View::default(),
            selected_survey: None,
            session: None,
            authenticator: Box::new(StubAuthenticator::new(config.login_delay)),
        }
    }
}
