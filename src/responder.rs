use crate::api::ApiClient;
use crate::config::Config;
use crate::offline::OfflineResponder;
use anyhow::Result;

/// Where replies come from. Selected once at startup from config and
/// held for the whole session.
#[derive(Clone)]
pub enum Responder {
    Api(ApiClient),
    Offline(OfflineResponder),
}

impl Responder {
    pub fn from_config(config: &Config) -> Self {
        let choice = config.responder.as_deref().unwrap_or("api").to_lowercase();
        match choice.as_str() {
            "offline" => Responder::Offline(OfflineResponder::new()),
            "api" => Responder::Api(ApiClient::new(config.api_url.clone())),
            other => {
                tracing::warn!("Unknown responder '{}' in config, falling back to api", other);
                Responder::Api(ApiClient::new(config.api_url.clone()))
            }
        }
    }

    pub async fn reply(&self, message: &str) -> Result<String> {
        match self {
            Responder::Api(client) => client.reply(message).await,
            Responder::Offline(responder) => responder.reply(message).await,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Responder::Api(_) => "api",
            Responder::Offline(_) => "offline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(responder: Option<&str>) -> Config {
        Config {
            responder: responder.map(String::from),
            api_url: None,
        }
    }

    #[test]
    fn test_default_is_api() {
        let responder = Responder::from_config(&config_with(None));
        assert_eq!(responder.as_str(), "api");
    }

    #[test]
    fn test_offline_is_selectable() {
        let responder = Responder::from_config(&config_with(Some("offline")));
        assert_eq!(responder.as_str(), "offline");
    }

    #[test]
    fn test_choice_is_case_insensitive() {
        let responder = Responder::from_config(&config_with(Some("Offline")));
        assert_eq!(responder.as_str(), "offline");
    }

    #[test]
    fn test_unknown_choice_falls_back_to_api() {
        let responder = Responder::from_config(&config_with(Some("banana")));
        assert_eq!(responder.as_str(), "api");
    }
}
