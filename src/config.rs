pub(crate) const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Clone)]
pub(crate) struct Config {
    pub(crate) bot_token: String,
    pub(crate) chat_id: Option<String>,
    pub(crate) telegram_api_url: String,
    pub(crate) log_to_console: bool,
}

impl Config {
    /// Reads the process environment as it is right now. A missing token becomes an empty
    /// string and a missing chat id is left out of the request, Telegram rejects either on
    /// its side.
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(|value| decode_env_value(key, value)))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bot_token: lookup("BOT_TOKEN").unwrap_or_default(),
            chat_id: lookup("CHAT_ID"),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            log_to_console: lookup("LOG_TO_CONSOLE")
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }
}

/// Invalid UTF-8 is replaced rather than dropped, the request still goes out.
fn decode_env_value(key: &str, value: std::ffi::OsString) -> String {
    match value.into_string() {
        Ok(value) => value,
        Err(value) => {
            tracing::warn!(key, "Environment variable is not valid UTF-8, decoding lossily");
            value.to_string_lossy().into_owned()
        }
    }
}

// The token is a credential and the config gets logged on startup.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("log_to_console", &self.log_to_console)
            .finish()
    }
}
