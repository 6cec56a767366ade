// Runtime settings

#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Gemini API key. May be absent — the gateway reports a configuration
    /// error at the first operation rather than at load time.
    pub api_key: Option<String>,
    /// Model name override; None means the gateway default.
    pub model: Option<String>,
    /// API base URL override, mainly for tests and proxies.
    pub base_url: Option<String>,
}
