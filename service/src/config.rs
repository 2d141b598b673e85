use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

const LOG_LEVELS: [&str; 6] = ["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

/// Transport mode names accepted for a provider's user-info request.
const TRANSPORT_MODES: [&str; 2] = ["query-string", "bearer"];

pub const DEFAULT_GOOGLE_USER_INFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
pub const DEFAULT_MICROSOFT_USER_INFO_URL: &str = "https://graph.microsoft.com/v1.0/me";

/// Settings for one provider, as loaded from the environment.
///
/// Only produced when the client id, secret and redirect URL are all present.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub user_info_url: String,
    pub user_info_method: String,
    pub transport_mode: String,
    pub tenant_id: Option<String>,
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 9999)]
    pub port: u16,

    /// Log level threshold for console (and log file) output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(LOG_LEVELS)
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Optional file that receives a copy of the console log output
    #[arg(long, env)]
    log_file: Option<String>,

    /// Seconds a callback may spend on the token exchange and user-info request
    #[arg(long, env, default_value_t = 30)]
    pub callback_timeout_secs: u64,

    /// Optional overall timeout in seconds for outbound user-info requests
    #[arg(long, env)]
    http_timeout_secs: Option<u64>,

    /// Fixed OAuth state parameter. A random one is generated at startup when unset.
    #[arg(long, env)]
    oauth_state: Option<String>,

    /// The Google OAuth client ID
    #[arg(long, env)]
    google_client_id: Option<String>,
    /// The Google OAuth client secret
    #[arg(long, env)]
    google_client_secret: Option<String>,
    /// The redirect URL registered with Google, e.g. http://localhost:9999/google/callback
    #[arg(long, env)]
    google_redirect_url: Option<String>,
    /// Comma separated list of Google scopes to request
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "openid,email,profile"
    )]
    google_scopes: Vec<String>,
    /// The Google user-info endpoint
    #[arg(long, env, default_value = DEFAULT_GOOGLE_USER_INFO_URL)]
    google_user_info_url: String,
    /// HTTP method for the Google user-info request
    #[arg(long, env, default_value = "GET")]
    google_user_info_method: String,
    /// How the access token is sent to the Google user-info endpoint
    #[arg(
        long,
        env,
        default_value = "query-string",
        value_parser = clap::builder::PossibleValuesParser::new(TRANSPORT_MODES)
    )]
    google_transport_mode: String,

    /// The Microsoft (Azure AD) OAuth client ID
    #[arg(long, env)]
    microsoft_client_id: Option<String>,
    /// The Microsoft (Azure AD) OAuth client secret
    #[arg(long, env)]
    microsoft_client_secret: Option<String>,
    /// The redirect URL registered with Azure AD, e.g. http://localhost:9999/microsoft/callback
    #[arg(long, env)]
    microsoft_redirect_url: Option<String>,
    /// Comma separated list of Microsoft scopes to request
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "openid,User.Read"
    )]
    microsoft_scopes: Vec<String>,
    /// The Azure AD tenant (directory) ID. Empty selects the multi-tenant endpoint.
    #[arg(long, env)]
    microsoft_tenant_id: Option<String>,
    /// The Microsoft user-info endpoint
    #[arg(long, env, default_value = DEFAULT_MICROSOFT_USER_INFO_URL)]
    microsoft_user_info_url: String,
    /// HTTP method for the Microsoft user-info request
    #[arg(long, env, default_value = "GET")]
    microsoft_user_info_method: String,
    /// How the access token is sent to the Microsoft user-info endpoint
    #[arg(
        long,
        env,
        default_value = "bearer",
        value_parser = clap::builder::PossibleValuesParser::new(TRANSPORT_MODES)
    )]
    microsoft_transport_mode: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    pub fn http_timeout_secs(&self) -> Option<u64> {
        self.http_timeout_secs
    }

    pub fn oauth_state(&self) -> Option<String> {
        self.oauth_state.clone().filter(|state| !state.is_empty())
    }

    /// Returns the Google settings, if Google is configured.
    pub fn google(&self) -> Option<ProviderSettings> {
        Some(ProviderSettings {
            client_id: self.google_client_id.clone()?,
            client_secret: self.google_client_secret.clone()?,
            redirect_url: self.google_redirect_url.clone()?,
            scopes: self.google_scopes.clone(),
            user_info_url: self.google_user_info_url.clone(),
            user_info_method: self.google_user_info_method.clone(),
            transport_mode: self.google_transport_mode.clone(),
            tenant_id: None,
        })
    }

    /// Returns the Microsoft settings, if Microsoft is configured.
    pub fn microsoft(&self) -> Option<ProviderSettings> {
        Some(ProviderSettings {
            client_id: self.microsoft_client_id.clone()?,
            client_secret: self.microsoft_client_secret.clone()?,
            redirect_url: self.microsoft_redirect_url.clone()?,
            scopes: self.microsoft_scopes.clone(),
            user_info_url: self.microsoft_user_info_url.clone(),
            user_info_method: self.microsoft_user_info_method.clone(),
            transport_mode: self.microsoft_transport_mode.clone(),
            tenant_id: self.microsoft_tenant_id.clone(),
        })
    }
}
