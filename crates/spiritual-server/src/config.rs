use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::categorize::OPENAI_API_BASE;
use crate::speech::ELEVENLABS_API_BASE;

#[derive(Debug, Parser)]
#[command(name = "spiritual-server")]
#[command(about = "Spiritual Connect - festivals, rituals and bhajans API")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// SQLite database file (in-memory storage when omitted)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Load the sample festival calendar when the store is empty
    #[arg(long, default_value_t = false)]
    pub seed: bool,

    /// Also create the demo account when seeding
    #[arg(long, default_value_t = false)]
    pub seed_demo_user: bool,

    /// Session lifetime in hours
    #[arg(long, default_value_t = 24)]
    pub session_ttl_hours: u64,

    /// Seconds between expired-session sweeps
    #[arg(long, default_value_t = 300)]
    pub session_cleanup_secs: u64,

    /// Maximum concurrent sessions
    #[arg(long, default_value_t = 10_000)]
    pub max_sessions: usize,

    /// Mark the session cookie Secure (HTTPS deployments)
    #[arg(long, default_value_t = false)]
    pub secure_cookies: bool,

    /// Email of an account allowed to moderate content (repeatable)
    #[arg(long = "moderator")]
    pub moderators: Vec<String>,

    /// ElevenLabs API key for speech synthesis
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,

    /// ElevenLabs API base URL
    #[arg(long, default_value = ELEVENLABS_API_BASE)]
    pub elevenlabs_base_url: String,

    /// Maximum number of synthesized clips kept in memory
    #[arg(long, default_value_t = 256)]
    pub speech_cache_entries: usize,

    /// Memory budget for cached clips in MiB (a narrated step is typically
    /// 50-200 KiB of MPEG audio)
    #[arg(long, default_value_t = 64)]
    pub speech_cache_mb: usize,

    /// OpenAI API key for document categorization
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL
    #[arg(long, default_value = OPENAI_API_BASE)]
    pub openai_base_url: String,

    /// OpenAI chat model used for categorization
    #[arg(long, default_value = "gpt-4o")]
    pub openai_model: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<PathBuf>,
    pub seed: bool,
    pub seed_demo_user: bool,
    pub session_ttl: Duration,
    pub session_cleanup_interval: Duration,
    pub max_sessions: usize,
    pub secure_cookies: bool,
    pub moderators: Vec<String>,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    pub speech_cache_entries: usize,
    pub speech_cache_bytes: usize,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database: None,
            seed: false,
            seed_demo_user: false,
            session_ttl: Duration::from_secs(24 * 60 * 60),
            session_cleanup_interval: Duration::from_secs(300),
            max_sessions: 10_000,
            secure_cookies: false,
            moderators: Vec::new(),
            elevenlabs_api_key: None,
            elevenlabs_base_url: ELEVENLABS_API_BASE.to_string(),
            speech_cache_entries: 256,
            speech_cache_bytes: 64 * 1024 * 1024,
            openai_api_key: None,
            openai_base_url: OPENAI_API_BASE.to_string(),
            openai_model: "gpt-4o".to_string(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database: args.database,
            seed: args.seed || args.seed_demo_user,
            seed_demo_user: args.seed_demo_user,
            session_ttl: Duration::from_secs(args.session_ttl_hours * 60 * 60),
            session_cleanup_interval: Duration::from_secs(args.session_cleanup_secs.max(1)),
            max_sessions: args.max_sessions,
            secure_cookies: args.secure_cookies,
            moderators: args.moderators,
            elevenlabs_api_key: non_empty(args.elevenlabs_api_key),
            elevenlabs_base_url: args.elevenlabs_base_url,
            speech_cache_entries: args.speech_cache_entries,
            speech_cache_bytes: args.speech_cache_mb.saturating_mul(1024 * 1024),
            openai_api_key: non_empty(args.openai_api_key),
            openai_base_url: args.openai_base_url,
            openai_model: args.openai_model,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the account with this email may moderate contributions and
    /// curate the calendar.
    pub fn is_moderator(&self, email: &str) -> bool {
        self.moderators
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(email.trim()))
    }
}
