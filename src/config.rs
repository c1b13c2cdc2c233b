use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    /// Comma separated list of origins allowed through CORS
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = 8080)]
    pub server_port: u16,

    /// Key for the Places text search endpoint, never sent to the client.
    /// Absence is reported per-request as a server misconfiguration.
    #[clap(env = "GOOGLE_PLACE_KEY", long)]
    pub google_place_key: Option<String>,

    /// Key for the Places details and photo endpoints, also server-only.
    #[clap(env = "GOOGLE_API_KEY", long)]
    pub google_api_key: Option<String>,
}
