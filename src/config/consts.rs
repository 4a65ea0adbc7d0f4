/// Directory translated sources are written to when nothing else is configured
pub const DEFAULT_OUTPUT_DIR: &str = "sources";
/// Default HTTP timeout for provider requests (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Minimum allowed HTTP timeout (seconds)
pub const MIN_TIMEOUT_SECONDS: u64 = 1;
/// Maximum allowed HTTP timeout (seconds)
pub const MAX_TIMEOUT_SECONDS: u64 = 600;
/// User-Agent sent with every request; the GitHub API rejects anonymous agents
pub const DEFAULT_USER_AGENT: &str = concat!("fontget-sources/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the Google Fonts API key
pub const GOOGLE_FONTS_API_KEY_ENV: &str = "GOOGLE_FONTS_API_KEY";

pub const GOOGLE_FONTS_ENDPOINT: &str = "https://www.googleapis.com/webfonts/v1/webfonts";
pub const NERD_FONTS_ENDPOINT: &str = "https://api.github.com/repos/ryanoasis/nerd-fonts/releases";
pub const FONT_SQUIRREL_ENDPOINT: &str = "https://www.fontsquirrel.com/api";
pub const OPEN_FOUNDRY_ENDPOINT: &str = "https://open-foundry.com/data/sheet.json";
