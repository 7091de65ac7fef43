use serde::Deserialize;
use std::time::Duration;

/// The Belastingdienst APA rulings index page
pub const DEFAULT_BASE_URL: &str = "https://www.belastingdienst.nl/wps/wcm/connect/bldcontentnl/standaard_functies/prive/contact/rechten_en_plichten_bij_de_belastingdienst/ruling/apa";

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for the APA crawler
///
/// Every section and key is optional; an empty file yields
/// [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    pub walker: WalkerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Index page both tools start from
    pub base_url: String,

    /// Courtesy delay before every follow-up request (milliseconds)
    pub delay_ms: u64,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Per-request timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Timeout for HTML pages (seconds)
    pub page_timeout_secs: u64,

    /// Timeout for PDF downloads (seconds)
    pub download_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 30,
            download_timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

/// Bounds for the recursive title walker
///
/// Both caps are unset by default, in which case the walk ends only when
/// the visited set has absorbed every reachable same-site page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WalkerConfig {
    /// Maximum number of pages fetched in one walk
    pub max_pages: Option<usize>,

    /// Maximum link distance from the base URL
    pub max_depth: Option<u32>,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// JSON report of resolved documents
    pub documents_path: String,

    /// JSON list of collected titles
    pub titles_path: String,

    /// Append-mode text log
    pub log_path: String,

    /// Directory receiving downloaded PDFs
    pub download_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            documents_path: "apa_documents.json".to_string(),
            titles_path: "apa_titles.json".to_string(),
            log_path: "apa_crawler.log".to_string(),
            download_dir: "pdfs".to_string(),
        }
    }
}
