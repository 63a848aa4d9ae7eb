/*!
Configuration of a verification run.

Primary configuration is [Config], constructed once by the CLI (or
directly by a library caller) and threaded read-only through the
[driver](crate::driver).
*/

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Wall-clock limit on the whole run. Checked once per certificate
    /// token (§5). `None` means no limit.
    pub time_limit: Option<std::time::Duration>,

    /// Soft cap, in bytes, on memory the formalism engines may retain
    /// before a fresh allocation is refused (§5). `None` means no cap.
    pub memory_limit: Option<usize>,

    /// Whether to run the discard pre-scan and drop concrete payloads
    /// of expressions once their last consulting knowledge item has
    /// been processed (§3.5, §4.2).
    pub discard_formulas: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: None,
            memory_limit: None,
            discard_formulas: false,
        }
    }
}
