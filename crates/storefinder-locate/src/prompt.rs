/// The user-facing side of acquisition: status messages and the manual
/// address prompt.
pub trait UserPrompt: Send + Sync {
    /// Show an informational or error message.
    fn notify(&self, message: &str);

    /// Ask the user for an address. `None` means the user cancelled.
    fn request_address(&self, message: &str, suggestion: &str) -> Option<String>;
}

pub const MANUAL_ENTRY_PROMPT: &str =
    "Enter your current location (e.g. Nishi-Shinjuku 1-1-1, Shibuya Station, Tokyo Tower):";
