//! Canned instruction prompt advertised alongside the tools.

/// Name the prompt is registered under.
pub const PROMPT_NAME: &str = "prompt";

pub const PROMPT_DESCRIPTION: &str = "How to use the auto_linear and save_file tools together";

/// Tells the caller to fetch with `auto_linear`, then persist with `save_file`.
pub const PROMPT_TEXT: &str = "Call auto_linear tool to receive relevant issues and comments to process. After you have finished processing the issues, call save_file tool to save the file to the local directory.";

pub fn prompt_text() -> &'static str {
    PROMPT_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_both_tools_in_order() {
        let text = prompt_text();
        let fetch = text.find("auto_linear").unwrap();
        let save = text.find("save_file").unwrap();
        assert!(fetch < save);
    }
}
