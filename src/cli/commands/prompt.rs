//! Implementation of the `autolinear prompt` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::prompt::{prompt_text, PROMPT_NAME};

#[derive(Debug, Serialize)]
pub struct PromptOutput {
    pub name: &'static str,
    pub text: &'static str,
}

impl CommandOutput for PromptOutput {
    fn to_human(&self) -> String {
        self.text.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(json_mode: bool) -> Result<()> {
    output(
        &PromptOutput {
            name: PROMPT_NAME,
            text: prompt_text(),
        },
        json_mode,
    );
    Ok(())
}
