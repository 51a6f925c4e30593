//! Interactive prompts

use anyhow::{bail, Result};
use std::io::{self, Write};

use crate::output::Output;

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

/// Fail unless a destructive command can ask for confirmation
///
/// JSON and quiet output never prompt, so without `--yes` they refuse.
pub fn require_prompt(output: &Output) -> Result<()> {
    if !output.should_prompt() {
        bail!("Refusing to delete without confirmation. Use --yes to confirm.");
    }
    Ok(())
}

/// Interpret a confirmation answer
fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_require_prompt_only_for_humans() {
        use crate::output::OutputFormat;

        assert!(require_prompt(&Output::new(OutputFormat::Human)).is_ok());

        let err = require_prompt(&Output::new(OutputFormat::Json)).unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert!(require_prompt(&Output::new(OutputFormat::Quiet)).is_err());
    }
}
