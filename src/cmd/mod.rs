pub mod crack;
pub mod detect;
pub mod encrypt;

use cipherforge::alphabet::decode_input;
use cipherforge::error::{CfResult, CipherError};
use std::io::{self, IsTerminal, Read};

/// Text from the positional arguments (joined by spaces) or, failing that, from piped stdin.
pub fn read_text(parts: &[String]) -> CfResult<String> {
    if !parts.is_empty() {
        return Ok(parts.join(" "));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CipherError::Input(
            "pass the text as arguments or pipe it through stdin".to_string(),
        ));
    }

    let mut bytes = Vec::new();
    stdin.lock().read_to_end(&mut bytes)?;
    let text = decode_input(&bytes);
    Ok(text
        .trim_end_matches(|c: char| matches!(c, '\n' | '\r' | ' '))
        .to_string())
}
