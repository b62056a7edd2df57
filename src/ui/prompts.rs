//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input, Password};

use crate::error::{ReciteError, Result};

use super::{Prompt, PromptResult, PromptType};

/// Convert dialoguer errors to ReciteError.
fn map_dialoguer_err(e: dialoguer::Error) -> ReciteError {
    ReciteError::Io(e.into())
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Password => prompt_password(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let confirm = Confirm::new().with_prompt(&prompt.question);

    // Without a default the operator has to type an explicit answer.
    let confirm = match prompt.default.as_deref() {
        Some(default) => confirm.default(super::parse_confirm(default)),
        None => confirm,
    };

    let result = confirm.interact_on(term).map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let input = Input::<String>::new().with_prompt(&prompt.question);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result))
}

fn prompt_password(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Password::new()
        .with_prompt(&prompt.question)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::String(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_error_maps_to_io() {
        let err = map_dialoguer_err(dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "closed",
        )));
        assert!(matches!(err, ReciteError::Io(_)));
    }
}
