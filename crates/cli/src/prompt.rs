//! Line-oriented driver for a [`Wizard`].
//!
//! Each step prints its header and progress, then asks for its fields one
//! per line. `:back` returns to the previous step keeping what was typed. A
//! step without fields is a confirmation step and waits for `agree`.

use std::io::{BufRead, Write};
use std::path::Path;

use openmeal_signup::UploadedFile;
use openmeal_wizard::{FieldKind, FieldSpec, FieldValues, FinalSubmit, StepOutcome, Wizard};
use serde_json::Value;

pub const BACK_COMMAND: &str = ":back";
pub const AGREE_WORD: &str = "agree";

enum Entry {
    Value(Value),
    Back,
}

/// Run `wizard` to completion over `input`/`out` and return the final
/// handler's output. Fails only on I/O errors or when input ends early.
pub async fn run_wizard<H, R, W>(
    wizard: &mut Wizard<H>,
    input: &mut R,
    out: &mut W,
) -> Result<H::Output, String>
where
    H: FinalSubmit,
    R: BufRead,
    W: Write,
{
    loop {
        let step = wizard.current_step().clone();
        let header = step.labels.header.as_deref().unwrap_or("");
        say(out, &format!("\n{} ({})", header, wizard.progress_label()))?;
        if let Some(note) = step.labels.content_under_button.as_deref() {
            say(out, note)?;
        }

        let mut values = FieldValues::new();
        let mut went_back = false;

        if step.fields.is_empty() {
            let label = wizard.primary_label().unwrap_or("Continue").to_string();
            loop {
                let answer = ask(input, out, &format!("{} (type '{}'): ", label, AGREE_WORD))?;
                if answer == BACK_COMMAND {
                    went_back = true;
                    break;
                }
                if answer.eq_ignore_ascii_case(AGREE_WORD) {
                    break;
                }
            }
        } else {
            for field in &step.fields {
                match ask_field(field, input, out)? {
                    Entry::Value(value) => {
                        values.insert(field.name.clone(), value);
                    }
                    Entry::Back => {
                        went_back = true;
                        break;
                    }
                }
            }
        }

        if went_back {
            if wizard.previous_label().is_none() {
                say(out, "Already at the first step.")?;
            }
            wizard.retreat(values);
            continue;
        }

        match wizard.submit_current_step(values).await {
            StepOutcome::Invalid(errors) => {
                for (field, message) in &errors {
                    say(out, &format!("  {}: {}", field, message))?;
                }
            }
            StepOutcome::HookFailed(err) => say(out, &format!("  {}", err))?,
            StepOutcome::Advanced { .. } => {}
            StepOutcome::Completed(output) => return Ok(output),
        }
    }
}

fn ask_field<R: BufRead, W: Write>(
    field: &FieldSpec,
    input: &mut R,
    out: &mut W,
) -> Result<Entry, String> {
    loop {
        let prompt = match field.kind {
            FieldKind::File => format!("{} (file path): ", field.label),
            FieldKind::Text | FieldKind::Secret => format!("{}: ", field.label),
        };
        let answer = ask(input, out, &prompt)?;
        if answer == BACK_COMMAND {
            return Ok(Entry::Back);
        }

        match field.kind {
            FieldKind::Text => return Ok(Entry::Value(Value::String(answer.trim().to_string()))),
            FieldKind::Secret => return Ok(Entry::Value(Value::String(answer))),
            FieldKind::File => {
                let path = answer.trim();
                if path.is_empty() {
                    return Ok(Entry::Value(Value::Null));
                }
                match UploadedFile::from_path(Path::new(path)) {
                    Ok(file) => return Ok(Entry::Value(file.to_value())),
                    Err(e) => say(out, &format!("  {}", e))?,
                }
            }
        }
    }
}

/// Print `prompt` and read one line without its line ending.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String, String> {
    write!(out, "{}", prompt).map_err(|e| format!("failed to write prompt: {}", e))?;
    out.flush()
        .map_err(|e| format!("failed to write prompt: {}", e))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| format!("failed to read input: {}", e))?;
    if read == 0 {
        return Err("input ended before the sign-up was finished".to_string());
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn say<W: Write>(out: &mut W, text: &str) -> Result<(), String> {
    writeln!(out, "{}", text).map_err(|e| format!("failed to write output: {}", e))
}
