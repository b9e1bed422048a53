//! Line-based terminal front end for the wizard

use form_schema::{FieldDef, FieldType, FormValue, FormValues};
use form_wizard::{Advance, FormState, Submission};
use std::io::{self, BufRead, Write};

/// Drive the wizard until the form is submitted (returns the values), the
/// user quits, or input ends (both return `None`).
pub fn run<R: BufRead, W: Write>(
    state: &mut FormState,
    mut input: R,
    mut out: W,
) -> io::Result<Option<FormValues>> {
    if state.current_section().is_none() {
        writeln!(out, "This form has no sections.")?;
        return Ok(None);
    }

    writeln!(out, "== {} ==", state.schema().form_title)?;

    loop {
        render_section(state, &mut out)?;

        let mut choices = vec!["[e]dit"];
        if !state.is_first() {
            choices.push("[p]rev");
        }
        if state.is_last() {
            choices.push("[s]ubmit");
        } else {
            choices.push("[n]ext");
        }
        choices.push("[q]uit");

        let Some(command) = read_answer(&mut input, &mut out, &format!("{} > ", choices.join(" ")))?
        else {
            return Ok(None);
        };

        match command.as_str() {
            "e" | "edit" => {
                if !edit_section(state, &mut input, &mut out)? {
                    return Ok(None);
                }
            }
            "n" | "next" if !state.is_last() => {
                if let Ok(Advance::Blocked { .. }) = state.next() {
                    writeln!(out, "Please fix the highlighted fields.")?;
                }
            }
            "p" | "prev" if !state.is_first() => {
                state.prev();
            }
            "s" | "submit" if state.is_last() => match state.submit() {
                Ok(submission) => {
                    if let Some(notice) = submission.notice() {
                        writeln!(out, "{notice}")?;
                    }
                    if let Submission::Complete(values) = submission {
                        return Ok(Some(values));
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            "q" | "quit" => return Ok(None),
            other => writeln!(out, "Unknown command '{other}'")?,
        }
    }
}

fn render_section<W: Write>(state: &FormState, out: &mut W) -> io::Result<()> {
    let steps: Vec<String> = state
        .steps()
        .iter()
        .map(|step| {
            if step.active {
                format!("[{}] {}", step.index + 1, step.title)
            } else {
                format!("{}. {}", step.index + 1, step.title)
            }
        })
        .collect();
    writeln!(out)?;
    writeln!(out, "{}", steps.join("  >  "))?;

    let Some(section) = state.current_section() else {
        return Ok(());
    };
    writeln!(out, "-- {} --", section.title)?;
    if !section.description.is_empty() {
        writeln!(out, "{}", section.description)?;
    }

    for field in &section.fields {
        let marker = if field.required { " *" } else { "" };
        let shown = match state.values().display_value(field) {
            FormValue::Text(s) if s.is_empty() => "(empty)".to_string(),
            value => value.to_string(),
        };
        writeln!(out, "  {}{}: {}", field.label, marker, shown)?;
        if let Some(message) = state.errors().get(&field.field_id) {
            writeln!(out, "      ! {message}")?;
        }
    }
    Ok(())
}

/// Prompt every field of the active section. Returns `false` when input ended.
fn edit_section<R: BufRead, W: Write>(
    state: &mut FormState,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    let Some(section) = state.current_section() else {
        return Ok(true);
    };
    let fields = section.fields.clone();

    for field in &fields {
        let current = state.values().display_value(field);
        let answer = match field.field_type {
            FieldType::Unsupported => {
                writeln!(out, "  Unsupported field type for '{}', skipped", field.label)?;
                continue;
            }
            FieldType::Checkbox => ask_flag(field, &current, input, out)?,
            FieldType::Dropdown | FieldType::Radio => ask_option(field, &current, input, out)?,
            _ => ask_text(field, &current, input, out)?,
        };

        match answer {
            Answer::Keep => {}
            Answer::Set(value) => {
                if let Err(e) = state.set_value(&field.field_id, value) {
                    writeln!(out, "{e}")?;
                }
            }
            Answer::EndOfInput => return Ok(false),
        }
    }
    Ok(true)
}

enum Answer {
    Keep,
    Set(FormValue),
    EndOfInput,
}

fn ask_text<R: BufRead, W: Write>(
    field: &FieldDef,
    current: &FormValue,
    input: &mut R,
    out: &mut W,
) -> io::Result<Answer> {
    let hint = match current {
        FormValue::Text(s) if s.is_empty() => field.placeholder.clone().unwrap_or_default(),
        value => value.to_string(),
    };
    let prompt = format!("  {}{} [{}]: ", field.label, required_marker(field), hint);

    Ok(match read_line(input, out, &prompt)? {
        None => Answer::EndOfInput,
        Some(line) if line.is_empty() => Answer::Keep,
        Some(line) => Answer::Set(FormValue::Text(line)),
    })
}

fn ask_flag<R: BufRead, W: Write>(
    field: &FieldDef,
    current: &FormValue,
    input: &mut R,
    out: &mut W,
) -> io::Result<Answer> {
    let prompt = format!(
        "  {}{} [y/n, now {}]: ",
        field.label,
        required_marker(field),
        current
    );

    loop {
        let Some(line) = read_answer(input, out, &prompt)? else {
            return Ok(Answer::EndOfInput);
        };
        match line.as_str() {
            "" => return Ok(Answer::Keep),
            "y" | "yes" | "true" => return Ok(Answer::Set(FormValue::Flag(true))),
            "n" | "no" | "false" => return Ok(Answer::Set(FormValue::Flag(false))),
            _ => writeln!(out, "  Please answer y or n")?,
        }
    }
}

fn ask_option<R: BufRead, W: Write>(
    field: &FieldDef,
    current: &FormValue,
    input: &mut R,
    out: &mut W,
) -> io::Result<Answer> {
    writeln!(out, "  {}{}:", field.label, required_marker(field))?;
    for (i, option) in field.options.iter().enumerate() {
        writeln!(out, "    {}) {}", i + 1, option.label)?;
    }
    let prompt = format!("  choice [{current}]: ");

    loop {
        let Some(line) = read_line(input, out, &prompt)? else {
            return Ok(Answer::EndOfInput);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Answer::Keep);
        }

        let by_number = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| field.options.get(i));
        match by_number.or_else(|| field.option(line)) {
            Some(option) => return Ok(Answer::Set(FormValue::Text(option.value.clone()))),
            None => writeln!(out, "  '{line}' is not one of the options")?,
        }
    }
}

fn required_marker(field: &FieldDef) -> &'static str {
    if field.required { " *" } else { "" }
}

/// One line without its line ending, or `None` at end of input
fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    let content = line.strip_suffix('\n').unwrap_or(&line);
    let content = content.strip_suffix('\r').unwrap_or(content);
    Ok(Some(content.to_string()))
}

/// Like [`read_line`], trimmed and lowercased for command matching
fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    Ok(read_line(input, out, prompt)?.map(|line| line.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_schema::{FieldOption, FormSchema, Section};
    use std::io::Cursor;

    fn schema() -> FormSchema {
        FormSchema::new("Student Form").with_sections(vec![
            Section::new("a", "Personal")
                .description("About you")
                .with_fields(vec![
                    FieldDef::new("name", "Name", FieldType::Text)
                        .required()
                        .validation_message("Name is required"),
                    FieldDef::new("gender", "Gender", FieldType::Radio)
                        .required()
                        .with_options(vec![
                            FieldOption::new("f", "Female"),
                            FieldOption::new("m", "Male"),
                        ]),
                ]),
            Section::new("b", "Contact").with_fields(vec![
                FieldDef::new("phone", "Phone", FieldType::Tel).required(),
                FieldDef::new("news", "Newsletter", FieldType::Checkbox),
            ]),
        ])
    }

    fn drive(state: &mut FormState, script: &str) -> (Option<FormValues>, String) {
        let mut out = Vec::new();
        let result = run(state, Cursor::new(script.to_string()), &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_complete_walkthrough() {
        let mut state = FormState::new(schema());
        let (values, output) = drive(&mut state, "e\nAsha\n2\nn\ne\n123-456-7890\ny\ns\n");

        let values = values.expect("form should be submitted");
        assert_eq!(values.get("gender"), Some(&FormValue::text("m")));
        assert_eq!(values.get("news"), Some(&FormValue::Flag(true)));
        assert!(output.contains("[ok] Form submitted successfully!"));
        assert!(output.contains("[2] Contact"));
    }

    #[test]
    fn test_blocked_next_shows_inline_errors() {
        let mut state = FormState::new(schema());
        let (values, output) = drive(&mut state, "n\nq\n");

        assert!(values.is_none());
        assert_eq!(state.current_index(), 0);
        assert!(output.contains("! Name is required"));
        assert!(output.contains("Please fix the highlighted fields."));
    }

    #[test]
    fn test_submit_only_offered_on_last_section() {
        let mut state = FormState::new(schema());
        let (_, output) = drive(&mut state, "s\n");

        assert!(output.contains("Unknown command 's'"));
        assert!(output.contains("[n]ext"));
        assert!(!output.contains("[p]rev"));
    }

    #[test]
    fn test_option_by_label_and_invalid_choice() {
        let mut state = FormState::new(schema());
        let (_, output) = drive(&mut state, "e\nAsha\nnope\nFemale\nq\n");

        assert!(output.contains("'nope' is not one of the options"));
        assert_eq!(state.values().get("gender"), Some(&FormValue::text("f")));
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut state = FormState::new(schema());
        let (values, _) = drive(&mut state, "e\nAsha\n");
        assert!(values.is_none());
        assert_eq!(state.values().get("name"), Some(&FormValue::text("Asha")));
    }

    #[test]
    fn test_text_answer_keeps_surrounding_spaces() {
        let mut state = FormState::new(schema());
        drive(&mut state, "e\n  Asha Rao \r\n f \nq\n");

        assert_eq!(state.values().get("name"), Some(&FormValue::text("  Asha Rao ")));
        assert_eq!(state.values().get("gender"), Some(&FormValue::text("f")));
    }

    #[test]
    fn test_empty_form() {
        let mut state = FormState::new(FormSchema::new("Nothing"));
        let (values, output) = drive(&mut state, "");
        assert!(values.is_none());
        assert!(output.contains("This form has no sections."));
    }
}
