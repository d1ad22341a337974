//! Prompts that collect stage inputs, each pre-filled with its default.

use colored::Colorize;
use fakebiz_core::{BrandRequest, LogoRequest, Tone};
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};

/// `Ok(None)` when the user cancels with CTRL-C or CTRL-D.
pub type FormResult<T> = Result<Option<T>, ReadlineError>;

fn ask<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
    label: &str,
    default: &str,
) -> FormResult<String> {
    match rl.readline_with_initial(&format!("{} ", label.bold()), (default, "")) {
        Ok(answer) => {
            let answer = answer.trim();
            Ok(Some(if answer.is_empty() {
                default.to_string()
            } else {
                answer.to_string()
            }))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err),
    }
}

fn ask_tone<H: Helper, I: History>(rl: &mut Editor<H, I>, default: Tone) -> FormResult<Tone> {
    let choices = Tone::ALL
        .iter()
        .map(Tone::label)
        .collect::<Vec<_>>()
        .join(" / ");
    println!("{}", choices.dimmed());

    loop {
        let Some(answer) = ask(rl, "Tone:", default.label())? else {
            return Ok(None);
        };
        match answer.parse::<Tone>() {
            Ok(tone) => return Ok(Some(tone)),
            Err(message) => println!("{}", message.yellow()),
        }
    }
}

pub fn brand_request<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
    defaults: &BrandRequest,
) -> FormResult<BrandRequest> {
    let Some(business_type) = ask(rl, "Business type:", &defaults.business_type)? else {
        return Ok(None);
    };
    let Some(tone) = ask_tone(rl, defaults.tone)? else {
        return Ok(None);
    };
    let Some(audience) = ask(rl, "Target audience:", &defaults.audience)? else {
        return Ok(None);
    };

    Ok(Some(BrandRequest {
        business_type,
        tone,
        audience,
    }))
}

pub fn logo_request<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
    defaults: &LogoRequest,
) -> FormResult<LogoRequest> {
    let Some(tone) = ask_tone(rl, defaults.tone)? else {
        return Ok(None);
    };
    let Some(business_type) = ask(rl, "Business type:", &defaults.business_type)? else {
        return Ok(None);
    };

    Ok(Some(LogoRequest {
        business_type,
        tone,
    }))
}
