//! Interactive interview over a line-oriented terminal

use crate::error::Result;
use crate::interview::session::{InterviewSession, Turn};
use colored::Colorize;
use log::warn;
use std::io::{BufRead, Write};

/// Drive `session` to completion, reading one answer per question.
///
/// Blank answers re-prompt. If input ends early the partially completed
/// session is returned as-is.
pub fn run_console_interview<R: BufRead, W: Write>(
    session: InterviewSession,
    input: &mut R,
    output: &mut W,
) -> Result<InterviewSession> {
    let mut session = session.start();
    if let Some(greeting) = session.history().last() {
        writeln!(output, "{}", greeting.content.bold())?;
    }

    loop {
        let (next, turn) = session.next_turn();
        session = next;

        match turn {
            Turn::Question { number, text } => {
                writeln!(output, "\n{} {}", format!("Q{}:", number).cyan().bold(), text)?;
                match read_answer(input, output)? {
                    Some(answer) => session = session.record_answer(&answer),
                    None => {
                        warn!("Input closed after {} questions, ending interview early", session.questions_asked());
                        return Ok(session);
                    }
                }
            }
            Turn::Finished { closing } => {
                writeln!(output, "\n{}", closing.green())?;
                return Ok(session);
            }
        }
    }
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    loop {
        write!(output, "Your answer: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(Some(answer.to_string()));
        }
    }
}
