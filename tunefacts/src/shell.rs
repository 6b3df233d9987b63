//! Interactive line shell
//!
//! Reads one line per turn from `>> `, handles the reserved commands and hands
//! everything else to the [`SongResolver`]. End of input ends the loop.

use crate::context::candidate_line;
use crate::disambiguator::CandidatePrompt;
use crate::resolver::{Selection, SongResolver};
use crate::scoring::ScoredCandidate;
use std::io::{self, BufRead, Write};

/// Sample queries listed by `help` and `examples`
pub const EXAMPLES: &[&str] = &[
    "Tell me about Bohemian Rhapsody by Queen",
    "Shape of You by Ed Sheeran",
    "Nothing Else Matters Metallica",
    "Is Skeletons by Travis Scott produced by Tame Impala?",
];

const PROMPT: &str = ">> ";
const COMMANDS_LINE: &str = "Commands: help, examples, exit, quit";

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    Exit,
    Help,
    Examples,
    Empty,
    /// Trimmed text for the pipeline
    Query(&'a str),
}

/// Reserved words are matched case-insensitively on the trimmed line
pub fn classify_command(line: &str) -> ShellCommand<'_> {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "exit" | "quit" => ShellCommand::Exit,
        "help" | "?" => ShellCommand::Help,
        "examples" => ShellCommand::Examples,
        _ => ShellCommand::Query(trimmed),
    }
}

/// [`CandidatePrompt`] over the shell's own input and output streams
pub struct LinePrompt<'io, R, W> {
    input: &'io mut R,
    output: &'io mut W,
}

impl<'io, R: BufRead, W: Write> LinePrompt<'io, R, W> {
    pub fn new(input: &'io mut R, output: &'io mut W) -> Self {
        Self { input, output }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            tracing::debug!(error = %e, "Failed to write selection output");
        }
    }
}

impl<R: BufRead, W: Write> CandidatePrompt for LinePrompt<'_, R, W> {
    fn present(&mut self, shortlist: &[ScoredCandidate<'_>]) {
        self.emit("\nMultiple possible recordings found, please choose which one you mean:");
        for (idx, scored) in shortlist.iter().enumerate() {
            let line = candidate_line(idx + 1, scored.candidate);
            self.emit(&line);
        }
        self.emit("Enter 1/2/3 to choose, 'c' to cancel, or press Enter to pick #1.");
    }

    fn read_choice(&mut self) -> Option<String> {
        let flushed = write!(self.output, "Choice [1]: ").and_then(|_| self.output.flush());
        if let Err(e) = flushed {
            tracing::debug!(error = %e, "Failed to write selection prompt");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read selection input");
                None
            }
        }
    }

    fn reject(&mut self, message: &str) {
        self.emit(message);
    }
}

fn write_examples<W: Write>(output: &mut W) -> io::Result<()> {
    for example in EXAMPLES {
        writeln!(output, "  - {example}")?;
    }
    Ok(())
}

/// Run turns until `exit`/`quit` or end of input
///
/// With `auto_pick` set, ambiguous searches resolve by best-guess score
/// instead of asking.
pub async fn run_shell<R: BufRead, W: Write>(
    resolver: &SongResolver,
    auto_pick: bool,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "TuneFacts: ask about a song or its credits.")?;
    writeln!(output, "Example: {}", EXAMPLES[0])?;
    writeln!(output, "{COMMANDS_LINE}\n")?;

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\nExiting. Bye!")?;
            break;
        }

        match classify_command(&line) {
            ShellCommand::Empty => continue,
            ShellCommand::Exit => {
                writeln!(output, "Goodbye!")?;
                break;
            }
            ShellCommand::Help => {
                writeln!(output, "Ask about a song or its credits. Examples:")?;
                write_examples(&mut output)?;
                writeln!(output, "{COMMANDS_LINE}\n")?;
            }
            ShellCommand::Examples => {
                writeln!(output, "Examples:")?;
                write_examples(&mut output)?;
            }
            ShellCommand::Query(query) => {
                tracing::debug!(query = %query, "Turn started");
                let reply = if auto_pick {
                    resolver.answer_turn(query, &mut Selection::BestGuess).await
                } else {
                    let mut prompt = LinePrompt::new(&mut input, &mut output);
                    resolver
                        .answer_turn(query, &mut Selection::Ask(&mut prompt))
                        .await
                };
                writeln!(output, "\n{reply}\n")?;
            }
        }
    }

    Ok(())
}
