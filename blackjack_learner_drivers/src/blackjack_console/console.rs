use std::io::{self, BufRead, Write};

use blackjack_learner::strategy::{DEAL, END};
use blackjack_learner::{Error, GameState, Responder};

const HIT_STRINGS: [&str; 4] = ["h", "H", "hit", "Hit"];
const STAND_STRINGS: [&str; 4] = ["s", "S", "stand", "Stand"];
const END_STRINGS: [&str; 6] = ["e", "E", "end", "End", "x", "X"];

/// Lets a person play through a terminal.
pub struct ConsoleResponder<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleResponder<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleResponder { input, output }
    }

    fn read_reply(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Responder for ConsoleResponder<R, W> {
    fn respond(&mut self, state: &GameState) -> Result<String, Error> {
        match state {
            GameState::Active(active) => {
                writeln!(self.output)?;
                writeln!(
                    self.output,
                    "Player Total:  {} Soft: {}",
                    active.player_total, active.player_soft
                )?;
                writeln!(self.output, "Dealer Upcard: {}", active.dealer_upcard)?;
                writeln!(self.output)?;
                writeln!(self.output, "Choose [H]it or [S]tand:")?;
                self.output.flush()?;

                // Anything unrecognised goes back as typed and the runner rejects it.
                let reply = self.read_reply()?;
                if HIT_STRINGS.contains(&reply.as_str()) {
                    Ok("hit".to_string())
                } else if STAND_STRINGS.contains(&reply.as_str()) {
                    Ok("stand".to_string())
                } else {
                    Ok(reply)
                }
            }
            GameState::Resolved(resolved) => {
                writeln!(self.output)?;
                writeln!(self.output, "---Result---")?;
                writeln!(self.output, "Player Total: {}", resolved.player_total)?;
                writeln!(self.output, "Dealer Total: {}", resolved.dealer_total)?;
                writeln!(
                    self.output,
                    "{} - {}",
                    resolved.outcome, resolved.description
                )?;
                writeln!(self.output)?;
                writeln!(self.output, "Type [E]nd to stop or ENTER to continue")?;
                self.output.flush()?;

                let reply = self.read_reply()?;
                if END_STRINGS.contains(&reply.as_str()) {
                    Ok(END.to_string())
                } else {
                    Ok(DEAL.to_string())
                }
            }
        }
    }
}
