use crate::{Error, Result};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented operator console. Every read blocks until a full line
/// arrives; end of input is an error so callers unwind instead of spinning.
pub struct Console<R, W> {
    input: R,
    output: W,
    pub colored: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, colored: bool) -> Self {
        Self {
            input,
            output,
            colored,
        }
    }

    /// Print `prompt` without a newline and read the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(answer.trim().to_string())
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

pub fn stdio(colored: bool) -> Console<io::StdinLock<'static>, io::Stdout> {
    Console::new(io::stdin().lock(), io::stdout(), colored)
}
