use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Stylize;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResponse {
    Confirm,
    Abort,
    /// Anything that is neither yes nor no. Never proceeds.
    Invalid,
}

impl ConfirmResponse {
    pub fn from_key(key: char) -> Self {
        match key {
            'y' | 'Y' => ConfirmResponse::Confirm,
            'n' | 'N' => ConfirmResponse::Abort,
            _ => ConfirmResponse::Invalid,
        }
    }

    pub fn from_line(line: &str) -> Self {
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("yes") {
            return ConfirmResponse::Confirm;
        }
        if answer.eq_ignore_ascii_case("no") {
            return ConfirmResponse::Abort;
        }
        let mut chars = answer.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Self::from_key(key),
            _ => ConfirmResponse::Invalid,
        }
    }

    pub fn proceeds(self) -> bool {
        self == ConfirmResponse::Confirm
    }
}

pub fn print_prompt(old_name: &str, new_name: &str, root: &Path) -> Result<()> {
    let mut stdout = io::stdout();
    write!(
        stdout,
        "Are you sure you want to rename {} to {} in {}?\n{}",
        old_name.red(),
        new_name.green(),
        root.display().to_string().cyan(),
        "Y/N ".grey()
    )?;
    stdout.flush()?;
    Ok(())
}

/// Reads a single keypress on a terminal, or one line when stdin is piped.
pub fn read_response() -> Result<ConfirmResponse> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        read_key()
    } else {
        read_line(&mut stdin.lock())
    }
}

fn read_key() -> Result<ConfirmResponse> {
    enable_raw_mode()?;
    let key = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(key),
            Ok(_) => continue,
            Err(error) => break Err(error),
        }
    };
    disable_raw_mode()?;
    let key = key?;

    let response = match key.code {
        KeyCode::Char(c) => {
            println!("{}", c);
            ConfirmResponse::from_key(c)
        }
        _ => {
            println!();
            ConfirmResponse::Invalid
        }
    };
    Ok(response)
}

pub fn read_line<R: BufRead>(reader: &mut R) -> Result<ConfirmResponse> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(ConfirmResponse::Invalid);
    }
    Ok(ConfirmResponse::from_line(&line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_keys() {
        assert_eq!(ConfirmResponse::from_key('Y'), ConfirmResponse::Confirm);
        assert_eq!(ConfirmResponse::from_key('y'), ConfirmResponse::Confirm);
        assert_eq!(ConfirmResponse::from_key('N'), ConfirmResponse::Abort);
        assert_eq!(ConfirmResponse::from_key('q'), ConfirmResponse::Invalid);
    }

    #[test]
    fn test_only_confirm_proceeds() {
        assert!(ConfirmResponse::Confirm.proceeds());
        assert!(!ConfirmResponse::Abort.proceeds());
        assert!(!ConfirmResponse::Invalid.proceeds());
    }

    #[test]
    fn test_lines() {
        assert_eq!(ConfirmResponse::from_line("Y\n"), ConfirmResponse::Confirm);
        assert_eq!(ConfirmResponse::from_line("  yes \r\n"), ConfirmResponse::Confirm);
        assert_eq!(ConfirmResponse::from_line("n\n"), ConfirmResponse::Abort);
        assert_eq!(ConfirmResponse::from_line("No"), ConfirmResponse::Abort);
        assert_eq!(ConfirmResponse::from_line("yep"), ConfirmResponse::Invalid);
        assert_eq!(ConfirmResponse::from_line("\n"), ConfirmResponse::Invalid);
    }

    #[test]
    fn test_read_line() {
        let mut input = Cursor::new("y\nignored\n");

        assert_eq!(read_line(&mut input).unwrap(), ConfirmResponse::Confirm);
    }

    #[test]
    fn test_read_line_at_eof() {
        let mut input = Cursor::new("");

        assert_eq!(read_line(&mut input).unwrap(), ConfirmResponse::Invalid);
    }
}
