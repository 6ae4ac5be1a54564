//! Credential lookup: environment first, interactive prompt as fallback.
//!
//! Resolved values are returned in a [`Credentials`] object that callers pass
//! along explicitly. Nothing here writes to the process environment.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of interactively entered values
pub trait Prompt {
    /// Ask for `label`; `secret` marks values that should not be echoed
    fn ask(&mut self, label: &str, secret: bool) -> io::Result<String>;
}

/// Prompt that reads answers from standard input.
///
/// Secret values typed at a terminal are read in raw mode and never echoed.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, label: &str, secret: bool) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}: ", label)?;
        stderr.flush()?;

        if secret && io::stdin().is_terminal() {
            let answer = read_hidden_line();
            writeln!(stderr)?;
            return answer;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("No input for {}", label),
            ));
        }
        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Leaves raw mode when dropped, also on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("Failed to leave raw terminal mode: {}", err);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HiddenInput {
    Pending,
    Done,
    Cancelled,
}

/// Apply one key press to a hidden input buffer
fn apply_hidden_key(buffer: &mut String, key: &KeyEvent) -> HiddenInput {
    if key.kind == KeyEventKind::Release {
        return HiddenInput::Pending;
    }

    match key.code {
        KeyCode::Enter => HiddenInput::Done,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => HiddenInput::Cancelled,
        KeyCode::Backspace => {
            buffer.pop();
            HiddenInput::Pending
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            HiddenInput::Pending
        }
        _ => HiddenInput::Pending,
    }
}

/// Read one line from the terminal without echoing it
fn read_hidden_line() -> io::Result<String> {
    let _raw = RawModeGuard::enable()?;
    let mut buffer = String::new();

    loop {
        if let Event::Key(key) = event::read()? {
            match apply_hidden_key(&mut buffer, &key) {
                HiddenInput::Pending => {}
                HiddenInput::Done => return Ok(buffer),
                HiddenInput::Cancelled => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "Input cancelled"));
                }
            }
        }
    }
}

/// Read an environment variable, asking the prompt when it is unset or empty
pub fn get_env<P: Prompt + ?Sized>(var: &str, prompt: &mut P) -> io::Result<String> {
    get_env_with(var, false, prompt)
}

fn get_env_with<P: Prompt + ?Sized>(var: &str, secret: bool, prompt: &mut P) -> io::Result<String> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => {
            log::debug!("Using {} from environment", var);
            Ok(value)
        }
        _ => {
            log::debug!("{} not set, prompting", var);
            prompt.ask(var, secret)
        }
    }
}

/// Names of the environment variables holding device credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSettings {
    #[serde(default = "default_username_env")]
    pub username_env: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_username_env() -> String {
    "NET_USERNAME".to_string()
}

fn default_password_env() -> String {
    "NET_PASSWORD".to_string()
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            username_env: default_username_env(),
            password_env: default_password_env(),
        }
    }
}

/// Username and password for device logins
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Resolve both values, prompting for whichever is missing
    pub fn resolve<P: Prompt + ?Sized>(settings: &CredentialSettings, prompt: &mut P) -> io::Result<Self> {
        let username = get_env_with(&settings.username_env, false, prompt)?;
        let password = get_env_with(&settings.password_env, true, prompt)?;
        Ok(Self { username, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
