//! Line-oriented text front-end.
//!
//! This is a presentation layer over [`MatchController`]: it turns text
//! commands and pixel clicks into controller calls and reports what a
//! graphical front-end would draw. Framing follows GTP: an optional numeric
//! id, a command and its arguments; answers start with `=` on success or
//! `?` on failure and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `reset` - Start a new match
//! - `play <row> <col>` - Place a mark for the side to move
//! - `click <x> <y>` - Human pointer click in window pixels; resets a finished match
//! - `genmove` - Let the engine play its move
//! - `showboard` - Print the grid
//! - `outcome` - Report the result from the human's point of view
//! - `turn` - Report the side to move
//!
//! With auto-reply on, the engine answers a human move inside the same
//! response, the way the interactive front-end's frame loop does.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{debug, error};

use crate::board::{Move, Outcome, Player};
use crate::constants::{CELL_SIZE, WIDTH};
use crate::controller::{MatchConfig, MatchController};
use crate::error::GameError;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "click",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "outcome",
    "play",
    "protocol_version",
    "quit",
    "reset",
    "showboard",
    "turn",
    "version",
];

/// Success flag and message of one command.
type Reply = (bool, String);

/// Map a click in window pixels to a grid cell.
///
/// Returns `None` for clicks outside the window.
pub fn cell_from_pixel(x: u32, y: u32) -> Option<(usize, usize)> {
    if x >= WIDTH || y >= WIDTH {
        return None;
    }
    Some(((y / CELL_SIZE) as usize, (x / CELL_SIZE) as usize))
}

/// End-of-match banner as seen by the human, who plays the engine's opponent.
pub fn outcome_message(outcome: Outcome, human: Player) -> &'static str {
    match outcome {
        Outcome::InProgress => "in progress",
        Outcome::Win(p) if p == human => "You Win",
        Outcome::Win(_) => "You Lose",
        Outcome::Draw => "Draw",
    }
}

/// Text front-end state.
pub struct Session {
    /// The match being played
    game: MatchController,
    /// Whether the engine replies to human moves on its own
    auto_reply: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MatchConfig::default(), false)
    }
}

impl Session {
    pub fn new(config: MatchConfig, auto_reply: bool) -> Self {
        Self {
            game: MatchController::new(config),
            auto_reply,
        }
    }

    /// The match driven by this session.
    pub fn game(&self) -> &MatchController {
        &self.game
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_io(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// Returns an error on I/O failure or when the core reports a broken
    /// invariant.
    pub fn run_io<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        if self.auto_reply {
            self.frame(&mut output)?;
        }

        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args).inspect_err(|e| {
                error!(error = %e, "core invariant violated");
            })?;
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// If the engine opens the match, let it move before reading input.
    fn frame<W: Write>(&mut self, output: &mut W) -> anyhow::Result<()> {
        if let Some(mv) = self.game.poll_engine()? {
            writeln!(output, "engine plays {} {}\n{}", mv.row(), mv.col(), self.game.board())
                .context("failed to write engine move")?;
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command.
    ///
    /// Rejected moves become failure replies; only invariant violations
    /// escape as errors.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<Reply, GameError> {
        debug!(command, ?args, "execute");
        let reply = match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return Ok((false, "missing argument".to_string()));
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "reset" => (true, self.restart()?),

            "play" => match parse_pair::<usize>(args) {
                Some((row, col)) => self.human_move(row, col, None)?,
                None => (false, "expected <row> <col>".to_string()),
            },

            "click" => match parse_pair::<u32>(args) {
                Some(_) if !self.game.is_running() => {
                    let opening = self.restart()?;
                    (true, format!("reset{opening}"))
                }
                Some((x, y)) => match cell_from_pixel(x, y) {
                    Some((row, col)) => {
                        let human = self.human();
                        self.human_move(row, col, Some(human))?
                    }
                    None => (false, "click outside the window".to_string()),
                },
                None => (false, "expected <x> <y>".to_string()),
            },

            "genmove" => match self.game.request_engine_move() {
                Ok(mv) => (true, self.describe_move(mv)),
                Err(e) => reject(e)?,
            },

            "showboard" => (true, format!("\n{}", self.game.board())),

            "outcome" => (
                true,
                outcome_message(self.game.outcome(), self.human()).to_string(),
            ),

            "turn" => (true, self.game.active_player().to_string()),

            _ => (false, format!("unknown command: {command}")),
        };
        Ok(reply)
    }

    /// Start a new match. With auto-reply on, an engine that opens moves
    /// immediately and its move is returned as a message tail.
    fn restart(&mut self) -> Result<String, GameError> {
        self.game.reset();
        if !self.auto_reply {
            return Ok(String::new());
        }
        Ok(match self.game.poll_engine()? {
            Some(mv) => format!("\nengine plays {} {}\n{}", mv.row(), mv.col(), self.game.board()),
            None => String::new(),
        })
    }

    fn human(&self) -> Player {
        self.game.engine_side().opponent()
    }

    /// Place a mark. `play` moves for whoever is to move; a pointer click
    /// always comes from the human and names that side in `player`.
    fn human_move(
        &mut self,
        row: usize,
        col: usize,
        player: Option<Player>,
    ) -> Result<Reply, GameError> {
        let placed = match player {
            Some(p) => self.game.submit_move_as(p, row, col),
            None => self.game.submit_move(row, col),
        };
        if let Err(e) = placed {
            return reject(e);
        }
        if !self.auto_reply {
            return Ok((true, self.status_suffix()));
        }

        let message = match self.game.poll_engine()? {
            Some(mv) => self.describe_move(mv),
            None => self.status_suffix(),
        };
        Ok((true, format!("{message}\n{}", self.game.board())))
    }

    fn describe_move(&self, mv: Move) -> String {
        let suffix = self.status_suffix();
        if suffix.is_empty() {
            format!("{} {}", mv.row(), mv.col())
        } else {
            format!("{} {} {suffix}", mv.row(), mv.col())
        }
    }

    /// Outcome banner once the match is over, empty before that.
    fn status_suffix(&self) -> String {
        if self.game.is_running() {
            String::new()
        } else {
            outcome_message(self.game.outcome(), self.human()).to_string()
        }
    }
}

/// Turn a rejected move into a failure reply; pass anything else through.
fn reject(err: GameError) -> Result<Reply, GameError> {
    match err {
        GameError::IllegalMove(reason) => Ok((false, reason.to_string())),
        other => Err(other),
    }
}

fn parse_pair<T: std::str::FromStr>(args: &[&str]) -> Option<(T, T)> {
    match args {
        [a, b, ..] => Some((a.parse().ok()?, b.parse().ok()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run_io(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Session::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Session::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_cell_from_pixel() {
        assert_eq!(cell_from_pixel(0, 0), Some((0, 0)));
        assert_eq!(cell_from_pixel(599, 0), Some((0, 2)));
        assert_eq!(cell_from_pixel(250, 450), Some((2, 1)));
        assert_eq!(cell_from_pixel(600, 10), None);
        assert_eq!(cell_from_pixel(10, 600), None);
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(outcome_message(Outcome::Win(Player::A), Player::A), "You Win");
        assert_eq!(outcome_message(Outcome::Win(Player::B), Player::A), "You Lose");
        assert_eq!(outcome_message(Outcome::Draw, Player::A), "Draw");
    }

    #[test]
    fn test_known_command() {
        let mut session = Session::default();

        let (success, response) = session.execute("known_command", &["genmove"]).unwrap();
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = session.execute("known_command", &["komi"]).unwrap();
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_and_genmove() {
        let mut session = Session::default();

        let (success, _) = session.execute("play", &["1", "1"]).unwrap();
        assert!(success);

        let (success, response) = session.execute("genmove", &[]).unwrap();
        assert!(success);
        assert_eq!(response, "0 0");
        assert_eq!(session.game().board().filled_count(), 2);
    }

    #[test]
    fn test_rejected_play() {
        let mut session = Session::default();
        session.execute("play", &["0", "0"]).unwrap();

        let (success, response) = session.execute("play", &["0", "0"]).unwrap();
        assert!(!success);
        assert_eq!(response, "cell (0, 0) is already occupied");

        let (success, _) = session.execute("play", &["4", "0"]).unwrap();
        assert!(!success);

        let (success, _) = session.execute("play", &["x"]).unwrap();
        assert!(!success);
    }

    #[test]
    fn test_click_resets_finished_match() {
        let mut session = Session::default();
        for (row, col) in [("0", "0"), ("1", "0"), ("0", "1"), ("1", "1"), ("0", "2")] {
            let (success, _) = session.execute("play", &[row, col]).unwrap();
            assert!(success);
        }
        assert_eq!(session.game().outcome(), Outcome::Win(Player::A));

        let (success, response) = session.execute("click", &["300", "300"]).unwrap();
        assert!(success);
        assert_eq!(response, "reset");
        assert_eq!(session.game(), &MatchController::default());
    }

    #[test]
    fn test_script_with_ids() {
        let mut session = Session::default();
        let out = run_script(&mut session, "# comment\n\n7 name\nturn\nquit\nname\n");
        assert_eq!(out, "=7 tictac-minimax\n\n= A\n\n= \n\n");
    }

    #[test]
    fn test_auto_reply_answers_human_move() {
        let mut session = Session::new(MatchConfig::default(), true);
        let out = run_script(&mut session, "play 1 1\n");
        assert!(out.starts_with("= 0 0\n"), "unexpected output: {out}");
        assert_eq!(session.game().board().filled_count(), 2);
        assert_eq!(session.game().active_player(), Player::A);
    }

    #[test]
    fn test_click_cannot_play_engine_side() {
        let mut session = Session::default();
        let (success, _) = session.execute("click", &["10", "10"]).unwrap();
        assert!(success);
        let before = session.game().clone();

        let (success, response) = session.execute("click", &["250", "250"]).unwrap();
        assert!(!success);
        assert_eq!(response, "it is not A's turn");
        assert_eq!(session.game(), &before);
        assert!(session.game().board().is_empty_cell(1, 1));

        let (success, _) = session.execute("genmove", &[]).unwrap();
        assert!(success);
        let (success, _) = session.execute("click", &["450", "450"]).unwrap();
        assert!(success);
        assert_eq!(session.game().board().get(2, 2), Some(Player::A));
    }

    #[test]
    fn test_auto_reply_engine_opens_and_reopens_after_reset() {
        let config = MatchConfig {
            engine_side: Player::A,
        };
        let mut session = Session::new(config, true);
        let out = run_script(&mut session, "reset\n");
        assert!(
            out.starts_with("engine plays 0 0\nX . .\n. . .\n. . .\n"),
            "unexpected output: {out}"
        );
        assert!(
            out.contains("= \nengine plays 0 0\nX . .\n"),
            "reset should carry the engine's opening: {out}"
        );
        assert_eq!(session.game().board().filled_count(), 1);
        assert_eq!(session.game().active_player(), Player::B);
    }
}
