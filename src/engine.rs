//! Line-oriented text protocol for playing against the engine.
//!
//! Each input line is `[id] command args...`. Replies start with `=` on
//! success or `?` on failure, followed by the optional id and the message,
//! and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new <white_col> [black_col]` - Start a game with the Dukes in the given
//!   columns (Black's column is random if omitted)
//! - `show` - Print the board
//! - `moves <row> <col>` - List the legal destinations of a unit
//! - `move <row> <col> <to_row> <to_col>` - Move a unit
//! - `placements` - List the squares a new unit may be placed on
//! - `place <row> <col>` - Draw a unit from the bag and place it
//! - `genmove` - Let the engine play for the side to move
//! - `result` - Report the game status

use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::{info, warn};

use crate::config::SearchConfig;
use crate::constants::N;
use crate::mcts::SearchTree;
use crate::rules::{Outcome, is_in_check, legal_moves_from, legal_placements, result};
use crate::state::{GameState, apply_move, apply_placement, opening};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "genmove",
    "known_command",
    "list_commands",
    "move",
    "moves",
    "name",
    "new",
    "place",
    "placements",
    "quit",
    "result",
    "show",
    "version",
];

/// Engine state for one interactive session.
pub struct Engine {
    /// Current game state
    state: GameState,
    /// Search settings used by `genmove`
    config: SearchConfig,
    /// Source for bag draws, Duke columns and search seeds
    rng: fastrand::Rng,
}

impl Engine {
    /// Create an engine; the game starts once `new` is received.
    pub fn new(config: SearchConfig) -> Self {
        let rng = config.rng();
        Self {
            state: GameState::initial(),
            config,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

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
            let (success, message) = self.execute(&command, &parts[1..]);
            if !success {
                warn!("{command}: {message}");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Parse `count` board coordinates from `args`.
    fn parse_coords(args: &[&str], count: usize) -> std::result::Result<Vec<usize>, String> {
        if args.len() < count {
            return Err("missing arguments".to_string());
        }
        args[..count]
            .iter()
            .map(|a| match a.parse::<usize>() {
                Ok(v) if v < N => Ok(v),
                _ => Err(format!("invalid coordinate: {a}")),
            })
            .collect()
    }

    fn status(&self) -> String {
        match result(&self.state) {
            Outcome::WhiteWins => "White wins".to_string(),
            Outcome::BlackWins => "Black wins".to_string(),
            Outcome::Ongoing if is_in_check(&self.state, self.state.to_move) => {
                format!("{} to move (check)", self.state.to_move)
            }
            Outcome::Ongoing => format!("{} to move", self.state.to_move),
        }
    }

    fn ensure_playing(&self) -> std::result::Result<(), String> {
        if self.state.duke_square(self.state.to_move).is_none()
            && result(&self.state) == Outcome::Ongoing
        {
            return Err("no game in progress, use `new`".to_string());
        }
        if result(&self.state).is_terminal() {
            return Err(format!("game over: {}", self.status()));
        }
        Ok(())
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "duke-mcts".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "new" => {
                let white = match Self::parse_coords(args, 1) {
                    Ok(v) => v[0],
                    Err(e) => return (false, e),
                };
                let black = match args.get(1) {
                    Some(_) => match Self::parse_coords(&args[1..], 1) {
                        Ok(v) => v[0],
                        Err(e) => return (false, e),
                    },
                    None => self.rng.usize(..N),
                };
                match opening(white, black, &mut self.rng) {
                    Ok(state) => {
                        self.state = state;
                        info!("new game, White Duke col {white}, Black Duke col {black}");
                        (true, format!("\n{}", self.state))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "show" => (true, format!("\n{}", self.state)),

            "result" => (true, self.status()),

            "moves" => {
                let sq = match Self::parse_coords(args, 2) {
                    Ok(v) => (v[0], v[1]),
                    Err(e) => return (false, e),
                };
                match legal_moves_from(&self.state, sq) {
                    Ok(moves) => {
                        let list: Vec<String> = moves
                            .iter()
                            .map(|(r, c, kind)| format!("{r},{c} {kind:?}"))
                            .collect();
                        (true, list.join("\n"))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "move" => {
                if let Err(e) = self.ensure_playing() {
                    return (false, e);
                }
                let (from, to) = match Self::parse_coords(args, 4) {
                    Ok(v) => ((v[0], v[1]), (v[2], v[3])),
                    Err(e) => return (false, e),
                };
                let moves = match legal_moves_from(&self.state, from) {
                    Ok(m) => m,
                    Err(e) => return (false, e.to_string()),
                };
                let Some(&(_, _, kind)) = moves.iter().find(|&&(r, c, _)| (r, c) == to) else {
                    return (false, "illegal move".to_string());
                };
                match apply_move(&self.state, from, to, kind) {
                    Ok(next) => {
                        self.state = next;
                        (true, self.status())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "placements" => {
                let list: Vec<String> = legal_placements(&self.state)
                    .iter()
                    .map(|(r, c)| format!("{r},{c}"))
                    .collect();
                (true, list.join(" "))
            }

            "place" => {
                if let Err(e) = self.ensure_playing() {
                    return (false, e);
                }
                let sq = match Self::parse_coords(args, 2) {
                    Ok(v) => (v[0], v[1]),
                    Err(e) => return (false, e),
                };
                if is_in_check(&self.state, self.state.to_move) {
                    return (false, "only the Duke may act while in check".to_string());
                }
                let side = self.state.to_move;
                let Some(kind) = self.state.bag(side).peek_random(&mut self.rng) else {
                    return (false, "bag is empty, move a unit instead".to_string());
                };
                match apply_placement(&self.state, sq, kind) {
                    Ok(next) => {
                        self.state = next;
                        (true, format!("placed {kind}; {}", self.status()))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                if let Err(e) = self.ensure_playing() {
                    return (false, e);
                }
                let config = self.config.clone().seeded(self.rng.u64(..));
                let mut tree = SearchTree::new(self.state, config);
                match tree.search() {
                    Ok(next) => {
                        self.state = next;
                        (true, format!("{}\n{}", self.status(), self.state))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
