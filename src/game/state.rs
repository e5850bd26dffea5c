//! Game state and construction.

use crate::board::{Board, Cell};
use crate::core::{GameConfig, GameError, GameRng, Mode, PlayerId, PlayerMap, Pos};
use crate::path::Path;
use crate::props::{Schedule, Scheduled};

use super::round::RoundOutcome;

/// One player's position, score and status flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub pos: Pos,
    pub score: u32,
    /// Movement requests are ignored.
    pub frozen: bool,
    /// Movement directions are inverted.
    pub dizzy: bool,
}

impl PlayerState {
    #[must_use]
    pub const fn at(pos: Pos) -> Self {
        Self {
            pos,
            score: 0,
            frozen: false,
            dizzy: false,
        }
    }
}

/// Where the round is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal. Movement and prop activation are rejected.
    Finished(RoundOutcome),
}

/// Countdown and turn bookkeeping for the round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub remaining_time: u32,
    /// The player who issued the latest move or click.
    pub current_player: PlayerId,
    pub paused: bool,
    pub phase: Phase,
}

impl RoundState {
    #[must_use]
    pub const fn new(remaining_time: u32) -> Self {
        Self {
            remaining_time,
            current_player: PlayerId::ONE,
            paused: false,
            phase: Phase::Running,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }
}

/// A running game: board, players, round clock and timed effects.
///
/// All mutation happens through `&mut self` calls that run to completion,
/// so a move, a click and a tick never interleave. Timed behaviour is
/// queued on [`Schedule`] and applied by [`Game::tick`].
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) players: PlayerMap<PlayerState>,
    /// Pending selection per player.
    pub(crate) selections: PlayerMap<Option<Pos>>,
    pub(crate) round: RoundState,
    /// Ticks since the game started.
    pub(crate) clock: u64,
    pub(crate) schedule: Schedule,
    /// Highlighted pair from the latest Hint.
    pub(crate) hint: Option<(Pos, Pos)>,
    pub(crate) flash: bool,
    /// Connector of the latest match, cleared on the next tick.
    pub(crate) last_path: Option<Path>,
    pub(crate) rng: GameRng,
}

impl Game {
    /// Start a new game on a freshly generated board.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        GameBuilder::new().config(config).build(seed)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn remaining_time(&self) -> u32 {
        self.round.remaining_time
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.round.current_player
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.round.paused
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.round.is_finished()
    }

    /// The outcome, once the round has finished.
    #[must_use]
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        match &self.round.phase {
            Phase::Finished(outcome) => Some(outcome),
            Phase::Running => None,
        }
    }

    /// Ticks elapsed since the game started.
    #[must_use]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// A player's state, or `None` for player 2 in single-player mode.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerState)> {
        self.players.iter()
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.players.get(player).map(|p| p.score)
    }

    /// The block a player has selected and not yet matched.
    #[must_use]
    pub fn pending_selection(&self, player: PlayerId) -> Option<Pos> {
        self.selections.get(player).copied().flatten()
    }

    #[must_use]
    pub fn hint(&self) -> Option<(Pos, Pos)> {
        self.hint
    }

    #[must_use]
    pub fn is_flash_active(&self) -> bool {
        self.flash
    }

    #[must_use]
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub(crate) fn check_player(&self, player: PlayerId) -> Result<(), GameError> {
        if self.players.contains(player) {
            Ok(())
        } else {
            Err(GameError::NoSuchPlayer(player))
        }
    }

    /// Starting cell for a player: the top-left and bottom-right border corners.
    pub(crate) fn start_position(player: PlayerId, rows: usize, cols: usize) -> Pos {
        if player == PlayerId::ONE {
            Pos::new(0, 0)
        } else {
            Pos::new(rows.saturating_sub(1), cols.saturating_sub(1))
        }
    }

    /// Drop every transient state and re-arm the spawn timer.
    pub(crate) fn reset_transient(&mut self) {
        let count = self.players.player_count();
        self.selections = PlayerMap::with_value(count, None);
        for (_, player) in self.players.iter_mut() {
            player.frozen = false;
            player.dizzy = false;
        }
        self.schedule.clear();
        self.schedule
            .schedule(Scheduled::SpawnProp, self.clock, self.config.spawn_interval);
        self.hint = None;
        self.flash = false;
        self.last_path = None;
    }
}

/// Builder for a [`Game`].
///
/// ```
/// use pairlink::core::{GameConfig, PlayerId, Pos};
/// use pairlink::game::GameBuilder;
///
/// let game = GameBuilder::new()
///     .config(GameConfig::two_player().with_size(8, 8))
///     .build(7)
///     .unwrap();
/// assert_eq!(game.player(PlayerId::TWO).unwrap().pos, Pos::new(7, 7));
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    board: Option<Board>,
    positions: Vec<(PlayerId, Pos)>,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Play on a prepared board instead of generating one.
    ///
    /// The board's dimensions override the configured size.
    #[must_use]
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Place a player somewhere other than their starting corner.
    #[must_use]
    pub fn player_position(mut self, player: PlayerId, pos: Pos) -> Self {
        self.positions.retain(|(p, _)| *p != player);
        self.positions.push((player, pos));
        self
    }

    /// Build the game, seeding its RNG with `seed`.
    ///
    /// A board that is already cleared, or has no pair type left, yields a
    /// game whose round has finished.
    pub fn build(self, seed: u64) -> Result<Game, GameError> {
        let mut config = self.config;
        if let Some(board) = &self.board {
            config.rows = board.rows();
            config.cols = board.cols();
        }
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let board = match self.board {
            Some(board) => board,
            None => Board::generate(&config, &mut rng),
        };

        let count = config.player_count();
        let mut players = PlayerMap::new(count, |p| {
            PlayerState::at(Game::start_position(p, config.rows, config.cols))
        });
        for (player, pos) in self.positions {
            let state = players.get_mut(player).ok_or(GameError::NoSuchPlayer(player))?;
            match board.get(pos) {
                None => return Err(GameError::OutOfBounds(pos)),
                Some(Cell::Block(_)) => {
                    return Err(GameError::InvalidConfig(format!(
                        "{} cannot start on a block at {}",
                        player, pos
                    )))
                }
                Some(_) => state.pos = pos,
            }
        }

        let mut schedule = Schedule::new();
        schedule.schedule(Scheduled::SpawnProp, 0, config.spawn_interval);

        log::info!(
            "new {}x{} {:?} game, seed {}",
            config.rows,
            config.cols,
            config.mode,
            seed
        );

        let mut game = Game {
            round: RoundState::new(config.round_time),
            selections: PlayerMap::with_value(count, None),
            players,
            board,
            clock: 0,
            schedule,
            hint: None,
            flash: false,
            last_path: None,
            rng,
            config,
        };
        game.check_end();
        Ok(game)
    }
}
