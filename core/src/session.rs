use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Setup,
    InProgress,
    Finished,
}

impl SessionState {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// One game from setup to a winner.
///
/// Moves are applied atomically: the placement and every explosion it causes
/// are resolved before the call returns. The `busy` flag lets a front-end
/// hold off further input while it presents the result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    players: Vec<Player>,
    board: Board,
    state: SessionState,
    current_player: PlayerId,
    total_moves: u32,
    eliminated: BTreeSet<PlayerId>,
    has_moved: BTreeSet<PlayerId>,
    winner: Option<PlayerId>,
    last_touched: BTreeSet<Coord2>,
    busy: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session waiting in setup, with the default configuration's empty board.
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self::fresh(config.build_players(), Board::new(config.grid_size.side()), SessionState::Setup)
    }

    /// Starts a new game from `config`, discarding any previous state.
    ///
    /// Fails and leaves the session untouched when the player count is out of range.
    pub fn start(&mut self, config: &GameConfig) -> Result<()> {
        let count = config.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidPlayerCount(count));
        }
        log::debug!(
            "starting {} player game on {:?}",
            config.players.len(),
            config.grid_size
        );
        *self = Self::fresh(
            config.build_players(),
            Board::new(config.grid_size.side()),
            SessionState::InProgress,
        );
        Ok(())
    }

    /// Starts a game on a prepared board, with the first player to move.
    pub fn from_board(players: Vec<Player>, board: Board) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::InvalidPlayerCount(players.len()));
        }
        Ok(Self::fresh(players, board, SessionState::InProgress))
    }

    /// Drops the current game and returns to setup.
    pub fn reset(&mut self) {
        log::debug!("session reset");
        *self = Self::new();
    }

    fn fresh(players: Vec<Player>, board: Board, state: SessionState) -> Self {
        Self {
            players,
            board,
            state,
            current_player: 0,
            total_moves: 0,
            eliminated: BTreeSet::new(),
            has_moved: BTreeSet::new(),
            winner: None,
            last_touched: BTreeSet::new(),
            busy: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(usize::from(id))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub fn eliminated(&self) -> &BTreeSet<PlayerId> {
        &self.eliminated
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.contains(&player)
    }

    pub fn has_moved(&self) -> &BTreeSet<PlayerId> {
        &self.has_moved
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Cells touched by the most recent resolution; presentation only.
    pub fn last_touched(&self) -> &BTreeSet<Coord2> {
        &self.last_touched
    }

    /// Dot totals per player, recomputed from the board.
    pub fn dot_totals(&self) -> Vec<DotCount> {
        self.board.dot_totals(self.player_count())
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Forgets the highlight of the last resolution.
    pub fn clear_touched(&mut self) {
        self.last_touched.clear();
    }

    /// Difficulty of the agent due to move now, if any.
    pub fn awaiting_agent(&self) -> Option<Difficulty> {
        if !self.state.is_in_progress() || self.busy {
            return None;
        }
        self.player(self.current_player)
            .and_then(|player| player.controller.agent_difficulty())
    }

    fn check_accepting(&self) -> core::result::Result<(), RejectReason> {
        if !self.state.is_in_progress() {
            Err(RejectReason::NotInProgress)
        } else if self.busy {
            Err(RejectReason::Busy)
        } else {
            Ok(())
        }
    }

    /// Places a dot for the current player at `coords` and resolves the consequences.
    pub fn apply_move(&mut self, coords: Coord2) -> MoveOutcome {
        if let Err(reason) = self.check_accepting() {
            log::trace!("move at {coords:?} rejected: {reason:?}");
            return MoveOutcome::Rejected(reason);
        }

        let player = self.current_player;
        let Ok(coords) = self.board.validate_coords(coords) else {
            return MoveOutcome::Rejected(RejectReason::OutOfBounds);
        };

        let target = self.board[coords];
        if target.is_opponent_of(player) {
            let reason = if target.is_empty {
                RejectReason::ReservedByOpponent
            } else {
                RejectReason::OccupiedByOpponent
            };
            log::trace!("move at {coords:?} rejected: {reason:?}");
            return MoveOutcome::Rejected(reason);
        }

        let mut placed = self.board.clone();
        placed[coords] = target.with_dot_from(player);
        let resolution = resolve(&placed, coords);
        log::debug!(
            "player {player} placed at {coords:?}, {} waves touched {} cells",
            resolution.waves,
            resolution.touched.len()
        );

        self.board = resolution.board;
        self.last_touched = resolution.touched;
        self.total_moves += 1;
        self.has_moved.insert(player);

        self.update_eliminations();

        if let Some(winner) = self.find_winner() {
            log::debug!("player {winner} wins after {} moves", self.total_moves);
            self.winner = Some(winner);
            self.state = SessionState::Finished;
            return MoveOutcome::Won(winner);
        }

        self.advance_turn();
        MoveOutcome::Placed
    }

    /// Skips the current player's turn without touching the board.
    pub fn pass_turn(&mut self) -> MoveOutcome {
        if let Err(reason) = self.check_accepting() {
            return MoveOutcome::Rejected(reason);
        }
        log::debug!("player {} passes", self.current_player);
        self.advance_turn();
        MoveOutcome::Passed
    }

    /// Lets the heuristic pick a move for the current agent seat and applies it.
    ///
    /// Passes when the player has no legal move. Human seats are rejected.
    pub fn play_agent_turn<R: RandomSource + ?Sized>(&mut self, random: &mut R) -> MoveOutcome {
        if let Err(reason) = self.check_accepting() {
            return MoveOutcome::Rejected(reason);
        }
        let Some(difficulty) = self.awaiting_agent() else {
            return MoveOutcome::Rejected(RejectReason::HumanSeat);
        };
        match select_move(&self.board, self.current_player, difficulty, random) {
            Some(coords) => self.apply_move(coords),
            None => self.pass_turn(),
        }
    }

    fn player_ids(&self) -> impl Iterator<Item = PlayerId> + use<> {
        // player count is at most MAX_PLAYERS
        0..self.players.len() as PlayerId
    }

    fn update_eliminations(&mut self) {
        let totals = self.dot_totals();
        for player in self.player_ids() {
            if self.has_moved.contains(&player)
                && !self.eliminated.contains(&player)
                && totals[usize::from(player)] == 0
            {
                log::debug!("player {player} eliminated");
                self.eliminated.insert(player);
            }
        }
    }

    fn find_winner(&self) -> Option<PlayerId> {
        if (self.total_moves as usize) < self.player_count() || self.board.total_dots() == 0 {
            return None;
        }

        let mut active = self.player_ids().filter(|player| !self.eliminated.contains(player));
        if let (Some(last), None) = (active.next(), active.next()) {
            return Some(last);
        }

        let holders = self.board.players_with_dots();
        if holders.len() == 1 {
            return holders.first().copied();
        }

        None
    }

    fn advance_turn(&mut self) {
        let count = self.players.len() as PlayerId;
        let mut next = (self.current_player + 1) % count;
        for _ in 0..count {
            if !self.eliminated.contains(&next) {
                self.current_player = next;
                return;
            }
            next = (next + 1) % count;
        }
        log::warn!("every player is eliminated, turn stays with {}", self.current_player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn humans(count: u8) -> Vec<Player> {
        (0..count).map(Player::human).collect()
    }

    fn session_on(size: Coord, count: u8, placements: &[(Coord2, Cell)]) -> Session {
        let board = Board::from_placements(size, placements).unwrap();
        Session::from_board(humans(count), board).unwrap()
    }

    #[test]
    fn new_session_waits_in_setup() {
        let mut session = Session::new();

        assert_eq!(session.state(), SessionState::Setup);
        assert_eq!(session.board().size(), 10);
        assert_eq!(
            session.apply_move((0, 0)),
            MoveOutcome::Rejected(RejectReason::NotInProgress)
        );
    }

    #[test]
    fn start_builds_configured_board_and_players() {
        let config = GameConfig::new(
            GridSize::Large,
            vec![
                PlayerSetup::human("Ada"),
                PlayerSetup::human(""),
                PlayerSetup::agent(Difficulty::High),
            ],
        )
        .unwrap();
        let mut session = Session::new();

        session.start(&config).unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.board().size(), 16);
        assert_eq!(session.player_count(), 3);
        assert_eq!(session.players()[0].display_name(), "Ada");
        assert_eq!(session.players()[1].display_name(), "Player 2");
        assert_eq!(session.dot_totals(), [0, 0, 0]);
    }

    #[test]
    fn start_rejects_configs_that_bypassed_validation() {
        let mut session = Session::new();

        let empty = GameConfig {
            grid_size: GridSize::Classic,
            players: vec![],
        };
        assert_eq!(session.start(&empty), Err(GameError::InvalidPlayerCount(0)));
        assert_eq!(session, Session::new());
        assert_eq!(session.pass_turn(), MoveOutcome::Rejected(RejectReason::NotInProgress));

        let solo = GameConfig {
            grid_size: GridSize::Classic,
            players: vec![PlayerSetup::human("Ada")],
        };
        assert_eq!(session.start(&solo), Err(GameError::InvalidPlayerCount(1)));
        assert_eq!(
            session.apply_move((0, 0)),
            MoveOutcome::Rejected(RejectReason::NotInProgress)
        );

        let crowd = GameConfig {
            grid_size: GridSize::Classic,
            players: vec![PlayerSetup::default(); MAX_PLAYERS + 1],
        };
        assert_eq!(session.start(&crowd), Err(GameError::InvalidPlayerCount(5)));
        assert_eq!(session.state(), SessionState::Setup);
    }

    #[test]
    fn from_board_rejects_bad_player_counts() {
        let result = Session::from_board(humans(1), Board::new(3));
        assert_eq!(result, Err(GameError::InvalidPlayerCount(1)));
    }

    #[test]
    fn first_move_claims_cell_and_passes_turn() {
        let mut session = Session::new();
        session.start(&GameConfig::default()).unwrap();

        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Placed);

        assert_eq!(session.board()[(0, 0)], Cell::claimed(0, 1));
        assert_eq!(session.current_player(), 1);
        assert_eq!(session.total_moves(), 1);
        assert!(session.has_moved().contains(&0));
    }

    #[test]
    fn opponent_cells_are_rejected_without_change() {
        let mut session = session_on(
            5,
            2,
            &[
                ((0, 0), Cell::claimed(1, 1)),
                ((4, 4), Cell::discharged(Some(1))),
            ],
        );
        let before = session.clone();

        assert_eq!(
            session.apply_move((0, 0)),
            MoveOutcome::Rejected(RejectReason::OccupiedByOpponent)
        );
        assert_eq!(
            session.apply_move((4, 4)),
            MoveOutcome::Rejected(RejectReason::ReservedByOpponent)
        );
        assert_eq!(
            session.apply_move((5, 0)),
            MoveOutcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(session, before);
    }

    #[test]
    fn own_empty_marker_accepts_a_dot() {
        let mut session = session_on(5, 2, &[((2, 2), Cell::discharged(Some(0)))]);

        assert_eq!(session.apply_move((2, 2)), MoveOutcome::Placed);
        assert_eq!(session.board()[(2, 2)], Cell::claimed(0, 1));
    }

    #[test]
    fn busy_session_rejects_moves() {
        let mut session = session_on(5, 2, &[]);
        session.set_busy(true);

        assert_eq!(session.apply_move((1, 1)), MoveOutcome::Rejected(RejectReason::Busy));
        assert_eq!(session.pass_turn(), MoveOutcome::Rejected(RejectReason::Busy));
        assert_eq!(session.awaiting_agent(), None);

        session.set_busy(false);
        assert_eq!(session.apply_move((1, 1)), MoveOutcome::Placed);
    }

    #[test]
    fn win_needs_every_player_to_have_moved() {
        let mut session = session_on(5, 3, &[]);

        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Placed);
        assert_eq!(session.winner(), None);
        assert_eq!(session.apply_move((4, 4)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((2, 2)), MoveOutcome::Placed);
        assert_eq!(session.winner(), None);
        assert_eq!(session.current_player(), 0);
    }

    #[test]
    fn capturing_the_last_opponent_dot_wins() {
        // player 1 already moved once and only holds (0, 1)
        let mut session = session_on(
            5,
            2,
            &[((0, 0), Cell::claimed(0, 1)), ((0, 1), Cell::claimed(1, 1))],
        );
        assert_eq!(session.apply_move((4, 4)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((0, 1)), MoveOutcome::Placed);

        // (0, 0) reaches capacity 2 and takes (0, 1)
        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Won(0));

        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(session.winner(), Some(0));
        assert!(session.is_eliminated(1));
        assert_eq!(
            session.apply_move((3, 3)),
            MoveOutcome::Rejected(RejectReason::NotInProgress)
        );
    }

    #[test]
    fn eliminated_players_are_skipped() {
        // player 1 is wiped out on the fourth move of a three player game
        let mut session = session_on(5, 3, &[]);
        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((0, 1)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((4, 4)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Placed);

        assert!(session.is_eliminated(1));
        assert_eq!(session.current_player(), 2);
        assert_eq!(session.apply_move((4, 4)), MoveOutcome::Placed);
        assert_eq!(session.current_player(), 0);
    }

    #[test]
    fn pass_turn_keeps_counters() {
        let mut session = session_on(5, 2, &[]);

        assert_eq!(session.pass_turn(), MoveOutcome::Passed);

        assert_eq!(session.current_player(), 1);
        assert_eq!(session.total_moves(), 0);
        assert!(session.has_moved().is_empty());
    }

    #[test]
    fn agent_turn_applies_a_move() {
        let players = vec![Player::agent(0, Difficulty::Low), Player::human(1)];
        let mut session = Session::from_board(players, Board::new(3)).unwrap();
        let mut random = SeededRandom::new(3);

        assert_eq!(session.awaiting_agent(), Some(Difficulty::Low));
        assert_eq!(session.play_agent_turn(&mut random), MoveOutcome::Placed);
        assert_eq!(session.board().total_dots(), 1);
        assert_eq!(session.awaiting_agent(), None);
    }

    #[test]
    fn agent_turn_refuses_a_human_seat() {
        let players = vec![Player::human(0), Player::agent(1, Difficulty::High)];
        let mut session = Session::from_board(players, Board::new(3)).unwrap();
        let before = session.clone();
        let mut random = SeededRandom::new(3);

        assert_eq!(
            session.play_agent_turn(&mut random),
            MoveOutcome::Rejected(RejectReason::HumanSeat)
        );
        assert_eq!(session, before);

        assert_eq!(session.apply_move((1, 1)), MoveOutcome::Placed);
        assert_eq!(session.play_agent_turn(&mut random), MoveOutcome::Placed);
        assert_eq!(session.current_player(), 0);
    }

    #[test]
    fn agent_without_moves_passes() {
        let placements: Vec<_> = Board::new(2)
            .iter_coords()
            .map(|coords| (coords, Cell::claimed(1, 1)))
            .collect();
        let board = Board::from_placements(2, &placements).unwrap();
        let players = vec![Player::agent(0, Difficulty::High), Player::human(1)];
        let mut session = Session::from_board(players, board).unwrap();
        let mut random = SeededRandom::new(0);

        assert_eq!(session.play_agent_turn(&mut random), MoveOutcome::Passed);
        assert_eq!(session.current_player(), 1);
    }

    #[test]
    fn reset_returns_to_setup() {
        let mut session = session_on(5, 2, &[]);
        session.apply_move((0, 0));

        session.reset();

        assert_eq!(session, Session::new());
    }
}
