use crate::setup::SetupView;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use privatizace_core as game;
use yew::prelude::*;

pub(crate) const DEFAULT_AGENT_DELAY_MS: u32 = 600;

/// How long the result of a move stays highlighted before play continues.
const PRESENTATION_DELAY_MS: u32 = 500;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for computer players instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Milliseconds a computer player waits before moving
    #[arg(long, default_value_t = DEFAULT_AGENT_DELAY_MS)]
    pub agent_delay: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start(game::GameConfig),
    CellClick(game::Coord2),
    MoveSettled,
    AgentTurn,
    NewGame,
}

/// Text shown inside a cell: its dot count, blank when it holds none.
fn dot_label(cell: game::Cell) -> String {
    if cell.dots == 0 {
        String::new()
    } else {
        cell.dots.to_string()
    }
}

fn cell_classes(cell: game::Cell, touched: bool, at_capacity: bool) -> Classes {
    let mut class = classes!("cell");
    if cell.owner.is_some() {
        class.push("owned");
    }
    if cell.is_empty && cell.owner.is_some() {
        class.push("reserved");
    }
    if at_capacity {
        class.push("critical");
    }
    if touched {
        class.push("touched");
    }
    class
}

/// Headline above the board.
fn status_text(session: &game::Session) -> String {
    use game::SessionState::*;

    let name_of = |id| {
        session
            .player(id)
            .map_or_else(|| format!("Player {}", u16::from(id) + 1), game::Player::display_name)
    };

    match session.state() {
        Setup => "Choose players and board".to_string(),
        InProgress => format!("{}'s turn", name_of(session.current_player())),
        Finished => match session.winner() {
            Some(winner) => format!("{} wins!", name_of(winner)),
            None => "Game over".to_string(),
        },
    }
}

/// Roster line for one player: current dots, or `ELIMINATED`.
fn roster_status(session: &game::Session, totals: &[game::DotCount], id: game::PlayerId) -> String {
    if session.is_eliminated(id) {
        "ELIMINATED".to_string()
    } else {
        let dots = totals.get(usize::from(id)).copied().unwrap_or(0);
        format!("{dots} dots")
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    random: game::SeededRandom,
    agent_delay: u32,
    pending: Option<Timeout>,
}

impl GameView {
    fn schedule(&mut self, ctx: &Context<Self>, millis: u32, msg: Msg) {
        let link = ctx.link().clone();
        self.pending = Some(Timeout::new(millis, move || link.send_message(msg)));
    }

    fn current_is_human(&self) -> bool {
        self.session
            .player(self.session.current_player())
            .is_some_and(|player| player.controller == game::Controller::Human)
    }

    fn handle_outcome(&mut self, ctx: &Context<Self>, outcome: game::MoveOutcome) -> bool {
        if let game::MoveOutcome::Rejected(reason) = outcome {
            log::debug!("move rejected: {:?}", reason);
            return false;
        }
        if let game::MoveOutcome::Won(winner) = outcome {
            log::info!("player {} wins", winner);
        }

        self.session.set_busy(true);
        self.schedule(ctx, PRESENTATION_DELAY_MS, Msg::MoveSettled);
        true
    }

    /// Continues play once a move has been presented.
    fn after_settle(&mut self, ctx: &Context<Self>) -> bool {
        if !self.session.state().is_in_progress() {
            return false;
        }

        if self.session.awaiting_agent().is_some() {
            self.schedule(ctx, self.agent_delay, Msg::AgentTurn);
            return false;
        }

        let player = self.session.current_player();
        if self.current_is_human() && self.session.board().legal_moves(player).is_empty() {
            log::debug!("player {} has no legal move", player);
            let outcome = self.session.pass_turn();
            return self.handle_outcome(ctx, outcome);
        }
        false
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let board = self.session.board();
        let size = board.size();
        let touched = self.session.last_touched();
        let playable = self.session.state().is_in_progress()
            && !self.session.is_busy()
            && self.current_is_human();

        html! {
            <table class={classes!("board", playable.then_some("playable"))}>
                {
                    for (0..size).map(|row| html! {
                        <tr>
                            {
                                for (0..size).map(|col| {
                                    let pos = (row, col);
                                    let cell = board[pos];
                                    let at_capacity = cell.dots + 1 >= board.capacity_at(pos);
                                    let class = cell_classes(cell, touched.contains(&pos), at_capacity);
                                    let style = cell
                                        .owner
                                        .map(|owner| player_color_style(game::PlayerColor::for_player(owner)));
                                    let onclick = ctx.link().callback(move |_: MouseEvent| Msg::CellClick(pos));
                                    html! {
                                        <td {class} {style} {onclick}>{dot_label(cell)}</td>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_roster(&self) -> Html {
        let totals = self.session.dot_totals();
        let current = self.session.current_player();
        let in_progress = self.session.state().is_in_progress();

        html! {
            <ul class="roster">
                {
                    for self.session.players().iter().map(|player| {
                        let class = classes!(
                            (in_progress && player.id == current).then_some("current"),
                            self.session.is_eliminated(player.id).then_some("eliminated"),
                        );
                        let style = player_color_style(player.color);
                        let difficulty = player
                            .controller
                            .agent_difficulty()
                            .map(|difficulty| format!(" ({})", difficulty.label()));
                        html! {
                            <li {class} {style}>
                                <b>{player.display_name()}</b>
                                {difficulty}
                                <span>{roster_status(&self.session, &totals, player.id)}</span>
                            </li>
                        }
                    })
                }
            </ul>
        }
    }

    fn view_game_over(&self, ctx: &Context<Self>) -> Html {
        let open = self.session.state().is_finished() && !self.session.is_busy();
        let cb_new_game = ctx.link().callback(|_| Msg::NewGame);

        html! {
            <dialog {open}>
                <p>{status_text(&self.session)}</p>
                <button onclick={cb_new_game}>{"New Game"}</button>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("agent seed: {}", seed);

        Self {
            session: game::Session::new(),
            random: game::SeededRandom::new(seed),
            agent_delay: props.agent_delay,
            pending: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start(config) => {
                self.pending = None;
                if let Err(err) = self.session.start(&config) {
                    log::error!("could not start game: {}", err);
                    return false;
                }
                self.after_settle(ctx);
                true
            }
            CellClick(coords) => {
                if !self.current_is_human() {
                    return false;
                }
                log::debug!("place at {:?}", coords);
                let outcome = self.session.apply_move(coords);
                self.handle_outcome(ctx, outcome)
            }
            MoveSettled => {
                self.pending = None;
                self.session.set_busy(false);
                self.session.clear_touched();
                self.after_settle(ctx);
                true
            }
            AgentTurn => {
                self.pending = None;
                let outcome = self.session.play_agent_turn(&mut self.random);
                self.handle_outcome(ctx, outcome)
            }
            NewGame => {
                self.pending = None;
                self.session.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        if self.session.state() == game::SessionState::Setup {
            return html! {
                <div class="privatizace">
                    <h1>{"Privatizace"}</h1>
                    <SetupView on_start={ctx.link().callback(Msg::Start)}/>
                </div>
            };
        }

        html! {
            <div class="privatizace">
                <h1>{"Privatizace"}</h1>
                <nav>
                    <span class="status">{status_text(&self.session)}</span>
                    <button onclick={cb_new_game}>{"New Game"}</button>
                </nav>
                {self.view_roster()}
                {self.view_board(ctx)}
                {self.view_game_over(ctx)}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privatizace_core::{Board, Cell, MoveOutcome, Player, Session};

    fn session_on(placements: &[(game::Coord2, Cell)]) -> Session {
        let board = Board::from_placements(3, placements).unwrap();
        Session::from_board(vec![Player::human(0), Player::human(1)], board).unwrap()
    }

    #[test]
    fn empty_cells_have_no_label() {
        assert_eq!(dot_label(Cell::UNCLAIMED), "");
        assert_eq!(dot_label(Cell::discharged(Some(1))), "");
        assert_eq!(dot_label(Cell::claimed(0, 3)), "3");
    }

    #[test]
    fn reserved_cells_are_marked() {
        let class = cell_classes(Cell::discharged(Some(0)), true, false);
        assert!(class.contains("reserved"));
        assert!(class.contains("touched"));
        assert!(!cell_classes(Cell::UNCLAIMED, false, false).contains("owned"));
    }

    #[test]
    fn status_names_the_current_player_and_the_winner() {
        let mut session = session_on(&[((0, 0), Cell::claimed(0, 1)), ((2, 2), Cell::claimed(1, 1))]);
        assert_eq!(status_text(&session), "Player 1's turn");

        assert_eq!(session.apply_move((1, 1)), MoveOutcome::Placed);
        assert_eq!(status_text(&session), "Player 2's turn");

        assert_eq!(status_text(&Session::new()), "Choose players and board");
    }

    #[test]
    fn roster_reports_eliminated_players() {
        let mut session = session_on(&[]);
        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((0, 1)), MoveOutcome::Placed);
        assert_eq!(session.apply_move((0, 0)), MoveOutcome::Won(0));

        let totals = session.dot_totals();
        assert_eq!(roster_status(&session, &totals, 0), "3 dots");
        assert_eq!(roster_status(&session, &totals, 1), "ELIMINATED");
        assert_eq!(status_text(&session), "Player 1 wins!");
    }
}
