use privatizace_core as game;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Entries of the per-seat controller picker, in display order.
fn controller_choices() -> Vec<(game::Controller, String)> {
    let mut choices = vec![(game::Controller::Human, "Human".to_string())];
    choices.extend(game::Difficulty::ALL.into_iter().map(|difficulty| {
        (
            game::Controller::Agent(difficulty),
            format!("Computer ({})", difficulty.label()),
        )
    }));
    choices
}

fn controller_at(index: usize) -> game::Controller {
    controller_choices()
        .get(index)
        .map_or(game::Controller::Human, |&(controller, _)| controller)
}

/// Builds the configuration for the first `count` seats.
fn build_config(
    grid_size: game::GridSize,
    seats: &[game::PlayerSetup],
    count: usize,
) -> game::Result<game::GameConfig> {
    let players = seats
        .iter()
        .take(count)
        .map(|seat| game::PlayerSetup {
            name: game::normalize_name(&seat.name),
            controller: seat.controller,
        })
        .collect();
    game::GameConfig::new(grid_size, players)
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SetupProps {
    pub on_start: Callback<game::GameConfig>,
}

#[function_component(SetupView)]
pub(crate) fn setup_component(props: &SetupProps) -> Html {
    let count = use_state(|| game::MIN_PLAYERS);
    let grid_size = use_state(game::GridSize::default);
    let seats = use_state(|| vec![game::PlayerSetup::default(); game::MAX_PLAYERS]);

    let on_count = {
        let count = count.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse::<usize>() {
                count.set(value.clamp(game::MIN_PLAYERS, game::MAX_PLAYERS));
            }
        })
    };

    let on_grid = {
        let grid_size = grid_size.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let picked = select
                .value()
                .parse::<usize>()
                .ok()
                .and_then(|index| game::GridSize::ALL.get(index).copied());
            if let Some(picked) = picked {
                grid_size.set(picked);
            }
        })
    };

    let on_start = {
        let on_start = props.on_start.clone();
        let (count, grid_size, seats) = (count.clone(), grid_size.clone(), seats.clone());
        Callback::from(move |_: MouseEvent| match build_config(*grid_size, &seats, *count) {
            Ok(config) => on_start.emit(config),
            Err(err) => log::error!("invalid setup: {}", err),
        })
    };

    let seat_rows = (0..*count).map(|index| {
        let seat = &seats[index];

        let on_name = {
            let seats = seats.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut updated = (*seats).clone();
                updated[index].name = input.value();
                seats.set(updated);
            })
        };

        let on_controller = {
            let seats = seats.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                let index_choice = select.value().parse::<usize>().unwrap_or(0);
                let mut updated = (*seats).clone();
                updated[index].controller = controller_at(index_choice);
                seats.set(updated);
            })
        };

        let placeholder = format!("Player {}", index + 1);
        let style = crate::utils::player_color_style(game::PlayerColor::PALETTE[index]);

        html! {
            <li {style}>
                <input
                    type="text"
                    maxlength={game::MAX_NAME_LEN.to_string()}
                    {placeholder}
                    value={seat.name.clone()}
                    oninput={on_name}
                />
                <select onchange={on_controller}>
                    {
                        for controller_choices().into_iter().enumerate().map(|(i, (controller, label))| html! {
                            <option value={i.to_string()} selected={controller == seat.controller}>{label}</option>
                        })
                    }
                </select>
            </li>
        }
    });

    html! {
        <form class="setup" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <label>
                {"Players "}
                <select onchange={on_count}>
                    {
                        for (game::MIN_PLAYERS..=game::MAX_PLAYERS).map(|n| html! {
                            <option value={n.to_string()} selected={n == *count}>{n.to_string()}</option>
                        })
                    }
                </select>
            </label>
            <label>
                {"Board "}
                <select onchange={on_grid}>
                    {
                        for game::GridSize::ALL.into_iter().enumerate().map(|(i, size)| html! {
                            <option value={i.to_string()} selected={size == *grid_size}>{size.label()}</option>
                        })
                    }
                </select>
            </label>
            <ol>{for seat_rows}</ol>
            <button type="button" onclick={on_start}>{"Start Game"}</button>
        </form>
    }
}
