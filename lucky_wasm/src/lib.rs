use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use futures::StreamExt;
use lucky_core::{
    AutoOutcome, GameSession, NumberSource, ReelDisplay, SessionEvent, TimestampHashSource, FACES,
};
use lucky_shared::{primary_action_label, slot_face, Backdrop, Notice, Platform, ResultModal};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;

const FRAME_MS: u64 = 40;
const BACKGROUND_URL: &str = match option_env!("LUCKY_BACKGROUND_URL") {
    Some(url) => url,
    None => "assets/background.png",
};

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[derive(Clone)]
pub struct Game<S = TimestampHashSource> {
    session: GameSession<S>,
    modal: Option<ResultModal>,
    notice: Option<Notice>,
}

impl Default for Game<TimestampHashSource> {
    fn default() -> Self {
        Self {
            session: GameSession::default(),
            modal: None,
            notice: None,
        }
    }
}

/// Everything the page can ask the game to do. Times are wall-clock milliseconds.
pub enum Action {
    Tick(u64),
    Primary(u64),
    Pick(u8, u64),
    Reset,
    DismissNotice,
}

impl<S: NumberSource + Clone + 'static> Reducible for Game<S> {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Action::Tick(now) => {
                let events = next.session.tick(now);
                if events.is_empty() {
                    return self;
                }
                for event in events {
                    if let SessionEvent::ResultReady { result } = event {
                        next.modal = Some(ResultModal::from(&result));
                    }
                }
            }
            Action::Primary(now) => match next.session.auto_select(now) {
                Ok(AutoOutcome::Replayed(result)) => next.modal = Some(ResultModal::from(&result)),
                Ok(AutoOutcome::Rolling { .. }) => {}
                Err(err) => next.notice = Some(err.into()),
            },
            Action::Pick(n, now) => {
                if let Err(err) = next.session.select_number(n, now) {
                    next.notice = Some(err.into());
                }
            }
            Action::Reset => {
                next.session.reset();
                next.modal = None;
                next.notice = None;
            }
            Action::DismissNotice => next.notice = None,
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct SlotProps {
    display: ReelDisplay,
}

#[function_component(Slot)]
fn slot(props: &SlotProps) -> Html {
    let class = classes!(
        "slot",
        props.display.rolling.then_some("slot--rolling"),
        props.display.completed.then_some("slot--locked"),
    );
    html! { <div {class}>{ slot_face(props.display.digit) }</div> }
}

#[derive(Properties, PartialEq)]
struct ModalProps {
    modal: ResultModal,
    on_reset: Callback<MouseEvent>,
}

#[function_component(ResultOverlay)]
fn result_overlay(props: &ModalProps) -> Html {
    let m = &props.modal;
    html! {
        <div class="overlay">
            <div class="modal">
                <h2>{"Result"}</h2>
                <p class="numbers">{ m.numbers_line() }</p>
                <p>{ format!("Total: {}", m.total) }</p>
                <p>{ format!("Pattern: {}", m.pattern_label) }</p>
                <p>{ m.message.clone() }</p>
                <button onclick={props.on_reset.clone()}>{"Play again"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NoticeProps {
    notice: Notice,
    on_dismiss: Callback<MouseEvent>,
}

#[function_component(NoticeOverlay)]
fn notice_overlay(props: &NoticeProps) -> Html {
    html! {
        <div class="overlay">
            <div class="modal modal--notice">
                <h3>{ props.notice.title.clone() }</h3>
                <p>{ props.notice.body.clone() }</p>
                <button onclick={props.on_dismiss.clone()}>{"OK"}</button>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let game = use_reducer(Game::<TimestampHashSource>::default);
    let background_ok = use_state(|| true);

    // One ticker drives every reel; it stops when the app is torn down.
    {
        let dispatcher = game.dispatcher();
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));
            let running = alive.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut ticks = Box::pin(yew::platform::time::interval(Duration::from_millis(FRAME_MS)));
                while running.get() {
                    ticks.next().await;
                    if running.get() {
                        dispatcher.dispatch(Action::Tick(now_ms()));
                    }
                }
            });
            move || alive.set(false)
        });
    }

    let on_primary = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| game.dispatch(Action::Primary(now_ms())))
    };
    let on_reset = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| game.dispatch(Action::Reset))
    };
    let on_dismiss = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| game.dispatch(Action::DismissNotice))
    };
    let on_background_error = {
        let background_ok = background_ok.clone();
        Callback::from(move |_: Event| {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "background {BACKGROUND_URL} unavailable, using plain backdrop"
            )));
            background_ok.set(false);
        })
    };

    let state = game.session.state();
    let backdrop = Backdrop::resolve(
        Platform::Web,
        (*background_ok).then(|| BACKGROUND_URL.to_string()),
    );
    let displays = game.session.reel_displays();

    let pad = FACES
        .iter()
        .map(|&n| {
            let game = game.clone();
            let disabled = state.is_auto_mode || state.is_complete || state.is_selected(n);
            let onclick = Callback::from(move |_: MouseEvent| game.dispatch(Action::Pick(n, now_ms())));
            html! { <button class="pad" {disabled} {onclick}>{ n.to_string() }</button> }
        })
        .collect::<Html>();

    html! {
        <div class="screen" style={backdrop.css()}>
            if *background_ok {
                <img src={BACKGROUND_URL} style="display:none" onerror={on_background_error} />
            }
            <h1>{"Lucky Dice"}</h1>
            <div class="slots">
                { for displays.iter().map(|d| html! { <Slot display={*d} /> }) }
            </div>
            <button class="primary" disabled={state.is_auto_mode} onclick={on_primary}>
                { primary_action_label(state) }
            </button>
            <div class="pad-row">{ pad }</div>
            <button class="reset" onclick={on_reset.clone()}>{"Reset"}</button>
            if let Some(modal) = &game.modal {
                <ResultOverlay modal={modal.clone()} {on_reset} />
            }
            if let Some(notice) = &game.notice {
                <NoticeOverlay notice={notice.clone()} {on_dismiss} />
            }
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run() {
    yew::Renderer::<App>::new().render();
}
