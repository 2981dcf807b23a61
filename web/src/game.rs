use std::rc::Rc;

use clap::Args;
use cinemystery_core as game;
use game::{GameError, GuessOutcome, LetterState, PlotSegment, SecretSource, SessionState};
use gloo::timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::catalog::{OMDB_API_URL, OmdbSource};
use crate::poster::PosterView;
use crate::utils::js_random_seed;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Catalog API key
    #[arg(long, default_value = "")]
    pub api_key: String,

    /// Catalog endpoint
    #[arg(long, default_value = OMDB_API_URL)]
    pub api_url: String,

    /// Always play this title instead of a random pick
    #[arg(short, long)]
    pub title: Option<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub(crate) enum Msg {
    Loaded(game::RoundId, Result<game::Secret, game::FetchError>),
    NewRound,
    SlotInput(usize, String),
    SlotKey(usize, String),
    FeedbackDue(game::FeedbackTicket),
}

const fn state_class(state: LetterState) -> Option<&'static str> {
    match state {
        LetterState::Idle => None,
        LetterState::Correct => Some("correct"),
        LetterState::Present => Some("present"),
        LetterState::Absent => Some("absent"),
    }
}

pub(crate) struct GameView {
    session: game::Session,
    slots: game::LetterSlots,
    slot_refs: Vec<NodeRef>,
    source: Rc<OmdbSource>,
    forced_seed: Option<u64>,
    feedback_timer: Option<Timeout>,
    focus: Option<usize>,
    nudge: bool,
}

impl GameView {
    fn request_secret(&self, ctx: &Context<Self>, round: game::RoundId) {
        let source = Rc::clone(&self.source);
        ctx.link().send_future(async move {
            let result = source.fetch_random_secret().await;
            Msg::Loaded(round, result)
        });
    }

    fn shuffle_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    fn reset_slots(&mut self, len: usize) {
        self.slots = game::LetterSlots::new(len);
        self.slot_refs = (0..len).map(|_| NodeRef::default()).collect();
        self.focus = self.slots.first_empty();
    }

    /// Keeps the DOM value in step with the model after refused or partial input.
    fn sync_slot_value(&self, index: usize) {
        if let Some(input) = self
            .slot_refs
            .get(index)
            .and_then(|node| node.cast::<HtmlInputElement>())
        {
            let value = self.slots.letter_at(index).map(String::from);
            input.set_value(value.as_deref().unwrap_or_default());
        }
    }

    fn submit(&mut self, ctx: &Context<Self>, guess: &str) {
        match self.session.submit_guess(guess, &mut self.slots) {
            Ok(GuessOutcome::Won) => {
                log::info!("round {}: solved", self.session.round());
            }
            Ok(GuessOutcome::Missed { feedback, .. }) => {
                let link = ctx.link().clone();
                self.feedback_timer = Some(Timeout::new(feedback.delay_ms(), move || {
                    link.send_message(Msg::FeedbackDue(feedback))
                }));
            }
            Ok(GuessOutcome::Lost { .. }) => {
                log::info!("round {}: out of attempts", self.session.round());
            }
            Err(GameError::EmptyGuess) => self.nudge = true,
            Err(err) => log::warn!("guess rejected: {}", err),
        }
    }

    fn submit_if_complete(&mut self, ctx: &Context<Self>) {
        if let Some(guess) = self.slots.guess() {
            self.submit(ctx, &guess);
        }
    }

    fn view_slots(&self, ctx: &Context<Self>, game: &game::Game) -> Html {
        let disabled = !game.accepts_guess();

        html! {
            <div class={classes!("letters", self.nudge.then_some("nudge"))}>
                {
                    for (0..self.slots.len()).map(|index| {
                        let locked = self.slots.is_locked(index);
                        let class = classes!(
                            "letter",
                            state_class(self.slots.state_at(index)),
                            locked.then_some("prefilled")
                        );
                        let value = self.slots.letter_at(index).map(String::from).unwrap_or_default();
                        let oninput = ctx.link().callback(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SlotInput(index, input.value())
                        });
                        let onkeydown = ctx
                            .link()
                            .callback(move |e: KeyboardEvent| Msg::SlotKey(index, e.key()));
                        html! {
                            <input
                                ref={self.slot_refs[index].clone()}
                                type="text"
                                maxlength="1"
                                {class}
                                {value}
                                {oninput}
                                {onkeydown}
                                disabled={disabled || locked}
                                aria-label={format!("Letter {}", index + 1)}
                            />
                        }
                    })
                }
            </div>
        }
    }

    fn view_game(&self, ctx: &Context<Self>, game: &game::Game) -> Html {
        let secret = game.secret();
        let status = game.status();

        let plot = match secret.redacted_plot() {
            Some(segments) => segments
                .into_iter()
                .map(|segment| match segment {
                    PlotSegment::Text(text) => html! { {text} },
                    PlotSegment::Redacted => html! {
                        <span class="spoiler" aria-label="Hidden content">{"[REDACTED]"}</span>
                    },
                })
                .collect::<Html>(),
            None => html! { {"No plot available."} },
        };

        let message_class = classes!(
            "message",
            match status {
                game::GameStatus::Won => "won",
                game::GameStatus::Lost => "lost",
                game::GameStatus::Playing => "playing",
            }
        );

        let cb_new_round = ctx.link().callback(|_: MouseEvent| Msg::NewRound);

        html! {
            <div class={classes!("cinemystery", (status == game::GameStatus::Won).then_some("celebrate"))}>
                <PosterView
                    poster_url={AttrValue::from(secret.poster_url().to_string())}
                    mask={game.reveal_mask()}
                />
                <section class="synopsis">
                    <header>
                        <h2>{"Case File Synopsis"}</h2>
                        if let Some(year) = secret.year() {
                            <span class="badge">{"Year: "}<b>{year}</b></span>
                        }
                    </header>
                    <p>{plot}</p>
                </section>
                <section class="guess">
                    <header>
                        <h2>{"Guess the Movie"}</h2>
                        <span class="badge">{"Attempts left: "}<b>{game.attempts_left().to_string()}</b></span>
                    </header>
                    {self.view_slots(ctx, game)}
                    <p class="hint">
                        if status.is_finished() {
                            {"Game over! Start a new game to play again."}
                        } else {
                            {"Type the movie title to make a guess. Each letter goes in a separate box."}
                        }
                    </p>
                </section>
                if !game.message().is_empty() {
                    <p class={message_class}>{game.message()}</p>
                }
                if status.is_finished() {
                    <button onclick={cb_new_round}>
                        { if status == game::GameStatus::Won { "Solve Another Mystery" } else { "Try A New Case" } }
                    </button>
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let source = OmdbSource::new(
            props.api_url.clone(),
            props.api_key.clone(),
            props.title.clone(),
        );
        let view = Self {
            session: game::Session::default(),
            slots: game::LetterSlots::default(),
            slot_refs: Vec::new(),
            source: Rc::new(source),
            forced_seed: props.seed,
            feedback_timer: None,
            focus: None,
            nudge: false,
        };
        view.request_secret(ctx, view.session.round());
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Loaded(round, result) => {
                let seed = self.shuffle_seed();
                if self.session.finish_loading(round, result, seed).is_err() {
                    return false;
                }
                let len = self.session.game().map_or(0, |game| game.slot_count());
                self.reset_slots(len);
                true
            }
            NewRound => {
                // dropping the timer cancels it; a callback already queued is rejected as stale
                self.feedback_timer = None;
                self.nudge = false;
                let round = self.session.new_round(&mut self.slots);
                self.request_secret(ctx, round);
                true
            }
            SlotInput(index, value) => {
                self.nudge = false;
                match value.chars().rev().find(char::is_ascii_alphabetic) {
                    Some(letter) => {
                        if let Some(next) = self.slots.input(index, letter) {
                            self.focus = Some(next);
                        }
                    }
                    None if value.is_empty() => {
                        self.slots.erase(index);
                    }
                    None => {}
                }
                self.sync_slot_value(index);

                self.submit_if_complete(ctx);
                true
            }
            SlotKey(index, key) => {
                let focus = match key.as_str() {
                    "Backspace" if self.slots.letter_at(index).is_none() => {
                        self.slots.erase(index)
                    }
                    "ArrowLeft" => index
                        .checked_sub(1)
                        .and_then(|prev| self.slots.prev_unlocked(prev)),
                    "ArrowRight" => self.slots.next_unlocked(index + 1),
                    _ => None,
                };
                self.focus = focus;
                focus.is_some()
            }
            FeedbackDue(ticket) => {
                self.feedback_timer = None;
                match self.session.complete_feedback(ticket, &mut self.slots) {
                    Ok(()) => {
                        self.focus = self.slots.first_empty();
                        // every letter discovered leaves no slot to type in
                        self.submit_if_complete(ctx);
                        true
                    }
                    Err(_) => false,
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_new_round = ctx.link().callback(|_: MouseEvent| Msg::NewRound);

        match self.session.state() {
            SessionState::Loading => html! {
                <div class="cinemystery loading">
                    <div class="spinner"/>
                </div>
            },
            SessionState::Failed(err) => html! {
                <div class="cinemystery error">
                    <h2>{"Case File Corrupted"}</h2>
                    <p>{"Our film archives seem to be experiencing technical difficulties. Let's try another case."}</p>
                    <small>{err.to_string()}</small>
                    <button onclick={cb_new_round}>{"Reopen Investigation"}</button>
                </div>
            },
            SessionState::Ready(game) => self.view_game(ctx, game),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        let Some(index) = self.focus.take() else {
            return;
        };
        if let Some(input) = self
            .slot_refs
            .get(index)
            .and_then(|node| node.cast::<HtmlInputElement>())
        {
            if let Err(err) = input.focus() {
                log::error!("failed to focus slot {}: {:?}", index, err);
            }
        }
    }
}
