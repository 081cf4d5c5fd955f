use crate::utils::*;
use clap::Args;
use codecraft_core as game;
use core::pin::pin;
use core::time::Duration;
use futures_util::StreamExt;
use game::{EngineSnapshot, ExecutionStep, PuzzleEngine, RunStatus, Tile};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCell {
    Open,
    Wall,
    Trap,
    Target,
    Player,
}

impl ViewCell {
    fn at(snapshot: &EngineSnapshot, coords: game::Coord2) -> Self {
        use game::ToNdIndex;

        if snapshot.player == coords {
            return Self::Player;
        }

        match snapshot.tiles[coords.to_nd_index()] {
            Tile::Open => Self::Open,
            Tile::Wall => Self::Wall,
            Tile::Trap => Self::Trap,
            Tile::Target => Self::Target,
        }
    }

    const fn label(self) -> &'static str {
        use ViewCell::*;
        match self {
            Player => "G",
            Target => "R",
            Open | Wall | Trap => "",
        }
    }

    fn class(self) -> Classes {
        use ViewCell::*;
        classes!(
            "cell",
            match self {
                Open => None,
                Wall => Some("wall"),
                Trap => Some("trap"),
                Target => Some("target"),
                Player => Some("player"),
            }
        )
    }
}

const fn status_class(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Idle => "idle",
        RunStatus::Running => "running",
        RunStatus::Succeeded => "win",
        RunStatus::OutOfMoves => "lose",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    EditScript(String),
    Run,
    Stepped(ExecutionStep),
    RunFinished,
    Reset,
    SelectVariant(usize),
    NextVariant,
    ToggleHint,
}

#[derive(Properties, PartialEq)]
struct CellProps {
    cell: ViewCell,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps { cell } = *props;
    html! {
        <td class={cell.class()}>{cell.label()}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct PuzzleProps {
    /// Puzzle to open first (0-based)
    #[arg(short, long, default_value_t = 0)]
    level: usize,

    /// Milliseconds to wait between echoing a line and moving
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

#[derive(Debug)]
pub(crate) struct PuzzleView {
    engine: Rc<RefCell<PuzzleEngine>>,
    snapshot: EngineSnapshot,
    revision: u64,
    script: String,
    hint_open: bool,
    delay: Duration,
}

impl PuzzleView {
    /// Re-reads the engine when its revision moved, returning whether to re-render.
    fn refresh(&mut self) -> bool {
        let engine = self.engine.borrow();
        if engine.revision() == self.revision {
            return false;
        }
        self.revision = engine.revision();
        self.snapshot = engine.snapshot();
        true
    }

    fn is_running(&self) -> bool {
        self.snapshot.status.is_running()
    }

    fn start_run(&mut self, ctx: &Context<Self>) -> bool {
        if self.is_running() || self.script.trim().is_empty() {
            return false;
        }

        let steps = match game::execute(self.engine.clone(), &self.script, BrowserTimer, self.delay)
        {
            Ok(steps) => steps,
            Err(err) => {
                log::warn!("cannot run script: {}", err);
                return false;
            }
        };

        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            let mut steps = pin!(steps);
            while let Some(step) = steps.next().await {
                link.send_message(Msg::Stepped(step));
            }
            link.send_message(Msg::RunFinished);
        });

        self.refresh()
    }

    fn select_variant(&mut self, index: usize) -> bool {
        if let Err(err) = self.engine.borrow_mut().select_variant(index) {
            log::warn!("cannot open puzzle {}: {}", index, err);
        }
        self.refresh()
    }

    fn next_variant(&mut self) -> bool {
        if let Err(err) = self.engine.borrow_mut().next_variant() {
            log::warn!("no puzzle after the current one: {}", err);
        }
        self.refresh()
    }

    fn view_grid(&self) -> Html {
        let (cols, rows) = self.engine.borrow().size();
        html! {
            <table class="grid">
                {
                    for (0..rows).map(|y| html! {
                        <tr>
                            {
                                for (0..cols).map(|x| {
                                    let cell = ViewCell::at(&self.snapshot, (x, y));
                                    html! { <CellView {cell}/> }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_levels(&self, ctx: &Context<Self>) -> Html {
        let catalog = self.engine.borrow().catalog();
        html! {
            <nav class="levels">
                {
                    for catalog.iter().enumerate().map(|(index, variant)| {
                        let class = classes!(
                            "level",
                            (index == self.snapshot.variant_index).then_some("current")
                        );
                        let onclick = ctx.link().callback(move |_| Msg::SelectVariant(index));
                        html! {
                            <button {class} {onclick} disabled={self.is_running()}>
                                {format!("Level {}: {}", variant.id, variant.name)}
                            </button>
                        }
                    })
                }
            </nav>
        }
    }

    fn view_result(&self, ctx: &Context<Self>) -> Html {
        let engine = self.engine.borrow();
        let variant = engine.variant();

        match (self.snapshot.status, self.snapshot.score) {
            (RunStatus::Succeeded, Some(score)) => {
                let next = engine.has_next_variant().then(|| {
                    html! {
                        <button onclick={ctx.link().callback(|_| Msg::NextVariant)}>
                            {"Next level"}
                        </button>
                    }
                });
                html! {
                    <Modal>
                        <dialog id="success" open={true}>
                            <article>
                                <h2>{format!("Congratulations! You've completed {}!", variant.name)}</h2>
                                <p>{format!("Score: {score}")}</p>
                                <footer>
                                    {for next}
                                    <button onclick={ctx.link().callback(|_| Msg::Reset)}>{"Play again"}</button>
                                </footer>
                            </article>
                        </dialog>
                    </Modal>
                }
            }
            (RunStatus::OutOfMoves, _) => html! {
                <p class="banner lose">{"Out of moves! Reset to try again."}</p>
            },
            _ => html! {},
        }
    }
}

impl Component for PuzzleView {
    type Message = Msg;
    type Properties = PuzzleProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut engine = PuzzleEngine::new().expect("built-in catalog must be valid");
        if let Err(err) = engine.select_variant(props.level) {
            log::warn!("cannot open puzzle {}: {}", props.level, err);
        }

        Self {
            snapshot: engine.snapshot(),
            revision: engine.revision(),
            engine: Rc::new(RefCell::new(engine)),
            script: String::new(),
            hint_open: false,
            delay: Duration::from_millis(props.delay_ms),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            EditScript(script) => {
                self.script = script;
                true
            }
            Run => self.start_run(ctx),
            Stepped(step) => {
                log::trace!("step: {:?}", step);
                self.refresh()
            }
            RunFinished => {
                log::debug!("run finished: {:?}", self.engine.borrow().status());
                self.refresh()
            }
            Reset => {
                self.engine.borrow_mut().reset();
                self.refresh()
            }
            SelectVariant(index) => self.select_variant(index),
            NextVariant => self.next_variant(),
            ToggleHint => {
                self.hint_open = !self.hint_open;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let variant = self.engine.borrow().variant();
        let running = self.is_running();
        let class = classes!("puzzle", status_class(self.snapshot.status));
        let hint_label = if self.hint_open { "Hide hint" } else { "Show hint" };

        let oninput = ctx.link().callback(|e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            EditScript(area.value())
        });
        let cb_run = ctx.link().callback(|_| Run);
        let cb_reset = ctx.link().callback(|_| Reset);
        let cb_hint = ctx.link().callback(|_| ToggleHint);

        html! {
            <div {class}>
                {self.view_levels(ctx)}
                <h1>{format!("Level {}: {}", variant.id, variant.name)}</h1>
                <p>{variant.description}</p>
                <section class="board">
                    {self.view_grid()}
                    <aside>
                        {format!("Moves: {}/{}", self.snapshot.moves_used, self.snapshot.max_moves)}
                    </aside>
                </section>
                <section class="editor">
                    <textarea
                        value={self.script.clone()}
                        {oninput}
                        disabled={running}
                        placeholder="Enter your Python code here..."
                    />
                    <nav>
                        <button onclick={cb_run} disabled={running || self.script.trim().is_empty()}>
                            {"Run Code"}
                        </button>
                        <button onclick={cb_reset}>{"Reset"}</button>
                        <button onclick={cb_hint}>{hint_label}</button>
                    </nav>
                    if self.hint_open {
                        <p class="hint">{variant.hint}</p>
                    }
                    <pre class="console">
                        {for self.snapshot.output.iter().map(|line| html! { <div>{line.clone()}</div> })}
                    </pre>
                    {self.view_result(ctx)}
                </section>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_adapter_draws_player_over_tiles() {
        let mut engine = PuzzleEngine::new().unwrap();
        engine.select_variant(1).unwrap();
        let snapshot = engine.snapshot();

        assert_eq!(ViewCell::at(&snapshot, (0, 2)), ViewCell::Player);
        assert_eq!(ViewCell::at(&snapshot, (2, 2)), ViewCell::Wall);
        assert_eq!(ViewCell::at(&snapshot, (4, 2)), ViewCell::Target);
        assert_eq!(ViewCell::at(&snapshot, (1, 1)), ViewCell::Open);
    }

    #[test]
    fn grid_adapter_shows_player_on_reached_target() {
        let mut engine = PuzzleEngine::new().unwrap();
        engine.select_variant(0).unwrap();
        game::run_to_end(
            &mut engine,
            "move_right()\nmove_right()\nmove_right()\nmove_right()\n\
             move_down()\nmove_down()\nmove_down()\nmove_down()",
        )
        .unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(ViewCell::at(&snapshot, (4, 4)), ViewCell::Player);
        assert_eq!(status_class(snapshot.status), "win");
    }

    #[test]
    fn hash_args_pick_level_and_delay() {
        #[derive(clap::Parser, Debug)]
        struct HashArgs {
            #[command(flatten)]
            puzzle: PuzzleProps,
        }

        let args = <HashArgs as clap::Parser>::try_parse_from(
            "#--level=2&--delay-ms=100".split(['#', '&']),
        )
        .unwrap();

        assert_eq!(args.puzzle.level, 2);
        assert_eq!(args.puzzle.delay_ms, 100);
    }
}
