use crate::canvas::{CanvasSurface, FaceAssets, context_2d};
use crate::utils::*;
use gloo::render::{AnimationFrame, request_animation_frame};
use pairflip_core as game;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tap(game::Point),
    Frame,
    AssetLoaded,
    PlayAgain,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::BoardConfig,
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    board: game::Board<SmallRng>,
    assets: FaceAssets,
    clock: Clock,
    canvas: NodeRef,
    victory_visible: bool,
    frame: Option<AnimationFrame>,
}

impl GameView {
    /// Keeps exactly one animation frame queued while the board has something scheduled.
    fn schedule_frame(&mut self, ctx: &Context<Self>) {
        if !self.board.needs_frames() {
            self.frame = None;
            return;
        }
        if self.frame.is_none() {
            let link = ctx.link().clone();
            self.frame = Some(request_animation_frame(move |_| link.send_message(Msg::Frame)));
        }
    }

    fn draw(&self) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::warn!("canvas not mounted yet");
            return;
        };
        match context_2d(&canvas) {
            Ok(ctx) => self.board.render(&mut CanvasSurface::new(&ctx), &self.assets),
            Err(err) => log::error!("cannot draw board: {:#}", err),
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { config, seed } = ctx.props().clone();
        let seed = seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let board = game::Board::new(config, SmallRng::seed_from_u64(seed))
            .expect("board config is validated before mounting");

        Self {
            assets: FaceAssets::load(board.total_pairs(), ctx.link().callback(|_| Msg::AssetLoaded)),
            board,
            clock: Clock::start(),
            canvas: NodeRef::default(),
            victory_visible: false,
            frame: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Tap(point) => {
                log::trace!("tap at {:?}", point);
                self.board
                    .handle_tap(point, self.clock.now())
                    .has_update()
            }
            Frame => {
                self.frame = None;
                let outcome = self.board.tick(self.clock.now());
                if outcome == game::TickOutcome::Victory {
                    log::info!("all pairs found");
                    self.victory_visible = true;
                }
                outcome.needs_redraw()
            }
            AssetLoaded => {
                log::trace!("face image loaded");
                true
            }
            PlayAgain => {
                if let Err(err) = self.board.reset() {
                    log::error!("could not deal a new round: {}", err);
                }
                self.victory_visible = false;
                true
            }
        };

        self.schedule_frame(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let size = self.board.config().surface_size();
        let onclick = ctx.link().callback(|e: MouseEvent| {
            Tap(game::Point::new(e.offset_x().into(), e.offset_y().into()))
        });
        let canvas = self.canvas.clone();
        let ontouchstart = ctx.link().batch_callback(move |e: TouchEvent| {
            e.prevent_default();
            let touch = e.changed_touches().get(0)?;
            let bounds = canvas.cast::<HtmlCanvasElement>()?.get_bounding_client_rect();
            Some(Tap(touch_point(
                (touch.client_x(), touch.client_y()),
                (bounds.left(), bounds.top()),
            )))
        });
        let cb_play_again = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            PlayAgain
        });

        html! {
            <div class="pairflip">
                <canvas
                    ref={self.canvas.clone()}
                    width={size.width.to_string()}
                    height={size.height.to_string()}
                    {onclick}
                    {ontouchstart}
                />
                <p id="victoryMessage" class={(!self.victory_visible).then_some("hidden")}>
                    {"You found every pair!"}
                </p>
                <button id="playAgain" onclick={cb_play_again}>{"Play again"}</button>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            log::debug!("game mounted");
        }
        self.draw();
    }
}

/// Canvas-relative position of a touch given in client coordinates.
fn touch_point(client: (i32, i32), canvas_origin: (f64, f64)) -> game::Point {
    game::Point::new(
        f64::from(client.0) - canvas_origin.0,
        f64::from(client.1) - canvas_origin.1,
    )
}
