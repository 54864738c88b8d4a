//! Portfolio Arcade entry point
//!
//! wasm: wires the games and the score flow into the page.
//! native: runs the leaderboard API server.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use portfolio_arcade::flow::{FetchLeaderboard, Screen, ScoreFlow};
    use portfolio_arcade::leaderboard::format_age;
    use portfolio_arcade::platform::{FrameLoop, Interval, dom, http};
    use portfolio_arcade::renderer::{CanvasSurface, dino_scene, snake_scene};
    use portfolio_arcade::settings::Settings;
    use portfolio_arcade::sim::{self, Board, DinoInput, DinoState, Direction, SnakeState, TickOutcome};
    use portfolio_arcade::tuning::{DinoTuning, SnakeTuning};

    // Page element ids
    const DINO_CANVAS: &str = "dino-canvas";
    const SNAKE_CANVAS: &str = "snake-canvas";
    const PLAYER_NAME: &str = "player-name";
    const SUBMIT_BTN: &str = "submit-score";
    const LEADERBOARD_LIST: &str = "leaderboard-list";

    /// Everything the page mutates, borrowed once per event or tick
    struct App {
        settings: Settings,
        dino: DinoState,
        dino_input: DinoInput,
        dino_canvas_missing: bool,
        snake: SnakeState,
        snake_timer: Option<Interval>,
        snake_canvas_missing: bool,
        board: Board,
        flow: ScoreFlow,
        /// Dino frame loop, only while a run is live
        frames: Option<FrameLoop>,
    }

    type Shared = Rc<RefCell<App>>;

    impl App {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                flow: ScoreFlow::with_name(&settings.last_player_name),
                settings,
                dino: DinoState::new(DinoTuning::default()),
                dino_input: DinoInput::default(),
                dino_canvas_missing: false,
                snake: SnakeState::new(seed, SnakeTuning::default()),
                snake_timer: None,
                snake_canvas_missing: false,
                board: Board::new(),
                frames: None,
            }
        }
    }

    /// Look up a canvas, logging once when it goes missing and once when it returns
    fn acquire(id: &str, missing: &mut bool) -> Option<CanvasSurface> {
        match CanvasSurface::acquire(id) {
            Some(surface) => {
                if *missing {
                    log::info!("#{id} is back, resuming");
                    *missing = false;
                }
                Some(surface)
            }
            None => {
                if !*missing {
                    log::warn!("#{id} unavailable, skipping ticks");
                    *missing = true;
                }
                None
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Portfolio Arcade starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app: Shared = Rc::new(RefCell::new(App::new(settings, seed)));

        dom::set_input_value(PLAYER_NAME, app.borrow().flow.name_input());

        setup_keyboard(app.clone());
        setup_dino_controls(app.clone());
        setup_score_flow(app.clone());
        setup_snake_controls(app.clone());
        setup_tictactoe(app.clone());

        render_flow(&app.borrow());
        draw_dino(&mut app.borrow_mut());
        render_snake(&mut app.borrow_mut());
        render_board(&app.borrow().board);

        log::info!("Portfolio Arcade running with seed: {}", seed);
    }

    fn setup_keyboard(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            let key = event.key();

            if key == " " && a.dino.phase.is_running() {
                a.dino_input.jump = true;
                event.prevent_default();
                return;
            }

            if let Some(dir) = Direction::from_key(&key) {
                if a.snake.phase.is_running() {
                    a.snake.queue_direction(dir);
                    event.prevent_default();
                }
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // === Dino runner ===

    fn dino_frame(app: &Shared) {
        let ended = {
            let mut a = app.borrow_mut();
            let a = &mut *a;
            let Some(surface) = acquire(DINO_CANVAS, &mut a.dino_canvas_missing) else {
                return;
            };

            let input = std::mem::take(&mut a.dino_input);
            let outcome = sim::dino::tick(&mut a.dino, &input);
            if let TickOutcome::Ended { score } = outcome {
                log::info!("Dino run over, score {}", score);
                a.flow.run_ended(score);
                // Cancel only; the loop is dropped by the next start or menu
                if let Some(frames) = &a.frames {
                    frames.cancel();
                }
            }

            surface.draw(&dino_scene(&a.dino));
            matches!(outcome, TickOutcome::Ended { .. })
        };

        if ended {
            render_flow(&app.borrow());
        }
    }

    /// Single redraw for screens where no run is ticking
    fn draw_dino(a: &mut App) {
        if let Some(surface) = acquire(DINO_CANVAS, &mut a.dino_canvas_missing) {
            surface.draw(&dino_scene(&a.dino));
        }
    }

    fn start_dino(app: &Shared) {
        {
            let mut a = app.borrow_mut();
            a.dino.start();
            a.dino_input = DinoInput::default();
            a.flow.start_run();
            // Replacing drops the previous loop outside its own callback
            a.frames = None;

            let frame_app = app.clone();
            match FrameLoop::start(move |_time| dino_frame(&frame_app)) {
                Ok(frames) => a.frames = Some(frames),
                Err(e) => log::error!("Failed to start dino loop: {:?}", e),
            }
        }
        render_flow(&app.borrow());
    }

    fn setup_dino_controls(app: Shared) {
        {
            let app = app.clone();
            dom::on_click("dino-start", move || start_dino(&app));
        }
        {
            let app = app.clone();
            dom::on_click("play-again", move || start_dino(&app));
        }
        {
            let app = app.clone();
            dom::on_click("back-to-menu", move || {
                {
                    let mut a = app.borrow_mut();
                    a.frames = None;
                    a.dino.reset();
                    a.flow.back_to_menu();
                    draw_dino(&mut a);
                }
                render_flow(&app.borrow());
            });
        }
    }

    // === Score submission and leaderboard ===

    fn setup_score_flow(app: Shared) {
        {
            let app = app.clone();
            dom::on(PLAYER_NAME, "input", move |_| {
                let value = dom::input_value(PLAYER_NAME).unwrap_or_default();
                app.borrow_mut().flow.set_name(&value);
                render_flow(&app.borrow());
            });
        }
        {
            let app = app.clone();
            dom::on_click(SUBMIT_BTN, move || submit(&app));
        }
        {
            let app = app.clone();
            dom::on_click("show-leaderboard", move || {
                let FetchLeaderboard = app.borrow_mut().flow.open_leaderboard();
                render_flow(&app.borrow());
                spawn_fetch(app.clone());
            });
        }
        {
            let app = app.clone();
            dom::on_click("refresh-leaderboard", move || {
                let request = app.borrow().flow.refresh();
                if request.is_some() {
                    spawn_fetch(app.clone());
                }
            });
        }
    }

    fn submit(app: &Shared) {
        let request = {
            let mut a = app.borrow_mut();
            if let Some(value) = dom::input_value(PLAYER_NAME) {
                a.flow.set_name(&value);
            }
            a.flow.begin_submit()
        };
        render_flow(&app.borrow());

        let Some(request) = request else {
            return;
        };

        let app = app.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // Clone out so no borrow is held across the await
            let settings = app.borrow().settings.clone();
            let result = http::submit_score(&settings, &request.score).await;

            let fetch = {
                let mut a = app.borrow_mut();
                if result.is_ok() {
                    a.settings.remember_player(&request.score.player_name);
                    a.settings.save();
                }
                a.flow.submit_finished(request.run, result)
            };
            render_flow(&app.borrow());

            if fetch.is_some() {
                fetch_leaderboard(&app).await;
            }
        });
    }

    fn spawn_fetch(app: Shared) {
        wasm_bindgen_futures::spawn_local(async move {
            fetch_leaderboard(&app).await;
        });
    }

    async fn fetch_leaderboard(app: &Shared) {
        let settings = app.borrow().settings.clone();
        let result = http::fetch_top_scores(&settings).await;
        app.borrow_mut().flow.leaderboard_loaded(result);
        render_flow(&app.borrow());
    }

    fn render_flow(app: &App) {
        let flow = &app.flow;
        let screen = flow.screen();

        dom::set_visible("dino-menu", screen == Screen::Menu);
        dom::set_visible("dino-game-over", screen == Screen::GameOver);
        dom::set_visible("leaderboard", screen == Screen::Leaderboard);

        dom::set_text("dino-final-score", &flow.final_score().to_string());
        dom::set_text("submit-notice", flow.notice().unwrap_or(""));
        dom::set_enabled(SUBMIT_BTN, flow.can_submit());
        dom::set_text(
            SUBMIT_BTN,
            if flow.is_submitting() { "Submitting..." } else { "Submit Score" },
        );

        if screen == Screen::Leaderboard {
            let entries = flow.entries();
            if entries.is_empty() {
                dom::fill_list(LEADERBOARD_LIST, ["No scores yet. Be the first!".to_string()]);
            } else {
                let now = dom::now();
                dom::fill_list(
                    LEADERBOARD_LIST,
                    entries.iter().enumerate().map(|(i, e)| {
                        format!(
                            "{}. {} - {} ({})",
                            i + 1,
                            e.player_name,
                            e.score,
                            format_age(e.created_at, now)
                        )
                    }),
                );
            }
        }
    }

    // === Snake ===

    fn setup_snake_controls(app: Shared) {
        dom::on_click("snake-start", move || {
            let mut a = app.borrow_mut();
            a.snake.start();
            // Drop the previous timer here, never from inside its own tick
            a.snake_timer = None;

            let delay = a.settings.snake_interval_ms();
            let tick_app = app.clone();
            match Interval::start(delay, move || snake_step(&tick_app)) {
                Ok(timer) => a.snake_timer = Some(timer),
                Err(e) => log::error!("Failed to start snake timer: {:?}", e),
            }
            render_snake(&mut a);
        });
    }

    fn snake_step(app: &Shared) {
        let mut a = app.borrow_mut();
        let a = &mut *a;
        if acquire(SNAKE_CANVAS, &mut a.snake_canvas_missing).is_none() {
            return;
        }

        if let TickOutcome::Ended { score } = sim::snake::tick(&mut a.snake) {
            log::info!("Snake run over, score {}", score);
            if let Some(timer) = &a.snake_timer {
                timer.cancel();
            }
        }
        render_snake(a);
    }

    fn render_snake(a: &mut App) {
        if let Some(surface) = acquire(SNAKE_CANVAS, &mut a.snake_canvas_missing) {
            surface.draw(&snake_scene(&a.snake, a.settings.effective_glow()));
        }
        dom::set_text("snake-score", &a.snake.score.to_string());
    }

    // === Tic-tac-toe ===

    fn setup_tictactoe(app: Shared) {
        for index in 0..9 {
            let app = app.clone();
            dom::on_click(&format!("ttt-cell-{index}"), move || {
                let mut a = app.borrow_mut();
                if let Err(e) = a.board.play(index) {
                    log::debug!("Ignored move: {e}");
                }
                render_board(&a.board);
            });
        }
        dom::on_click("ttt-reset", move || {
            let mut a = app.borrow_mut();
            a.board.reset();
            render_board(&a.board);
        });
    }

    fn render_board(board: &Board) {
        for (index, cell) in board.cells.iter().enumerate() {
            let text = cell.map(|mark| mark.as_str()).unwrap_or("");
            dom::set_text(&format!("ttt-cell-{index}"), text);
        }
        dom::set_text("ttt-status", &board.status_text());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = portfolio_arcade::server::ServerConfig::from_env();
    portfolio_arcade::server::run(config).await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
