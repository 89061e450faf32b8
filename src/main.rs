//! Magic Dash entry point
//!
//! The browser build wires the page (menu, HUD, game-over screen, input) to a
//! [`Session`]. The native build runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use magic_dash::audio::{AudioManager, SoundEffect};
    use magic_dash::platform::input::pointer_signal;
    use magic_dash::platform::{JumpSignal, key_signal};
    use magic_dash::renderer::{Frame, RenderError, RenderState};
    use magic_dash::sim::Theme;
    use magic_dash::ui;
    use magic_dash::{HighScores, Presenter, Screen, Session, Settings};

    /// Leaderboard rows shown on the game-over screen
    const PODIUM: usize = 3;

    /// DOM side of the presentation contract
    struct PageHud {
        document: Document,
        audio: AudioManager,
        /// Final score of a run that just ended, picked up after `advance`
        finished: Option<u64>,
    }

    impl PageHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if visible {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
        }

        fn set_style(&self, id: &str, style: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("style", style);
            }
        }
    }

    impl Presenter for PageHud {
        fn report_score(&mut self, score: u64) {
            self.set_text("hud-score", &score.to_string());
            self.set_style(
                "hud-battery-fill",
                &format!("width: {:.1}%", ui::battery_level(score)),
            );
        }

        fn report_theme_changed(&mut self, theme: Theme) {
            if let Some(body) = self.document.body() {
                body.set_class_name(theme.as_str());
            }
            if theme != Theme::StreetMorning {
                log::info!("Theme: {}", theme.as_str());
                self.audio.play(SoundEffect::ThemeChange);
            }
        }

        fn report_game_over(&mut self, final_score: u64) {
            self.finished = Some(final_score);
            self.audio.play(SoundEffect::GameOver);
        }

        fn report_collect(&mut self) {
            self.audio.play(SoundEffect::Collect);
        }

        fn report_jump(&mut self) {
            self.audio.play(SoundEffect::Jump);
        }

        fn report_level(&mut self, _level: u32) {
            self.audio.play(SoundEffect::LevelUp);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        hud: PageHud,
        render_state: Option<RenderState>,
        high_scores: HighScores,
        /// Picks crash-screen quips
        rng: Pcg32,
    }

    impl Game {
        fn new(document: Document, seed: u64) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new(&settings);
            Self {
                session: Session::new(seed, settings),
                hud: PageHud {
                    document,
                    audio,
                    finished: None,
                },
                render_state: None,
                high_scores: HighScores::load(),
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        /// One display frame: update, draw, then handle a finished run
        fn frame(&mut self) {
            if let Some(frame) = self.session.advance(&mut self.hud) {
                self.render(&frame);
            }
            if let Some(final_score) = self.hud.finished.take() {
                self.finish_run(final_score);
            }
        }

        fn render(&mut self, frame: &Frame) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn start(&mut self, player: &str) {
            let seed = js_sys::Date::now() as u64;
            self.hud.audio.resume();
            self.session.start(player, seed);

            if let Some(profile) = ui::profile(player) {
                self.hud
                    .set_style("hud-avatar", &format!("background: {}", profile.avatar_color));
            }
            self.hud.set_text("hud-player", player);
            self.hud.set_visible("menu", false);
            self.hud.set_visible("game-over", false);
            self.hud.set_visible("hud", true);
        }

        fn to_menu(&mut self) {
            self.session.return_to_menu();
            self.show_menu();
        }

        fn show_menu(&self) {
            let best = self
                .high_scores
                .top_score()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            self.hud.set_text("menu-best", &best);
            self.hud.set_visible("hud", false);
            self.hud.set_visible("game-over", false);
            self.hud.set_visible("menu", true);
        }

        fn finish_run(&mut self, final_score: u64) {
            let name = self.session.player_name().to_string();
            let rank = self
                .high_scores
                .add_score(&name, final_score, js_sys::Date::now());
            if let Some(rank) = rank {
                log::info!("{} placed #{} with {}", name, rank, final_score);
                if let Err(e) = self.high_scores.save() {
                    log::warn!("Could not save high scores: {}", e);
                }
                if rank == 1 && final_score > 0 {
                    self.hud.audio.play(SoundEffect::HighScore);
                }
            }

            self.hud.set_text("final-score", &final_score.to_string());
            self.hud
                .set_text("death-message", ui::death_message(&mut self.rng));
            self.hud
                .set_visible("new-record", rank == Some(1) && final_score > 0);
            self.fill_podium();

            self.hud.set_visible("hud", false);
            self.hud.set_visible("game-over", true);
        }

        fn fill_podium(&self) {
            let document = &self.hud.document;
            let Some(list) = document.get_element_by_id("top-scores") else {
                return;
            };
            list.set_text_content(None);
            for entry in self.high_scores.top(PODIUM) {
                let Ok(item) = document.create_element("li") else {
                    continue;
                };
                item.set_text_content(Some(&format!(
                    "{}  {}  ({})",
                    entry.name,
                    entry.score,
                    ui::format_date(entry.timestamp)
                )));
                let _ = list.append_child(&item);
            }
        }

        fn apply_jump(&mut self, signal: JumpSignal) {
            match signal {
                JumpSignal::Pressed => self.session.jump_pressed(),
                JumpSignal::Released => self.session.jump_released(),
            }
        }

        fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
            let mut settings = self.session.settings().clone();
            change(&mut settings);
            if let Err(e) = settings.save() {
                log::warn!("Could not save settings: {}", e);
            }
            self.hud.audio.apply_settings(&settings);
            self.show_settings(&settings);
            self.session.set_settings(settings);
        }

        fn show_settings(&self, settings: &Settings) {
            self.hud
                .set_text("mute-btn", if settings.muted { "Sound: Off" } else { "Sound: On" });
            self.hud.set_text(
                "quality-btn",
                &format!("Quality: {}", settings.quality.as_str()),
            );
        }
    }

    /// Size the canvas backing store to its CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    async fn init_renderer(canvas: &HtmlCanvasElement) -> Result<RenderState, RenderError> {
        let (width, height) = fit_canvas(canvas);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger unavailable: {}", e).into());
        }

        log::info!("Magic Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(document.clone(), seed)));

        match init_renderer(&canvas).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Graphics unavailable: {}", e);
                if let Some(el) = document.get_element_by_id("gpu-error") {
                    let _ = el.class_list().remove_1("hidden");
                }
            }
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        {
            let g = game.borrow();
            g.show_settings(g.session.settings());
            g.show_menu();
        }

        setup_input_handlers(&canvas, game.clone());
        setup_menu(&document, game.clone());
        setup_game_over(&document, game.clone());
        setup_settings(&document, game.clone());
        setup_resize(canvas, game.clone());

        request_animation_frame(game);

        log::info!("Magic Dash running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard: Space / ArrowUp
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(signal) = key_signal(&event.code(), down, event.repeat()) {
                    event.prevent_default();
                    game.borrow_mut().apply_jump(signal);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: the whole canvas is the jump button
        for (event_name, down) in [("touchstart", true), ("touchend", false), ("touchcancel", false)]
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().apply_jump(pointer_signal(down));
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        for (event_name, down) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply_jump(pointer_signal(down));
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Player buttons carry their profile name in `data-player`
    fn setup_menu(document: &Document, game: Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all("[data-player]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(button) = buttons
                .get(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let player = button
                .get_attribute("data-player")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| ui::GUEST_NAME.to_string());
            if let Some(profile) = ui::profile(&player) {
                let _ = button.set_attribute(
                    "style",
                    &format!("border-color: {}", profile.avatar_color),
                );
            }

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.session.screen() == Screen::Menu {
                    g.start(&player);
                }
            });
            let _ = button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_game_over(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.session.screen() == Screen::GameOver {
                    let player = g.session.player_name().to_string();
                    g.start(&player);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().to_menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut()
                    .update_settings(|s| s.muted = !s.muted);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("quality-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut()
                    .update_settings(|s| s.quality = s.quality.next());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&canvas);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use magic_dash::consts::{GAME_WIDTH, RUNNER_WIDTH, RUNNER_X};
    use magic_dash::sim::Theme;
    use magic_dash::{Presenter, Screen, Session, Settings};

    /// Give up after this many frames even if the autopilot survives
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Frames of lead the autopilot jumps before reaching an obstacle
    const LEAD_FRAMES: f32 = 9.0;

    #[derive(Default)]
    struct LogPresenter {
        last_logged: u64,
        jumps: u32,
        pickups: u32,
        final_score: Option<u64>,
    }

    impl Presenter for LogPresenter {
        fn report_score(&mut self, score: u64) {
            if score >= self.last_logged + 1000 {
                self.last_logged = score - score % 1000;
                log::info!("Score {}", score);
            }
        }

        fn report_theme_changed(&mut self, theme: Theme) {
            log::info!("Theme: {}", theme.as_str());
        }

        fn report_game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }

        fn report_collect(&mut self) {
            self.pickups += 1;
        }

        fn report_jump(&mut self) {
            self.jumps += 1;
        }
    }

    /// Press jump when the nearest obstacle is about to reach the runner
    fn autopilot(session: &mut Session) {
        let state = session.state();
        let runner_front = RUNNER_X + RUNNER_WIDTH;
        let lead = state.speed * LEAD_FRAMES;
        let threat = state.obstacles.iter().any(|o| {
            let gap = o.pos.x - runner_front;
            gap > 0.0 && gap <= lead && o.pos.x < GAME_WIDTH
        });
        if threat && state.runner.on_ground() {
            session.jump_pressed();
        } else {
            session.jump_released();
        }
    }

    pub fn run(seed: u64) {
        let mut session = Session::new(seed, Settings::default());
        let mut presenter = LogPresenter::default();
        session.start("Autopilot", seed);

        let mut frames = 0;
        while session.screen() == Screen::Playing && frames < MAX_FRAMES {
            autopilot(&mut session);
            session.advance(&mut presenter);
            frames += 1;
        }

        match presenter.final_score {
            Some(score) => log::info!(
                "Run over after {} frames: {} points, {} jumps, {} pickups",
                frames,
                score,
                presenter.jumps,
                presenter.pickups
            ),
            None => log::info!(
                "Autopilot survived {} frames with {} points",
                frames,
                session.state().score
            ),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Magic Dash (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}
