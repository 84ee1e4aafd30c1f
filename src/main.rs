//! Buah Ceria entry point
//!
//! Handles platform-specific initialization and wires DOM events into the
//! pure gameplay layer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, MouseEvent, TouchEvent};

    use buah_ceria::Rect;
    use buah_ceria::audio::AudioManager;
    use buah_ceria::consts::LEVEL_COUNT;
    use buah_ceria::input::{self, Surface};
    use buah_ceria::layout::LayoutMode;
    use buah_ceria::levels;
    use buah_ceria::progress::GameProgress;
    use buah_ceria::sim::{Game, LevelPhase, Navigator, Screen, Tool};

    /// App instance holding all state
    struct App {
        progress: GameProgress,
        audio: AudioManager,
        screen: Screen,
        controller: Option<buah_ceria::LevelController>,
        /// Geometry is re-resolved one frame after entering a level, once
        /// the stage element has settled into its final layout
        relayout_pending: bool,
    }

    impl App {
        fn new() -> Self {
            Self {
                progress: GameProgress::load(),
                audio: AudioManager::new(),
                screen: Screen::Menu,
                controller: None,
                relayout_pending: false,
            }
        }

        /// Enter a level (fresh attempt) or go back to the menu
        fn go_to(&mut self, screen: Screen) {
            self.screen = screen;
            self.controller = match screen {
                Screen::Menu => None,
                Screen::Level(level) => {
                    let (mode, container) = stage_geometry();
                    levels::build(level, mode, container)
                }
            };
            self.relayout_pending = self.controller.is_some();
        }

        /// Re-resolve level geometry after a viewport change
        fn relayout(&mut self) {
            if let Some(ctrl) = &mut self.controller {
                let (mode, container) = stage_geometry();
                levels::relayout(ctrl, mode, container);
            }
        }

        /// Normalize a client-space point for the active level
        fn to_local(&self, client: Vec2) -> Option<Vec2> {
            let level = match self.screen {
                Screen::Level(n) => n,
                Screen::Menu => return None,
            };
            input::normalize(stage_surface(level).as_ref(), client)
        }

        fn pointer_down(&mut self, client: Vec2, now_ms: f64) {
            self.audio.resume();
            let p = self.to_local(client);
            if let Some(ctrl) = &mut self.controller {
                ctrl.pointer_down(p, now_ms);
            }
        }

        fn pointer_move(&mut self, client: Vec2, now_ms: f64) {
            let p = self.to_local(client);
            if let Some(ctrl) = &mut self.controller {
                ctrl.pointer_move(p, now_ms);
            }
        }

        fn pointer_up(&mut self, now_ms: f64) {
            if let Some(ctrl) = &mut self.controller {
                ctrl.pointer_up(now_ms);
            }
        }

        /// Per-frame: advance the result timer and flush audio cues
        fn tick(&mut self, now_ms: f64) {
            if self.relayout_pending {
                self.relayout_pending = false;
                self.relayout();
            }
            if let Some(ctrl) = &mut self.controller {
                ctrl.tick(now_ms);
                for cue in ctrl.drain_cues() {
                    self.audio.play(cue);
                }
            }
        }

        /// Leave the result screen: record the outcome and navigate
        fn advance(&mut self) {
            let Some(ctrl) = &mut self.controller else {
                return;
            };
            let mut nav = PendingScreen(None);
            ctrl.advance(&mut self.progress, &mut nav);
            if let Some(screen) = nav.0 {
                self.go_to(screen);
            }
        }

        /// Reflect app state into the DOM overlays
        fn update_dom(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let phase = self.controller.as_ref().map(|c| c.phase());

            set_visible(&document, "menu", self.screen == Screen::Menu);
            set_visible(&document, "game-stage", self.screen != Screen::Menu);
            set_visible(&document, "instructions", phase == Some(LevelPhase::Instructions));
            set_visible(&document, "result", phase == Some(LevelPhase::ResultShown));

            // Finish button only for the open-ended levels
            let finishable = matches!(
                self.controller.as_ref().map(|c| &c.game),
                Some(Game::Draw(_) | Game::Color(_))
            ) && phase == Some(LevelPhase::Active);
            set_visible(&document, "finish-btn", finishable);

            if phase == Some(LevelPhase::ResultShown) {
                if let Some(outcome) = self.controller.as_ref().and_then(|c| c.outcome()) {
                    set_text(&document, "result-stars", &"\u{2b50}".repeat(outcome.stars.max(1) as usize));
                    set_text(
                        &document,
                        "result-time",
                        &format!("{:.1}s", outcome.elapsed_ms / 1000.0),
                    );
                }
            }

            if self.screen == Screen::Menu {
                set_text(&document, "total-stars", &self.progress.total_stars().to_string());
                for level in 1..=LEVEL_COUNT {
                    if let Some(btn) = document.get_element_by_id(&format!("level-btn-{level}")) {
                        let locked = !self.progress.can_access_level(level);
                        let _ = btn.class_list().toggle_with_force("locked", locked);
                    }
                }
            }
        }
    }

    /// Collects the screen chosen during `advance`
    struct PendingScreen(Option<Screen>);

    impl Navigator for PendingScreen {
        fn go_to(&mut self, screen: Screen) {
            self.0 = Some(screen);
        }
    }

    fn stage_element() -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id("game-stage")
    }

    /// Current layout mode plus the stage rect in stage-local coordinates
    fn stage_geometry() -> (LayoutMode, Rect) {
        let window = web_sys::window().expect("no window");
        let vw = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let vh = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let mode = LayoutMode::classify(vw, vh);
        let container = match stage_element() {
            Some(el) => {
                let r = el.get_bounding_client_rect();
                Rect::from_size(r.width() as f32, r.height() as f32)
            }
            None => Rect::from_size(vw, vh),
        };
        (mode, container)
    }

    /// Live surface for the active level, with its declared transform
    fn stage_surface(level: u32) -> Option<Surface> {
        let el = stage_element()?;
        let base = input::dom::surface_from_element(&el);
        let surface = match level {
            4 => Surface::with_transform(base.rect, levels::drawing::surface_transform()),
            5 => Surface::with_transform(
                base.rect,
                levels::coloring::surface_transform(Rect::from_size(
                    base.rect.width(),
                    base.rect.height(),
                )),
            ),
            _ => base,
        };
        Some(surface)
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Buah Ceria starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let app = Rc::new(RefCell::new(App::new()));

        setup_pointer_handlers(app.clone());
        setup_buttons(app.clone());
        setup_resize(app.clone());

        // Start UI loop
        request_animation_frame(app);

        log::info!("Buah Ceria running!");
    }

    fn setup_pointer_handlers(app: Rc<RefCell<App>>) {
        let Some(stage) = stage_element() else {
            log::error!("No #game-stage element, input disabled");
            return;
        };

        // Mouse down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client = input::dom::client_point_mouse(&event);
                app.borrow_mut().pointer_down(client, js_sys::Date::now());
            });
            let _ = stage
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client = input::dom::client_point_mouse(&event);
                app.borrow_mut().pointer_move(client, js_sys::Date::now());
            });
            let _ = stage
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up, on the window so releases outside the stage still land
        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().pointer_up(js_sys::Date::now());
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(client) = input::dom::client_point_touch(&event) {
                    app.borrow_mut().pointer_down(client, js_sys::Date::now());
                }
            });
            let _ = stage
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(client) = input::dom::client_point_touch(&event) {
                    app.borrow_mut().pointer_move(client, js_sys::Date::now());
                }
            });
            let _ = stage
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().pointer_up(js_sys::Date::now());
            });
            let _ = stage
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Menu level buttons
        for level in 1..=LEVEL_COUNT {
            if let Some(btn) = document.get_element_by_id(&format!("level-btn-{level}")) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut a = app.borrow_mut();
                    if a.progress.can_access_level(level) {
                        a.go_to(Screen::Level(level));
                    } else {
                        log::info!("Level {level} is still locked");
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Start button on the instruction overlay
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                if let Some(ctrl) = &mut a.controller {
                    ctrl.start();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Finish button for the drawing and coloring levels
        if let Some(btn) = document.get_element_by_id("finish-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(ctrl) = &mut app.borrow_mut().controller {
                    ctrl.finish(js_sys::Date::now());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Coloring level: palette swatches and the eraser
        for (i, color) in levels::coloring::PALETTE.into_iter().enumerate() {
            if let Some(btn) = document.get_element_by_id(&format!("color-btn-{i}")) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    if let Some(ctrl) = &mut app.borrow_mut().controller {
                        if let Game::Color(game) = &mut ctrl.game {
                            game.tool = Tool::Pencil;
                            game.color = color.to_owned();
                        }
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
        if let Some(btn) = document.get_element_by_id("eraser-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(ctrl) = &mut app.borrow_mut().controller {
                    if let Game::Color(game) = &mut ctrl.game {
                        game.tool = Tool::Eraser;
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Next button on the result overlay
        if let Some(btn) = document.get_element_by_id("next-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().advance();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back-to-menu button, usable mid-level; discards the attempt
        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().go_to(Screen::Menu);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound toggle
        if let Some(btn) = document.get_element_by_id("sound-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let muted = app.borrow_mut().audio.toggle_muted();
                let document = web_sys::window()
                    .and_then(|w| w.document())
                    .expect("no document");
                if let Some(el) = document.get_element_by_id("sound-btn") {
                    let _ = el.class_list().toggle_with_force("muted", muted);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        for event in ["resize", "orientationchange"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().relayout();
            });
            let _ =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // The stage can change size without a window resize (virtual
        // keyboard, browser chrome); observe it directly too
        if let Some(stage) = stage_element() {
            let closure = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
                app.borrow_mut().relayout();
            });
            match web_sys::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
                Ok(observer) => observer.observe(&stage),
                Err(_) => log::warn!("ResizeObserver unavailable"),
            }
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            ui_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn ui_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.tick(js_sys::Date::now());
            a.update_dom();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Buah Ceria (native) starting...");
    log::info!("The game targets the browser - build with trunk for the web version");

    smoke_test_sorting();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Quick native sanity run of the sorting level
#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_sorting() {
    use buah_ceria::Rect;
    use buah_ceria::layout::{LayoutMode, sorting_layout};
    use buah_ceria::levels;
    use buah_ceria::sim::LevelPhase;

    let container = Rect::from_size(1024.0, 768.0);
    let mut ctrl = levels::build(1, LayoutMode::Desktop, container).expect("level 1 exists");
    ctrl.start();

    let layout = sorting_layout(LayoutMode::Desktop, container);
    // apple -> red, pear -> green, pineapple -> yellow
    for (i, basket) in [0usize, 2, 1].into_iter().enumerate() {
        let t = 1000.0 + i as f64 * 100.0;
        ctrl.pointer_down(Some(layout.rests[i]), t);
        ctrl.pointer_move(Some(layout.baskets[basket]), t + 10.0);
        ctrl.pointer_up(t + 20.0);
    }

    assert_eq!(ctrl.phase(), LevelPhase::Completed);
    let outcome = ctrl.outcome().expect("scored");
    println!(
        "\u{2713} Sorting level completed: {} stars in {:.1}s",
        outcome.stars,
        outcome.elapsed_ms / 1000.0
    );
}
