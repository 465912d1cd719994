//! Billiards entry point
//!
//! On the web: wires the canvas, pointer events and the recolor menu to a
//! `Session` and runs it from `requestAnimationFrame`.
//! Natively: runs the same simulation headless and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent};

    use billiards::render::CanvasSurface;
    use billiards::sim::Color;
    use billiards::{Session, TableConfig};

    /// Everything the frame loop and event handlers share
    struct App {
        session: Session,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Convert a mouse event to canvas-local coordinates
        fn local_pos(&self, event: &MouseEvent) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                event.client_x() as f32 - rect.left() as f32,
                event.client_y() as f32 - rect.top() as f32,
            )
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Billiards starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = TableConfig::default();
        canvas.set_width(config.width as u32);
        canvas.set_height(config.height as u32);

        let session =
            Session::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = CanvasSurface::from_canvas(&canvas).ok_or("no 2d context")?;

        let app = Rc::new(RefCell::new(App {
            session,
            surface,
            canvas: canvas.clone(),
        }));

        {
            let mut a = app.borrow_mut();
            let App {
                session, surface, ..
            } = &mut *a;
            session.redraw(surface);
        }

        setup_pointer_handlers(&canvas, app.clone())?;
        setup_recolor_menu(&document, app.clone())?;

        request_animation_frame(app);

        log::info!("Billiards running!");
        Ok(())
    }

    fn setup_pointer_handlers(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Grab
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.local_pos(&event);
                a.session.pointer_down(x, y);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.local_pos(&event);
                a.session.pointer_move(x, y);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().session.pointer_up();
            });
            canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click opens the recolor menu next to the ball
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                let (x, y) = a.local_pos(&event);
                let menu = a.session.click(x, y);
                drop(a);
                show_menu(menu.map(|m| (m.anchor.x, m.anchor.y)));
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_recolor_menu(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(menu) = document.get_element_by_id("recolor-menu") else {
            log::warn!("No #recolor-menu element, recoloring disabled");
            return Ok(());
        };

        for color in Color::ALL {
            let button: HtmlElement = document.create_element("button")?.dyn_into()?;
            button.set_text_content(Some(color.label()));
            button.style().set_property("background-color", color.as_str())?;
            button.style().set_property("margin-right", "5px")?;

            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().session.choose_color(color);
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
            menu.append_child(&button)?;
        }

        let close: HtmlElement = document.create_element("button")?.dyn_into()?;
        close.set_text_content(Some("Close"));
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().session.close_menu();
            show_menu(None);
        });
        close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        menu.append_child(&close)?;

        Ok(())
    }

    /// Show the menu at a canvas-local point, or hide it
    fn show_menu(at: Option<(f32, f32)>) {
        let Some(menu) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("recolor-menu"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        let style = menu.style();
        match at {
            Some((x, y)) => {
                let _ = style.set_property("left", &format!("{}px", x));
                let _ = style.set_property("top", &format!("{}px", y));
                let _ = style.set_property("display", "block");
            }
            None => {
                let _ = style.set_property("display", "none");
            }
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let App {
                session, surface, ..
            } = &mut *a;
            session.frame(surface)
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use billiards::render::Surface;
    use billiards::sim::{Bound, TickReport, random_kicks, resolve_boundary, scatter};
    use billiards::{ConfigError, Session, TableConfig};
    use glam::Vec2;

    /// Frames per logged summary (one second at 60 fps)
    const FRAMES_PER_SECOND: u64 = 60;
    /// Default run length
    const DEFAULT_SECONDS: u64 = 20;
    /// Largest push given to each ball at the start, per axis
    const KICK_SPEED: f32 = 12.0;

    /// Where the layout comes from
    enum Layout {
        Default,
        File(String),
        Scatter { count: usize },
    }

    struct Options {
        layout: Layout,
        seed: u64,
        seconds: u64,
    }

    /// Counts draw calls; nothing is painted natively
    #[derive(Default)]
    struct NullSurface {
        circles: u64,
    }

    impl Surface for NullSurface {
        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _css: &str) {}

        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _css: &str) {
            self.circles += 1;
        }
    }

    fn parse_args(args: impl IntoIterator<Item = String>) -> Options {
        let mut options = Options {
            layout: Layout::Default,
            seed: 42,
            seconds: DEFAULT_SECONDS,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scatter" => {
                    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);
                    options.layout = Layout::Scatter { count };
                }
                "--seed" => {
                    if let Some(seed) = args.next().and_then(|s| s.parse().ok()) {
                        options.seed = seed;
                    }
                }
                "--seconds" => {
                    if let Some(secs) = args.next().and_then(|s| s.parse().ok()) {
                        options.seconds = secs;
                    }
                }
                flag if flag.starts_with("--") => {
                    log::warn!("Ignoring unknown option {}", flag);
                }
                path => options.layout = Layout::File(path.to_string()),
            }
        }
        options
    }

    fn load_config(options: &Options) -> Result<TableConfig, ConfigError> {
        match &options.layout {
            Layout::Default => Ok(TableConfig::default()),
            Layout::File(path) => {
                log::info!("Loading table layout from {}", path);
                TableConfig::load_from_path(path)
            }
            Layout::Scatter { count } => {
                let base = TableConfig::default();
                let bodies = scatter(Bound::new(base.width, base.height), *count, 30.0, options.seed);
                Ok(TableConfig { bodies, ..base })
            }
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let options = parse_args(std::env::args().skip(1));
        let config = load_config(&options)?;
        let mut session = Session::from_config(&config)?;

        // Break: every ball gets a seeded push, as if flicked
        let ids: Vec<_> = session.table().ids().collect();
        let kicks = random_kicks(ids.len(), KICK_SPEED, options.seed);
        for (id, kick) in ids.into_iter().zip(kicks) {
            session.table_mut().set_velocity(id, kick);
        }

        let mut surface = NullSurface::default();
        let total_frames = options.seconds * FRAMES_PER_SECOND;
        let mut last = TickReport::default();

        for frame in 1..=total_frames {
            if !session.frame(&mut surface) {
                break;
            }

            if frame % FRAMES_PER_SECOND == 0 {
                let total = *session.report();
                log::info!(
                    "t={:>3}s  energy={:>10.2}  wall={:>4}  contacts={:>4}  coincident={}  isolated={}",
                    frame / FRAMES_PER_SECOND,
                    session.table().kinetic_energy(),
                    total.wall_bounces - last.wall_bounces,
                    total.collisions - last.collisions,
                    total.coincident - last.coincident,
                    total.isolated - last.isolated,
                );
                last = total;
            }
        }

        let bound = session.table().bound;
        let escaped = session
            .table()
            .iter()
            .filter(|&body| {
                let mut settled = body.clone();
                resolve_boundary(&mut settled, bound);
                !settled.is_contained(bound)
            })
            .count();

        session.stop();
        log::info!(
            "Done: {} ticks, {} circles drawn, {} bodies outside bounds after a wall pass",
            session.table().time_ticks,
            surface.circles,
            escaped
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Billiards (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
