//! Ball Lottery entry point
//!
//! Browser: drives a session from `requestAnimationFrame` and draws it with
//! WebGPU. Native: runs draws headless until the pool is empty and prints the
//! winners, which is handy for checking a configuration.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_lottery {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement};

    use ball_lottery::consts::REFERENCE_FRAME_MS;
    use ball_lottery::renderer::{RenderError, RenderState};
    use ball_lottery::sim::{Arena, Notice};
    use ball_lottery::{
        DrawPhase, LotteryConfig, LotteryError, LotteryEvent, LotteryResult, Session, WinnerEntry,
    };

    /// Page state: one session plus its GPU surface
    struct Lottery {
        session: Session,
        render_state: Option<RenderState>,
        last_time: f64,
    }

    impl Lottery {
        /// Advance one animation frame
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                REFERENCE_FRAME_MS as f64
            };
            self.last_time = time;

            let frame = self.session.tick(elapsed);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render_frame(&frame) {
                    Ok(()) => {}
                    Err(RenderError::Surface(wgpu::SurfaceError::Lost)) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {}", e),
                }
            }

            let events = self.session.drain_events();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                for event in &events {
                    apply_event(&document, event);
                }
                set_notice(&document, frame.notice);
            }
        }

        /// Read the form and register a participant
        fn add_from_form(&mut self, document: &Document) -> LotteryResult<()> {
            let (Some(name_el), Some(weight_el)) = (
                input(document, "input-name"),
                input(document, "input-weight"),
            ) else {
                return Ok(());
            };
            // Oversized numbers saturate so they fail as "too large", not as zero
            let weight = weight_el
                .value()
                .trim()
                .parse::<u64>()
                .map(|w| u32::try_from(w).unwrap_or(u32::MAX))
                .unwrap_or(0);

            self.session.add_participant(&name_el.value(), weight)?;
            name_el.set_value("");
            weight_el.set_value("1");
            let _ = name_el.focus();
            Ok(())
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let (arena, width, height) = canvas_size(canvas);
            if let Err(e) = self.session.set_arena(arena) {
                log::warn!("Ignoring resize: {}", e);
                return;
            }
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }
    }

    fn input(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn html(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Arena in CSS pixels plus the backing store size in device pixels
    fn canvas_size(canvas: &HtmlCanvasElement) -> (Arena, u32, u32) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            Arena::new(client_w as f32, client_h as f32),
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        )
    }

    /// Tell the user why an action was refused
    fn notify_error(error: &LotteryError) {
        log::warn!("{}: {}", error.title(), error);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("{}\n\n{}", error.title(), error));
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_overlay(document: &Document, text: &str, color: Option<&str>, visible: bool) {
        let Some(overlay) = html(document, "winner-overlay") else {
            return;
        };
        overlay.set_text_content(Some(text));
        let style = overlay.style();
        if let Some(color) = color {
            let _ = style.set_property("color", color);
        }
        let (opacity, scale) = if visible { ("1", "1") } else { ("0", "0.5") };
        let _ = style.set_property("opacity", opacity);
        let _ = style.set_property("transform", &format!("translate(-50%, -50%) scale({scale})"));
    }

    fn push_winner(document: &Document, entry: &WinnerEntry) {
        let Some(list) = document.get_element_by_id("winner-list") else {
            return;
        };
        if let Ok(item) = document.create_element("li") {
            item.set_text_content(Some(&format!("#{} {}", entry.rank, entry.name)));
            let _ = item.set_attribute("style", &format!("color: {}", entry.color.css()));
            let _ = list.append_child(&item);
        }
    }

    fn set_start_enabled(document: &Document, enabled: bool) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            if enabled {
                let _ = btn.remove_attribute("disabled");
            } else {
                let _ = btn.set_attribute("disabled", "");
            }
        }
    }

    /// Reflect one session event in the page
    fn apply_event(document: &Document, event: &LotteryEvent) {
        match event {
            LotteryEvent::ParticipantsChanged {
                participants,
                balls,
            } => {
                set_text(document, "count", &participants.to_string());
                set_text(document, "ball-count", &balls.to_string());
            }
            LotteryEvent::PhaseChanged { to, .. } => {
                set_start_enabled(document, *to == DrawPhase::Idle);
                match to {
                    DrawPhase::Rolling => show_overlay(document, "", None, false),
                    DrawPhase::Idle => show_overlay(document, "WINNER", None, false),
                    _ => {}
                }
            }
            LotteryEvent::WinnerRevealed(entry) => {
                let css = entry.color.css();
                show_overlay(document, &entry.name, Some(&css), true);
                push_winner(document, entry);
            }
            LotteryEvent::Reset => {
                if let Some(list) = document.get_element_by_id("winner-list") {
                    list.set_inner_html("");
                }
            }
            LotteryEvent::WinnerSelected { .. } | LotteryEvent::DrawAbandoned { .. } => {}
        }
    }

    fn set_notice(document: &Document, notice: Option<Notice>) {
        let Some(el) = html(document, "arena-notice") else {
            return;
        };
        let text = match notice {
            Some(Notice::AwaitingEntries) => "Waiting for entries...",
            Some(Notice::PoolExhausted) => "All balls drawn",
            None => "",
        };
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Lottery starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("simulation")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (arena, width, height) = canvas_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let config = LotteryConfig {
            arena_width: arena.width,
            arena_height: arena.height,
            ..LotteryConfig::default()
        };
        let session = Session::new(config).expect("Failed to seed the draw RNG");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let render_state = match init_gpu(&instance, &canvas, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("WebGPU unavailable, running without a canvas: {}", e);
                None
            }
        };

        let lottery = Rc::new(RefCell::new(Lottery {
            session,
            render_state,
            last_time: 0.0,
        }));

        setup_form(&document, lottery.clone());
        setup_buttons(&document, lottery.clone());
        setup_resize(&canvas, lottery.clone());

        request_animation_frame(lottery);

        log::info!("Ball Lottery running!");
    }

    async fn init_gpu(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);
        RenderState::new(surface, &adapter, width, height).await
    }

    fn setup_form(document: &Document, lottery: Rc<RefCell<Lottery>>) {
        if let Some(btn) = document.get_element_by_id("add-btn") {
            let lottery = lottery.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let result = lottery.borrow_mut().add_from_form(&doc);
                if let Err(e) = result {
                    notify_error(&e);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter in either field submits
        for id in ["input-name", "input-weight"] {
            if let Some(el) = document.get_element_by_id(id) {
                let lottery = lottery.clone();
                let doc = document.clone();
                let closure =
                    Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                        if event.key() == "Enter" {
                            let result = lottery.borrow_mut().add_from_form(&doc);
                            if let Err(e) = result {
                                notify_error(&e);
                            }
                        }
                    });
                let _ = el
                    .add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(document: &Document, lottery: Rc<RefCell<Lottery>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let lottery = lottery.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let result = lottery.borrow_mut().session.start_draw();
                if let Err(e) = result {
                    notify_error(&e);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                lottery.borrow_mut().session.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, lottery: Rc<RefCell<Lottery>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            lottery.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(lottery: Rc<RefCell<Lottery>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            lottery_loop(lottery, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn lottery_loop(lottery: Rc<RefCell<Lottery>>, time: f64) {
        lottery.borrow_mut().frame(time);
        request_animation_frame(lottery);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_lottery::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::PathBuf;

    use ball_lottery::{DrawPhase, LotteryConfig, LotteryEvent, Session};

    /// Frames allowed per draw before giving up (a draw needs ~400 at 60 Hz)
    const MAX_FRAMES_PER_DRAW: usize = 100_000;

    #[derive(Debug, Default, PartialEq)]
    pub struct Args {
        pub config: Option<PathBuf>,
        pub seed: Option<u64>,
        pub entries: Vec<(String, u32)>,
    }

    /// `[--config FILE] [--seed N] NAME[:WEIGHT]...`
    pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config needs a file")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--seed" => {
                    let seed = args.next().ok_or("--seed needs a value")?;
                    parsed.seed = Some(seed.parse().map_err(|_| format!("bad seed: {seed}"))?);
                }
                entry => parsed.entries.push(parse_entry(entry)?),
            }
        }
        Ok(parsed)
    }

    fn parse_entry(entry: &str) -> Result<(String, u32), String> {
        match entry.rsplit_once(':') {
            Some((name, weight)) => {
                let weight = weight
                    .parse()
                    .map_err(|_| format!("bad weight in '{entry}'"))?;
                Ok((name.to_string(), weight))
            }
            None => Ok((entry.to_string(), 1)),
        }
    }

    pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
        let config = match &args.config {
            Some(path) => LotteryConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => LotteryConfig::default(),
        };
        let frame_ms = config.reference_frame_ms as f64;

        let mut session = match args.seed {
            Some(seed) => Session::with_seed(config, seed)?,
            None => Session::new(config)?,
        };
        for (name, weight) in &args.entries {
            session.add_participant(name, *weight)?;
        }
        if session.pool().is_empty() {
            println!("usage: ball-lottery [--config FILE] [--seed N] NAME[:WEIGHT]...");
            return Ok(());
        }

        while !session.pool().is_empty() {
            session.start_draw()?;
            let mut frames = 0;
            while session.phase() != DrawPhase::Idle {
                session.tick(frame_ms);
                frames += 1;
                if frames > MAX_FRAMES_PER_DRAW {
                    return Err("draw did not finish".into());
                }
            }
            for event in session.drain_events() {
                if let LotteryEvent::WinnerRevealed(entry) = event {
                    println!("#{} {} (weight {})", entry.rank, entry.name, entry.weight);
                }
            }
        }
        log::info!("All {} winners drawn", session.winners().len());
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ball Lottery (native, headless) starting...");

    let result = headless::parse_args(std::env::args().skip(1))
        .map_err(Into::into)
        .and_then(headless::run);
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
