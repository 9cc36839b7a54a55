#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Lane Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use lane_defence_core::Rect;
use lane_defence_rendering::{
    Color, FrameInput, HudText, Presentation, RenderingBackend, Schedule, Scene, SceneBlock,
    SceneCell, SceneOrb,
};
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use std::{
    sync::mpsc,
    time::{Duration, Instant},
};

/// Stops driving the simulation once it asks to halt.
///
/// The scene handed to the gate keeps whatever the last update left in it, so
/// the backend can go on presenting the final frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulationGate {
    halted: bool,
}

impl SimulationGate {
    /// Whether the simulation has asked to halt.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Calls `update` unless the simulation halted earlier. Returns whether it ran.
    pub fn drive<F>(&mut self, input: FrameInput, scene: &mut Scene, update: &mut F) -> bool
    where
        F: FnMut(FrameInput, &mut Scene) -> Schedule,
    {
        if self.halted {
            return false;
        }

        if update(input, scene) == Schedule::Halt {
            self.halted = true;
        }
        true
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Aggregates frame timings over one-second windows.
#[derive(Debug, Default)]
struct FrameTimer {
    elapsed: Duration,
    frames: u32,
    simulation: Duration,
    render: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TimingReport {
    fps: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FrameTimer {
    /// Adds one frame and reports once a full second has accumulated.
    fn record(
        &mut self,
        frame: Duration,
        simulation: Duration,
        render: Duration,
    ) -> Option<TimingReport> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation += simulation;
        self.render += render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let report = TimingReport {
            fps: self.frames as f32 / self.elapsed.as_secs_f32(),
            avg_simulation: self.simulation / self.frames,
            avg_render: self.render / self.frames,
        };
        *self = Self::default();
        Some(report)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> Schedule + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.field.x.round() as i32,
            window_height: scene.field.y.round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (started_sender, started_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let _ = started_sender.send(Ok(()));

            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut gate = SimulationGate::default();
            let mut frame_timer = FrameTimer::default();

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let (cursor_x, cursor_y) = mouse_position();
                let frame_input = frame_input_from_observations(
                    &scene,
                    &metrics,
                    Vec2::new(cursor_x, cursor_y),
                    is_mouse_button_pressed(MouseButton::Left),
                );

                let simulation_start = Instant::now();
                let was_halted = gate.is_halted();
                let _ = gate.drive(frame_input, &mut scene, &mut update_scene);
                if gate.is_halted() && !was_halted {
                    tracing::info!("simulation halted; press Escape or Q to close");
                }
                let simulation = simulation_start.elapsed();

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                draw_scene(&scene, &metrics);
                let render = render_start.elapsed();

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let report = frame_timer.record(frame, simulation, render);
                if let Some(report) = report.filter(|_| show_fps) {
                    tracing::info!(
                        fps = report.fps,
                        sim_ms = report.avg_simulation.as_secs_f64() * 1_000.0,
                        render_ms = report.avg_render.as_secs_f64() * 1_000.0,
                        "frame timing"
                    );
                }

                macroquad::window::next_frame().await;
            }
        });

        started_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

/// Maps playfield units onto the window, letterboxing when the aspect ratio differs.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let scale = (screen_width / scene.field.x).min(screen_height / scene.field.y);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            0.0
        };
        let offset = (Vec2::new(screen_width, screen_height) - scene.field * scale) * 0.5;

        Self { scale, offset }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.scale
    }

    fn to_field(&self, position: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        Some((position - self.offset) / self.scale)
    }
}

fn frame_input_from_observations(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    click: bool,
) -> FrameInput {
    let cursor = metrics
        .to_field(cursor_position)
        .filter(|position| scene.contains(*position));

    FrameInput {
        cursor,
        click: click && cursor.is_some(),
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics) {
    draw_rect(
        &Rect::new(0.0, 0.0, scene.field.x, scene.control_bar_height),
        scene.control_bar,
        metrics,
    );

    for text in &scene.hud {
        draw_label(text, metrics);
    }
    if let Some(banner) = &scene.banner {
        draw_label(banner, metrics);
    }

    draw_hover(&scene.cells, metrics);
    draw_blocks(&scene.defenders, metrics);
    draw_blocks(&scene.enemies, metrics);
    draw_orbs(&scene.projectiles, metrics);
}

fn draw_hover(cells: &[SceneCell], metrics: &SceneMetrics) {
    for cell in cells.iter().filter(|cell| cell.hovered) {
        let origin = metrics.to_screen(Vec2::new(cell.rect.x, cell.rect.y));
        macroquad::shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            cell.rect.width * metrics.scale,
            cell.rect.height * metrics.scale,
            1.0,
            macroquad::color::BLACK,
        );
    }
}

fn draw_blocks(blocks: &[SceneBlock], metrics: &SceneMetrics) {
    for block in blocks {
        draw_rect(&block.rect, block.fill, metrics);
        draw_label(&block.label, metrics);
    }
}

fn draw_orbs(orbs: &[SceneOrb], metrics: &SceneMetrics) {
    for orb in orbs {
        let center = metrics.to_screen(orb.center);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            orb.radius * metrics.scale,
            to_macroquad_color(orb.color),
        );
    }
}

fn draw_rect(rect: &Rect, color: Color, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(Vec2::new(rect.x, rect.y));
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        rect.width * metrics.scale,
        rect.height * metrics.scale,
        to_macroquad_color(color),
    );
}

fn draw_label(text: &HudText, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(text.position);
    let _ = macroquad::text::draw_text(
        &text.text,
        origin.x,
        origin.y,
        text.size * metrics.scale,
        to_macroquad_color(text.color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
