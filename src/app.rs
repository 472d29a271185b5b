/*
 * Application Module
 *
 * This module hosts the simulation inside a nannou window.
 * It handles window creation, fixed-timestep ticking, the egui panel and
 * drawing through a Presenter that maps world space onto the window.
 *
 * World space has its origin in the top-left corner with y pointing down;
 * nannou puts the origin in the window center with y pointing up.
 */

use anyhow::{Context, Result};
use nannou::color;
use nannou::prelude::{pt2, App, Draw, Frame, Point2, Update};
use nannou::winit::event::WindowEvent;
use nannou_egui::Egui;
use std::sync::Mutex;
use std::time::Duration;

use crate::boid::Rgba;
use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::renderer::Presenter;
use crate::simulation::Simulation;
use crate::ui;
use crate::Vec2;

// Upper bound of ticks run in a single frame after a stall
const MAX_TICKS_PER_FRAME: usize = 5;

// nannou builds the model from a plain fn, so the prepared simulation waits here
static PENDING: Mutex<Option<Simulation>> = Mutex::new(None);

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    // Fixed timestep variables
    pub tick_accumulator: Duration,
    pub tick_size: Duration,
}

/// Open the window and run until it is closed or Quit is pressed.
pub fn launch(params: SimulationParams) -> Result<()> {
    let sim = Simulation::new(params).context("failed to prepare simulation")?;
    {
        let mut pending = PENDING
            .lock()
            .map_err(|_| anyhow::anyhow!("simulation handoff lock poisoned"))?;
        *pending = Some(sim);
    }

    nannou::app(model).update(update).run();
    Ok(())
}

// Initialize the model
fn model(app: &App) -> Model {
    let sim = PENDING
        .lock()
        .ok()
        .and_then(|mut pending| pending.take())
        .expect("simulation is prepared by launch");
    let params = sim.params().clone();

    let window_id = app
        .new_window()
        .title("Boid")
        .size(params.world_width as u32, params.world_height as u32)
        .view(view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build window");

    let window = app.window(window_id).expect("window was just built");
    let egui = Egui::from_window(&window);

    log::info!("window opened, ticking at {} Hz", params.frame_rate);

    Model {
        sim,
        egui,
        debug_info: DebugInfo::default(),
        tick_accumulator: Duration::ZERO,
        tick_size: tick_size(params.frame_rate),
    }
}

fn tick_size(frame_rate: f64) -> Duration {
    Duration::from_secs_f64(1.0 / frame_rate)
}

// Update the model
fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Let the panel edit a draft; the simulation validates before accepting it
    let mut draft = model.sim.params().clone();
    model.egui.set_elapsed_time(update.since_start);
    let response = ui::update_ui(&mut model.egui, &mut draft, &model.debug_info);

    if response.quit {
        log::info!("quit requested after {} ticks", model.sim.ticks());
        app.quit();
        return;
    }

    if response.params_changed {
        if let Err(error) = model.sim.apply_params(draft) {
            log::warn!("{error:#}");
        }
        model.tick_size = tick_size(model.sim.params().frame_rate);
    }

    if response.reset {
        model.sim.reset();
        model.tick_accumulator = Duration::ZERO;
    }

    // Run fixed timestep ticks
    model.tick_accumulator += update.since_last;
    let mut ticks = 0;
    while model.tick_accumulator >= model.tick_size {
        if ticks == MAX_TICKS_PER_FRAME {
            // Drop the backlog instead of spiralling
            model.tick_accumulator = Duration::ZERO;
            break;
        }
        model.sim.step();
        model.tick_accumulator -= model.tick_size;
        ticks += 1;
    }

    model.debug_info.ticks_per_frame = ticks;
    model.debug_info.ticks = model.sim.ticks();
    model.debug_info.stats = model.sim.flock().stats();
}

// Render the model
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    let params = model.sim.params();
    let mut presenter = NannouPresenter::new(&draw, params.world_width, params.world_height);
    model.sim.draw(&mut presenter);
    presenter.present();

    if let Err(error) = draw.to_frame(app, &frame) {
        log::warn!("failed to draw frame: {error:?}");
    }

    if let Err(error) = model.egui.draw_to_frame(&frame) {
        log::warn!("failed to draw ui: {error:?}");
    }
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}

// Presenter drawing into a nannou Draw
struct NannouPresenter<'a> {
    draw: &'a Draw,
    half_width: f32,
    half_height: f32,
}

impl<'a> NannouPresenter<'a> {
    fn new(draw: &'a Draw, world_width: f64, world_height: f64) -> Self {
        Self {
            draw,
            half_width: world_width as f32 / 2.0,
            half_height: world_height as f32 / 2.0,
        }
    }

    // World space to window space
    fn to_screen(&self, point: Vec2) -> Point2 {
        pt2(point.x as f32 - self.half_width, self.half_height - point.y as f32)
    }
}

fn to_color(c: Rgba) -> color::Rgba {
    color::rgba(
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
        c.a as f32 / 255.0,
    )
}

impl Presenter for NannouPresenter<'_> {
    fn clear(&mut self, c: Rgba) {
        self.draw.background().color(to_color(c));
    }

    fn circle(&mut self, center: Vec2, radius: f64, c: Rgba, weight: f64) {
        self.draw
            .ellipse()
            .xy(self.to_screen(center))
            .radius(radius as f32)
            .no_fill()
            .stroke(to_color(c))
            .stroke_weight(weight as f32);
    }

    fn line(&mut self, start: Vec2, end: Vec2, c: Rgba, weight: f64) {
        self.draw
            .line()
            .start(self.to_screen(start))
            .end(self.to_screen(end))
            .weight(weight as f32)
            .color(to_color(c));
    }
}
