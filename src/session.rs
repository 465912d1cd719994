//! Animation session for one surface
//!
//! Owns the table and the pointer controller. The host calls `frame` once per
//! animation frame and keeps requesting frames while it returns true; pointer
//! events come in between frames on the same thread, so they never see a
//! half-stepped table.

use glam::Vec2;

use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::interaction::{Controller, RecolorMenu};
use crate::render::{Surface, draw_table};
use crate::sim::state::{BodyId, Color, Table};
use crate::sim::tick::{TickReport, tick};

pub struct Session {
    table: Table,
    controller: Controller,
    background: String,
    running: bool,
    /// Totals since the session started
    report: TickReport,
}

impl Session {
    pub fn new(table: Table, background: impl Into<String>) -> Self {
        Self {
            table,
            controller: Controller::new(),
            background: background.into(),
            running: true,
            report: TickReport::default(),
        }
    }

    pub fn from_config(config: &TableConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build()?, config.background.clone()))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Direct access for setup code (initial pushes, scripted scenes)
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn report(&self) -> &TickReport {
        &self.report
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop. The next `frame` call returns false without stepping.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Session stopped after {} ticks", self.table.time_ticks);
        }
        self.running = false;
    }

    /// Step once and redraw. Returns whether to request another frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.running {
            return false;
        }
        let report = tick(&mut self.table);
        self.report.merge(&report);
        draw_table(surface, &self.table, &self.background);
        true
    }

    /// Redraw without stepping (initial paint, recolor while stopped)
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_table(surface, &self.table, &self.background);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<BodyId> {
        self.controller.pointer_down(&mut self.table, Vec2::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.controller.pointer_move(&mut self.table, Vec2::new(x, y))
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// Click/tap: open or close the recolor menu
    pub fn click(&mut self, x: f32, y: f32) -> Option<RecolorMenu> {
        self.controller
            .select_for_recolor(&self.table, Vec2::new(x, y))
            .copied()
    }

    pub fn choose_color(&mut self, color: Color) -> bool {
        self.controller.choose_color(&mut self.table, color)
    }

    pub fn close_menu(&mut self) {
        self.controller.close_menu();
    }
}
