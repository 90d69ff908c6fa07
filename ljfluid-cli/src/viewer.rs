//! Interactive viewer for a running simulation
//!
//! Draws the periodic box and its particles each frame and reloads the
//! config file whenever it changes on disk.

use eframe::egui;
use ljfluid_core::{SimConfig, Simulation};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;

pub struct ViewerApp {
    config_path: Option<PathBuf>,
    seed_override: Option<u64>,
    sim_opt: Option<Simulation>,
    last_error: Option<String>,
    playing: bool,
    steps_per_frame: usize,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(
        config_path: Option<PathBuf>,
        seed_override: Option<u64>,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = config_path.as_ref().and_then(|_| {
            notify::recommended_watcher(move |res: notify::Result<Event>| {
                // The receiver is gone during shutdown
                let _ = tx.send(res);
            })
            .ok()
        });

        if let (Some(w), Some(path)) = (watcher.as_mut(), config_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            config_path,
            seed_override,
            sim_opt: None,
            last_error: None,
            playing: false,
            steps_per_frame: 1,
            file_watcher: watcher,
            file_receiver: rx,
        };

        app.reload();

        app
    }

    fn load_config(&self) -> Result<SimConfig, String> {
        let mut config = match &self.config_path {
            Some(path) => SimConfig::from_file(path).map_err(|e| e.to_string())?,
            None => SimConfig::default(),
        };
        if self.seed_override.is_some() {
            config.seed = self.seed_override;
        }
        // The window decides when to stop
        config.steps = None;
        Ok(config)
    }

    fn reload(&mut self) {
        let result = self
            .load_config()
            .and_then(|config| Simulation::new(config).map_err(|e| e.to_string()));

        match result {
            Ok(sim) => {
                self.sim_opt = Some(sim);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("{}", e);
                self.last_error = Some(e);
                self.sim_opt = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;

        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.config_path {
                        if paths.iter().any(|p| p.ends_with(path) || path.ends_with(p)) {
                            needs_reload = true;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("file watcher error: {}", e);
                }
            }
        }

        if needs_reload {
            log::info!("config changed, restarting simulation");
            self.reload();
        }
    }

    fn advance(&mut self) {
        let Some(sim) = self.sim_opt.as_mut() else {
            return;
        };
        for _ in 0..self.steps_per_frame {
            if let Err(e) = sim.step() {
                log::error!("{}", e);
                self.last_error = Some(e.to_string());
                self.playing = false;
                break;
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏮ Reset").clicked() {
                    self.reload();
                    self.playing = false;
                }

                if ui.button("⏭ Step").clicked() {
                    self.advance();
                }

                ui.separator();

                ui.label("Steps/frame:");
                ui.add(egui::Slider::new(&mut self.steps_per_frame, 1..=50));

                ui.separator();

                if let Some(ref sim) = self.sim_opt {
                    ui.label(format!(
                        "Step: {}  t = {:.2}  E = {:.4}",
                        sim.current_step(),
                        sim.frame().time,
                        sim.total_energy()
                    ));
                }
            });
        });

        if let Some(ref error) = self.last_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter();

            let Some(ref sim) = self.sim_opt else {
                return;
            };
            let frame = sim.frame();

            // Fit the box into the panel, y pointing up
            let side = rect.width().min(rect.height()) * 0.95;
            let scale = side / frame.box_length as f32;
            let box_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(side, side));
            painter.rect_filled(box_rect, 0.0, egui::Color32::BLACK);
            painter.rect_stroke(box_rect, 0.0, egui::Stroke::new(1.0, egui::Color32::GRAY));

            let radius = (frame.radius as f32 * scale).max(2.0);
            for p in frame.positions {
                let screen = egui::pos2(
                    box_rect.left() + p.x as f32 * scale,
                    box_rect.bottom() - p.y as f32 * scale,
                );
                painter.circle_filled(screen, radius, egui::Color32::WHITE);
            }
        });

        if self.playing {
            self.advance();
            ctx.request_repaint();
        }
    }
}
