//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::board::{Pos, Stone};
use crate::session::GameStatus;

use super::board_view::BoardView;
use super::game_state::GameState;
use super::theme::*;

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, state: GameState) -> Self {
        Self {
            state,
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.state.new_game(false);
                        ui.close_menu();
                    }
                    if ui.button("New Game, AI first (A)").clicked() {
                        self.state.new_game(true);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Take back (U)").clicked() {
                        self.state.take_back();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let config = self.state.config();
                    ui.label(format!(
                        "{0}x{0}, {1} in a row",
                        config.board_size, config.win_length
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                let status = self.state.status();
                if status.is_over() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, status);
                }

                if let Some(msg) = self.state.message.clone() {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, &msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("You play black").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let ai_turn = self.state.is_ai_thinking();
            let (stone_char, label, accent, stone_color) = if ai_turn {
                ("○", "AI", egui::Color32::from_rgb(220, 220, 225), egui::Color32::from_rgb(30, 30, 35))
            } else {
                ("●", "YOU", egui::Color32::from_rgb(70, 70, 75), TEXT_PRIMARY)
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(label).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if ai_turn {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.status().is_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let budget = self.state.config().think_time_secs as f32;
                let secs = elapsed.as_secs_f32();
                let color = if secs < budget * 0.5 {
                    TIMER_NORMAL
                } else if secs < budget {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::action_button(ui, "↩ Take back") {
                    self.state.take_back();
                }
                ui.add_space(4.0);
                if Self::action_button(ui, "New") {
                    self.state.new_game(false);
                }
                ui.add_space(4.0);
                if Self::action_button(ui, "AI first") {
                    self.state.new_game(true);
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.board().stone_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn action_button(ui: &mut egui::Ui, text: &str) -> bool {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click()))
                    .clicked()
            })
            .inner
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(DEBUG_CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(report) = self.state.last_report() else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("Depth {}", report.depth))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(RichText::new(format!("Score: {}", report.score)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(format!("{}ms", report.elapsed.as_millis()))
                                    .size(10.0)
                                    .color(TEXT_SECONDARY),
                            );
                            ui.label(RichText::new(format!("{} nodes", report.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "Cache: eval {:.0}% of {}, interior {:.0}% of {}",
                        report.cache.eval_hit_rate(),
                        report.cache.eval_entries,
                        report.cache.interior_hit_rate(),
                        report.cache.interior_entries
                    ))
                    .size(10.0)
                    .color(TEXT_MUTED),
                );

                if let Some(pos) = report.best_move {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("→ {}", self.cell_name(pos)))
                            .size(12.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                }
            });
    }

    /// Board coordinate as drawn on the edges, e.g. `H8`
    fn cell_name(&self, pos: Pos) -> String {
        let col = char::from(b'A' + pos.col);
        let row = self.state.board().size() - usize::from(pos.row);
        format!("{col}{row}")
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, status: GameStatus) {
        let (headline, symbol) = match status {
            GameStatus::Won(Stone::Human) => ("YOU WIN!", "●"),
            GameStatus::Won(_) => ("AI WINS", "○"),
            _ => ("DRAW", "●○"),
        };

        Frame::new()
            .fill(GAME_OVER_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(symbol).size(32.0).color(TEXT_PRIMARY));
                    ui.label(RichText::new(headline).size(18.0).strong().color(WIN_HIGHLIGHT));
                    ui.add_space(12.0);

                    if Self::action_button(ui, "New Game") {
                        self.state.new_game(false);
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(MESSAGE_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(Frame::new().fill(BOARD_AREA_BG))
            .show(ctx, |ui| {
                let winning_line = self.state.winning_line();
                let accepting_input = !self.state.is_ai_thinking() && !self.state.status().is_over();

                let clicked = self.board_view.show(
                    ui,
                    self.state.board(),
                    self.state.board().last_move(),
                    winning_line.as_deref(),
                    accepting_input,
                );

                if let Some(pos) = clicked {
                    if let Err(msg) = self.state.try_place_stone(pos) {
                        self.state.message = Some(msg);
                    }
                }
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, take_back, new_game, ai_first) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::A),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if take_back {
            self.state.take_back();
        }
        if new_game {
            self.state.new_game(false);
        }
        if ai_first {
            self.state.new_game(true);
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
