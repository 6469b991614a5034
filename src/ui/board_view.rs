//! Board rendering for the Gomoku GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Pos, Stone};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cells per side of the board last drawn
    size: usize,
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            size: crate::board::DEFAULT_BOARD_SIZE,
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked empty cell, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        last_move: Option<Pos>,
        winning_line: Option<&[Pos]>,
        accepting_input: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_px = available_size.x.min(available_size.y) - 20.0;
        self.size = board.size();
        self.cell_size = (board_px - 2.0 * BOARD_MARGIN) / (self.size as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(board_px, board_px), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, board);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, line);
        }

        if !accepting_input {
            return None;
        }

        let board_pos = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        let is_valid = board.is_empty(board_pos);
        self.draw_hover_preview(&painter, board_pos, is_valid);

        (response.clicked() && is_valid).then_some(board_pos)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (self.size as f32 - 1.0) * self.cell_size;

        for i in 0..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Draw star points (hoshi)
    fn draw_star_points(&self, painter: &Painter) {
        for pos in star_points(self.size) {
            painter.circle_filled(self.board_to_screen(pos), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Column letters along the top and bottom, row numbers down the sides
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..self.size {
            let letter = char::from(b'A' + col as u8);
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;

            let top = Pos2::new(x, self.board_rect.min.y + 12.0);
            painter.text(top, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
            let bottom = Pos2::new(x, self.board_rect.max.y - 12.0);
            painter.text(bottom, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        for row in 0..self.size {
            let label = (self.size - row).to_string();
            let y = self.board_rect.min.y + BOARD_MARGIN + row as f32 * self.cell_size;

            let left = Pos2::new(self.board_rect.min.x + 12.0, y);
            painter.text(left, egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
            let right = Pos2::new(self.board_rect.max.x - 12.0, y);
            painter.text(right, egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for pos in board.positions() {
            let stone = board.get(pos);
            if stone != Stone::Empty {
                self.draw_stone(painter, pos, stone);
            }
        }
    }

    /// Human stones are black, AI stones white
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Human => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
                painter.circle_filled(center, radius, BLACK_STONE);

                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::Ai => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 40));
                painter.circle_filled(center, radius, WHITE_STONE);

                // Inner shadow for depth
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
            Stone::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }

        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &pos in line {
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, is_valid: bool) {
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let color = if is_valid { hover_valid() } else { hover_invalid() };
        painter.circle_filled(self.board_to_screen(pos), radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        let col = x.floor() as i32;
        let row = y.floor() as i32;
        let size = self.size as i32;

        if (0..size).contains(&col) && (0..size).contains(&row) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + f32::from(pos.col) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + f32::from(pos.row) * self.cell_size;
        Pos2::new(x, y)
    }
}

/// Star points for a board of `size`: corners and center on larger boards,
/// the center alone on small odd ones.
pub fn star_points(size: usize) -> Vec<Pos> {
    let center = (size / 2) as u8;
    if size < 9 {
        return if size % 2 == 1 { vec![Pos::new(center, center)] } else { Vec::new() };
    }

    let edge: u8 = if size >= 13 { 3 } else { 2 };
    let far = size as u8 - 1 - edge;
    let mut points = vec![
        Pos::new(edge, edge),
        Pos::new(edge, far),
        Pos::new(far, edge),
        Pos::new(far, far),
    ];
    if size % 2 == 1 {
        points.push(Pos::new(center, center));
    }
    points
}
