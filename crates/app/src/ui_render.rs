//! Rendering for the map view, entities, HUD panels, and menu screens.

use delve_app::app_loop::{AppMode, AppState};
use delve_app::camera::Camera;
use delve_app::last_run_file::LastRunFile;
use delve_app::sprites::{PlayerSprite, Shape, Sprite};
use delve_app::ui_text::{event_line, hud_lines, screen_lines};
use delve_core::world::Rect;
use delve_core::{Pos, Run, Tile};
use macroquad::prelude::*;

use crate::game_layout::{FrameLayout, PanelRect};

const WALL_COLOR: Color = Color { r: 0.22, g: 0.2, b: 0.24, a: 1.0 };
const FLOOR_COLOR: Color = Color { r: 0.55, g: 0.5, b: 0.42, a: 1.0 };
const EXIT_COLOR: Color = Color { r: 0.2, g: 0.75, b: 0.9, a: 1.0 };
const PANEL_COLOR: Color = Color { r: 0.08, g: 0.08, b: 0.1, a: 1.0 };
const BORDER_COLOR: Color = Color { r: 0.3, g: 0.3, b: 0.3, a: 1.0 };
const OVERLAY_COLOR: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 };
const PANEL_PAD: f32 = 10.0;
const LINE_HEIGHT: f32 = 20.0;
const FONT_SIZE: f32 = 20.0;
const TITLE_FONT_SIZE: f32 = 48.0;

pub fn draw_frame(
    run: &Run,
    app_state: &AppState,
    run_seed: u64,
    last_run: Option<&LastRunFile>,
    layout: &FrameLayout,
) {
    clear_background(BLACK);
    draw_map(run, layout.map);
    draw_panel(layout.hud);
    draw_panel(layout.event_log);
    draw_rectangle_lines(
        layout.map.x,
        layout.map.y,
        layout.map.width,
        layout.map.height,
        1.0,
        BORDER_COLOR,
    );
    draw_hud(run, layout.hud);
    draw_event_log(app_state, layout.event_log);

    if app_state.mode != AppMode::Playing {
        draw_screen(&screen_lines(app_state.mode, run, run_seed, last_run));
    }
}

fn draw_map(run: &Run, panel: PanelRect) {
    let dungeon = run.dungeon();
    let grid = &dungeon.grid;
    let tile_size = dungeon.tile_size;
    let size = tile_size as f32;
    let camera = Camera::follow(
        run.player().center(),
        (panel.width, panel.height),
        grid.width() as f32 * size,
        grid.height() as f32 * size,
    );
    let to_panel = |rect: &Rect| {
        let (x, y) = camera.to_screen(rect.x, rect.y);
        Rect::new(panel.x + x, panel.y + y, rect.w, rect.h)
    };

    let (cols, rows) = camera.visible_tiles(tile_size, grid.width(), grid.height());
    for y in rows {
        for x in cols.clone() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let color = match grid.tile(pos) {
                Tile::Wall => WALL_COLOR,
                Tile::Floor => FLOOR_COLOR,
            };
            let cell = to_panel(&Rect::from_tile(pos, tile_size));
            draw_rectangle(cell.x, cell.y, cell.w, cell.h, color);
        }
    }

    let exit = to_panel(&run.exit_rect());
    draw_rectangle_lines(exit.x + 2.0, exit.y + 2.0, exit.w - 4.0, exit.h - 4.0, 3.0, EXIT_COLOR);

    for item in run.items() {
        draw_sprite(&item.kind, to_panel(&item.rect));
    }
    for enemy in run.enemies() {
        draw_sprite(&enemy.kind, to_panel(&enemy.rect));
    }

    let player = run.player();
    let body = to_panel(&player.rect);
    let blinking = player.is_invulnerable() && (get_time() * 10.0) as i64 % 2 == 0;
    if !blinking {
        draw_sprite(&PlayerSprite, body);
    }
    let (cx, cy) = body.center();
    let (ux, uy) = player.facing.unit();
    let reach = player.attack_range * 0.6;
    draw_line(cx, cy, cx + ux * reach, cy + uy * reach, 2.0, WHITE);
}

fn draw_sprite(sprite: &dyn Sprite, rect: Rect) {
    let (cx, cy) = rect.center();
    let half = rect.w.min(rect.h) * sprite.fill() / 2.0;
    let color = sprite.color();
    match sprite.shape() {
        Shape::Circle => draw_circle(cx, cy, half, color),
        Shape::Square => draw_rectangle(cx - half, cy - half, half * 2.0, half * 2.0, color),
        Shape::Diamond => draw_poly(cx, cy, 4, half, 0.0, color),
        Shape::Triangle => draw_triangle(
            vec2(cx, cy - half),
            vec2(cx - half, cy + half),
            vec2(cx + half, cy + half),
            color,
        ),
    }
}

fn draw_panel(panel: PanelRect) {
    draw_rectangle(panel.x, panel.y, panel.width, panel.height, PANEL_COLOR);
    draw_rectangle_lines(panel.x, panel.y, panel.width, panel.height, 1.0, BORDER_COLOR);
}

fn draw_hud(run: &Run, panel: PanelRect) {
    let text = hud_lines(run).join("    ");
    draw_text(&text, panel.x + PANEL_PAD, panel.y + panel.height * 0.65, FONT_SIZE, WHITE);
}

fn draw_event_log(app_state: &AppState, panel: PanelRect) {
    let x = panel.x + PANEL_PAD;
    let mut y = panel.y + PANEL_PAD + LINE_HEIGHT;
    draw_text("Events", x, y, FONT_SIZE + 4.0, YELLOW);
    for event in &app_state.recent_events {
        y += LINE_HEIGHT;
        draw_text(&event_line(event), x, y, FONT_SIZE - 2.0, LIGHTGRAY);
    }
}

fn draw_screen(lines: &[String]) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), OVERLAY_COLOR);
    let mut y = screen_height() * 0.35;
    for (index, line) in lines.iter().enumerate() {
        let font_size = if index == 0 { TITLE_FONT_SIZE } else { FONT_SIZE + 4.0 };
        let dimensions = measure_text(line, None, font_size as u16, 1.0);
        draw_text(line, (screen_width() - dimensions.width) / 2.0, y, font_size, WHITE);
        y += font_size * 1.4;
    }
}
