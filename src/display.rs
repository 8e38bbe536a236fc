use core::fmt::Write;

use heapless::String;

use crate::clock::{ClockState, Player};

/// Vertical offsets of the two timer lines, matching the 128x64 panel.
pub const WHITE_LINE_Y: i32 = 10;
pub const BLACK_LINE_Y: i32 = 30;
pub const FINAL_LINE_Y: i32 = 20;

/// Opaque display sink. The firmware backs it with the buffered
/// SSD1306 driver; tests back it with a recording mock.
pub trait RenderSurface {
    fn clear(&mut self);
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    fn commit(&mut self);
}

/// Formats a remaining duration as zero-padded `MM:SS`, flooring
/// partial seconds.
pub fn format_mm_ss(ms: u32) -> String<8> {
    let mut out = String::new();
    write!(out, "{:02}:{:02}", ms / 60_000, (ms / 1_000) % 60).ok();
    out
}

/// Full-frame redraw of both timers.
pub fn render<S: RenderSurface>(surface: &mut S, state: &ClockState) {
    let mut line: String<24> = String::new();

    surface.clear();

    write!(
        line,
        "Brancas: {}",
        format_mm_ss(state.remaining_ms(Player::White))
    )
    .ok();
    surface.draw_text(0, WHITE_LINE_Y, &line);

    line.clear();
    write!(
        line,
        "Pretas:  {}",
        format_mm_ss(state.remaining_ms(Player::Black))
    )
    .ok();
    surface.draw_text(0, BLACK_LINE_Y, &line);

    surface.commit();
}

/// Final screen: the surviving side and the time it had left.
pub fn render_final<S: RenderSurface>(surface: &mut S, winner: Player, winner_remaining_ms: u32) {
    let mut line: String<24> = String::new();
    write!(
        line,
        "{} vencem! {}",
        winner.label(),
        format_mm_ss(winner_remaining_ms)
    )
    .ok();

    surface.clear();
    surface.draw_text(0, FINAL_LINE_Y, &line);
    surface.commit();
}
