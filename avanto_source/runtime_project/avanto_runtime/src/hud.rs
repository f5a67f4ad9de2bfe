//! Per-player status strip and actor drawing helpers for stage render hooks.

use crate::Session;
use crate::roster::PLAYER_COLORS;
use avanto_nodes::Actor;
use avanto_render_bridge::{ActorDraw, OverlayCommand, OverlayText, RenderBridge, Rgba8, TextStyle};

pub const HUD_TOP: i32 = 26;
pub const HUD_LEFT: i32 = 26;
pub const HUD_SPACING: i32 = 67;
pub const BAR_MAX_WIDTH: i32 = 63;
pub const BAR_HEIGHT: i32 = 14;

const OUTLINE_COLOR: Rgba8 = [0x00, 0x00, 0x00, 0xff];
const BAR_BACK_COLOR: Rgba8 = [0x00, 0xc9, 0xff, 0xff];
const BAR_COLOR: Rgba8 = [0xff, 0x45, 0x00, 0xff];

/// Filled width for a status in 0..=1; out-of-range values clamp.
pub fn bar_fill_width(status: f32) -> i32 {
    let width = (BAR_MAX_WIDTH as f32 * status).round();
    if width.is_nan() {
        return 0;
    }
    (width as i32).clamp(0, BAR_MAX_WIDTH)
}

pub fn draw_hud(renderer: &mut dyn RenderBridge, actors: &[Actor]) {
    for (i, actor) in actors.iter().enumerate().take(PLAYER_COLORS.len()) {
        let x = HUD_LEFT + i as i32 * HUD_SPACING;
        let y = HUD_TOP;
        let mid_x = x + 33;

        renderer.overlay(OverlayCommand::Text(OverlayText::new(
            mid_x - 4,
            y,
            TextStyle::Player(i as u8),
            format!("P{}", i + 1),
        )));
        renderer.overlay(OverlayCommand::FillRect {
            x: x + 1,
            y: y + 4,
            w: BAR_MAX_WIDTH + 2,
            h: BAR_HEIGHT + 2,
            color: OUTLINE_COLOR,
        });
        renderer.overlay(OverlayCommand::FillRect {
            x: x + 2,
            y: y + 5,
            w: BAR_MAX_WIDTH,
            h: BAR_HEIGHT,
            color: BAR_BACK_COLOR,
        });

        let fill = bar_fill_width(actor.status);
        if fill > 0 {
            renderer.overlay(OverlayCommand::FillRect {
                x: x + 2,
                y: y + 5,
                w: fill,
                h: BAR_HEIGHT,
                color: BAR_COLOR,
            });
        }

        if actor.eliminated {
            renderer.overlay(OverlayCommand::Text(OverlayText::new(
                mid_x - 8,
                y + 5 + 10,
                TextStyle::Out,
                "OUT",
            )));
        }
    }
}

/// Binds and draws every visible actor, tinted with its player colour.
pub fn draw_actors(session: &Session, renderer: &mut dyn RenderBridge) {
    for actor in session.actors.iter().filter(|a| a.visible) {
        let tint = PLAYER_COLORS
            .get(actor.id.index())
            .copied()
            .unwrap_or([0xff; 4]);
        let drawable = renderer.bind(ActorDraw {
            actor: actor.id,
            model: actor.transform().to_mat4().to_cols_array_2d(),
            clip: actor.current_clip,
            tint,
        });
        renderer.draw(drawable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player_actors;
    use avanto_ids::ActorID;
    use avanto_project::GameConfig;
    use avanto_render_bridge::{NullGraphics, RenderCommand};

    fn rects(gfx: &NullGraphics) -> Vec<(i32, i32, i32, Rgba8)> {
        gfx.last_frame()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Overlay(OverlayCommand::FillRect { x, y, w, color, .. }) => {
                    Some((*x, *y, *w, *color))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fill_width_rounds_and_clamps() {
        assert_eq!(bar_fill_width(0.0), 0);
        assert_eq!(bar_fill_width(0.5), 32);
        assert_eq!(bar_fill_width(1.0), 63);
        assert_eq!(bar_fill_width(1.7), 63);
        assert_eq!(bar_fill_width(-0.2), 0);
        assert_eq!(bar_fill_width(f32::NAN), 0);
    }

    #[test]
    fn hud_lays_out_four_players() {
        let mut actors = player_actors();
        actors[1].status = 0.5;
        actors[3].status = 1.0;
        actors[3].eliminated = true;

        let mut gfx = NullGraphics::new();
        draw_hud(&mut gfx, &actors);
        gfx.present();

        assert_eq!(gfx.last_frame_text(), vec!["P1", "P2", "P3", "P4", "OUT"]);
        let bars: Vec<_> = rects(&gfx)
            .into_iter()
            .filter(|r| r.3 == BAR_COLOR)
            .collect();
        assert_eq!(bars, vec![(26 + 67 + 2, 31, 32, BAR_COLOR), (26 + 3 * 67 + 2, 31, 63, BAR_COLOR)]);

        let Some(RenderCommand::Overlay(OverlayCommand::Text(out))) = gfx.last_frame().last() else {
            panic!("expected OUT label last");
        };
        assert_eq!((out.x, out.y, out.style), (26 + 3 * 67 + 33 - 8, 41, TextStyle::Out));
    }

    #[test]
    fn only_visible_actors_are_drawn() {
        let mut session = Session::new(&GameConfig::default());
        session.actors[0].visible = true;
        session.actors[2].visible = true;

        let mut gfx = NullGraphics::new();
        draw_actors(&session, &mut gfx);
        gfx.present();

        let draws = gfx
            .last_frame()
            .iter()
            .filter(|c| matches!(c, RenderCommand::Draw { .. }))
            .count();
        assert_eq!(draws, 2);
        assert_eq!(gfx.bound(ActorID(2)).map(|d| d.tint), Some(PLAYER_COLORS[2]));
        assert!(gfx.bound(ActorID(1)).is_none());
    }
}
