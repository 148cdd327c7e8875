//! Layout model for the HUD bar, the map view, and the event log.

use taffy::{Layout, TaffyResult, TaffyTree};
use taffy::prelude::*;

const PADDING: f32 = 12.0;
const GAP: f32 = 12.0;
const HUD_HEIGHT: f32 = 36.0;
const EVENT_LOG_WIDTH: f32 = 280.0;

pub struct LayoutNodes {
    root: NodeId,
    hud: NodeId,
    main_row: NodeId,
    map: NodeId,
    event_log: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub struct FrameLayout {
    pub hud: PanelRect,
    pub map: PanelRect,
    pub event_log: PanelRect,
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> TaffyResult<LayoutNodes> {
    let hud = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(HUD_HEIGHT) },
        flex_shrink: 0.0,
        ..Default::default()
    })?;
    let map = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let event_log = taffy.new_leaf(Style {
        size: Size { width: length(EVENT_LOG_WIDTH), height: auto() },
        flex_shrink: 0.0,
        ..Default::default()
    })?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            flex_grow: 1.0,
            gap: Size { width: length(GAP), height: zero() },
            ..Default::default()
        },
        &[map, event_log],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            gap: Size { width: zero(), height: length(GAP) },
            padding: taffy::Rect {
                left: length(PADDING),
                right: length(PADDING),
                top: length(PADDING),
                bottom: length(PADDING),
            },
            ..Default::default()
        },
        &[hud, main_row],
    )?;
    Ok(LayoutNodes { root, hud, main_row, map, event_log })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> TaffyResult<FrameLayout> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_main = taffy.layout(nodes.main_row)?;

    Ok(FrameLayout {
        hud: panel_rect(taffy.layout(nodes.hud)?, &[l_root]),
        map: panel_rect(taffy.layout(nodes.map)?, &[l_root, l_main]),
        event_log: panel_rect(taffy.layout(nodes.event_log)?, &[l_root, l_main]),
    })
}

fn panel_rect(layout: &Layout, parents: &[&Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_fills_space_left_of_the_event_log() {
        let mut taffy = TaffyTree::new();
        let nodes = setup_layout(&mut taffy).expect("layout tree");
        let layout = compute_frame_layout(&mut taffy, &nodes, 1024.0, 768.0).expect("layout");

        assert_eq!(layout.hud.height, HUD_HEIGHT);
        assert_eq!(layout.event_log.width, EVENT_LOG_WIDTH);
        assert_eq!(layout.map.x, PADDING);
        assert_eq!(layout.map.y, PADDING + HUD_HEIGHT + GAP);
        assert_eq!(layout.map.width, 1024.0 - 2.0 * PADDING - GAP - EVENT_LOG_WIDTH);
        assert_eq!(layout.map.height, 768.0 - 2.0 * PADDING - HUD_HEIGHT - GAP);
        assert_eq!(layout.event_log.x, layout.map.x + layout.map.width + GAP);
    }
}
