//! Integration tests for next/prev navigation and page-edge behavior.

use anchor_scroll_core::{
    AnchorScrollContext, AnchorSetConfig, BulletSource, HostEffect, RegionMetrics,
    SelectionPolicy, StaticPage,
};
use pretty_assertions::assert_eq;

const H: f64 = 800.0;

fn four_sections() -> (AnchorScrollContext<StaticPage>, anchor_scroll_core::AnchorSetId) {
    let mut ctx = AnchorScrollContext::new();
    let config = AnchorSetConfig::positional(4).with_scroll_next(true);
    let id = ctx
        .create(config, StaticPage::uniform(H, 800.0, 4))
        .expect("valid config");
    (ctx, id)
}

/// Follow `scroll_to_next` like a user holding the scroll-next control, letting
/// each animation finish before re-evaluating.
#[test]
fn next_walks_forward_and_stops_at_last() {
    let (mut ctx, id) = four_sections();
    ctx.on_load();

    let mut visited = vec![ctx.get(id).unwrap().current_index()];
    for _ in 0..6 {
        let set = ctx.get_mut(id).unwrap();
        let Some(top) = set.scroll_to_next() else {
            break;
        };
        set.host_mut().set_scroll_offset(top);
        ctx.on_scroll();
        visited.push(ctx.get(id).unwrap().current_index());
    }
    assert_eq!(visited, vec![Some(0), Some(1), Some(2), Some(3)]);

    // At the last section: no wraparound.
    let set = ctx.get_mut(id).unwrap();
    set.host_mut().drain_effects();
    assert_eq!(set.scroll_to_next(), None);
    assert!(set.host().effects().is_empty());
}

#[test]
fn prev_walks_back_and_stops_at_first() {
    let (mut ctx, id) = four_sections();
    ctx.get_mut(id).unwrap().host_mut().set_scroll_offset(2400.0);
    ctx.on_load();
    assert_eq!(ctx.get(id).unwrap().current_index(), Some(3));

    let mut targets = Vec::new();
    while let Some(top) = ctx.get_mut(id).unwrap().scroll_to_prev() {
        targets.push(top);
        ctx.get_mut(id).unwrap().host_mut().set_scroll_offset(top);
        ctx.on_scroll();
    }
    assert_eq!(targets, vec![1600.0, 800.0, 0.0]);
    assert_eq!(ctx.get(id).unwrap().current_index(), Some(0));
}

#[test]
fn scroll_next_visibility_follows_position() {
    let (mut ctx, id) = four_sections();
    ctx.on_load();
    assert!(ctx.get(id).unwrap().is_scroll_next_visible());

    ctx.get_mut(id).unwrap().host_mut().set_scroll_offset(1600.0);
    ctx.on_scroll();
    assert!(!ctx.get(id).unwrap().is_scroll_next_visible());

    ctx.get_mut(id).unwrap().host_mut().set_scroll_offset(0.0);
    ctx.on_scroll();
    let set = ctx.get(id).unwrap();
    assert!(set.is_scroll_next_visible());
    let toggles: Vec<&HostEffect> = set
        .host()
        .effects()
        .iter()
        .filter(|e| matches!(e, HostEffect::ScrollNextVisible(_)))
        .collect();
    assert_eq!(
        toggles,
        vec![
            &HostEffect::ScrollNextVisible(false),
            &HostEffect::ScrollNextVisible(true)
        ]
    );
}

#[test]
fn layout_change_picks_up_moved_sections() {
    let mut ctx = AnchorScrollContext::new();
    let config = AnchorSetConfig {
        sections: vec![Some("hero".into()), Some("pricing".into()), Some("faq".into())],
        bullets: BulletSource::Synthesized,
        scroll_next: false,
        policy: SelectionPolicy::Nearest,
    };
    let id = ctx
        .create(config, StaticPage::uniform(H, 1000.0, 3))
        .unwrap();
    ctx.on_load();
    assert_eq!(
        ctx.get(id).unwrap().current_id().map(|id| id.as_str()),
        Some("hero")
    );

    // Content above grows: "pricing" now covers the viewport center.
    let set = ctx.get_mut(id).unwrap();
    set.host_mut().set_region(0, RegionMetrics::new(-1000.0, 1000.0));
    set.host_mut().set_region(1, RegionMetrics::new(0.0, 1000.0));
    set.host_mut().set_region(2, RegionMetrics::new(1000.0, 1000.0));
    ctx.on_layout_change();
    assert_eq!(
        ctx.get(id).unwrap().current_id().map(|id| id.as_str()),
        Some("pricing")
    );
}

#[test]
fn go_to_clamps_section_past_document_end() {
    let mut ctx = AnchorScrollContext::new();
    let page = StaticPage::new(
        H,
        vec![RegionMetrics::new(0.0, 800.0), RegionMetrics::new(800.0, 300.0)],
    );
    let id = ctx.create(AnchorSetConfig::positional(2), page).unwrap();
    let set = ctx.get_mut(id).unwrap();
    // Naive centered target 800 - 250 = 550 exceeds max scroll 300.
    assert_eq!(set.go_to(1), Some(300.0));
    assert_eq!(set.host().last_scroll_target(), Some(300.0));
}
