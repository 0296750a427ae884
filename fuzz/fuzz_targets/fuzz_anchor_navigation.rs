#![no_main]

use anchor_scroll_core::{
    AnchorSet, AnchorSetConfig, BulletSource, RegionMetrics, SelectionPolicy, StaticPage,
};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Scroll(i16),
    Resize(u16),
    MoveSection(u8, i16, i16),
    FindCurrent,
    Next,
    Prev,
    Activate(u8),
    CheckFit,
}

#[derive(Debug, Arbitrary)]
struct Input {
    edge_aware: bool,
    section_ids: Vec<Option<u8>>,
    bullet_ids: Vec<Option<u8>>,
    heights: Vec<i16>,
    viewport_height: u16,
    ops: Vec<Op>,
}

fn ids(raw: &[Option<u8>]) -> Vec<Option<String>> {
    raw.iter()
        .take(16)
        .map(|id| id.map(|id| id.to_string()))
        .collect()
}

fuzz_target!(|input: Input| {
    let count = input.section_ids.len().min(16);
    let mut offset = 0.0;
    let regions: Vec<RegionMetrics> = (0..count)
        .map(|index| {
            let height = f64::from(input.heights.get(index).copied().unwrap_or(400));
            let region = RegionMetrics::new(offset, height);
            offset += height.max(0.0);
            region
        })
        .collect();
    let page = StaticPage::new(f64::from(input.viewport_height), regions);

    let bullets = if input.bullet_ids.is_empty() {
        BulletSource::Synthesized
    } else {
        BulletSource::Elements(ids(&input.bullet_ids))
    };
    let config = AnchorSetConfig {
        sections: ids(&input.section_ids),
        bullets,
        scroll_next: true,
        policy: if input.edge_aware {
            SelectionPolicy::EdgeAware
        } else {
            SelectionPolicy::Nearest
        },
    };
    // Rejected configurations are fine; they must just not panic.
    let Ok(mut set) = AnchorSet::create(config, page) else {
        return;
    };

    for op in input.ops.into_iter().take(256) {
        set.host_mut().drain_effects();
        match op {
            Op::Scroll(delta) => set.host_mut().scroll_by(f64::from(delta)),
            Op::Resize(height) => {
                let mut viewport = set.host().viewport_metrics();
                viewport.viewport_height = f64::from(height);
                set.host_mut().set_viewport(viewport);
            }
            Op::MoveSection(index, offset, height) => set.host_mut().set_region(
                usize::from(index),
                RegionMetrics::new(f64::from(offset), f64::from(height)),
            ),
            Op::FindCurrent => set.find_current(),
            Op::Next => {
                set.scroll_to_next();
            }
            Op::Prev => {
                set.scroll_to_prev();
            }
            Op::Activate(bullet) => {
                set.activate_bullet(usize::from(bullet));
            }
            Op::CheckFit => set.check_all_on_screen(),
        }

        // Post-conditions that must always hold:
        let marked = set.bullets().iter().filter(|b| b.is_current()).count();
        assert!(marked <= 1, "more than one current bullet");
        assert_eq!(marked, usize::from(set.current_index().is_some()));
        let max = set.host().viewport_metrics().max_scroll();
        if let Some(top) = set.host().last_scroll_target() {
            assert!(top.is_finite());
            assert!((0.0..=max).contains(&top), "target {top} outside [0, {max}]");
        }
    }
});
