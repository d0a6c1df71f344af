use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treemap_renderer::config::LayoutConfig;
use treemap_renderer::hierarchy::Hierarchy;
use treemap_renderer::ir::RawNode;
use treemap_renderer::render::render_treemap_svg;
use treemap_renderer::theme::{ColorScale, Theme};

fn synthetic_dataset(groups: usize, leaves_per_group: usize) -> RawNode {
    let mut children = Vec::with_capacity(groups);
    for g in 0..groups {
        let mut leaves = Vec::with_capacity(leaves_per_group);
        for l in 0..leaves_per_group {
            leaves.push(RawNode::leaf(
                &format!("Item{}Of{}", l, g),
                &format!("Group {}", g),
                ((g * 31 + l * 7) % 97 + 1) as f64,
            ));
        }
        children.push(RawNode::branch(&format!("Group {}", g), leaves));
    }
    RawNode::branch("root", children)
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("treemap_pipeline");
    for (name, groups, leaves) in [("small", 5, 20), ("medium", 10, 100), ("large", 20, 500)] {
        let raw = synthetic_dataset(groups, leaves);
        let config = LayoutConfig::default();
        let theme = Theme::classic();
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, raw| {
            b.iter(|| {
                let mut hierarchy = Hierarchy::build(black_box(raw));
                treemap_renderer::layout::treemap(
                    &mut hierarchy,
                    config.inner_width(),
                    config.inner_height(),
                );
                let mut scale = ColorScale::from_theme(&theme, hierarchy.top_level_names());
                black_box(render_treemap_svg(&hierarchy, &mut scale, &theme, &config))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
