//! Allocator and resize benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;
use hearth_core::{Footprint, GridDensity, GridPosition, Widget, WidgetId, WidgetSize};
use hearth_grid::{allocate, MeasuredCells, OccupiedSet, ResizeHandle, ResizeMachine, ResizeStart};

fn mixed_widgets(count: usize) -> Vec<Widget> {
    (0..count)
        .map(|i| {
            let size = WidgetSize::ALL[i % WidgetSize::ALL.len()];
            let widget = Widget::new(format!("w{i}"), "light").with_size(size);
            if i % 3 == 0 {
                widget.with_position((i % 6) as u32, (i % 4) as u32)
            } else {
                widget
            }
        })
        .collect()
}

fn allocate_small(c: &mut Criterion) {
    let widgets = mixed_widgets(12);
    c.bench_function("allocate_12", |b| {
        b.iter(|| allocate(black_box(&widgets), GridDensity::STANDARD))
    });
}

fn allocate_large(c: &mut Criterion) {
    let widgets = mixed_widgets(200);
    c.bench_function("allocate_200", |b| {
        b.iter(|| allocate(black_box(&widgets), GridDensity::COMPACT))
    });
}

fn resize_samples(c: &mut Criterion) {
    let metrics = MeasuredCells::new(120.0, 120.0).with_gap(8.0);
    c.bench_function("resize_100_samples", |b| {
        b.iter(|| {
            let mut machine = ResizeMachine::new();
            machine.begin(ResizeStart {
                widget_id: WidgetId::from("w"),
                handle: ResizeHandle::BottomRight,
                pointer: DVec2::ZERO,
                position: GridPosition::ORIGIN,
                footprint: Footprint::UNIT,
                occupied: OccupiedSet::new(),
            });
            for step in 0..100 {
                let pointer = DVec2::splat(step as f64 * 4.0);
                machine.update(black_box(pointer), &metrics, GridDensity::COMPACT);
            }
            machine.finish()
        })
    });
}

criterion_group!(benches, allocate_small, allocate_large, resize_samples);
criterion_main!(benches);
