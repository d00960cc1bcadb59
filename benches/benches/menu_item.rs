// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::cell::Cell;
use std::rc::Rc;
use understory_menu_item::MenuItem;
use understory_menu_item::headless::HeadlessElement;
use understory_menu_item::stream::EventStream;

fn bench_stream_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream/emit");

    // Two observers stay inline; larger counts spill to the heap.
    for observers in [1usize, 2, 8, 64] {
        let stream = EventStream::<u32>::new();
        let hits = Rc::new(Cell::new(0_u64));
        for _ in 0..observers {
            let hits = Rc::clone(&hits);
            stream.subscribe(move |v: &u32| hits.set(hits.get() + u64::from(*v)));
        }
        group.throughput(Throughput::Elements(observers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(observers), &stream, |b, s| {
            b.iter(|| black_box(s.emit(black_box(&1))));
        });
    }

    group.finish();
}

fn bench_label(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_item/label");

    // Alternating text and icon children, as in items with inline glyphs.
    for children in [2usize, 16, 128] {
        let mut element = HeadlessElement::new();
        for i in 0..children {
            element = if i % 2 == 0 {
                element.with_text(" Item ")
            } else {
                element.with_element(HeadlessElement::new().with_text("icon"))
            };
        }
        let item = MenuItem::new(element);
        group.throughput(Throughput::Elements(children as u64));
        group.bench_with_input(BenchmarkId::from_parameter(children), &item, |b, item| {
            b.iter(|| black_box(item.label()));
        });
    }

    group.finish();
}

fn bench_pointer_enter(c: &mut Criterion) {
    let item = MenuItem::new(HeadlessElement::new().with_text("Open"));
    let hits = Rc::new(Cell::new(0_u32));
    let sink = Rc::clone(&hits);
    item.hovered().subscribe(move |_: &MenuItem<HeadlessElement>| {
        sink.set(sink.get().wrapping_add(1));
    });

    c.bench_function("menu_item/pointer_enter", |b| {
        b.iter(|| black_box(item.handle_pointer_enter()));
    });
}

criterion_group!(
    benches,
    bench_stream_fan_out,
    bench_label,
    bench_pointer_enter
);
criterion_main!(benches);
