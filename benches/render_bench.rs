//! Render throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use render_loops::{render_for, render_if, Element, Frame, ForProps, IfProps, Mapper, Node, Value};

fn row(item: &Value, frame: &Frame) -> Element {
    Element::new("tr")
        .attr("data-index", frame.index.to_string())
        .child(Element::new("td").child(item.to_string()))
}

fn benchmark_for(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_for");

    for len in [10usize, 1_000, 10_000] {
        let list = Value::list((0..len).map(Value::from));
        group.bench_with_input(BenchmarkId::new("of", len), &list, |b, list| {
            b.iter(|| {
                let node = render_for(
                    ForProps::new()
                        .of(list.clone())
                        .as_(Mapper::with_frame(row)),
                )
                .expect("list renders");
                black_box(node);
            });
        });

        let object = Value::object((0..len).map(|i| (format!("k{}", i), Value::from(i))));
        group.bench_with_input(BenchmarkId::new("in", len), &object, |b, object| {
            b.iter(|| {
                let node = render_for(
                    ForProps::new()
                        .in_(object.clone())
                        .as_(Mapper::with_frame(row)),
                )
                .expect("object renders");
                black_box(node);
            });
        });

        let end = len as f64;
        group.bench_with_input(BenchmarkId::new("state_loop", len), &end, |b, &end| {
            b.iter(|| {
                let node = render_for(
                    ForProps::new()
                        .initial(0)
                        .condition(move |state: &Value| state.as_number().is_some_and(|n| n < end))
                        .step(|state: &Value| state.as_number().unwrap_or_default() + 1.0)
                        .as_(Mapper::with_frame(row)),
                )
                .expect("loop renders");
                black_box(node);
            });
        });
    }

    group.finish();
}

fn benchmark_if(c: &mut Criterion) {
    let chain: Vec<Node> = std::iter::once(Node::text("primary"))
        .chain((0..64).map(|i| Node::else_if(i == 63, vec![Node::text(format!("branch {}", i))])))
        .chain(std::iter::once(Node::else_marker(vec![Node::text("otherwise")])))
        .collect();

    c.bench_function("render_if_chain_64", |b| {
        b.iter(|| {
            let node = render_if(IfProps::new().test(false).children(chain.clone()))
                .expect("chain renders");
            black_box(node);
        });
    });
}

criterion_group!(benches, benchmark_for, benchmark_if);
criterion_main!(benches);
