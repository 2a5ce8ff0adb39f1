use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pcbforge::gerber::{stackup, LayerEncoder};
use pcbforge::prelude::*;
use pcbforge::{netlist, placement, DEFAULT_RULES};

fn test_components(count: usize) -> Vec<Component> {
    let kinds = ["capacitor", "resistor", "microcontroller", "connector"];
    (0..count)
        .map(|i| Component::new(kinds[i % kinds.len()], &format!("X{i}")))
        .collect()
}

fn bench_encode_layers(c: &mut Criterion) {
    let board = BoardParameters {
        width: 100.0,
        height: 80.0,
        layers: 2,
    };
    let components = test_components(16);
    let positions = placement::place_all(components.len(), board.width, board.height);
    let nets = netlist::synthesize(&components);
    let encoder = LayerEncoder {
        board: &board,
        components: &components,
        positions: &positions,
        nets: &nets,
        rules: &DEFAULT_RULES,
    };
    let layers = stackup(board.layers);

    c.bench_function("encode_stackup_16_components", |b| {
        b.iter(|| {
            for desc in &layers {
                black_box(encoder.encode(desc));
            }
        });
    });
}

fn bench_full_generation(c: &mut Criterion) {
    let request = GenerateDesignRequest {
        project_name: "bench".to_string(),
        requirements: "battery powered temperature sensor with usb interface".to_string(),
        board_params: BoardParameters {
            width: 100.0,
            height: 80.0,
            layers: 4,
        },
        components: test_components(16),
    };
    let designer = PcbDesigner::new();

    c.bench_function("generate_design_16_components", |b| {
        b.iter(|| {
            let dir = tempfile::tempdir().unwrap();
            black_box(designer.generate_design(black_box(&request), dir.path())).unwrap()
        });
    });
}

criterion_group!(benches, bench_encode_layers, bench_full_generation);
criterion_main!(benches);
