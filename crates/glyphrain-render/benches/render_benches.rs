use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyphrain_core::{AnimationConfig, Color, FrameBuffer, RainRng};
use glyphrain_render::{
    BitmapRasterizer, FadeOverlay, FrameCompositor, GlyphSource, RainLayer,
};

fn reference_compositor(rng: &mut RainRng) -> FrameCompositor {
    let config = AnimationConfig::reference(7);
    let source = GlyphSource::new(&config.glyphs()).expect("reference alphabet is non-empty");
    let layers = config
        .layers
        .iter()
        .map(|spec| {
            RainLayer::new(
                spec,
                config.width,
                config.height,
                &source,
                &BitmapRasterizer,
                rng,
            )
        })
        .collect();
    FrameCompositor::new(FadeOverlay::new(config.background, config.fade_alpha), layers)
}

fn bench_fade(c: &mut Criterion) {
    let fade = FadeOverlay::new(Color::BLACK, 30);
    let mut canvas = FrameBuffer::new(1200, 720, Color::BLACK);
    c.bench_function("fade_1200x720", |b| {
        b.iter(|| fade.apply(black_box(&mut canvas)))
    });
}

fn bench_composite_tick(c: &mut Criterion) {
    let mut rng = RainRng::new(7);
    let mut compositor = reference_compositor(&mut rng);
    let mut canvas = FrameBuffer::new(1200, 720, Color::BLACK);
    c.bench_function("composite_tick_reference", |b| {
        b.iter(|| {
            compositor.composite(black_box(&mut canvas), &mut rng);
        })
    });
}

fn bench_capture(c: &mut Criterion) {
    let canvas = FrameBuffer::new(1200, 720, Color::BLACK);
    c.bench_function("snapshot_clone_1200x720", |b| {
        b.iter(|| black_box(canvas.clone()))
    });
}

criterion_group!(benches, bench_fade, bench_composite_tick, bench_capture);
criterion_main!(benches);
