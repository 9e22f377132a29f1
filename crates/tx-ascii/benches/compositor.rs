use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tx_ascii::compositor::Compositor;
use tx_core::frame::LumaBuffer;
use tx_core::palette::GlyphPalette;

fn bench_compose(c: &mut Criterion) {
    let compositor = Compositor::new(GlyphPalette::uniform());
    let mut luma = LumaBuffer::new(200, 100);
    for (i, v) in luma.data.iter_mut().enumerate() {
        *v = (i % 256) as u8;
    }

    c.bench_function("compose_200x100", |b| {
        b.iter(|| compositor.compose(black_box(&luma)));
    });
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
