use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Luma};

use unfig::{DetectorConfig, PctBox, VarianceDetector};

fn synthetic_page(w: u32, h: u32) -> unfig::PageRaster {
    let mut img = image::GrayImage::from_pixel(w, h, Luma([255]));
    // A few high-contrast patches so the scan does real work.
    for (px, py) in [(150u32, 200u32), (400, 700), (600, 1100)] {
        for y in 0..250 {
            for x in 0..250 {
                let value = if (x / 4 + y / 4) % 2 == 0 { 0 } else { 255 };
                img.put_pixel(px + x, py + y, Luma([value]));
            }
        }
    }
    unfig::PageRaster::new(
        0,
        DynamicImage::ImageLuma8(img),
        std::path::PathBuf::from("bench_page.png"),
    )
}

fn bench_variance_scan(c: &mut Criterion) {
    let page = synthetic_page(1000, 1400);
    let detector = VarianceDetector::new(DetectorConfig::default());

    c.bench_function("variance_scan_1000x1400", |b| {
        b.iter(|| detector.scan(black_box(&page)))
    });
}

fn bench_box_normalization(c: &mut Criterion) {
    let boxes: Vec<PctBox> = (0..1000)
        .map(|i| {
            let offset = f64::from(i % 40);
            PctBox::new(5.0 + offset, 5.0 + offset, 55.0 + offset, 55.0 + offset)
        })
        .collect();

    c.bench_function("normalize_1000_boxes", |b| {
        b.iter(|| {
            for pct in &boxes {
                black_box(pct.to_pixels(1000, 1400));
            }
        })
    });
}

criterion_group!(benches, bench_variance_scan, bench_box_normalization);
criterion_main!(benches);
