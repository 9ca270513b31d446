use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use edgekit_image::{Image, ImageSize};
use edgekit_imgproc::canny::{canny_edges, CannyParams};

fn synthetic_scene(size: ImageSize) -> Image<u8, 3> {
    let mut data = vec![0u8; size.width * size.height * 3];
    for y in 0..size.height {
        for x in 0..size.width {
            // a few nested rectangles give the detector real work
            let v = if x > size.width / 4
                && x < 3 * size.width / 4
                && y > size.height / 4
                && y < 3 * size.height / 4
            {
                255
            } else if x > size.width / 8 && y > size.height / 8 {
                96
            } else {
                0
            };
            let idx = (y * size.width + x) * 3;
            data[idx] = v;
            data[idx + 1] = v;
            data[idx + 2] = v;
        }
    }
    Image::new(size, data).unwrap()
}

fn bench_canny(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canny");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = ImageSize {
            width: *width,
            height: *height,
        };
        let image = synthetic_scene(image_size);
        let output = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("canny_edges", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(canny_edges(src, &mut dst, &CannyParams::default())))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_canny);
criterion_main!(benches);
