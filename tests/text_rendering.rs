//! Labels drawn with a real TrueType font.

use admin_charts::dashboard::{Dashboard, DashboardExporter};
use admin_charts::{CategoryDataset, ChartConfig, ChartRenderer, RasterSurface, SurfaceSize};
use std::path::PathBuf;

fn font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf")
}

fn sales() -> CategoryDataset {
    CategoryDataset::from_pairs([
        ("Product A", 300.0),
        ("Product B", 200.0),
        ("Product C", 150.0),
        ("Product D", 100.0),
        ("Product E", 50.0),
    ])
    .unwrap()
}

#[test]
fn pie_label_is_painted_inside_its_slice() {
    let renderer = ChartRenderer::default();
    let slice = renderer.palette().color(0);
    let wedges = renderer.pie_wedges(SurfaceSize::new(300, 300), &sales()).unwrap();
    let anchor = wedges[0].label_position;

    let mut plain = RasterSurface::new(300, 300);
    renderer.render_pie(&mut plain, &sales()).unwrap();
    let mut labelled = RasterSurface::new(300, 300)
        .with_font_bytes(std::fs::read(font_path()).unwrap())
        .unwrap();
    renderer.render_pie(&mut labelled, &sales()).unwrap();

    // Only look around the first label; the other slices carry their own
    let near = |x: u32, y: u32| {
        (x as f64 - anchor.x).abs() < 40.0 && (y as f64 - anchor.y).abs() < 12.0
    };
    let changed: Vec<_> = labelled
        .image()
        .enumerate_pixels()
        .filter(|(x, y, p)| near(*x, *y) && *p != plain.image().get_pixel(*x, *y))
        .map(|(_, _, p)| *p)
        .collect();

    assert!(changed.len() > 20, "only {} label pixels", changed.len());
    // White text blended over the slice color only ever lightens it
    assert!(changed.iter().all(|p| p[0] > slice.r && p[3] == 255));
    assert!(changed.iter().any(|p| p[0] > 120));
}

#[test]
fn exported_charts_carry_labels_with_a_configured_font() {
    let dir = tempfile::tempdir().unwrap();
    let config = ChartConfig {
        font_path: Some(font_path()),
        ..Default::default()
    };
    let exporter = DashboardExporter::new(&config).unwrap();
    let paths = exporter
        .export(&Dashboard::sample().unwrap(), dir.path())
        .unwrap();

    let dark_in = |path: &PathBuf, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>| {
        let image = image::open(path).unwrap().to_rgba8();
        xs.flat_map(|x| ys.clone().map(move |y| (x, y)))
            .any(|(x, y)| image.get_pixel(x, y)[0] < 128)
    };

    // "Mon" sits on the baseline 20 px below the plot, centered on x = 40
    assert!(dark_in(&paths[0], 25..55, 165..182));
    // "8000" sits 10 px above the Jun bar, centered on x = 695
    assert!(dark_in(&paths[2], 675..715, 15..31));
    // Nothing is drawn above the label row
    assert!(!dark_in(&paths[2], 675..715, 0..12));
}
