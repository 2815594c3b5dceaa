//! Geometry properties of the line, pie and bar renderers.

use admin_charts::charts::DrawCommand;
use admin_charts::{
    CategoryDataset, ChartRenderer, Dataset, RasterSurface, RecordingSurface, Surface, SurfaceSize,
};
use proptest::prelude::*;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

const PADDING: f64 = 40.0;

fn revenue() -> Dataset {
    Dataset::with_labels(
        vec![5000.0, 6000.0, 4500.0, 7000.0, 6500.0, 8000.0],
        vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    )
    .unwrap()
}

proptest! {
    #[test]
    fn line_points_are_evenly_spaced(
        width in 100u32..2000,
        height in 100u32..1000,
        values in prop::collection::vec(1.0f64..1e6, 2..50),
    ) {
        let renderer = ChartRenderer::default();
        let size = SurfaceSize::new(width, height);
        let dataset = Dataset::new(values.clone()).unwrap();
        let points = renderer.line_points(size, &dataset).unwrap();

        let plot_w = width as f64 - 2.0 * PADDING;
        let n = values.len();
        for (i, p) in points.iter().enumerate() {
            prop_assert_eq!(p.x, PADDING + (i as f64 * plot_w) / (n - 1) as f64);
        }
        prop_assert!((points[0].x - PADDING).abs() < 1e-9);
        prop_assert!((points[n - 1].x - (width as f64 - PADDING)).abs() < 1e-9);
    }

    #[test]
    fn pie_sweeps_cover_full_circle(
        side in 100u32..800,
        values in prop::collection::vec(0.0f64..1e4, 1..20),
    ) {
        prop_assume!(values.iter().sum::<f64>() > 0.0);
        let renderer = ChartRenderer::default();
        let dataset = CategoryDataset::from_pairs(
            values.iter().enumerate().map(|(i, &v)| (format!("C{}", i), v)),
        )
        .unwrap();

        let wedges = renderer.pie_wedges(SurfaceSize::new(side, side), &dataset).unwrap();
        let total: f64 = wedges.iter().map(|w| w.sweep).sum();
        prop_assert!((total - TAU).abs() < 1e-9);
        for pair in wedges.windows(2) {
            prop_assert!((pair[0].start_angle + pair[0].sweep - pair[1].start_angle).abs() < 1e-9);
        }
    }

    #[test]
    fn bar_heights_follow_values(
        width in 400u32..2000,
        height in 100u32..1000,
        values in prop::collection::vec(1.0f64..1e6, 2..20),
    ) {
        let renderer = ChartRenderer::default();
        let dataset = Dataset::new(values.clone()).unwrap();
        let bars = renderer.bar_layout(SurfaceSize::new(width, height), &dataset).unwrap();

        for (a, bar_a) in values.iter().zip(&bars) {
            for (b, bar_b) in values.iter().zip(&bars) {
                if a > b {
                    prop_assert!(bar_a.rect.height >= bar_b.rect.height);
                }
            }
        }
    }
}

#[test]
fn monthly_revenue_bar_heights() {
    let renderer = ChartRenderer::default();
    let bars = renderer
        .bar_layout(SurfaceSize::new(800, 300), &revenue())
        .unwrap();
    let full = 300.0 - 2.0 * PADDING;

    // The tallest month reaches the top of the plot area
    assert!((bars[5].rect.height - full).abs() < 1e-9);
    assert!((bars[3].rect.height - 7000.0 / 8000.0 * full).abs() < 1e-9);

    // Mar is 4500/7000 of Apr regardless of the scale
    let ratio = bars[2].rect.height / bars[3].rect.height;
    assert!((ratio - 4500.0 / 7000.0).abs() < 1e-9);

    // (800 - 80) / 6 - 10
    assert!((bars[0].rect.width - 110.0).abs() < 1e-9);
    assert!((bars[5].rect.x - 640.0).abs() < 1e-9);
}

#[test]
fn apr_fills_plot_when_it_is_the_max() {
    let renderer = ChartRenderer::default();
    let dataset = Dataset::new(vec![5000.0, 6000.0, 4500.0, 7000.0, 6500.0]).unwrap();
    let bars = renderer
        .bar_layout(SurfaceSize::new(800, 300), &dataset)
        .unwrap();

    assert!((bars[3].rect.height - 220.0).abs() < 1e-9);
    assert!((bars[2].rect.height - 4500.0 / 7000.0 * 220.0).abs() < 1e-9);
}

#[test]
fn single_point_is_rejected_before_drawing() {
    let renderer = ChartRenderer::default();
    let dataset = Dataset::new(vec![5.0]).unwrap();
    let mut surface = RasterSurface::new(400, 200);

    assert!(renderer.render_line(&mut surface, &dataset).unwrap_err().is_validation());
    assert!(renderer.render_bar(&mut surface, &dataset).unwrap_err().is_validation());
    assert!(surface.image().pixels().all(|p| p[3] == 0));
}

#[test]
fn all_zero_categories_are_rejected() {
    let err = CategoryDataset::from_pairs([("A", 0.0), ("B", 0.0), ("C", 0.0)]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn huge_slices_are_painted() {
    let renderer = ChartRenderer::default();
    let palette = renderer.palette().clone();
    let dataset = CategoryDataset::from_pairs([("A", 1e308), ("B", 1e308)]).unwrap();
    let mut surface = RasterSurface::new(300, 300);
    renderer.render_pie(&mut surface, &dataset).unwrap();

    // A sweeps 0..pi (lower half), B pi..2pi (upper half)
    let a = palette.color(0);
    let b = palette.color(1);
    assert_eq!(surface.image().get_pixel(150, 220).0, [a.r, a.g, a.b, a.a]);
    assert_eq!(surface.image().get_pixel(150, 80).0, [b.r, b.g, b.b, b.a]);
}

#[test]
fn steep_negative_line_is_clipped_to_the_surface() {
    let renderer = ChartRenderer::default();
    let stroke = renderer.palette().color(0);
    let dataset = Dataset::new(vec![1.0, -1e9]).unwrap();
    let mut surface = RasterSurface::new(400, 200);

    let started = Instant::now();
    renderer.render_line(&mut surface, &dataset).unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));

    // The line leaves through the bottom edge almost straight below x = 40,
    // past the end of the y axis at y = 160
    let inked = (36..=44).any(|x| {
        surface.image().get_pixel(x, 190).0 == [stroke.r, stroke.g, stroke.b, stroke.a]
    });
    assert!(inked);
}

#[test]
fn repeated_renders_are_pixel_identical() {
    let renderer = ChartRenderer::default();
    let dataset = revenue();
    let pie = CategoryDataset::from_pairs([("A", 3.0), ("B", 1.0)]).unwrap();

    let mut surface = RasterSurface::new(800, 300);
    renderer.render_bar(&mut surface, &dataset).unwrap();
    let first = surface.image().clone();

    // Something else in between must not leak into the next render
    renderer.render_pie(&mut surface, &pie).unwrap();
    renderer.render_bar(&mut surface, &dataset).unwrap();
    assert_eq!(surface.image().as_raw(), first.as_raw());

    let mut fresh = RasterSurface::new(800, 300);
    renderer.render_bar(&mut fresh, &dataset).unwrap();
    assert_eq!(fresh.image().as_raw(), first.as_raw());
}

#[test]
fn repeated_command_lists_are_identical() {
    let renderer = ChartRenderer::default();
    let visitors = Dataset::new(vec![120.0, 150.0, 180.0, 200.0, 160.0, 190.0, 210.0]).unwrap();

    let mut surface = RecordingSurface::new(400, 200);
    renderer.render_line(&mut surface, &visitors).unwrap();
    let first: Vec<DrawCommand> = surface.commands().to_vec();
    renderer.render_line(&mut surface, &visitors).unwrap();

    assert_eq!(surface.commands(), first.as_slice());
    assert_eq!(surface.size(), SurfaceSize::new(400, 200));
}
