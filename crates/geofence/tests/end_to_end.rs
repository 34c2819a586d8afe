use geofence::{resolve_anchor, FenceBatch, FencePipeline, FenceRecord, ImageSource};
use image::{GrayImage, Luma};

fn image_with_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
    let mut img = GrayImage::new(width, height);
    for &(x0, y0, x1, y1) in rects {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
    }
    img
}

/// Fence points mapped back into the anchor's planar system.
fn planar_points(record: &FenceRecord, lat: f64, lon: f64) -> Vec<(f64, f64)> {
    let resolved = resolve_anchor(lat, lon).unwrap();
    record
        .points()
        .iter()
        .map(|point| {
            let planar = resolved.projector.to_planar(point.longitude(), point.latitude()).unwrap();
            (planar.x - resolved.anchor.easting, planar.y - resolved.anchor.northing)
        })
        .collect()
}

#[test]
fn square_at_equator() {
    let img = image_with_rects(100, 100, &[(40, 40, 50, 50)]);
    let source = ImageSource::new("square.png", "Square", 1.0, 0.0, 0.0);
    let run = FencePipeline::builder().build().process(&img, &source).unwrap();

    assert_eq!(run.records.len(), 1);
    let record = &run.records[0];
    assert_eq!(record.name(), "Square 00");
    assert_eq!(record.points().len(), 4);

    for point in record.points() {
        assert!(point.latitude().abs() < 1e-3, "lat {}", point.latitude());
        assert!(point.longitude().abs() < 1e-3, "lon {}", point.longitude());
    }

    // Pixel centres 40..=49; raster rows 40..=49 become mask rows 50..=59.
    let offsets = planar_points(record, 0.0, 0.0);
    let min_x = offsets.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = offsets.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = offsets.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = offsets.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    assert!((min_x - 40.0).abs() < 1e-3 && (max_x - 49.0).abs() < 1e-3, "x {min_x}..{max_x}");
    assert!((min_y - 50.0).abs() < 1e-3 && (max_y - 59.0).abs() < 1e-3, "y {min_y}..{max_y}");
}

#[test]
fn scale_multiplies_distances_from_anchor() {
    let img = image_with_rects(100, 100, &[(40, 40, 50, 50)]);
    let (lat, lon) = (47.554703108406244, 9.086087020816901);
    let pipeline = FencePipeline::builder().build();

    let unit = pipeline.process(&img, &ImageSource::new("s.png", "S", 1.0, lat, lon)).unwrap();
    let scaled = pipeline.process(&img, &ImageSource::new("s.png", "S", 40.0, lat, lon)).unwrap();

    let unit_offsets = planar_points(&unit.records[0], lat, lon);
    let scaled_offsets = planar_points(&scaled.records[0], lat, lon);
    for (u, s) in unit_offsets.iter().zip(&scaled_offsets) {
        assert!((s.0 - 40.0 * u.0).abs() < 1e-3);
        assert!((s.1 - 40.0 * u.1).abs() < 1e-3);
    }
}

#[test]
fn two_regions_two_fences() {
    let img = image_with_rects(120, 80, &[(10, 10, 40, 40), (70, 30, 110, 70)]);
    let source = ImageSource::new("pair.png", "D", 5.0, 52.38330030263479, 12.819399185363995);
    let run = FencePipeline::builder().build().process(&img, &source).unwrap();

    let names: Vec<&str> = run.records.iter().map(|r| r.name()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"D 00") && names.contains(&"D 01"));

    let first: Vec<(f64, f64)> = run.records[0].points().iter().map(|p| (p.latitude(), p.longitude())).collect();
    let second: Vec<(f64, f64)> = run.records[1].points().iter().map(|p| (p.latitude(), p.longitude())).collect();
    assert!(first.iter().all(|p| !second.contains(p)));
}

#[test]
fn fences_never_repeat_first_point() {
    let mut img = image_with_rects(200, 200, &[(20, 20, 90, 60)]);
    for y in 100..180u32 {
        for x in 100..180u32 {
            let dx = x as f32 - 140.0;
            let dy = y as f32 - 140.0;
            if dx * dx + dy * dy <= 35.0 * 35.0 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
    }
    let source = ImageSource::new("mixed.png", "M", 2.0, 34.04928845536877, -117.4095019119793);
    let run = FencePipeline::builder().build().process(&img, &source).unwrap();

    assert_eq!(run.records.len(), 2);
    for record in &run.records {
        assert!(record.points().len() >= 3);
        assert_ne!(record.points().first(), record.points().last());
    }
}

#[test]
fn batch_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let shapes = dir.path().join("shapes.png");
    let blank = dir.path().join("blank.png");
    image_with_rects(100, 100, &[(10, 10, 30, 30), (60, 60, 90, 90)]).save(&shapes).unwrap();
    GrayImage::new(50, 50).save(&blank).unwrap();

    let sources = vec![
        ImageSource::new(&shapes, "Shapes", 10.0, 51.5053512759227, -0.2102589290821343),
        ImageSource::new(&blank, "Blank", 10.0, 51.5053512759227, -0.2102589290821343),
    ];
    let batch = FencePipeline::builder().build().convert_all(&sources).unwrap();
    assert_eq!(batch.len(), 2);

    let output = dir.path().join("geo-area.json");
    batch.save_json(&output).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    let restored = FenceBatch::from_json_str(&written).unwrap();
    assert_eq!(restored.records(), batch.records());

    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

#[test]
fn blank_batch_writes_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let blank = dir.path().join("blank.png");
    GrayImage::new(64, 64).save(&blank).unwrap();

    let sources = vec![ImageSource::new(&blank, "Blank", 1.0, 0.0, 0.0)];
    let batch = FencePipeline::builder().build().convert_all(&sources).unwrap();
    assert!(batch.is_empty());

    let output = dir.path().join("geo-area.json");
    batch.save_json(&output).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
}
