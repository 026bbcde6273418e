use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use image_converter_lib::{
    AppState, ConversionRequest, ConvertError, Locator, ProcessStatus, StoreEvent, TargetFormat,
    format_file_size,
};

fn locator_of(path: &Path) -> Locator {
    Locator::new(path.to_string_lossy().to_string())
}

fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 120, 200, 255]));
    DynamicImage::ImageRgba8(img)
        .save_with_format(dir.join(name), format)
        .unwrap();
}

fn output_names(dir: &Path, folder: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir.join(folder))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn scan_reports_sizes_and_skips_non_images() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "photo.png", 32, 32, ImageFormat::Png);
    write_image(dir.path(), "shot.jpg", 16, 16, ImageFormat::Jpeg);
    fs::write(dir.path().join("list.csv"), "a,b\n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write_image(&dir.path().join("sub"), "nested.png", 8, 8, ImageFormat::Png);

    let state = AppState::default();
    let records = state.scan(&locator_of(dir.path())).unwrap();

    let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["photo.png", "shot.jpg"]);
    for record in &records {
        let on_disk = fs::metadata(dir.path().join(&record.name)).unwrap().len();
        assert_eq!(record.byte_length, on_disk);
        assert_eq!(record.size, format_file_size(on_disk));
        assert_eq!(record.status, ProcessStatus::Idle);
    }
}

#[test]
fn full_run_with_custom_output_folder() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "one.png", 200, 200, ImageFormat::Png);
    write_image(dir.path(), "two.bmp", 50, 80, ImageFormat::Bmp);
    write_image(dir.path(), "three.gif", 30, 30, ImageFormat::Gif);

    let state = AppState::default();
    state.scan(&locator_of(dir.path())).unwrap();

    let mut events = state.store().subscribe();
    let request = ConversionRequest::new(locator_of(dir.path()), TargetFormat::Jpeg)
        .with_output_folder("converted")
        .with_quality(60)
        .with_size(100, 50);
    let summary = state.run(&request).unwrap();

    assert_eq!((summary.total, summary.succeeded, summary.failed), (3, 3, 0));
    assert_eq!(output_names(dir.path(), "converted"), ["one.jpeg", "three.jpeg", "two.jpeg"]);
    for name in ["one.jpeg", "two.jpeg", "three.jpeg"] {
        let dims = image::image_dimensions(dir.path().join("converted").join(name)).unwrap();
        assert_eq!(dims, (100, 50));
    }

    // Each record goes Processing then Done, one at a time, in order
    let mut transitions = Vec::new();
    let mut progress = Vec::new();
    while let Ok(event) = events.try_recv() {
        match event {
            StoreEvent::StatusChanged { index, status } if status != ProcessStatus::Idle => {
                transitions.push((index, status))
            }
            StoreEvent::Progress { progress: p } => progress.push(p.fraction()),
            _ => {}
        }
    }
    assert_eq!(
        transitions,
        vec![
            (0, ProcessStatus::Processing),
            (0, ProcessStatus::Done),
            (1, ProcessStatus::Processing),
            (1, ProcessStatus::Done),
            (2, ProcessStatus::Processing),
            (2, ProcessStatus::Done),
        ]
    );
    assert_eq!(progress, [1.0f32 / 3.0, 2.0 / 3.0, 1.0, 0.0]);
    assert!(!state.store().is_running());
}

#[test]
fn every_record_ends_terminal_even_with_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "good.png", 10, 10, ImageFormat::Png);
    fs::write(dir.path().join("broken.jpg"), [0xFF, 0xD8, 0x00, 0x01, 0x02]).unwrap();
    fs::write(dir.path().join("fake.webp"), b"RIFF....nope").unwrap();

    let state = AppState::default();
    state.scan(&locator_of(dir.path())).unwrap();
    let summary = state
        .run(&ConversionRequest::new(locator_of(dir.path()), TargetFormat::Png))
        .unwrap();

    let records = state.store().records();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.status.is_terminal()));
    assert_eq!(summary.succeeded + summary.failed, 3);
    assert_eq!(summary.succeeded, 1);
    for record in records.iter().filter(|r| r.name != "good.png") {
        assert!(matches!(record.status, ProcessStatus::Error(ConvertError::Decode(_))));
    }
    assert_eq!(output_names(dir.path(), "outputs"), ["good.png"]);
}

#[test]
fn rerun_resets_statuses_and_replaces_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "pic.png", 20, 20, ImageFormat::Png);

    let state = AppState::default();
    state.scan(&locator_of(dir.path())).unwrap();
    let request = ConversionRequest::new(locator_of(dir.path()), TargetFormat::Webp);

    state.run(&request).unwrap();
    let mut events = state.store().subscribe();
    state.run(&request).unwrap();

    let first_status = events.try_recv().unwrap();
    assert_eq!(first_status, StoreEvent::RunningChanged { running: true });
    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::StatusChanged { index: 0, status: ProcessStatus::Idle }
    );
    assert_eq!(output_names(dir.path(), "outputs"), ["pic.webp"]);
}

#[test]
fn blocked_output_folder_aborts_before_any_file() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 10, 10, ImageFormat::Png);
    write_image(dir.path(), "b.png", 10, 10, ImageFormat::Png);

    let state = AppState::default();
    state.scan(&locator_of(dir.path())).unwrap();
    fs::write(dir.path().join("outputs"), b"a file, not a folder").unwrap();

    let err = state
        .run(&ConversionRequest::new(locator_of(dir.path()), TargetFormat::Png))
        .unwrap_err();

    assert!(matches!(err, ConvertError::OutputDir(_)));
    assert!(state.store().records().iter().all(|r| r.status == ProcessStatus::Idle));
    assert_eq!(state.store().progress().fraction(), 0.0);
    assert!(!state.store().is_running());
}

#[test]
fn files_added_mid_run_wait_for_next_scan() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 10, 10, ImageFormat::Png);

    let state = AppState::default();
    state.scan(&locator_of(dir.path())).unwrap();
    write_image(dir.path(), "late.png", 10, 10, ImageFormat::Png);

    let summary = state
        .run(&ConversionRequest::new(locator_of(dir.path()), TargetFormat::Png))
        .unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(output_names(dir.path(), "outputs"), ["a.png"]);
}
