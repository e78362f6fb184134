use std::fs;

use chathook::capture::{
    capture_current_plot, capture_current_structured_plot, render_formula, serialize_values,
    MockFormulaRenderer, MockPlotHost, FORMULA_DPI,
};
use chathook::error::Error;
use chathook::payload::Payload;

#[test]
fn capture_plot_without_plot_fails() {
    let mut host = MockPlotHost::new();
    host.expect_current_plot_size().return_const(None);

    let err = capture_current_plot(&host).unwrap_err();
    assert!(matches!(err, Error::NoPlotAvailable));
}

#[test]
fn capture_plot_rasterizes_at_displayed_dimensions() {
    let mut host = MockPlotHost::new();
    host.expect_current_plot_size()
        .return_const(Some((640u32, 480u32)));
    host.expect_save_current_plot()
        .withf(|_, width, height| *width == 640 && *height == 480)
        .times(1)
        .returning(|path, _, _| fs::write(path, b"png"));

    let payload = capture_current_plot(&host).unwrap();
    let Payload::File(path) = payload else {
        panic!("expected a file payload");
    };
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    fs::remove_file(path).unwrap();
}

#[test]
fn capture_structured_plot_without_plot_fails() {
    let mut host = MockPlotHost::new();
    host.expect_current_structured_plot_size().return_const(None);

    let err = capture_current_structured_plot(&host).unwrap_err();
    assert!(matches!(err, Error::NoPlotAvailable));
}

#[test]
fn capture_structured_plot_writes_file() {
    let mut host = MockPlotHost::new();
    host.expect_current_structured_plot_size()
        .return_const(Some((800u32, 600u32)));
    host.expect_save_current_structured_plot()
        .times(1)
        .returning(|path, _, _| fs::write(path, b"png"));

    let Payload::File(path) = capture_current_structured_plot(&host).unwrap() else {
        panic!("expected a file payload");
    };
    assert!(path.exists());
    fs::remove_file(path).unwrap();
}

/// An empty value list is a notice-level no-op, not an error.
#[test]
fn serialize_values_empty_is_silent_noop() {
    let archived = serialize_values(&[]).unwrap();
    assert!(archived.is_none());
}

#[test]
fn serialize_values_writes_named_values_as_json() {
    let values = vec![
        ("answer".to_string(), serde_json::json!(42)),
        ("label".to_string(), serde_json::json!("hello")),
    ];

    let Some(Payload::File(path)) = serialize_values(&values).unwrap() else {
        panic!("expected a file payload");
    };
    let raw = fs::read_to_string(&path).unwrap();
    let archive: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(archive["answer"], 42);
    assert_eq!(archive["label"], "hello");
    fs::remove_file(path).unwrap();
}

#[test]
fn render_formula_empty_markup_fails() {
    let renderer = MockFormulaRenderer::new();
    let err = render_formula(&renderer, "").unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn render_formula_invokes_renderer_at_default_dpi() {
    let mut renderer = MockFormulaRenderer::new();
    renderer
        .expect_render()
        .withf(|markup, dpi, _| markup == "e = mc^2" && *dpi == FORMULA_DPI)
        .times(1)
        .returning(|_, _, path| fs::write(path, b"png"));

    let Payload::File(path) = render_formula(&renderer, "e = mc^2").unwrap() else {
        panic!("expected a file payload");
    };
    assert!(path.exists());
    fs::remove_file(path).unwrap();
}
