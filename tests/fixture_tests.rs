//! Every parameter file under `tests/fixtures` must load, generate for both
//! targets, stay finite and deterministic, and survive all three sinks.

use bridge_gad::sink::{DxfSink, RecordingSink, SvgSink};
use bridge_gad::{Target, Viewport, View, generate, generate_with, parse_named};
use datatest_stable::Utf8Path;
use tracing_subscriber::EnvFilter;

fn check_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    // RUST_LOG=debug shows per-builder counts when built with --features tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let source = std::fs::read_to_string(path)?;
    let params = parse_named(path.as_str(), &source)?;

    let absolute = generate(&params);
    let screen = generate_with(&params, &Target::Screen(Viewport::default()));

    for drawing in [&absolute, &screen] {
        assert!(drawing.is_finite(), "non-finite geometry in {path}");
        assert!(drawing.in_view(View::Plan).next().is_some(), "{path}: empty plan");
        assert!(drawing.in_view(View::Section).next().is_some(), "{path}: empty section");
    }
    assert_eq!(absolute.len(), screen.len(), "{path}: targets disagree");
    assert_eq!(absolute, generate(&params), "{path}: not deterministic");

    let mut recorded = RecordingSink::new();
    let Ok(()) = absolute.emit(&mut recorded);
    assert_eq!(recorded.elements(), absolute.elements());

    let mut svg = SvgSink::for_drawing(&absolute);
    let Ok(()) = absolute.emit(&mut svg);
    let svg = svg.finish();
    assert!(svg.contains("GENERAL ARRANGEMENT DRAWING"), "{path}: no title");

    let mut dxf = DxfSink::for_drawing(&screen);
    let Ok(()) = screen.emit(&mut dxf);
    let mut bytes = Vec::new();
    dxf.write(&mut bytes)?;
    assert!(!bytes.is_empty());

    Ok(())
}

datatest_stable::harness! {
    { test = check_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.gad$" },
}
