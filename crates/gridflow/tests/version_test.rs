#[test]
fn version_matches_cargo_pkg_version() {
    assert_eq!(gridflow::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!gridflow::VERSION.is_empty());
}
