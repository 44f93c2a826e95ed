use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScenegenError::scene_template("Base")
            .to_string()
            .contains("template not found:")
    );
    assert!(
        ScenegenError::run_list("x")
            .to_string()
            .contains("run-list error:")
    );
    assert!(
        ScenegenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScenegenError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(ScenegenError::not_found("x").to_string().contains("not found:"));
    assert!(ScenegenError::config("x").to_string().contains("config error:"));
}

#[test]
fn template_errors_name_what_is_missing() {
    let scene = ScenegenError::scene_template("Base").to_string();
    assert!(scene.contains("'Base'"));

    let browser = ScenegenError::browser_template().to_string();
    assert!(browser.contains("browser_source"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScenegenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
