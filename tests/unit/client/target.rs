use super::*;

#[test]
fn placeholders_are_substituted_per_display() {
    let target = CommandTarget::new(
        "setter",
        vec![
            "--output".into(),
            "{display}".into(),
            "--image={path}".into(),
        ],
        vec!["HDMI-1".into()],
    );
    let args = target.expand_args("HDMI-1", Path::new("/tmp/wallpaper_1.png"));
    assert_eq!(args, vec!["--output", "HDMI-1", "--image=/tmp/wallpaper_1.png"]);
}

#[test]
fn no_configured_displays_means_one_default() {
    let target = CommandTarget::new("setter", Vec::new(), Vec::new());
    assert_eq!(target.displays(), vec!["default"]);

    let target = CommandTarget::new("setter", Vec::new(), vec!["a".into(), "b".into()]);
    assert_eq!(target.displays(), vec!["a", "b"]);
}

#[cfg(unix)]
#[tokio::test]
async fn exit_status_decides_success() {
    let ok = CommandTarget::new("true", Vec::new(), Vec::new());
    ok.set_background("default", Path::new("/nonexistent.png"))
        .await
        .unwrap();

    let failing = CommandTarget::new("false", Vec::new(), Vec::new());
    let err = failing
        .set_background("default", Path::new("/nonexistent.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Apply { ref display, .. } if display == "default"));
}

#[tokio::test]
async fn missing_program_is_an_apply_error() {
    let target = CommandTarget::new("albumwall-no-such-setter-binary", Vec::new(), Vec::new());
    let err = target
        .set_background("default", Path::new("x.png"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("spawn"));
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn slow_setter_does_not_stall_the_runtime() {
    let target = CommandTarget::new("sleep", vec!["1".into()], Vec::new());
    let ticker = tokio::spawn(async {
        let mut ticks = 0u32;
        for _ in 0..5 {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            ticks += 1;
        }
        ticks
    });

    target
        .set_background("default", Path::new("unused.png"))
        .await
        .unwrap();
    // On a single-threaded runtime the ticker only finishes if the setter yielded.
    assert!(ticker.is_finished());
    assert_eq!(ticker.await.unwrap(), 5);
}
