use lag_windows::{
    compute_lags, fill_lags, lags_by_group, LagConfig, LagError, LagWindow, ScanMode, NO_WINDOW,
};

const TIMES: [f64; 10] = [
    0.001, 0.002, 0.003, 0.005, 0.006, 0.008, 0.011, 0.014, 0.015, 0.017,
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn buffer_form_writes_sentinel_on_last_position() {
    init_tracing();
    let mut out = [0i32; 10];
    fill_lags(&TIMES, 0.003, &mut out).unwrap();

    assert_eq!(&out[..9], &[2, 2, 3, 4, 5, 5, 6, 8, 9]);
    assert_eq!(out[9], NO_WINDOW);
}

#[test]
fn owned_form_marks_last_position_none() {
    init_tracing();
    let windows = compute_lags(&TIMES, 0.003).unwrap();
    let expected: Vec<Option<usize>> = [2, 2, 3, 4, 5, 5, 6, 8, 9]
        .into_iter()
        .map(Some)
        .chain(std::iter::once(None))
        .collect();
    assert_eq!(windows, expected);
}

#[test]
fn both_scan_modes_reproduce_example() {
    init_tracing();
    for scan in [ScanMode::Restart, ScanMode::Sweep] {
        let window = LagConfig::new(0.003).with_scan(scan).build().unwrap();
        let mut out = [0i32; 10];
        window.fill(&TIMES, &mut out).unwrap();
        assert_eq!(out, [2, 2, 3, 4, 5, 5, 6, 8, 9, NO_WINDOW], "{scan}");
    }
}

#[test]
fn split_into_two_sessions() {
    init_tracing();
    let keys = [1, 1, 1, 1, 1, 2, 2, 2, 2, 2];
    let windows = lags_by_group(&TIMES, &keys, 0.003).unwrap();
    assert_eq!(
        windows,
        vec![
            Some(2),
            Some(2),
            Some(3),
            Some(4),
            None,
            Some(5),
            Some(6),
            Some(8),
            Some(9),
            None
        ]
    );
}

#[test]
fn config_loads_from_json() {
    let config: LagConfig =
        serde_json::from_str(r#"{ "lag_length": 0.003, "scan": "restart" }"#).unwrap();
    assert_eq!(config.scan, ScanMode::Restart);
    assert!(!config.validate_sorted);

    let window = LagWindow::from_config(config).unwrap();
    assert_eq!(window.lag_length(), 0.003);
}

#[test]
fn errors_render_readable_messages() {
    let err = fill_lags(&TIMES, 0.003, &mut [0i32; 3]).unwrap_err();
    assert_eq!(err.to_string(), "output buffer has length 3, expected 10");
    assert!(matches!(
        compute_lags(&TIMES, -0.001),
        Err(LagError::InvalidLagLength(_))
    ));
}
