use timestretch_kernels::{
    evaluate_mono, read_config_json, write_config_json, FilterParams, KernelConfig, KernelError,
    OverlapParams,
};

#[test]
fn test_config_roundtrips_through_json_file() {
    let dir = std::env::temp_dir().join("timestretch_kernels_test_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("kernels.json");

    let config = KernelConfig {
        filter: Some(FilterParams::new(vec![0.25f32, 0.5, 0.5, 0.25], 1.5)),
        overlap: Some(
            OverlapParams::new(2)
                .with_overlap_length(128)
                .with_seek_length(300),
        ),
    };
    write_config_json(&path, &config).unwrap();
    let loaded: KernelConfig<f32> = read_config_json(&path).unwrap();
    assert_eq!(loaded, config);

    let kernel = loaded.filter.unwrap().kernel().unwrap();
    let src = [1.0f32; 8];
    let mut dest = [0.0f32; 8];
    assert_eq!(evaluate_mono(&kernel, &mut dest, &src), 4);
    assert_eq!(dest[0], 1.0);

    let search = loaded.overlap.unwrap().search().unwrap();
    assert_eq!(search.reference_len(), 2 * (299 + 128));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_fixed_point_config_keeps_shift_factor() {
    let dir = std::env::temp_dir().join("timestretch_kernels_test_fixed_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fixed.json");

    let config = KernelConfig::<i16> {
        filter: Some(FilterParams::new(vec![4096, 8192, 8192, 4096], 0).with_shift_factor(15)),
        overlap: None,
    };
    write_config_json(&path, &config).unwrap();
    let loaded: KernelConfig<i16> = read_config_json(&path).unwrap();
    let kernel = loaded.filter.unwrap().kernel().unwrap();
    assert_eq!(kernel.shift_factor(), 15);
    assert!(loaded.overlap.is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_malformed_json_is_invalid_format() {
    let dir = std::env::temp_dir().join("timestretch_kernels_test_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.json");
    std::fs::write(&path, "{ \"filter\": { \"coefficients\": \"oops\" } }").unwrap();

    let result = read_config_json::<f32>(&path);
    assert!(matches!(result, Err(KernelError::InvalidFormat(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("timestretch_kernels_no_such_dir/none.json");
    let result = read_config_json::<f32>(&path);
    assert!(matches!(result, Err(KernelError::IoError(_))));
}

#[test]
fn test_invalid_sections_are_rejected_on_validation() {
    let json = r#"{
        "filter": { "coefficients": [1.0, 1.0, 1.0], "divider": 1.0 },
        "overlap": { "channels": 0, "overlap_length": 16, "seek_length": 16 }
    }"#;
    let config: KernelConfig<f32> = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.filter.unwrap().kernel(),
        Err(KernelError::InvalidFilterLength(3))
    );
    assert_eq!(
        config.overlap.unwrap().search(),
        Err(KernelError::InvalidChannels(0))
    );
}

#[test]
fn test_omitted_sections_read_as_none() {
    let dir = std::env::temp_dir().join("timestretch_kernels_test_partial_config");
    std::fs::create_dir_all(&dir).unwrap();

    let path = dir.join("overlap_only.json");
    std::fs::write(
        &path,
        r#"{ "overlap": { "channels": 1, "overlap_length": 32, "seek_length": 48 } }"#,
    )
    .unwrap();
    let loaded = read_config_json::<f32>(&path).unwrap();
    assert!(loaded.filter.is_none());
    assert_eq!(loaded.overlap.unwrap().search().unwrap().seek_length(), 48);

    let path = dir.join("empty.json");
    std::fs::write(&path, "{}").unwrap();
    let loaded = read_config_json::<i16>(&path).unwrap();
    assert_eq!(loaded, KernelConfig::default());

    let _ = std::fs::remove_dir_all(&dir);
}
