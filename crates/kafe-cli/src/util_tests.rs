use std::path::Path;

use log::LevelFilter;

use crate::util::{class_name_from_path, level_for_verbosity};

#[test]
fn class_name_strips_directory_and_extension() {
    assert_eq!(
        class_name_from_path(Path::new("src/demo/Hello.kf")),
        Some("Hello".to_owned())
    );
    assert_eq!(class_name_from_path(Path::new("Main")), Some("Main".to_owned()));
}

#[test]
fn class_name_rejects_invalid_identifiers() {
    assert_eq!(class_name_from_path(Path::new("1st.kf")), None);
    assert_eq!(class_name_from_path(Path::new("my-file.kf")), None);
    assert_eq!(class_name_from_path(Path::new("")), None);
}

#[test]
fn verbosity_levels() {
    assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
    assert_eq!(level_for_verbosity(1), LevelFilter::Info);
    assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
    assert_eq!(level_for_verbosity(3), LevelFilter::Trace);
    assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
}
