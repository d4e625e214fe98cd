use std::path::Path;

use log::LevelFilter;

/// Class name for a source file: its base name without extension.
///
/// `None` when the stem is empty or not a usable JVM identifier.
pub fn class_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let mut chars = stem.chars();
    let first = chars.next()?;
    let valid_start = first.is_alphabetic() || first == '_' || first == '$';
    let valid_rest = chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    (valid_start && valid_rest).then(|| stem.to_owned())
}

/// Log level for a `-v` count.
pub fn level_for_verbosity(count: u8) -> LevelFilter {
    match count {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbosity))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
