use super::*;

#[test]
fn test_default_filter_targets_xptpack_at_configured_level() {
    let filter = Logger::default_filter(LogLevel::Debug);
    assert!(filter.starts_with("xptpack=debug,"));
    assert!(filter.contains("handlebars=warn"));
    assert!(filter.ends_with(",debug"));
}

#[test]
fn test_default_filter_is_accepted_by_env_filter() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        let filter = Logger::default_filter(level);
        assert!(
            EnvFilter::try_new(&filter).is_ok(),
            "filter should parse: {}",
            filter
        );
    }
}

#[test]
fn test_global_logger_consistent_with_initialized_flag() {
    // Other tests in this binary may or may not have initialized the logger
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
