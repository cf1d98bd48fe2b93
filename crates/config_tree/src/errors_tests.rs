use super::*;
use std::io;

#[test]
fn test_parse_error_display() {
    let error = TreeError::Parse {
        line: 12,
        reason: "unterminated quote".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Parse error at line 12: unterminated quote"
    );
}

#[test]
fn test_duplicate_error_display() {
    let error = TreeError::Duplicate {
        kind: "section",
        name: "Station".to_string(),
        line: 40,
    };
    assert_eq!(error.to_string(), "Duplicate section 'Station' at line 40");
}

#[test]
fn test_section_not_found_display() {
    let error = TreeError::SectionNotFound("Simulator".to_string());
    assert_eq!(error.to_string(), "Section not found: Simulator");
}

#[test]
fn test_missing_interpolation_key_display() {
    let error = TreeError::MissingInterpolationKey {
        name: "WEEWX_ROOT".to_string(),
        value: "%(WEEWX_ROOT)s/archive".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Missing option 'WEEWX_ROOT' referenced by interpolation in '%(WEEWX_ROOT)s/archive'"
    );
}

#[test]
fn test_io_error_converts() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "gone");
    let error: TreeError = io_error.into();
    assert!(matches!(error, TreeError::Io(_)));
    assert_eq!(error.to_string(), "IO error: gone");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TreeError>();
}
