use crate::domain::{Source, SourceRequest};
use crate::errors::ConfigError;

#[test]
fn from_inputs_treats_empty_as_zero() {
    let request = SourceRequest::from_inputs([
        ("jiji", "3"),
        ("realethio", ""),
        ("Living Ethio", " 2 "),
    ])
    .unwrap();

    assert_eq!(request.pages_for(Source::Jiji), 3);
    assert_eq!(request.pages_for(Source::Realethio), 0);
    assert_eq!(request.pages_for(Source::LivingEthio), 2);
    assert_eq!(request.pages_for(Source::EthiopiaRealty), 0);
}

#[test]
fn from_inputs_rejects_non_numeric_counts() {
    let err = SourceRequest::from_inputs([("jiji", "two")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPageCount { ref value, .. } if value == "two"));

    let err = SourceRequest::from_inputs([("jiji", "-1")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPageCount { .. }));
}

#[test]
fn from_inputs_rejects_unknown_sources() {
    let err = SourceRequest::from_inputs([("zillow", "1")]).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownSource(ref id) if id == "zillow"));
}

#[test]
fn from_pairs_parses_command_line_form() {
    let request = SourceRequest::from_pairs(&["jiji=1", "EthiopiaRealty=4"]).unwrap();
    assert_eq!(
        request.enabled(),
        vec![(Source::Jiji, 1), (Source::EthiopiaRealty, 4)]
    );

    let err = SourceRequest::from_pairs(&["jiji"]).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedPair(_)));
}

#[test]
fn enabled_skips_zero_and_keeps_attempt_order() {
    let request = SourceRequest::new()
        .with_pages(Source::LivingEthio, 1)
        .with_pages(Source::Realethio, 0)
        .with_pages(Source::Jiji, 2);

    assert_eq!(
        request.enabled(),
        vec![(Source::Jiji, 2), (Source::LivingEthio, 1)]
    );
}
