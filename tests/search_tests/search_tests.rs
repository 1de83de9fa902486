//! Tests for the Search Resolver
//!
//! These tests verify:
//! - The planned attempt order for plain and decorated queries
//! - Short-circuit on the first non-empty result
//! - Type broadening only when every attempt was rejected
//! - Errors other than a rejection escaping the cascade immediately

#[path = "../common/mod.rs"]
mod common;

use common::{lost, rejected, song_listing, Script};
use mpdwire::protocol::Encoding;
use mpdwire::search::{plan, Strategy};
use mpdwire::{FieldType, MpdError, SearchQuery, SearchResolver};

// =============================================================================
// Planning Tests
// =============================================================================

#[test]
fn test_plan_for_plain_query() {
    let attempts = plan(&SearchQuery::new(FieldType::Artist, "Deftones"));

    let steps: Vec<_> = attempts
        .iter()
        .map(|a| (a.strategy, a.field, a.text.as_str(), a.encoding))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Strategy::Primary, FieldType::Artist, "Deftones", Encoding::Quoted),
            (Strategy::EncodingFallback, FieldType::Artist, "Deftones", Encoding::Tokens),
        ]
    );
}

#[test]
fn test_plan_for_decorated_title() {
    let attempts = plan(&SearchQuery::new(
        FieldType::Title,
        "Deftones - Change (In the House of Flies)",
    ));

    let steps: Vec<_> = attempts
        .iter()
        .map(|a| (a.strategy, a.text.as_str(), a.encoding))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Strategy::Primary, "Change", Encoding::Quoted),
            (Strategy::TitleDecoration, "Deftones - Change", Encoding::Quoted),
            (Strategy::EncodingFallback, "Change", Encoding::Tokens),
        ]
    );
}

#[test]
fn test_plan_decoration_step_is_title_only() {
    let attempts = plan(&SearchQuery::new(
        FieldType::Artist,
        "Deftones - Change (In the House of Flies)",
    ));

    assert_eq!(attempts.len(), 2);
    assert!(attempts
        .iter()
        .all(|a| a.strategy != Strategy::TitleDecoration));
    assert_eq!(attempts[0].text, "Change");
}

// =============================================================================
// Cascade Tests
// =============================================================================

#[test]
fn test_primary_hit_short_circuits() {
    let script = Script::new(|_| Ok(song_listing(&[("a.flac", "Change")])));
    let client = script.client();

    let songs = client.search(FieldType::Title, "Change").unwrap();

    assert_eq!(songs.len(), 1);
    assert_eq!(script.sent(), vec!["search title \"Change\""]);
}

#[test]
fn test_decoration_fallback_hit() {
    let script = Script::new(|line| match line {
        "search title \"Deftones - Change\"" => Ok(song_listing(&[("a.flac", "Deftones - Change")])),
        _ => Ok(String::new()),
    });
    let client = script.client();

    let songs = client
        .search(FieldType::Title, "Deftones - Change (In the House of Flies)")
        .unwrap();

    assert_eq!(songs.len(), 1);
    assert_eq!(
        script.sent(),
        vec!["search title \"Change\"", "search title \"Deftones - Change\""]
    );
}

#[test]
fn test_encoding_fallback_hit() {
    let script = Script::new(|line| match line {
        "search artist Deftones" => Ok(song_listing(&[("a.flac", "A"), ("b.flac", "B")])),
        _ => Err(rejected("search", "incorrect arguments")),
    });
    let client = script.client();

    let songs = client.search(FieldType::Artist, "Deftones").unwrap();

    assert_eq!(songs.len(), 2);
    assert_eq!(
        script.sent(),
        vec!["search artist \"Deftones\"", "search artist Deftones"]
    );
}

#[test]
fn test_all_empty_is_empty_result_without_broadening() {
    let script = Script::ok();
    let client = script.client();

    let songs = client
        .search(FieldType::Title, "Deftones - Change (In the House of Flies)")
        .unwrap();

    assert!(songs.is_empty());
    assert_eq!(
        script.sent(),
        vec![
            "search title \"Change\"",
            "search title \"Deftones - Change\"",
            "search title Change",
        ]
    );
}

#[test]
fn test_broadens_to_any_when_every_attempt_rejected() {
    let script = Script::new(|line| {
        if line.starts_with("search any") {
            Ok(song_listing(&[("deftones/bqad.flac", "Be Quiet and Drive (Far Away)")]))
        } else {
            Err(rejected("search", "incorrect arguments"))
        }
    });
    let client = script.client();

    let songs = client
        .search(FieldType::Title, "Be Quiet and Drive (Far Away)")
        .unwrap();

    assert_eq!(songs.len(), 1);
    // primary, encoding fallback, then the broadened primary
    assert_eq!(
        script.sent(),
        vec![
            "search title \"Be Quiet and Drive (Far Away)\"",
            "search title Be Quiet and Drive (Far Away)",
            "search any \"Be Quiet and Drive (Far Away)\"",
        ]
    );
}

#[test]
fn test_broadened_cascade_runs_in_full() {
    let script = Script::new(|line| {
        if line == "search any Deftones" {
            Ok(song_listing(&[("a.flac", "A")]))
        } else {
            Err(rejected("search", "incorrect arguments"))
        }
    });
    let client = script.client();

    let songs = client.search(FieldType::Genre, "Deftones").unwrap();

    assert_eq!(songs.len(), 1);
    assert_eq!(
        script.sent(),
        vec![
            "search genre \"Deftones\"",
            "search genre Deftones",
            "search any \"Deftones\"",
            "search any Deftones",
        ]
    );
}

#[test]
fn test_mixed_empty_and_rejected_does_not_broaden() {
    let script = Script::new(|line| {
        if line.contains('"') {
            Err(rejected("search", "incorrect arguments"))
        } else {
            Ok(String::new())
        }
    });
    let client = script.client();

    let songs = client.search(FieldType::Album, "White Pony").unwrap();

    assert!(songs.is_empty());
    assert_eq!(script.sent().len(), 2);
}

#[test]
fn test_any_field_never_broadens() {
    let script = Script::new(|_| Err(rejected("search", "incorrect arguments")));
    let client = script.client();

    let songs = client.search(FieldType::Any, "x").unwrap();

    assert!(songs.is_empty());
    assert_eq!(script.sent(), vec!["search any \"x\"", "search any x"]);
}

#[test]
fn test_broadening_happens_once() {
    let script = Script::new(|_| Err(rejected("search", "incorrect arguments")));
    let client = script.client();

    let songs = client.search(FieldType::Title, "x").unwrap();

    assert!(songs.is_empty());
    assert_eq!(script.sent().len(), 4);
}

#[test]
fn test_connection_loss_escapes_cascade() {
    let script = Script::new(|_| Err(lost()));
    let client = script.client();

    let result = client.search(FieldType::Title, "Deftones - Change (In the House of Flies)");

    assert!(matches!(result, Err(MpdError::ConnectionLost(_))));
    assert_eq!(script.sent().len(), 1);
}

#[test]
fn test_connection_loss_on_fallback_escapes_cascade() {
    let script = Script::new(|line| {
        if line.contains('"') {
            Err(rejected("search", "incorrect arguments"))
        } else {
            Err(lost())
        }
    });
    let client = script.client();

    let result = client.search(FieldType::Artist, "Deftones");

    assert!(matches!(result, Err(MpdError::ConnectionLost(_))));
    assert_eq!(script.sent().len(), 2);
}

#[test]
fn test_not_connected_escapes_cascade() {
    let script = Script::ok();
    let client = script.client();
    client.disconnect();

    let resolver = SearchResolver::new(&client);
    let result = resolver.resolve(&SearchQuery::new(FieldType::Title, "x"));

    assert!(matches!(result, Err(MpdError::NotConnected)));
    assert!(script.sent().is_empty());
}

#[test]
fn test_invalid_argument_escapes_cascade() {
    let script = Script::ok();
    let client = script.client();

    let result = client.search(FieldType::Title, "a\nstatus");

    assert!(matches!(result, Err(MpdError::InvalidArgument(_))));
    assert!(script.sent().is_empty());
    // same outcome as the exact-match lookup
    assert!(matches!(
        client.find(FieldType::Title, "a\nstatus"),
        Err(MpdError::InvalidArgument(_))
    ));
}

#[test]
fn test_protocol_error_escapes_cascade() {
    let script = Script::new(|line| {
        if line.contains('"') {
            Err(MpdError::Protocol("garbled reply".to_string()))
        } else {
            Ok(String::new())
        }
    });
    let client = script.client();

    let result = client.search(FieldType::Artist, "Deftones");

    // the session reports a broken reply as a lost connection
    assert!(matches!(result, Err(MpdError::ConnectionLost(_))));
    assert_eq!(script.sent().len(), 1);
}
