//! Filtering and excerpting over a decoded rules payload.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use rv_core::{Rule, RulesResponse};
use rv_search::excerpt::rule_search_excerpts;
use rv_search::{FilterQuery, Viewport, filter_rules, highlight};

#[fixture]
fn rules() -> Vec<Rule> {
    let payload = r#"{"results": [
        {"id": 1, "title": "Shift handover", "category": "Routine",
         "body": "Arrive 10 minutes early to the handover."},
        {"id": 2, "title": "Radio etiquette", "category": "Communication",
         "cards": [{"id": 20, "title": "Channel", "bullets": [
            {"id": 200, "text": "Keep messages short"},
            {"id": 201, "text": "Identify yourself first"}
         ]}]},
        {"id": 3, "title": "Rest breaks", "category": "Routine", "body": null}
    ]}"#;
    RulesResponse::from_json(payload).unwrap().results
}

fn titles(rules: &[&Rule]) -> Vec<String> {
    rules.iter().map(|rule| rule.title.clone()).collect()
}

#[rstest]
#[case("", None, Viewport::Wide, &["Shift handover", "Radio etiquette", "Rest breaks"])]
#[case("ROUTINE", None, Viewport::Wide, &["Shift handover", "Rest breaks"])]
#[case("", Some("2"), Viewport::Wide, &["Radio etiquette"])]
#[case("routine", Some("2"), Viewport::Wide, &[])]
#[case("routine", Some("2"), Viewport::Narrow, &["Shift handover", "Rest breaks"])]
#[case("", Some(" 2 "), Viewport::Narrow, &["Radio etiquette"])]
#[case("   ", Some(""), Viewport::Wide, &["Shift handover", "Radio etiquette", "Rest breaks"])]
fn filter_combinations(
    rules: Vec<Rule>,
    #[case] term: &str,
    #[case] subtheme: Option<&str>,
    #[case] viewport: Viewport,
    #[case] expected: &[&str],
) {
    let found = filter_rules(&rules, &FilterQuery::new(term, subtheme, viewport));
    assert_eq!(titles(&found), expected);
}

#[rstest]
fn filtered_rules_keep_their_order_and_excerpts(rules: Vec<Rule>) {
    let found = filter_rules(&rules, &FilterQuery::new("short", None, Viewport::Wide));
    assert_eq!(titles(&found), vec!["Radio etiquette"]);
    assert_eq!(
        rule_search_excerpts(found[0], "short"),
        vec!["Keep messages short".to_string()]
    );
}

#[rstest]
fn every_body_match_is_highlighted(rules: Vec<Rule>) {
    let body = rules[0].body.as_deref().unwrap();
    let matched: Vec<&str> = highlight(body, "handover")
        .iter()
        .filter(|segment| segment.matched)
        .map(|segment| segment.text)
        .collect();
    assert_eq!(matched, vec!["handover"]);
}
