use super::*;
use crate::prompt::ScriptedPrompter;

const DOCUMENT: &str = "\
[Station]
    location = Hood River

    # If you have a website, you may specify an URL. This is required if you
    # intend to register your station.
    #station_url = https://www.example.com

    # The start of the rain year (1=January; 10=October, etc.). This is
    # downloaded from the station if the hardware supports it.
    rain_year_start = 1

    # Start of week (0=Monday, 6=Sunday)
    week_start = 6

[StdRESTful]
    [[StationRegistry]]
        register_this_station = False
";

const URL: &str = "https://www.wunderground.com/dashboard/pws/KORHOODR3";

fn tree() -> ConfigTree {
    ConfigTree::parse(DOCUMENT).unwrap()
}

fn no_answers() -> ScriptedPrompter {
    ScriptedPrompter::new(Vec::<String>::new())
}

fn register_flag(tree: &ConfigTree) -> Option<&str> {
    tree.path(&REGISTRY_PATH)
        .and_then(|registry| registry.scalar("register_this_station"))
}

fn station_url(tree: &ConfigTree) -> Option<&str> {
    tree.section(STATION).and_then(|s| s.scalar("station_url"))
}

#[test]
fn test_to_bool() {
    assert_eq!(to_bool("True"), Some(true));
    assert_eq!(to_bool(" yes "), Some(true));
    assert_eq!(to_bool("0"), Some(false));
    assert_eq!(to_bool("False"), Some(false));
    assert_eq!(to_bool("perhaps"), None);
}

#[test]
fn test_register_without_url_fails() {
    let mut tree = tree();
    let result = config_registry(&mut tree, Some(true), None, true, &mut no_answers());
    assert!(matches!(result, Err(StationError::PreconditionViolated(_))));
}

#[test]
fn test_register_with_placeholder_url_fails() {
    let mut tree = tree();
    let result = config_registry(
        &mut tree,
        Some(true),
        Some("https://example.com/x"),
        true,
        &mut no_answers(),
    );
    assert!(matches!(result, Err(StationError::PreconditionViolated(_))));
}

#[test]
fn test_register_injects_station_url_before_rain_year_start() {
    let mut tree = tree();
    config_registry(&mut tree, Some(true), Some(URL), false, &mut no_answers()).unwrap();

    let expected = format!(
        "\
[Station]
    location = Hood River

    # If you have a website, you may specify an URL. This is required if you
    # intend to register your station.
    station_url = {URL}

    # The start of the rain year (1=January; 10=October, etc.). This is
    # downloaded from the station if the hardware supports it.
    rain_year_start = 1

    # Start of week (0=Monday, 6=Sunday)
    week_start = 6

[StdRESTful]
    [[StationRegistry]]
        register_this_station = true
"
    );
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_existing_station_url_is_updated_in_place() {
    let mut tree = ConfigTree::parse(
        "[Station]\n    station_url = https://old.site\n    rain_year_start = 1\n",
    )
    .unwrap();
    config_registry(&mut tree, Some(true), Some(URL), true, &mut no_answers()).unwrap();

    let keys: Vec<&str> = tree.section(STATION).unwrap().keys().collect();
    assert_eq!(keys, vec!["station_url", "rain_year_start"]);
    assert_eq!(station_url(&tree), Some(URL));
}

#[test]
fn test_register_uses_existing_url_when_none_given() {
    let mut tree = ConfigTree::parse("[Station]\n    station_url = https://my.site\n").unwrap();
    config_registry(&mut tree, Some(true), None, true, &mut no_answers()).unwrap();
    assert_eq!(register_flag(&tree), Some("true"));
    assert_eq!(station_url(&tree), Some("https://my.site"));
}

#[test]
fn test_not_registering_leaves_station_alone() {
    let mut tree = tree();
    let station_before = tree.section(STATION).cloned();
    config_registry(&mut tree, Some(false), Some(URL), false, &mut no_answers()).unwrap();

    assert_eq!(register_flag(&tree), Some("false"));
    assert_eq!(tree.section(STATION).cloned(), station_before);
}

#[test]
fn test_no_prompt_keeps_existing_flag() {
    let mut tree = ConfigTree::parse(
        "\
[Station]
    station_url = https://my.site
[StdRESTful]
    [[StationRegistry]]
        register_this_station = True
",
    )
    .unwrap();
    config_registry(&mut tree, None, None, true, &mut no_answers()).unwrap();
    assert_eq!(register_flag(&tree), Some("true"));
}

#[test]
fn test_missing_registry_sections_are_created() {
    let mut tree = ConfigTree::parse("[Station]\n    location = Here\n").unwrap();
    config_registry(&mut tree, None, None, true, &mut no_answers()).unwrap();
    assert_eq!(register_flag(&tree), Some("false"));
}

#[test]
fn test_interactive_registration_asks_for_unique_url() {
    let mut tree = tree();
    let mut prompter = ScriptedPrompter::new(["y", "https://example.com", URL]);
    config_registry(&mut tree, None, None, false, &mut prompter).unwrap();

    assert_eq!(register_flag(&tree), Some("true"));
    assert_eq!(station_url(&tree), Some(URL));
    let transcript = prompter.transcript();
    assert!(transcript.contains(&"Include station in the station registry [n]? ".to_string()));
    assert!(transcript.contains(&"Unique please!".to_string()));
}

#[test]
fn test_interactive_decline_skips_url_question() {
    let mut tree = tree();
    let mut prompter = ScriptedPrompter::new(["n"]);
    config_registry(&mut tree, None, None, false, &mut prompter).unwrap();

    assert_eq!(register_flag(&tree), Some("false"));
    assert_eq!(prompter.remaining(), 0);
    assert!(!prompter
        .transcript()
        .iter()
        .any(|line| line.starts_with("Unique URL")));
}

#[test]
fn test_explicit_register_does_not_prompt() {
    let mut tree = tree();
    let mut prompter = no_answers();
    config_registry(&mut tree, Some(true), Some(URL), false, &mut prompter).unwrap();
    assert!(prompter.transcript().is_empty());
}

#[test]
fn test_skipped_without_station() {
    let mut tree = ConfigTree::parse("[StdReport]\n    SKIN_ROOT = skins\n").unwrap();
    let original = tree.clone();
    config_registry(&mut tree, Some(true), None, true, &mut no_answers()).unwrap();
    assert_eq!(tree, original);
}

const REGISTERED_WITHOUT_URL: &str = "\
[Station]
    location = Hood River
[StdRESTful]
    [[StationRegistry]]
        register_this_station = True
";

#[test]
fn test_keeping_registration_interactively_asks_for_missing_url() {
    let mut tree = ConfigTree::parse(REGISTERED_WITHOUT_URL).unwrap();
    let mut prompter = ScriptedPrompter::new(["", URL]);

    config_registry(&mut tree, None, None, false, &mut prompter).unwrap();

    assert_eq!(prompter.remaining(), 0);
    assert_eq!(register_flag(&tree), Some("true"));
    assert_eq!(station_url(&tree), Some(URL));
    assert!(prompter
        .transcript()
        .contains(&"Include station in the station registry [y]? ".to_string()));
}

#[test]
fn test_keeping_registration_interactively_replaces_placeholder_url() {
    let mut tree = ConfigTree::parse(
        "\
[Station]
    station_url = https://www.example.com/station
[StdRESTful]
    [[StationRegistry]]
        register_this_station = True
",
    )
    .unwrap();
    // Enter keeps the flag, Enter on the URL offers the placeholder again.
    let mut prompter = ScriptedPrompter::new(["", "", URL]);

    config_registry(&mut tree, None, None, false, &mut prompter).unwrap();

    assert_eq!(prompter.remaining(), 0);
    assert_eq!(station_url(&tree), Some(URL));
    assert!(prompter.transcript().contains(&"Unique please!".to_string()));
}

#[test]
fn test_registered_station_can_change_url_interactively() {
    let mut tree = ConfigTree::parse(
        "\
[Station]
    station_url = https://old.site
[StdRESTful]
    [[StationRegistry]]
        register_this_station = True
",
    )
    .unwrap();
    let mut prompter = ScriptedPrompter::new(["y", URL]);

    config_registry(&mut tree, None, None, false, &mut prompter).unwrap();

    assert_eq!(station_url(&tree), Some(URL));
}
