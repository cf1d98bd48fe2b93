use super::*;
use std::fs;

use config_tree::Interpolation;
use tempfile::TempDir;

use crate::prompt::ScriptedPrompter;

fn no_answers() -> ScriptedPrompter {
    ScriptedPrompter::new(Vec::<String>::new())
}

fn quiet_args() -> StationArgs {
    StationArgs {
        no_prompt: true,
        ..StationArgs::default()
    }
}

fn raw(tree: &ConfigTree, path: &[&str], key: &str) -> Option<String> {
    tree.scalar_at(path, key, Interpolation::Raw).unwrap()
}

#[test]
fn test_template_round_trips_verbatim() {
    let tree = template().unwrap();
    assert_eq!(tree.to_string(), TEMPLATE);
}

#[test]
fn test_resolve_config_path_defaults() {
    assert_eq!(resolve_config_path(None), PathBuf::from(DEFAULT_CONFIG_PATH));
    assert_eq!(
        resolve_config_path(Some(Path::new("/tmp/weewx.conf"))),
        PathBuf::from("/tmp/weewx.conf")
    );
}

#[test]
fn test_create_station_without_prompts() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("weewx.conf");
    let registry = DriverRegistry::builtin();

    let outcome = create_station(
        Some(path.as_path()),
        &quiet_args(),
        &registry,
        &mut no_answers(),
        None,
    )
    .unwrap();

    assert_eq!(outcome.config_path, path);
    assert_eq!(outcome.backup_path, None);

    let tree = ConfigTree::load(&path).unwrap();
    assert_eq!(
        raw(&tree, &[], "WEEWX_ROOT"),
        Some(temp_dir.path().display().to_string())
    );
    assert_eq!(raw(&tree, &["Station"], "location").as_deref(), Some("WeeWX station"));
    assert_eq!(raw(&tree, &["Station"], "station_type").as_deref(), Some("Simulator"));
    assert_eq!(
        raw(&tree, &["StdRESTful", "StationRegistry"], "register_this_station").as_deref(),
        Some("false")
    );
    assert_eq!(
        raw(&tree, &["StdReport", "Defaults"], "unit_system").as_deref(),
        Some("us")
    );
    assert_eq!(
        raw(&tree, &["DatabaseTypes", "SQLite"], "SQLITE_ROOT").as_deref(),
        Some("%(WEEWX_ROOT)s/archive")
    );

    let sections: Vec<&str> = tree.root().subsections().map(|(name, _)| name).collect();
    assert_eq!(&sections[..2], &["Station", "Simulator"]);
}

#[test]
fn test_create_station_refuses_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("weewx.conf");
    fs::write(&path, "keep me\n").unwrap();
    let registry = DriverRegistry::builtin();

    let result = create_station(
        Some(path.as_path()),
        &quiet_args(),
        &registry,
        &mut no_answers(),
        None,
    );

    assert!(matches!(result, Err(StationError::PreconditionViolated(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\n");
}

#[test]
fn test_create_station_explicit_weewx_root_wins() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("weewx.conf");
    let registry = DriverRegistry::builtin();
    let mut args = quiet_args();
    args.roots.weewx_root = Some("/opt/weewx".to_string());

    create_station(Some(path.as_path()), &args, &registry, &mut no_answers(), None).unwrap();

    let tree = ConfigTree::load(&path).unwrap();
    assert_eq!(raw(&tree, &[], "WEEWX_ROOT").as_deref(), Some("/opt/weewx"));
}

#[test]
fn test_reconfigure_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("weewx.conf");
    let registry = DriverRegistry::builtin();

    let result = reconfigure_station(
        Some(path.as_path()),
        &quiet_args(),
        &registry,
        &mut no_answers(),
        None,
    );
    assert!(matches!(result, Err(StationError::PreconditionViolated(_))));
}

#[test]
fn test_reconfigure_applies_explicit_values_with_backup() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("weewx.conf");
    let registry = DriverRegistry::builtin();
    create_station(
        Some(path.as_path()),
        &quiet_args(),
        &registry,
        &mut no_answers(),
        None,
    )
    .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let args = StationArgs {
        driver: Some("weewx.drivers.vantage".to_string()),
        location: Some("Hood River, Oregon".to_string()),
        altitude: Some("700, foot".to_string()),
        latitude: Some("45.686".to_string()),
        longitude: Some("-121.566".to_string()),
        register: Some(true),
        station_url: Some("https://www.wunderground.com/dashboard/pws/KORHOODR3".to_string()),
        unit_system: Some(UnitSystem::Metric),
        no_prompt: true,
        ..StationArgs::default()
    };
    let outcome = reconfigure_station(
        Some(path.as_path()),
        &args,
        &registry,
        &mut no_answers(),
        None,
    )
    .unwrap();

    let backup = outcome.backup_path.expect("a backup should have been made");
    assert_eq!(fs::read_to_string(&backup).unwrap(), before);

    let tree = ConfigTree::load(&path).unwrap();
    let station = tree.section("Station").unwrap();
    assert_eq!(station.scalar("location"), Some("Hood River, Oregon"));
    assert_eq!(station.scalar("latitude"), Some("45.686"));
    assert_eq!(station.scalar("station_type"), Some("Vantage"));

    let keys: Vec<&str> = station.keys().collect();
    let url_at = keys.iter().position(|k| *k == "station_url").unwrap();
    assert_eq!(keys[url_at + 1], "rain_year_start");
    assert!(!station
        .comments("rain_year_start")
        .iter()
        .any(|line| line.contains("station_url")));

    assert_eq!(
        raw(&tree, &["StdReport", "Defaults"], "unit_system").as_deref(),
        Some("metric")
    );
    let sections: Vec<&str> = tree.root().subsections().map(|(name, _)| name).collect();
    assert_eq!(&sections[..2], &["Station", "Vantage"]);
    assert!(sections.contains(&"Simulator"));
}

#[test]
fn test_failed_reconfigure_leaves_file_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("weewx.conf");
    let registry = DriverRegistry::builtin();
    create_station(
        Some(path.as_path()),
        &quiet_args(),
        &registry,
        &mut no_answers(),
        None,
    )
    .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut args = quiet_args();
    args.altitude = Some("10, parsec".to_string());
    let result = reconfigure_station(
        Some(path.as_path()),
        &args,
        &registry,
        &mut no_answers(),
        None,
    );

    assert!(matches!(result, Err(StationError::InvalidValue { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_config_config_interactive_order() {
    let mut tree = template().unwrap();
    let registry = DriverRegistry::builtin();
    let args = StationArgs::default();
    let mut prompter = ScriptedPrompter::new(["My Station", "", "", "", "n", "", ""]);

    config_config(&mut tree, &args, &registry, &mut prompter, None).unwrap();

    let questions: Vec<&String> = prompter
        .transcript()
        .iter()
        .filter(|line| line.ends_with(": ") || line.ends_with("? "))
        .collect();
    assert_eq!(
        questions,
        vec![
            "Description [WeeWX station]: ",
            "altitude [0, foot]: ",
            "latitude [0.0]: ",
            "longitude [0.0]: ",
            "Include station in the station registry [n]? ",
            "Your choice (us, metricwx, metric) [us]: ",
            "choose a driver [1]: ",
        ]
    );
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(raw(&tree, &["Station"], "location").as_deref(), Some("My Station"));
}
