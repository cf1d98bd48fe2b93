use super::*;
use std::path::PathBuf;

use station_config::UnitSystem;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("weectl").chain(args.iter().copied()))
}

#[test]
fn test_parse_station_create_with_options() {
    let cli = parse(&[
        "station",
        "create",
        "--config",
        "/tmp/weewx.conf",
        "--driver",
        "weewx.drivers.vantage",
        "--altitude",
        "-10, meter",
        "--latitude",
        "-33.9",
        "--longitude",
        "18.4",
        "--register",
        "n",
        "--units",
        "metric",
        "--no-prompt",
    ])
    .unwrap();

    match cli.command {
        Commands::Station(StationCommands::Create(options)) => {
            assert_eq!(options.config, Some(PathBuf::from("/tmp/weewx.conf")));
            assert_eq!(options.driver.as_deref(), Some("weewx.drivers.vantage"));
            assert_eq!(options.altitude.as_deref(), Some("-10, meter"));
            assert_eq!(options.latitude.as_deref(), Some("-33.9"));
            assert_eq!(options.longitude.as_deref(), Some("18.4"));
            assert_eq!(options.register, Some(false));
            assert_eq!(options.units, Some(UnitSystem::Metric));
            assert!(options.no_prompt);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_station_reconfigure_defaults() {
    let cli = parse(&["station", "reconfigure"]).unwrap();

    match cli.command {
        Commands::Station(StationCommands::Reconfigure(options)) => {
            assert_eq!(options.config, None);
            assert_eq!(options.register, None);
            assert!(!options.no_prompt);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_list_drivers() {
    let cli = parse(&["station", "list-drivers"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Station(StationCommands::ListDrivers)
    ));
}

#[test]
fn test_parse_rejects_unknown_unit_system() {
    let result = parse(&["station", "create", "--units", "imperial"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_bad_register_value() {
    let result = parse(&["station", "create", "--register", "perhaps"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_version() {
    let cli = parse(&["version"]).unwrap();
    assert!(matches!(cli.command, Commands::Version));
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
