use clap::{CommandFactory, FromArgMatches, Parser};
use qtsp::config::{schedule_string, Config, OracleKind, OracleSettings};
use qtsp::error::QtspError;
use qtsp::oracle::{OracleParams, REFERENCE_THETA_X, REFERENCE_THETA_Z};
use qtsp::sampler::SamplingOptions;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse_cli(args: &[&str]) -> (Config, clap::ArgMatches) {
    let mut argv = vec!["qtsp"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_defaults_match_reference_run() {
    let cfg = Config::default();
    assert_eq!(cfg.sampling.trials, 1000);
    assert_eq!(cfg.sampling.batch_size, 100);
    assert_eq!(cfg.sampling.threads, 1);
    assert!(cfg.sampling.seed.is_none());
    assert_eq!(cfg.oracle.penalty, 20.0);
    assert_eq!(cfg.oracle.depth, 5);
    assert_eq!(cfg.oracle.oracle, OracleKind::Boltzmann);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_clap_defaults_equal_struct_defaults() {
    let (cli, _) = parse_cli(&[]);
    let def = Config::default();
    assert_eq!(cli.sampling.trials, def.sampling.trials);
    assert_eq!(cli.sampling.batch_size, def.sampling.batch_size);
    assert_eq!(cli.oracle.theta_x, def.oracle.theta_x);
    assert_eq!(cli.oracle.theta_z, def.oracle.theta_z);
    assert_eq!(cli.oracle.temperature, def.oracle.temperature);
    assert_eq!(cli.oracle.pattern, def.oracle.pattern);
}

#[test]
fn test_default_settings_resolve_to_reference_params() {
    let params = OracleSettings::default().resolve().unwrap();
    assert_eq!(params, OracleParams::default());
    assert_eq!(params.theta_x.len(), 5);
    assert_eq!(params.theta_x[3], -1.568955);
}

#[test]
fn test_cli_default_schedules_are_the_reference_constants() {
    let (cli, _) = parse_cli(&[]);
    assert_eq!(cli.oracle.theta_x, "0.619193,0.742566,0.060035,-1.568955,0.04549");
    let params = cli.oracle.resolve().unwrap();
    assert_eq!(params.theta_x, REFERENCE_THETA_X.to_vec());
    assert_eq!(params.theta_z, REFERENCE_THETA_Z.to_vec());
    assert_eq!(params, OracleParams::default());
}

#[test]
fn test_theta_length_must_match_depth() {
    let settings = OracleSettings {
        depth: 4,
        ..Default::default()
    };
    match settings.resolve() {
        Err(QtspError::Config(msg)) => assert!(msg.contains("--theta-x"), "{}", msg),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_bad_theta_number() {
    let settings = OracleSettings {
        theta_z: "1.0,abc,3.0,4.0,5.0".to_string(),
        ..Default::default()
    };
    let err = settings.resolve().unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().contains("'abc'"));
}

#[test]
fn test_validate_rejects_zero_batch_and_bad_temperature() {
    let mut cfg = Config::default();
    cfg.sampling.batch_size = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.oracle.temperature = 0.0;
    assert!(cfg.validate().is_err());

    cfg.oracle.temperature = f64::INFINITY;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "sampling": {{ "trials": 250, "seed": 7 }}, "oracle": {{ "oracle": "fixed" }} }}"#
    )
    .unwrap();

    let cfg = Config::load_from_file(file.path()).unwrap();
    assert_eq!(cfg.sampling.trials, 250);
    assert_eq!(cfg.sampling.seed, Some(7));
    assert_eq!(cfg.sampling.batch_size, 100);
    assert_eq!(cfg.oracle.oracle, OracleKind::Fixed);
    assert_eq!(cfg.oracle.theta_x, schedule_string(&REFERENCE_THETA_X));
}

#[test]
fn test_missing_and_broken_files() {
    assert!(matches!(
        Config::load_from_file("/definitely/not/here.json"),
        Err(QtspError::Io(_))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(file.path()),
        Err(QtspError::Json(_))
    ));
}

#[test]
fn test_explicit_flags_override_file_values() {
    let mut file_cfg = Config::default();
    file_cfg.sampling.trials = 250;
    file_cfg.sampling.batch_size = 25;
    file_cfg.oracle.penalty = 5.0;

    let (cli, matches) = parse_cli(&["--trials", "40", "--oracle", "fixed"]);
    file_cfg.merge_from_cli(&cli, &matches);

    // typed on the command line
    assert_eq!(file_cfg.sampling.trials, 40);
    assert_eq!(file_cfg.oracle.oracle, OracleKind::Fixed);
    // clap defaults must not clobber the file
    assert_eq!(file_cfg.sampling.batch_size, 25);
    assert_eq!(file_cfg.oracle.penalty, 5.0);
}

#[test]
fn test_negative_theta_values_parse_from_cli() {
    let (cli, _) = parse_cli(&["--theta-x", "-1,-2", "--theta-z", "-3,4", "--depth", "2"]);
    let params = cli.oracle.resolve().unwrap();
    assert_eq!(params.theta_x, vec![-1.0, -2.0]);
    assert_eq!(params.theta_z, vec![-3.0, 4.0]);
}

#[test]
fn test_sampling_options_from_config() {
    let mut cfg = Config::default();
    cfg.sampling.seed = Some(3);
    cfg.sampling.max_time_secs = Some(10);
    cfg.sampling.threads = 0;

    let opts = SamplingOptions::from(&cfg);
    assert_eq!(opts.trials, 1000);
    assert_eq!(opts.seed, Some(3));
    assert_eq!(opts.max_time, Some(Duration::from_secs(10)));
    assert!(opts.num_threads >= 1);
}

#[test]
fn test_oracle_kind_names() {
    assert_eq!(OracleKind::from_str("boltzmann").unwrap(), OracleKind::Boltzmann);
    assert_eq!(OracleKind::Fixed.to_string(), "fixed");
    assert!(OracleKind::from_str("qaoa").is_err());
}
