use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileStrategy};
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use gridrace::engine::config::{self as core_config, SolveConfig};
use std::str::FromStr;
use std::time::Duration;

/// Merges CLI flags over `-S` overrides over the config file over built-in defaults.
pub fn build_config(args: &RunArgs, threads: Option<usize>) -> Result<SolveConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let dispatch_file = file_config.dispatch.unwrap_or_default();
    let racer_file = file_config.racer.unwrap_or_default();
    let limits_file = file_config.limits.unwrap_or_default();

    let strategy = args
        .strategy
        .map(Into::into)
        .or(file_config.strategy.map(Into::into))
        .unwrap_or(defaults.strategy);
    let workers = args
        .workers
        .or(dispatch_file.workers)
        .unwrap_or(defaults.workers);
    let result_timeout = seconds(
        "dispatch.result-timeout-secs",
        args.result_timeout
            .or(dispatch_file.result_timeout_secs)
            .or(defaults.result_timeout_secs),
    )?;
    let time_limit = seconds(
        "limits.time-limit-secs",
        args.time_limit
            .or(limits_file.time_limit_secs)
            .or(defaults.time_limit_secs),
    )?;
    let min_clues = args
        .min_clues
        .or(limits_file.min_clues)
        .unwrap_or(defaults.min_clues);
    let reject_conflicting_clues = if args.allow_conflicting_clues {
        false
    } else {
        limits_file
            .reject_conflicting_clues
            .unwrap_or(defaults.reject_conflicting_clues)
    };

    let mut builder = core_config::SolveConfigBuilder::new()
        .strategy(strategy)
        .num_workers(workers)
        .result_timeout(result_timeout)
        .time_limit(time_limit)
        .min_clues(min_clues)
        .reject_conflicting_clues(reject_conflicting_clues);
    if let Some(threads) = threads.or(racer_file.threads) {
        builder = builder.threads_per_worker(threads);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn seconds(key: &str, value: Option<f64>) -> Result<Option<Duration>> {
    value
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|_| {
                CliError::Config(format!(
                    "Invalid duration for {}: {} (expected non-negative seconds)",
                    key, secs
                ))
            })
        })
        .transpose()
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "strategy" => {
                config.strategy = Some(FileStrategy::parse(value_str).ok_or_else(|| {
                    CliError::Config(format!(
                        "Invalid value for strategy: '{}' (expected 'sequential' or 'race')",
                        value_str
                    ))
                })?);
            }
            "dispatch.workers" => {
                config
                    .dispatch
                    .get_or_insert_with(Default::default)
                    .workers = Some(parse_value(key, value_str, "integer")?);
            }
            "dispatch.result-timeout-secs" => {
                config
                    .dispatch
                    .get_or_insert_with(Default::default)
                    .result_timeout_secs = Some(parse_value(key, value_str, "float")?);
            }
            "racer.threads" => {
                config.racer.get_or_insert_with(Default::default).threads =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "limits.time-limit-secs" => {
                config
                    .limits
                    .get_or_insert_with(Default::default)
                    .time_limit_secs = Some(parse_value(key, value_str, "float")?);
            }
            "limits.min-clues" => {
                config.limits.get_or_insert_with(Default::default).min_clues =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "limits.reject-conflicting-clues" => {
                config
                    .limits
                    .get_or_insert_with(Default::default)
                    .reject_conflicting_clues = Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
