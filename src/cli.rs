use std::env;
use std::path::PathBuf;

use tnb_calc::tables::CableMaterial;

/// Parsed CLI arguments.
#[derive(Debug)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub export_cables: Option<PathBuf>,
    pub export_sweep: Option<PathBuf>,
    pub sweep_voltage: f64,
    pub sweep_material: CableMaterial,
    pub serve: bool,
}

impl CliOptions {
    /// The server runs when asked to, or when there is nothing else to do.
    pub fn should_serve(&self) -> bool {
        self.serve || (self.export_cables.is_none() && self.export_sweep.is_none())
    }
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        config: None,
        port: None,
        export_cables: None,
        export_sweep: None,
        sweep_voltage: 400.0,
        sweep_material: CableMaterial::Copper,
        serve: false,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(port);
            }
            "--export-cables" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --export-cables (expected a file path)",
                )?;
                opts.export_cables = Some(PathBuf::from(path));
            }
            "--export-sweep" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --export-sweep (expected a file path)",
                )?;
                opts.export_sweep = Some(PathBuf::from(path));
            }
            "--sweep-voltage" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --sweep-voltage (expected volts)",
                )?;
                opts.sweep_voltage = match raw.parse::<f64>() {
                    Ok(v) if v > 0.0 => v,
                    _ => {
                        return Err(format!(
                            "--sweep-voltage value \"{raw}\" must be a positive number"
                        ));
                    }
                };
            }
            "--sweep-material" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --sweep-material (copper or aluminum)",
                )?;
                opts.sweep_material = raw.parse()?;
            }
            "--serve" => opts.serve = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("tnb-calc: electrical design calculators for TNB / MS IEC installations");
    eprintln!();
    eprintln!("Usage: tnb-calc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>           Load service configuration from a TOML file");
    eprintln!("  --port <u16>              Override server.port");
    eprintln!("  --export-cables <path>    Write the cable catalogue to CSV");
    eprintln!("  --export-sweep <path>     Write a cable-sizing sweep to CSV");
    eprintln!("  --sweep-voltage <volts>   Sweep voltage (default: 400)");
    eprintln!("  --sweep-material <name>   Sweep material: copper or aluminum (default: copper)");
    eprintln!("  --serve                   Start the REST API after exporting");
    eprintln!("  --help                    Show this help message");
    eprintln!();
    eprintln!("Without an export option the REST API is started.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_serves_with_defaults() {
        let opts = parse_args_from(&[]).expect("parse should succeed");
        assert!(opts.config.is_none());
        assert!(opts.should_serve());
        assert_eq!(opts.sweep_voltage, 400.0);
    }

    #[test]
    fn export_alone_does_not_serve() {
        let opts = parse_args_from(&args(&["--export-cables", "cables.csv"]))
            .expect("parse should succeed");
        assert!(!opts.should_serve());

        let opts = parse_args_from(&args(&["--export-cables", "cables.csv", "--serve"]))
            .expect("parse should succeed");
        assert!(opts.should_serve());
    }

    #[test]
    fn config_and_port_are_parsed() {
        let opts = parse_args_from(&args(&["--config", "svc.toml", "--port", "8080"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.config.as_deref().and_then(|p| p.to_str()),
            Some("svc.toml")
        );
        assert_eq!(opts.port, Some(8080));
    }

    #[test]
    fn sweep_material_parses() {
        let opts = parse_args_from(&args(&["--sweep-material", "aluminium"]))
            .expect("parse should succeed");
        assert_eq!(opts.sweep_material, CableMaterial::Aluminum);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse_args_from(&args(&["--port", "http"])).is_err());
        assert!(parse_args_from(&args(&["--sweep-voltage", "-1"])).is_err());
        assert!(parse_args_from(&args(&["--config"])).is_err());
        assert!(parse_args_from(&args(&["--config", "a", "--config", "b"])).is_err());
        assert!(parse_args_from(&args(&["--bogus"])).is_err());
    }
}
