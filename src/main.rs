//! tnb-calc entry point: CLI wiring, exports and the REST server.

mod cli;

use std::process;

use tnb_calc::config::ServiceConfig;
use tnb_calc::io::export::{
    SWEEP_CURRENTS_A, SWEEP_LENGTHS_M, export_cable_catalogue, export_sizing_sweep,
};

fn load_config(cli: &cli::CliOptions) -> ServiceConfig {
    let mut config = match cli.config {
        Some(ref path) => ServiceConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => ServiceConfig::default(),
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });

    let config = load_config(&cli);
    tnb_calc::logging::init(&config.logging.level);

    if let Some(ref path) = cli.export_cables {
        if let Err(e) = export_cable_catalogue(path) {
            tracing::error!(path = %path.display(), error = %e, "failed to write cable catalogue");
            process::exit(1);
        }
        tracing::info!(path = %path.display(), "cable catalogue written");
    }

    if let Some(ref path) = cli.export_sweep {
        if let Err(e) = export_sizing_sweep(
            path,
            cli.sweep_voltage,
            cli.sweep_material,
            SWEEP_CURRENTS_A,
            SWEEP_LENGTHS_M,
        ) {
            tracing::error!(path = %path.display(), error = %e, "failed to write sizing sweep");
            process::exit(1);
        }
        tracing::info!(
            path = %path.display(),
            voltage = cli.sweep_voltage,
            material = %cli.sweep_material,
            "cable sizing sweep written"
        );
    }

    if cli.should_serve() {
        serve(config);
    }
}

#[cfg(feature = "api")]
fn serve(config: ServiceConfig) {
    use std::net::{IpAddr, SocketAddr};
    use std::sync::Arc;

    let ip: IpAddr = config.server.host.parse().unwrap_or_else(|e| {
        eprintln!(
            "config error: server.host: \"{}\" is not an IP address: {e}",
            config.server.host
        );
        process::exit(1);
    });
    let addr = SocketAddr::new(ip, config.server.port);
    let state = Arc::new(tnb_calc::api::AppState { config });

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(tnb_calc::api::serve(state, addr)) {
        tracing::error!(%addr, error = %e, "API server stopped");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_config: ServiceConfig) {
    tracing::warn!("built without the `api` feature; nothing to serve");
}
