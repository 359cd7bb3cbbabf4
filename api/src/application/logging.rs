use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::LogArgs;

/// Installs the global tracing subscriber. `RUST_LOG` wins over `--log-filter` when set.
pub fn init_logging(args: &LogArgs) -> Result<(), anyhow::Error> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.filter))?
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    let registry = tracing_subscriber::registry().with(env_filter);

    if args.json {
        registry
            .with(fmt::layer().with_target(true).json())
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}
