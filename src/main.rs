use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod invocation;
#[cfg(test)]
mod stub;
pub(crate) mod telegram;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console (only used by `send`)")]
    log_to_console: bool,
}

#[derive(Debug, Clone, Copy, clap::Subcommand)]
enum Command {
    /// Serve invocations from the Lambda runtime API (default)
    Lambda,
    /// Send the greeting once and print the result as JSON
    Send,
}

async fn handler(
    event: lambda_runtime::LambdaEvent<serde_json::Value>,
) -> Result<invocation::InvocationResult, lambda_runtime::Error> {
    // Read on every invocation, the platform may change the environment between them.
    handle_event(&CLIENT, event, config::Config::from_env()).await
}

async fn handle_event(
    client: &reqwest::Client,
    event: lambda_runtime::LambdaEvent<serde_json::Value>,
    config: config::Config,
) -> Result<invocation::InvocationResult, lambda_runtime::Error> {
    tracing::info!(
        request_id = event.context.request_id,
        config =? config,
        "Invocation started"
    );

    Ok(invocation::invoke(client, &config).await?)
}

async fn send_once() -> anyhow::Result<()> {
    let config = config::Config::from_env();
    let result = invocation::invoke(&CLIENT, &config).await?;

    tracing::info!(result =? result, "Morning greeting sent");
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}

fn init_lambda_logging() {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    // The platform timestamps every line itself.
    let stdout_layer = tracing_subscriber::fmt::layer()
        .json()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stdout)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    tracing_subscriber::registry().with(stdout_layer).init();
}

fn init_local_logging(log_to_console: bool) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    let file_appender = tracing_appender::rolling::daily("./log", "morning_notifier.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    // stderr, stdout carries the result.
    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;
    let args = Args::parse();

    // Deployed functions get their environment from the platform, a .env is for local runs.
    let _ = dotenvy::dotenv();

    match args.command.unwrap_or(Command::Lambda) {
        Command::Lambda => {
            init_lambda_logging();
            tracing::info!(args =? args, "Starting morning notifier under the Lambda runtime");

            lambda_runtime::run(lambda_runtime::service_fn(handler))
                .await
                .map_err(|e| anyhow::anyhow!(e))
        }
        Command::Send => {
            let log_to_console = config::Config::from_env().log_to_console || args.log_to_console;
            let _guard = init_local_logging(log_to_console);
            tracing::info!(args =? args, "Starting morning notifier");

            let res = send_once().await;
            if let Err(e) = &res {
                tracing::error!(error =? e, "Error when sending morning greeting");
            }
            res
        }
    }
}
