// SPDX-License-Identifier: MPL-2.0
use haskellito::app::{paths, App, Flags};
use haskellito::domain::ChallengeId;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
haskellito

USAGE:
  haskellito [OPTIONS] [CHALLENGE_ID]

OPTIONS:
  --lang <LANG>          Interface language (en, es)
  --api-base <URL>       Backend base URL
  --fetch                List challenges, or open CHALLENGE_ID when given
  --eval <CODE>          Evaluate CODE in a playground session
  --data-dir <PATH>      Data directory (durable store)
  --config-dir <PATH>    Config directory (settings.toml)
  -h, --help             Print this help
";

struct Args {
    flags: Flags,
    fetch: bool,
    eval: Option<String>,
    challenge: Option<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        api_base: args.opt_value_from_str("--api-base")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };
    let fetch = args.contains("--fetch");
    let eval = args.opt_value_from_str("--eval")?;
    let challenge = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Args {
        flags,
        fetch,
        eval,
        challenge,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut raw = pico_args::Arguments::from_env();
    if raw.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("error: {error}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(args.flags.data_dir.clone(), args.flags.config_dir.clone());

    let mut app = match App::bootstrap(args.flags) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    for warning in app.warnings() {
        eprintln!("{}", app.tr(warning));
    }

    if let Some(code) = args.eval {
        return match evaluate(&mut app, &code).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => report(&app, &error),
        };
    }

    if !args.fetch {
        println!("{} ({})", app.tr("app-title"), app.session.locale.get_locale());
        return ExitCode::SUCCESS;
    }

    let result = match args.challenge {
        Some(id) => show_challenge(&app, &ChallengeId::from(id)).await,
        None => list_challenges(&app).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&app, &error),
    }
}

fn report(app: &App, error: &haskellito::error::Error) -> ExitCode {
    tracing::error!(%error, "request failed");
    eprintln!("{}: {error}", app.tr("error-network"));
    ExitCode::FAILURE
}

async fn evaluate(app: &mut App, code: &str) -> haskellito::error::Result<()> {
    let output = app.eval(code).await;
    // The session is closed even when evaluation failed.
    let closed = app.close_playground().await;
    println!("{}", output?);
    closed
}

async fn list_challenges(app: &App) -> haskellito::error::Result<()> {
    println!("{}", app.tr("challenge-list-title"));
    for challenge in app.challenges().await? {
        println!("  {:>4}  {}", challenge.id.as_str(), challenge.title);
    }
    Ok(())
}

async fn show_challenge(app: &App, id: &ChallengeId) -> haskellito::error::Result<()> {
    let (detail, code) = app.open_challenge(id).await?;
    println!("{}\n\n{}\n", detail.title, detail.description);
    if detail.test_count > 0 {
        println!("{}", app.tests_summary(id, detail.test_count));
    }
    println!("{code}");
    Ok(())
}
