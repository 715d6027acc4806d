mod prompt;
mod session_store;

use std::borrow::Cow;
use std::io::{self, IsTerminal as _};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use openmeal_client::{
    ApiClient, Body, ClientConfig, Endpoint, LoadingStage, Method, OtpConfirmation, Outcome,
    RequestDescriptor, Session, API_URL_ENV, CONTACT_SUPPORT_MESSAGE,
};
use openmeal_signup::{diner_wizard, DinerSignUpHandler};
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use crate::session_store::DEFAULT_SESSION_FILE;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// OpenMeal command-line client.
#[derive(Parser)]
#[command(name = "openmeal", version, about = "OpenMeal command-line client")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// File the session is kept in between runs
    #[arg(long, global = true, env = "OPENMEAL_SESSION", default_value = DEFAULT_SESSION_FILE)]
    session: PathBuf,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log requests and responses to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign up as a diner, step by step
    SignupDiner,

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Confirm a one-time password and store the session
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },

    /// Confirm a recipient sign-up code and store the session
    ConfirmRecipient {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },

    /// Forget the stored session
    Logout,

    /// List restaurants
    Restaurants,

    /// Show a restaurant's menu
    Menu {
        /// Restaurant id
        restaurant_id: String,
    },

    /// Show donation metrics
    Metrics,

    /// Send a raw request to the backend
    Call {
        /// HTTP method (GET, POST, PUT, DELETE)
        method: String,
        /// Path below the API base URL, e.g. /api/metric
        path: String,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
        /// Send the stored session token
        #[arg(long)]
        auth: bool,
    },
}

/// Everything a command needs besides its own arguments.
struct Context {
    client: ApiClient,
    session_path: PathBuf,
    output: OutputFormat,
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match ClientConfig::resolve(cli.config.as_deref(), cli.api_url.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e.to_string(), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    tracing::debug!(api_url = %config.api_url, "configuration resolved");

    let ctx = Context {
        client: ApiClient::new(&config),
        session_path: cli.session,
        output: cli.output,
        quiet: cli.quiet,
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("failed to create tokio runtime: {}", e),
                ctx.output,
                ctx.quiet,
            );
            process::exit(1);
        }
    };

    let succeeded = rt.block_on(run(cli.command, &ctx));
    if !succeeded {
        process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "off",
        (false, false) => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

async fn run(command: Commands, ctx: &Context) -> bool {
    match command {
        Commands::SignupDiner => cmd_signup_diner(ctx).await,
        Commands::Login { email, password } => {
            let outcome = ctx.client.login(&email, &password).await;
            if let Some(token) = outcome.str_field("token").filter(|_| outcome.is_success()) {
                let mut session = Session::new();
                match session.establish_from_token(token, OffsetDateTime::now_utc()) {
                    Ok(()) => {
                        if !store_session(ctx, &session) {
                            return false;
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "login token could not be decoded"),
                }
            }
            print_outcome(&outcome, ctx.output, ctx.quiet)
        }
        Commands::VerifyOtp { email, otp } => {
            cmd_otp(ctx, OtpConfirmation { otp, email }, false).await
        }
        Commands::ConfirmRecipient { email, otp } => {
            cmd_otp(ctx, OtpConfirmation { otp, email }, true).await
        }
        Commands::Logout => match session_store::clear(&ctx.session_path) {
            Ok(()) => {
                if !ctx.quiet {
                    println!("Logged out.");
                }
                true
            }
            Err(e) => {
                report_error(&e, ctx.output, ctx.quiet);
                false
            }
        },
        Commands::Restaurants => {
            let outcome = ctx.client.restaurants().await;
            print_outcome(&outcome, ctx.output, ctx.quiet)
        }
        Commands::Menu { restaurant_id } => {
            let Some(session) = load_session(ctx) else {
                return false;
            };
            let outcome = ctx.client.menu_items(&session, &restaurant_id).await;
            print_outcome(&outcome, ctx.output, ctx.quiet)
        }
        Commands::Metrics => {
            let outcome = ctx.client.metrics().await;
            print_outcome(&outcome, ctx.output, ctx.quiet)
        }
        Commands::Call {
            method,
            path,
            body,
            auth,
        } => cmd_call(ctx, &method, &path, body.as_deref(), auth).await,
    }
}

async fn cmd_signup_diner(ctx: &Context) -> bool {
    let handler = DinerSignUpHandler::new(ctx.client.clone());
    let mut wizard = match diner_wizard(handler) {
        Ok(w) => w,
        Err(e) => {
            report_error(&e.to_string(), ctx.output, ctx.quiet);
            return false;
        }
    };

    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    let result = match prompt::run_wizard(&mut wizard, &mut input, &mut out).await {
        Ok(r) => r,
        Err(e) => {
            report_error(&e, ctx.output, ctx.quiet);
            return false;
        }
    };

    if !result.is_success() {
        report_error(&result.toast(), ctx.output, ctx.quiet);
        return false;
    }

    match ctx.output {
        OutputFormat::Json => println!("{}", result.outcome.payload()),
        OutputFormat::Text => {
            println!("\n{}\n", result.toast());
            for line in result.success_view() {
                println!("{}", line);
            }
        }
    }
    true
}

async fn cmd_otp(ctx: &Context, confirmation: OtpConfirmation, recipient: bool) -> bool {
    let Some(mut session) = load_session(ctx) else {
        return false;
    };
    let outcome = if recipient {
        ctx.client
            .confirm_recipient_otp(&mut session, &confirmation)
            .await
    } else {
        ctx.client.verify_otp(&mut session, &confirmation).await
    };

    if outcome.is_success() && !store_session(ctx, &session) {
        return false;
    }
    print_outcome(&outcome, ctx.output, ctx.quiet)
}

async fn cmd_call(ctx: &Context, method: &str, path: &str, body: Option<&str>, auth: bool) -> bool {
    let Some(method) = Method::parse(method) else {
        report_error(
            &format!("unsupported method '{}' (use GET, POST, PUT or DELETE)", method),
            ctx.output,
            ctx.quiet,
        );
        return false;
    };

    let body = match body {
        None => Body::Empty,
        Some(text) => match serde_json::from_str(text) {
            Ok(value) => Body::Json(value),
            Err(e) => {
                report_error(&format!("invalid JSON body: {}", e), ctx.output, ctx.quiet);
                return false;
            }
        },
    };

    let mut descriptor = RequestDescriptor {
        endpoint: Endpoint::Custom(path.to_string()),
        method,
        needs_auth: false,
        body,
    };
    let session = if auth {
        descriptor = descriptor.authenticated();
        match load_session(ctx) {
            Some(s) => s,
            None => return false,
        }
    } else {
        Session::new()
    };

    let mut stage = LoadingStage::NotAttempted;
    tracing::debug!(stage = LoadingStage::Loading.label(), path, "raw call");
    let outcome = ctx
        .client
        .perform_tracked(descriptor, &session, &mut stage)
        .await;
    tracing::debug!(stage = stage.label(), path, "raw call finished");
    print_outcome(&outcome, ctx.output, ctx.quiet)
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn load_session(ctx: &Context) -> Option<Session> {
    match session_store::load(&ctx.session_path) {
        Ok(session) => Some(session),
        Err(e) => {
            report_error(&e, ctx.output, ctx.quiet);
            None
        }
    }
}

fn store_session(ctx: &Context, session: &Session) -> bool {
    match session_store::save(&ctx.session_path, session) {
        Ok(()) => {
            if !ctx.quiet && ctx.output == OutputFormat::Text {
                eprintln!(
                    "Signed in as {} ({}); session saved to {}",
                    session.email().unwrap_or_default(),
                    session.user_type().unwrap_or_default(),
                    ctx.session_path.display()
                );
            }
            true
        }
        Err(e) => {
            report_error(&e, ctx.output, ctx.quiet);
            false
        }
    }
}

/// Print a call's result. Success payloads go to stdout; failures are
/// reported on stderr with whatever the server sent, or the support line
/// when it sent nothing. Returns whether the call succeeded.
fn print_outcome(outcome: &Outcome, output: OutputFormat, quiet: bool) -> bool {
    match outcome {
        Outcome::Success(payload) => {
            match output {
                OutputFormat::Json => println!("{}", payload),
                OutputFormat::Text => println!(
                    "{}",
                    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
                ),
            }
            true
        }
        Outcome::Failure(payload) => {
            if !quiet {
                match output {
                    OutputFormat::Json if !payload.is_null() => eprintln!("{}", payload),
                    _ => report_error(
                        &outcome
                            .user_message()
                            .unwrap_or(Cow::Borrowed(CONTACT_SUPPORT_MESSAGE)),
                        output,
                        quiet,
                    ),
                }
            }
            false
        }
    }
}

/// Report an error in the requested output format on stderr.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
