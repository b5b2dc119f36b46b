use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use session_shell::net::api::AuthClient;
use session_shell::net::config::ClientConfig;
use session_shell::net::transport::{ReqwestTransport, TransportError};
use session_shell::net::types::AuthOutcome;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{action} rejected with HTTP {status}")]
    Rejected { action: &'static str, status: u16 },
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "shell-cli", about = "Session auth API CLI")]
struct Cli {
    #[arg(long, env = "SHELL_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[arg(long, env = "SHELL_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    connect_timeout_secs: u64,

    #[arg(long, env = "SHELL_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Session cookie printed by an earlier `login`, e.g. `fastapiusersauth=...`.
    #[arg(long, env = "SHELL_SESSION_COOKIE", hide_env_values = true)]
    session_cookie: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long)]
    email: String,

    #[arg(long, env = "SHELL_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password.
    Login(Credentials),
    /// Register an account, then sign in.
    Signup(Credentials),
    /// End the session given by `--session-cookie`.
    Logout,
    /// Print the user of the session given by `--session-cookie`.
    Whoami,
    /// Login, whoami and logout against one cookie jar.
    Session(Credentials),
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            connect_timeout_secs: self.connect_timeout_secs,
            request_timeout_secs: self.request_timeout_secs,
            session_cookie: self.session_cookie.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let transport = ReqwestTransport::new(&cli.client_config())?;
    tracing::debug!(base_url = transport.base_url(), "client ready");
    let client = AuthClient::new(transport);

    match cli.command {
        Command::Login(creds) => run_login(&client, &creds).await,
        Command::Signup(creds) => run_signup(&client, &creds).await,
        Command::Logout => run_logout(&client).await,
        Command::Whoami => run_whoami(&client).await,
        Command::Session(creds) => run_session(&client, &creds).await,
    }
}

type Client = AuthClient<ReqwestTransport>;

async fn run_login(client: &Client, creds: &Credentials) -> Result<(), CliError> {
    let outcome = client.login(creds.email.trim(), &creds.password).await?;
    print_outcome("login", outcome)?;
    print_session_cookie(client)
}

async fn run_signup(client: &Client, creds: &Credentials) -> Result<(), CliError> {
    let email = creds.email.trim();
    let outcome = client.signup(email, &creds.password).await?;
    print_outcome("signup", outcome)?;
    let outcome = client.login(email, &creds.password).await?;
    print_outcome("login", outcome)?;
    print_session_cookie(client)
}

async fn run_logout(client: &Client) -> Result<(), CliError> {
    let outcome = client.logout().await?;
    print_outcome("logout", outcome)
}

async fn run_whoami(client: &Client) -> Result<(), CliError> {
    let Some(user) = client.fetch_current_user().await? else {
        return Err(CliError::NotSignedIn);
    };
    print_json(&serde_json::to_value(&user)?)
}

async fn run_session(client: &Client, creds: &Credentials) -> Result<(), CliError> {
    let outcome = client.login(creds.email.trim(), &creds.password).await?;
    print_outcome("login", outcome)?;
    let whoami = run_whoami(client).await;
    // The session is closed even when whoami fails.
    run_logout(client).await?;
    whoami
}

fn print_outcome(action: &'static str, outcome: AuthOutcome) -> Result<(), CliError> {
    print_json(&json!({ "action": action, "outcome": outcome }))?;
    if !outcome.success {
        tracing::warn!(action, status = outcome.status, "request rejected");
        return Err(CliError::Rejected { action, status: outcome.status });
    }
    Ok(())
}

/// Print the cookie to pass back as `--session-cookie` on later runs.
fn print_session_cookie(client: &Client) -> Result<(), CliError> {
    match client.transport().session_cookie() {
        Some(cookie) => print_json(&json!({ "session_cookie": cookie })),
        None => {
            tracing::warn!("login succeeded but the server set no session cookie");
            Ok(())
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
