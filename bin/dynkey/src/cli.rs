//! Command-line parser and command dispatch.

use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use dynkey_builders::{Role, build_messaging_token, build_session_token};
use dynkey_token::{ParsedToken, Privilege, uid_to_account};
use eyre::{Result, bail};
use tracing::info;

use crate::logging::{self, LogArgs};

/// Default token lifetime in seconds.
const DEFAULT_TTL_SECS: u32 = 3600;

/// Issue and inspect dynkey privilege tokens.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Logging configuration (applies to all subcommands).
    #[command(flatten)]
    logs: LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a real-time communication session token.
    Rtc(RtcArgs),
    /// Build a real-time messaging login token.
    Rtm(RtmArgs),
    /// Decode a token and print its fields.
    Inspect(InspectArgs),
}

/// Application identity.
#[derive(Debug, Args)]
#[command(next_help_heading = "Application")]
struct AppArgs {
    /// 32-character application id.
    #[arg(long = "app-id", env = "DYNKEY_APP_ID", value_name = "ID")]
    app_id: String,

    /// Application certificate used as the signing key.
    #[arg(
        long = "app-certificate",
        env = "DYNKEY_APP_CERTIFICATE",
        hide_env_values = true,
        value_name = "SECRET"
    )]
    certificate: String,
}

/// Privilege expiration, absolute or relative to now.
#[derive(Debug, Args)]
#[command(next_help_heading = "Expiration")]
struct ExpiryArgs {
    /// Absolute expiration as Unix seconds.
    #[arg(long = "expire-at", value_name = "UNIX_SECS", conflicts_with = "ttl")]
    expire_at: Option<u32>,

    /// Lifetime in seconds from now.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TTL_SECS)]
    ttl: u32,
}

impl ExpiryArgs {
    fn resolve(&self, now: u32) -> u32 {
        self.expire_at
            .unwrap_or_else(|| now.saturating_add(self.ttl))
    }
}

#[derive(Debug, Args)]
struct RtcArgs {
    #[command(flatten)]
    app: AppArgs,

    /// Channel name the token is scoped to.
    #[arg(long)]
    channel: String,

    /// User account. Omit (or use --uid 0) for any user.
    #[arg(long, conflicts_with = "uid")]
    account: Option<String>,

    /// Integer user id; 0 means any user.
    #[arg(long)]
    uid: Option<u32>,

    /// Role; attendee, publisher and admin also receive publish grants.
    #[arg(long, value_enum, default_value_t = Role::Subscriber)]
    role: Role,

    #[command(flatten)]
    expiry: ExpiryArgs,
}

impl RtcArgs {
    fn user(&self) -> String {
        match (&self.account, self.uid) {
            (Some(account), _) => account.clone(),
            (None, Some(uid)) => uid_to_account(uid),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Args)]
struct RtmArgs {
    #[command(flatten)]
    app: AppArgs,

    /// User account to log in as.
    #[arg(long)]
    account: String,

    #[command(flatten)]
    expiry: ExpiryArgs,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Token string.
    token: String,

    /// Check the token's channel checksum against this channel.
    #[arg(long)]
    channel: Option<String>,

    /// Check the token's user checksum against this user account.
    #[arg(long, requires = "channel")]
    user: Option<String>,
}

fn unix_now() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// Parse arguments, set up logging and run the selected command.
pub(crate) fn run() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(&cli.logs)?;

    match cli.command {
        Commands::Rtc(args) => {
            let expire_at = args.expiry.resolve(unix_now());
            let token = build_session_token(
                &args.app.app_id,
                args.app.certificate.as_str(),
                &args.channel,
                &args.user(),
                args.role,
                expire_at,
            )?;
            info!(channel = %args.channel, role = %args.role, expire_at, "issued session token");
            println!("{token}");
        }
        Commands::Rtm(args) => {
            let expire_at = args.expiry.resolve(unix_now());
            let token = build_messaging_token(
                &args.app.app_id,
                args.app.certificate.as_str(),
                &args.account,
                expire_at,
            )?;
            info!(expire_at, "issued messaging token");
            println!("{token}");
        }
        Commands::Inspect(args) => inspect(&args)?,
    }

    Ok(())
}

fn inspect(args: &InspectArgs) -> Result<()> {
    let token = ParsedToken::parse(args.token.trim())?;

    println!("version:     {}", token.version());
    println!("app id:      {}", token.app_id());
    println!("signature:   {}", token.signature_hex());
    println!("crc channel: {:#010x}", token.crc_channel());
    println!("crc user:    {:#010x}", token.crc_user());
    println!("salt:        {}", token.salt());
    println!("issued at:   {}", token.issued_at());
    println!("privileges:");
    for (code, expire_at) in token.privileges().iter() {
        match Privilege::from_repr(code) {
            Some(privilege) => println!("  {privilege} ({code}): {expire_at}"),
            None => println!("  unknown ({code}): {expire_at}"),
        }
    }

    if let Some(channel) = &args.channel {
        let user = args.user.as_deref().unwrap_or_default();
        if !token.matches_scope(channel, user) {
            bail!("token scope does not match channel {channel:?} and user {user:?}");
        }
        println!("scope:       match");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const APP_ID: &str = "970CA35de60c44645bbae8a215061b33";

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rtc_args() {
        let cli = Cli::try_parse_from([
            "dynkey",
            "rtc",
            "--app-id",
            APP_ID,
            "--app-certificate",
            "secret",
            "--channel",
            "room",
            "--uid",
            "0",
            "--role",
            "publisher",
            "--expire-at",
            "1446455471",
        ])
        .unwrap();

        let Commands::Rtc(args) = cli.command else {
            panic!("expected rtc command");
        };
        assert_eq!(args.role, Role::Publisher);
        assert_eq!(args.user(), "");
        assert_eq!(args.expiry.resolve(0), 1_446_455_471);
    }

    #[test]
    fn test_account_conflicts_with_uid() {
        let result = Cli::try_parse_from([
            "dynkey",
            "rtc",
            "--app-id",
            APP_ID,
            "--app-certificate",
            "secret",
            "--channel",
            "room",
            "--uid",
            "7",
            "--account",
            "alice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ttl_is_relative() {
        let cli = Cli::try_parse_from([
            "dynkey",
            "rtm",
            "--app-id",
            APP_ID,
            "--app-certificate",
            "secret",
            "--account",
            "bob",
            "--ttl",
            "60",
        ])
        .unwrap();

        let Commands::Rtm(args) = cli.command else {
            panic!("expected rtm command");
        };
        assert_eq!(args.expiry.resolve(1_000), 1_060);
        assert_eq!(args.expiry.resolve(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        let cli = Cli::try_parse_from(["dynkey", "-q", "-vv", "inspect", "006"]).unwrap();
        assert!(cli.logs.quiet);
        assert_eq!(cli.logs.verbosity, 2);
        assert_eq!(cli.logs.env_filter().to_string(), "error");
    }
}
