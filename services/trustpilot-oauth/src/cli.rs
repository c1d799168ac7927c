//! Command-line parsing
//!
//! Deliberately minimal hand-rolled parsing: a global `--config <path>`
//! flag plus one subcommand with its own positional args and flags.

use anyhow::{Context, Result, bail};

pub const USAGE: &str = "\
usage: trustpilot-oauth [--config <path>] <command>

commands:
  client-credentials
  password <username>                        (password from TRUSTPILOT_PASSWORD)
  authorization-code <code> [--redirect-uri <uri>]
  refresh <refresh_token>
  revoke <refresh_token>
  authorize-url [--redirect-uri <uri>] [--state <state> | --generate-state] [--scope <scope>]...";

#[derive(Debug, PartialEq, Eq)]
pub struct Cli {
    pub config_path: Option<String>,
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    ClientCredentials,
    Password {
        username: String,
    },
    AuthorizationCode {
        code: String,
        redirect_uri: Option<String>,
    },
    Refresh {
        refresh_token: String,
    },
    Revoke {
        refresh_token: String,
    },
    AuthorizeUrl {
        redirect_uri: Option<String>,
        state: Option<String>,
        generate_state: bool,
        scopes: Vec<String>,
    },
}

/// Parse arguments (without the program name).
pub fn parse<I>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut positional = Vec::new();
    let mut redirect_uri = None;
    let mut state = None;
    let mut generate_state = false;
    let mut scopes = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(flag_value(&mut args, "--config")?),
            "--redirect-uri" => redirect_uri = Some(flag_value(&mut args, "--redirect-uri")?),
            "--state" => state = Some(flag_value(&mut args, "--state")?),
            "--scope" => scopes.push(flag_value(&mut args, "--scope")?),
            "--generate-state" => generate_state = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n\n{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional
        .next()
        .with_context(|| format!("missing command\n\n{USAGE}"))?;
    let mut operand = |what: &str| {
        positional
            .next()
            .with_context(|| format!("{name} requires <{what}>\n\n{USAGE}"))
    };

    let command = match name.as_str() {
        "client-credentials" => Command::ClientCredentials,
        "password" => Command::Password {
            username: operand("username")?,
        },
        "authorization-code" => Command::AuthorizationCode {
            code: operand("code")?,
            redirect_uri,
        },
        "refresh" => Command::Refresh {
            refresh_token: operand("refresh_token")?,
        },
        "revoke" => Command::Revoke {
            refresh_token: operand("refresh_token")?,
        },
        "authorize-url" => {
            if state.is_some() && generate_state {
                bail!("--state and --generate-state are mutually exclusive");
            }
            Command::AuthorizeUrl {
                redirect_uri,
                state,
                generate_state,
                scopes,
            }
        }
        other => bail!("unknown command {other}\n\n{USAGE}"),
    };

    if let Some(extra) = positional.next() {
        bail!("unexpected argument {extra}\n\n{USAGE}");
    }

    Ok(Cli {
        config_path,
        command,
    })
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}
