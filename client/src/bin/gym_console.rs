//! Console client exercising login, session restore, and roster refresh.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;

use clap::Parser;
use client::{ApiResult, ClientSettings, Credentials, GymClient, Registration};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;

/// `gym-console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gym-console",
    about = "Sign in to the gym API and print the roster sizes",
    version
)]
struct CliArgs {
    /// Email used to sign in. Falls back to the stored session when omitted.
    #[arg(long = "email", value_name = "address", requires = "password")]
    email: Option<String>,
    /// Password used to sign in.
    #[arg(long = "password", value_name = "secret", requires = "email")]
    password: Option<String>,
    /// Register a new account under this name before signing in.
    #[arg(long = "register-name", value_name = "name", requires = "email")]
    register_name: Option<String>,
    /// Drop the stored session and exit.
    #[arg(
        long = "logout",
        conflicts_with_all = ["email", "password", "register_name"]
    )]
    logout: bool,
}

/// How the console should establish a session.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SignIn {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Restore,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ClientSettings::load_from_iter([OsString::from("gym-console")])
        .map_err(|error| io::Error::other(format!("load configuration: {error}")))?;
    let gym = GymClient::from_settings(&settings)
        .map_err(|error| io::Error::other(format!("build client: {error}")))?;

    if args.logout {
        gym.auth()
            .logout()
            .map_err(|error| io::Error::other(format!("logout failed: {error}")))?;
        println!("signed_out=true");
        return Ok(());
    }

    match resolve_sign_in(&args)? {
        SignIn::Register {
            name,
            email,
            password,
        } => {
            let registration = Registration::try_from_parts(&name, &email, &password)
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
            gym.auth()
                .register(&registration)
                .await
                .map_err(|error| io::Error::other(format!("registration failed: {error}")))?;
            println!("registered={email}");
            sign_in(&gym, &email, &password).await?;
        }
        SignIn::Login { email, password } => sign_in(&gym, &email, &password).await?,
        SignIn::Restore => {
            if !gym.restore_session().await {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "no valid stored session: pass --email and --password to sign in",
                ));
            }
        }
    }

    match gym.session().current_user() {
        Some(user) => println!("signed_in={} id={}", user.email, user.id),
        None => println!("signed_in=token-only"),
    }

    let refresh = gym.refresh_all().await;
    print_roster("students", refresh.students);
    print_roster("teachers", refresh.teachers);
    print_roster("personal_trainers", refresh.personal_trainers);

    Ok(())
}

async fn sign_in(gym: &GymClient, email: &str, password: &str) -> io::Result<()> {
    let credentials = Credentials::try_from_parts(email, password)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
    gym.auth()
        .login(&credentials)
        .await
        .map_err(|error| io::Error::other(format!("login failed: {error}")))?;
    Ok(())
}

fn resolve_sign_in(args: &CliArgs) -> io::Result<SignIn> {
    match (&args.register_name, &args.email, &args.password) {
        (Some(name), Some(email), Some(password)) => Ok(SignIn::Register {
            name: name.clone(),
            email: email.clone(),
            password: password.clone(),
        }),
        (None, Some(email), Some(password)) => Ok(SignIn::Login {
            email: email.clone(),
            password: password.clone(),
        }),
        (None, None, None) => Ok(SignIn::Restore),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--email and --password must be provided together",
        )),
    }
}

fn print_roster<T>(label: &str, outcome: ApiResult<Vec<T>>) {
    match outcome {
        Ok(records) => println!("{label}={}", records.len()),
        Err(error) => println!("{label}_error={error}"),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use rstest::rstest;

    use super::{CliArgs, SignIn, resolve_sign_in};
    use clap::Parser;

    #[rstest]
    fn credentials_resolve_to_a_login() {
        let args = CliArgs::try_parse_from([
            "gym-console",
            "--email",
            "ana@fitgym.test",
            "--password",
            "s3cret",
        ])
        .expect("args should parse");

        let sign_in = resolve_sign_in(&args).expect("sign-in should resolve");
        assert_eq!(
            sign_in,
            SignIn::Login {
                email: "ana@fitgym.test".to_owned(),
                password: "s3cret".to_owned(),
            }
        );
    }

    #[rstest]
    fn bare_invocation_resolves_to_a_restore() {
        let args = CliArgs::try_parse_from(["gym-console"]).expect("args should parse");
        assert_eq!(
            resolve_sign_in(&args).expect("sign-in should resolve"),
            SignIn::Restore
        );
    }

    #[rstest]
    fn register_name_resolves_to_a_registration() {
        let args = CliArgs::try_parse_from([
            "gym-console",
            "--register-name",
            "Ana Souza",
            "--email",
            "ana@fitgym.test",
            "--password",
            "s3cret",
        ])
        .expect("args should parse");

        let sign_in = resolve_sign_in(&args).expect("sign-in should resolve");
        assert!(matches!(sign_in, SignIn::Register { .. }));
    }

    #[rstest]
    fn email_without_password_is_rejected() {
        CliArgs::try_parse_from(["gym-console", "--email", "ana@fitgym.test"])
            .expect_err("email alone must fail");
    }

    #[rstest]
    fn logout_conflicts_with_credentials() {
        CliArgs::try_parse_from([
            "gym-console",
            "--logout",
            "--email",
            "ana@fitgym.test",
            "--password",
            "s3cret",
        ])
        .expect_err("logout with credentials must fail");
    }
}
