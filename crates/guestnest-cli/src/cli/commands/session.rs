//! Session command handlers.
//!
//! Each run owns a fresh cookie jar, so `login` and `signup` verify the
//! account and report who the backend resolved; the session does not outlive
//! the process.

use anyhow::{Context, Result, bail};
use guestnest_core::{Credentials, IdentityService, SessionStore, SignupRequest, UserIdentity};

fn describe(user: &UserIdentity) -> String {
    let label = user.label();
    if label == user.username {
        label.to_string()
    } else {
        format!("{} ({label})", user.username)
    }
}

fn resolved_user<S: IdentityService>(store: &SessionStore<S>, action: &str) -> Result<String> {
    match store.session().user() {
        Some(user) => Ok(describe(user)),
        None => bail!("{action} succeeded but the backend reported no session"),
    }
}

pub async fn whoami<S: IdentityService>(store: &SessionStore<S>) -> Result<()> {
    store.resolve().await;
    match store.session().user() {
        Some(user) => println!("{}", describe(user)),
        None => println!("Not logged in"),
    }
    Ok(())
}

pub async fn login<S: IdentityService>(
    store: &SessionStore<S>,
    identifier: &str,
    password: &str,
) -> Result<()> {
    let credentials = Credentials::new(identifier, password)?;
    store.login(credentials).await.context("Login failed")?;
    println!("Logged in as {}", resolved_user(store, "Login")?);
    Ok(())
}

pub async fn signup<S: IdentityService>(
    store: &SessionStore<S>,
    username: &str,
    email: &str,
    name: &str,
    password: &str,
) -> Result<()> {
    let request = SignupRequest::new(username, email, password, name)?;
    store.signup(request).await.context("Signup failed")?;
    println!("Signed up as {}", resolved_user(store, "Signup")?);
    Ok(())
}

pub async fn logout<S: IdentityService>(store: &SessionStore<S>) -> Result<()> {
    store.logout().await.context("Logout failed")?;
    println!("Logged out");
    Ok(())
}
