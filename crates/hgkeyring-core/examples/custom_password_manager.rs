// SPDX-License-Identifier: Apache-2.0

//! Answer HTTP challenges with a custom `PasswordManager`.
//!
//! Run with: `cargo run --example custom_password_manager -p hgkeyring-core`

use hgkeyring_core::{BasicAuthenticator, Credentials, PasswordManager};
use secrecy::{ExposeSecret, SecretString};

/// Password manager that hands out one token for every realm.
struct TokenManager {
    token: SecretString,
}

impl PasswordManager for TokenManager {
    fn find_user_password(
        &mut self,
        realm: &str,
        auth_uri: &str,
    ) -> hgkeyring_core::Result<Credentials> {
        println!("Challenge for realm {realm:?} at {auth_uri}");
        Ok(Credentials::new("x-token", self.token.clone()))
    }
}

fn main() -> hgkeyring_core::Result<()> {
    let manager = TokenManager {
        token: SecretString::from("example-token"),
    };
    let mut authenticator = BasicAuthenticator::new(Box::new(manager));

    let header = authenticator.authorization(
        r#"Basic realm="Mercurial Repositories""#,
        "https://hg.example.com/repo?cmd=capabilities",
    )?;
    println!("Authorization: {}", header.expose_secret());
    Ok(())
}
