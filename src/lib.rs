pub mod auth;
pub mod chat;
pub mod error;
pub mod graph;
pub mod integration;
pub mod message;
pub mod schema;
pub mod state;
pub mod user;
pub mod webhook;

pub use error::Result;

/// Access to the raw string behind a secret-bearing newtype.
pub trait Raw {
    fn raw(&self) -> &str;
}

/// Redacted rendering for values that must never reach the logs whole.
pub trait Redact: Raw {
    fn redact(&self) -> String {
        let raw = self.raw();
        if raw.len() <= 8 {
            return "***".into();
        }
        format!("{}***{}", &raw[..4], &raw[raw.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Secret(String);

    impl Raw for Secret {
        fn raw(&self) -> &str {
            &self.0
        }
    }

    impl Redact for Secret {}

    #[test]
    fn redacts_long_values() {
        let s = Secret("IGQWRPdGlCWHZA3token1234".into());
        assert_eq!(s.redact(), "IGQW***1234");
    }

    #[test]
    fn masks_short_values_entirely() {
        let s = Secret("short".into());
        assert_eq!(s.redact(), "***");
    }
}
