//! Tracing subscriber setup.

use crate::config::Profile;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_directive(profile: Profile) -> &'static str {
    match profile {
        Profile::Dev => "sample_crud=debug,tower_http=debug",
        Profile::Prod | Profile::Default => "sample_crud=info,tower_http=info",
    }
}

/// Install the global subscriber. `prod` logs JSON lines; other profiles log human-readable text.
pub fn init_tracing(profile: Profile) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(profile)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match profile {
        Profile::Prod => builder.json().init(),
        Profile::Dev | Profile::Default => builder.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_profile_is_more_verbose() {
        assert!(default_directive(Profile::Dev).contains("sample_crud=debug"));
        assert!(default_directive(Profile::Prod).contains("sample_crud=info"));
    }
}
