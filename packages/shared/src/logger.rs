//! Logger setup.

use tracing_subscriber::{EnvFilter, fmt};

const CLIENT_LIBRARY_TARGET: &str = "feedsapp_client";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `bin_name` and the client library
/// log at `default_level`. Output goes to stderr so that interactive output on
/// stdout is not interleaved with log lines.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_directives(bin_name, default_level))
    });

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let bin_target = bin_name.replace('-', "_");
    if bin_target == CLIENT_LIBRARY_TARGET {
        format!("warn,{bin_target}={default_level}")
    } else {
        format!("warn,{bin_target}={default_level},{CLIENT_LIBRARY_TARGET}={default_level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        // テスト項目: バイナリ名のハイフンがターゲット名ではアンダースコアになる
        // when (操作):
        let directives = default_directives("feedsapp-client", "debug");

        // then (期待する結果):
        assert_eq!(directives, "warn,feedsapp_client=debug");
    }

    #[test]
    fn test_default_directives_for_other_binary() {
        // テスト項目: 別名のバイナリではクライアントライブラリのターゲットも追加される
        let directives = default_directives("feeds-demo", "info");

        assert_eq!(directives, "warn,feeds_demo=info,feedsapp_client=info");
    }
}
