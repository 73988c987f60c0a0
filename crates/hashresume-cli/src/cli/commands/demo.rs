//! Demo command: synchronous digest, interrupted run, resumed run.

use anyhow::Result;
use hashresume_core::config::HashResumeConfig;
use hashresume_core::demo::{self, DemoReport};

/// Run the demonstration with `cfg` and print each act's result.
pub async fn run_demo(cfg: &HashResumeConfig) -> Result<()> {
    let opts = cfg.demo_options()?;
    let report = demo::run(cfg.demo_input().as_bytes(), &opts).await?;
    print!("{}", render(&report));
    Ok(())
}

/// Console transcript for a finished demonstration.
fn render(report: &DemoReport) -> String {
    let mut out = format!("MD5 checksum 1: {:X}\n", report.sync_digest);
    match (&report.checkpoint, &report.interrupted_digest) {
        (Some(state), _) => {
            out.push_str("Stopped: deadline exceeded\n");
            out.push_str("MD5 state:\n");
            out.push_str(&format!("{}\n", state));
        }
        (None, Some(digest)) => out.push_str(&format!("MD5 checksum 2: {:X}\n", digest)),
        (None, None) => {}
    }
    out.push_str(&format!("MD5 checksum 2: {:X}\n", report.resumed_digest));
    if report.matches() {
        out.push_str("checksum 1 == checksum 2\n");
    } else {
        out.push_str("checksum 1 != checksum 2\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashresume_core::checkpoint::HashState;
    use hashresume_core::checksum;

    #[test]
    fn interrupted_run_reports_stop_and_state() {
        let digest = checksum::md5(b"Hello World!");
        let report = DemoReport {
            sync_digest: digest,
            checkpoint: Some(HashState::new(2, vec![0xab, 0x01])),
            interrupted_digest: None,
            resumed_digest: digest,
        };
        assert_eq!(
            render(&report),
            "MD5 checksum 1: ED076287532E86365E841E92BFC50D8C\n\
             Stopped: deadline exceeded\n\
             MD5 state:\n\
             Offset: 2\n\
             Data: AB01\n\
             MD5 checksum 2: ED076287532E86365E841E92BFC50D8C\n\
             checksum 1 == checksum 2\n"
        );
    }

    #[test]
    fn uninterrupted_run_has_no_stop_line() {
        let digest = checksum::md5(b"abc");
        let report = DemoReport {
            sync_digest: digest,
            checkpoint: None,
            interrupted_digest: Some(digest),
            resumed_digest: checksum::md5(b"abd"),
        };
        let text = render(&report);
        assert!(!text.contains("Stopped"));
        assert!(text.ends_with("checksum 1 != checksum 2\n"));
    }
}
