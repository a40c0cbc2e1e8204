// Integration test utilities
//
// Writes a small network-connection dataset into a temporary directory and
// builds `lerad` invocations against it.

#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ATTRIBUTES: &str = "protocol symbolic\nservice symbolic\nflag symbolic\nclass symbolic\n";

const NORMAL_ROWS: [&str; 3] = [
    "tcp http SF normal",
    "udp dns SF normal",
    "icmp ecr_i SF normal",
];

/// Temporary dataset with training and test case files
pub struct Dataset {
    pub dir: TempDir,
}

impl Dataset {
    /// 60 interleaved normal training cases; 4 normal and 2 attack test cases
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();

        let training: String = (0..60)
            .map(|i| format!("{}\n", NORMAL_ROWS[i % NORMAL_ROWS.len()]))
            .collect();
        let test = "tcp http SF normal\n\
                    udp dns SF normal\n\
                    tcp telnet S0 smurf\n\
                    icmp ecr_i SF normal\n\
                    udp http REJ neptune\n\
                    tcp http SF normal\n";

        fs::write(dir.path().join("attr.txt"), ATTRIBUTES).unwrap();
        fs::write(dir.path().join("train.txt"), training).unwrap();
        fs::write(dir.path().join("test.txt"), test).unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// `lerad -e learn` with the standard learning parameters
    pub fn learn(&self, model: &str) -> Command {
        let mut cmd = lerad(&self.path("attr.txt"), &self.path("train.txt"));
        cmd.args(["-e", "learn"])
            .arg("-m")
            .arg(self.path(model))
            .arg("-o")
            .arg(self.path("rules.txt"))
            .args(["-L", "50", "-M", "3", "-S", "20", "-P", "0.1"]);
        cmd
    }

    /// `lerad -e predict` over the test cases, labels from `class`
    pub fn predict(&self, model: &str, threshold: &str) -> Command {
        let mut cmd = lerad(&self.path("attr.txt"), &self.path("test.txt"));
        cmd.args(["-e", "predict"])
            .arg("-m")
            .arg(self.path(model))
            .arg("-o")
            .arg(self.path("results.txt"))
            .args(["-T", threshold, "-N", "class", "-V", "normal"]);
        cmd
    }
}

pub fn lerad(attributes: &Path, cases: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lerad").unwrap();
    cmd.arg("-a").arg(attributes).arg("-t").arg(cases);
    cmd
}
