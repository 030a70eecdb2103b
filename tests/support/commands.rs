//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A caisson command pointed at this test's scratch directories.
    ///
    /// Home is overridden so the profile store roots under the scratch
    /// home, colors are off for stable assertions, and the reference env
    /// vars are cleared so the ambient shell cannot leak into resolve
    /// tests.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("caisson").expect("failed to find caisson binary");
        cmd.env("HOME", self.home.path());
        // USERPROFILE is the Windows spelling of HOME
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("CAISSON_STACK");
        cmd.env_remove("CAISSON_SECRET");
        cmd.env_remove("CAISSON_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `caisson profile create` with `--set` assignments.
    pub fn profile_create(&self, name: &str, sets: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["profile", "create", name]);
        for set in sets {
            cmd.args(["--set", set]);
        }
        cmd.output().expect("failed to run caisson profile create")
    }

    /// Shortcut for `caisson profile create --inherit`.
    pub fn profile_create_inheriting(&self, name: &str, parent: &str, sets: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["profile", "create", name, "--inherit", parent]);
        for set in sets {
            cmd.args(["--set", set]);
        }
        cmd.output().expect("failed to run caisson profile create")
    }

    /// Shortcut for `caisson profile show`.
    pub fn profile_show(&self, name: &str) -> Output {
        self.cmd()
            .args(["profile", "show", name])
            .output()
            .expect("failed to run caisson profile show")
    }

    /// Shortcut for `caisson profile show --effective`.
    pub fn profile_show_effective(&self, name: &str) -> Output {
        self.cmd()
            .args(["profile", "show", name, "--effective"])
            .output()
            .expect("failed to run caisson profile show --effective")
    }

    /// Shortcut for `caisson profile show --json`.
    pub fn profile_show_json(&self, name: &str) -> Output {
        self.cmd()
            .args(["profile", "show", name, "--json"])
            .output()
            .expect("failed to run caisson profile show --json")
    }

    /// Shortcut for `caisson profile validate`.
    pub fn profile_validate(&self, name: &str) -> Output {
        self.cmd()
            .args(["profile", "validate", name])
            .output()
            .expect("failed to run caisson profile validate")
    }

    /// Shortcut for `caisson profile list`.
    pub fn profile_list(&self) -> Output {
        self.cmd()
            .args(["profile", "list"])
            .output()
            .expect("failed to run caisson profile list")
    }

    /// Shortcut for `caisson profile list --json`.
    pub fn profile_list_json(&self) -> Output {
        self.cmd()
            .args(["profile", "list", "--json"])
            .output()
            .expect("failed to run caisson profile list --json")
    }

    /// Shortcut for `caisson deploy record`.
    pub fn deploy_record(&self, profile: &str, environment: &str, image: &str) -> Output {
        self.cmd()
            .args([
                "deploy",
                "record",
                profile,
                "--environment",
                environment,
                "--image",
                image,
            ])
            .output()
            .expect("failed to run caisson deploy record")
    }

    /// Shortcut for `caisson deploy record` with an endpoint.
    pub fn deploy_record_with_endpoint(
        &self,
        profile: &str,
        environment: &str,
        image: &str,
        endpoint: &str,
    ) -> Output {
        self.cmd()
            .args([
                "deploy",
                "record",
                profile,
                "--environment",
                environment,
                "--image",
                image,
                "--endpoint",
                endpoint,
            ])
            .output()
            .expect("failed to run caisson deploy record")
    }

    /// Shortcut for `caisson deploy history`.
    pub fn deploy_history(&self, profile: &str) -> Output {
        self.cmd()
            .args(["deploy", "history", profile])
            .output()
            .expect("failed to run caisson deploy history")
    }

    /// Shortcut for `caisson deploy history --environment`.
    pub fn deploy_history_env(&self, profile: &str, environment: &str) -> Output {
        self.cmd()
            .args(["deploy", "history", profile, "--environment", environment])
            .output()
            .expect("failed to run caisson deploy history")
    }

    /// Shortcut for `caisson deploy history --json`.
    pub fn deploy_history_json(&self, profile: &str) -> Output {
        self.cmd()
            .args(["deploy", "history", profile, "--json"])
            .output()
            .expect("failed to run caisson deploy history --json")
    }

    /// Shortcut for `caisson deploy active`.
    pub fn deploy_active(&self, profile: &str, environment: &str) -> Output {
        self.cmd()
            .args(["deploy", "active", profile, "--environment", environment])
            .output()
            .expect("failed to run caisson deploy active")
    }

    /// Shortcut for `caisson deploy active --json`.
    pub fn deploy_active_json(&self, profile: &str, environment: &str) -> Output {
        self.cmd()
            .args([
                "deploy", "active", profile, "--environment", environment, "--json",
            ])
            .output()
            .expect("failed to run caisson deploy active --json")
    }

    /// Shortcut for `caisson resolve`.
    pub fn resolve(&self, stack: &str, secret: &str) -> Output {
        self.cmd()
            .args(["resolve", "--stack", stack, "--secret", secret])
            .output()
            .expect("failed to run caisson resolve")
    }

    /// Shortcut for `caisson resolve --json`.
    pub fn resolve_json(&self, stack: &str, secret: &str) -> Output {
        self.cmd()
            .args(["resolve", "--stack", stack, "--secret", secret, "--json"])
            .output()
            .expect("failed to run caisson resolve --json")
    }
}
