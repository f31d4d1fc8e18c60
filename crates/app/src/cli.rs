use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use drill_core::model::{Reorder, Segment};
use drill_core::scheduler::PolicyKind;
use drill_core::settings::{SchedulerSettings, SettingsError};
use services::QuizOptions;

#[derive(Debug, Parser)]
#[command(name = "drill", version, about = "Vocabulary drills with retry scheduling")]
pub struct Cli {
    /// Directory holding word lists.
    #[arg(long, env = "DRILL_LISTS_DIR", global = true)]
    pub lists_dir: Option<PathBuf>,

    /// TOML file with default options.
    #[arg(long, env = "DRILL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `drill_core=debug`. `DRILL_LOG` wins if set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the word lists available for drilling.
    Lists,
    /// Show the scheduling policies.
    Policies,
    /// Drill one list interactively.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Name of the word list file.
    pub list: String,

    #[arg(long)]
    pub policy: Option<PolicyKind>,

    /// Offer multiple choice with up to N wrong answers.
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "10",
        conflicts_with = "free_text"
    )]
    pub choices: Option<usize>,

    /// Force free-text answers even if the config enables choices.
    #[arg(long)]
    pub free_text: bool,

    /// Ask with the second column and expect the first.
    #[arg(long)]
    pub from_english: bool,

    /// Slice of the list to drill: `all`, `0-20` or `0-10,40-50`.
    #[arg(long)]
    pub segment: Option<Segment>,

    /// `none`, `shuffle`, `local` or `local:N`.
    #[arg(long)]
    pub reorder: Option<Reorder>,

    /// Correct answers in a row before the adaptive policy retires an item.
    #[arg(long)]
    pub retire_after: Option<u32>,

    /// Streak on the newest item before the adaptive policy adds another.
    #[arg(long)]
    pub introduce_after: Option<u32>,

    /// Print the end-of-session summary as JSON.
    #[arg(long)]
    pub summary_json: bool,
}

impl RunArgs {
    /// Layers explicit flags over `options`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the combined options are invalid.
    pub fn apply(&self, mut options: QuizOptions) -> Result<QuizOptions, SettingsError> {
        if let Some(policy) = self.policy {
            options.policy = policy;
        }
        if let Some(count) = self.choices {
            options = options.with_choices(count);
        }
        if self.free_text {
            options.provide_choices = false;
        }
        if self.from_english {
            options.from_english = true;
        }
        if let Some(segment) = &self.segment {
            options.segment = segment.clone();
        }
        if let Some(reorder) = self.reorder {
            options.reorder = reorder;
        }
        if self.retire_after.is_some() || self.introduce_after.is_some() {
            options.scheduler = SchedulerSettings::new(
                self.retire_after
                    .unwrap_or(options.scheduler.retire_after_streak()),
                self.introduce_after
                    .unwrap_or(options.scheduler.introduce_after_streak()),
            )?;
        }
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_args(args: &[&str]) -> RunArgs {
        let mut argv = vec!["drill", "run"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::Run(run) => run,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_run_keeps_config_options() {
        let base = QuizOptions::default().with_policy(PolicyKind::Adaptive);
        let options = run_args(&["spanish"]).apply(base.clone()).unwrap();
        assert_eq!(options, base);
    }

    #[test]
    fn flags_override_config() {
        let run = run_args(&[
            "spanish",
            "--policy",
            "adaptive",
            "--choices=4",
            "--from-english",
            "--segment",
            "0-20",
            "--reorder",
            "local:3",
        ]);
        assert_eq!(run.list, "spanish");

        let options = run.apply(QuizOptions::default()).unwrap();
        assert_eq!(options.policy, PolicyKind::Adaptive);
        assert!(options.provide_choices);
        assert_eq!(options.choice_count, 4);
        assert!(options.from_english);
        assert_eq!(options.segment, Segment::single(0, 20).unwrap());
        assert_eq!(options.reorder, Reorder::Local { window: 3 });
    }

    #[test]
    fn bare_choices_flag_uses_default_count() {
        let options = run_args(&["--choices", "spanish"])
            .apply(QuizOptions::default())
            .unwrap();
        assert!(options.provide_choices);
        assert_eq!(options.choice_count, 10);
    }

    #[test]
    fn free_text_disables_configured_choices() {
        let options = run_args(&["spanish", "--free-text"])
            .apply(QuizOptions::default().with_choices(5))
            .unwrap();
        assert!(!options.provide_choices);
    }

    #[test]
    fn scheduler_flags_are_validated() {
        let options = run_args(&["spanish", "--retire-after", "2"])
            .apply(QuizOptions::default())
            .unwrap();
        assert_eq!(options.scheduler.retire_after_streak(), 2);

        let err = run_args(&["spanish", "--retire-after", "1", "--introduce-after", "5"])
            .apply(QuizOptions::default())
            .unwrap_err();
        assert!(matches!(err, SettingsError::IntroduceAfterRetirement { .. }));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        assert!(Cli::try_parse_from(["drill", "run", "spanish", "--policy", "fifo"]).is_err());
    }
}
