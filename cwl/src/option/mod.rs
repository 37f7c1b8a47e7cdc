use structopt::StructOpt;

const VALUE_FLAGS: &[&str] = &[
    "profile", "region", "group", "filter", "start", "end", "limit", "refresh",
];
const BOOL_FLAGS: &[&str] = &["tail", "interleaved"];

#[derive(StructOpt, Debug, Clone, PartialEq)]
#[structopt(name = "cwl", template = "Usage: {usage}\n\n{all-args}")]
pub struct Opt {
    /// AWS credential profile to use.
    #[structopt(long, default_value = "")]
    pub profile: String,

    /// AWS region to request logs from.
    #[structopt(long, default_value = "")]
    pub region: String,

    /// Log group name to read from.
    #[structopt(long, default_value = "")]
    pub group: String,

    /// Filter pattern to apply.
    #[structopt(long, default_value = "", allow_hyphen_values = true)]
    pub filter: String,

    /// The RFC 3339 time that log events should start from. (default: "1 minute ago")
    #[structopt(long)]
    pub start: Option<String>,

    /// The RFC 3339 time that log events should end. (default: "now")
    #[structopt(long)]
    pub end: Option<String>,

    /// Maximum number of log events per request.
    #[structopt(long, default_value = "50")]
    pub limit: i64,

    /// Read log messages continuously.
    #[structopt(long, parse(try_from_str), default_value = "false")]
    pub tail: bool,

    /// Refresh rate for tailing logs, in seconds.
    #[structopt(long, default_value = "5")]
    pub refresh: u64,

    /// Interleave log messages between sources.
    #[structopt(long, parse(try_from_str), default_value = "true")]
    pub interleaved: bool,
}

impl Opt {
    pub fn parse<I, T>(args: I) -> Result<Self, structopt::clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::from_iter_safe(normalize_args(args))
    }
}

/// Rewrites single-dash long flags (`-region us-east-1`, `-tail`) into the form
/// clap understands (`--region us-east-1`, `--tail=true`).
pub fn normalize_args<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<String> = args.next().into_iter().collect();
    let mut expects_value = false;
    let mut passthrough = false;

    for arg in args {
        if passthrough || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let flag = if arg.starts_with("--") {
            arg[2..].to_owned()
        } else if arg.len() > 2 && arg.starts_with('-') {
            arg[1..].to_owned()
        } else {
            normalized.push(arg);
            continue;
        };

        let (name, value) = match flag.find('=') {
            Some(i) => (&flag[..i], Some(&flag[i + 1..])),
            None => (flag.as_str(), None),
        };

        if value.is_none() && BOOL_FLAGS.contains(&name) {
            normalized.push(format!("--{}=true", name));
        } else {
            expects_value = value.is_none() && VALUE_FLAGS.contains(&name);
            normalized.push(format!("--{}", flag));
        }
    }
    normalized
}

pub fn usage() -> String {
    let mut help = Vec::new();
    if let Err(e) = Opt::clap().write_long_help(&mut help) {
        log::error!("failed to render help: {}", e);
    }
    format!(
        "cwl - {}\n\nParameters:\n{}\n",
        env!("CARGO_PKG_DESCRIPTION"),
        String::from_utf8_lossy(&help)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().copied())
    }

    #[test]
    fn single_dash_flags_become_long_flags() {
        assert_eq!(
            normalize(&["cwl", "-region", "us-east-1", "-group=/aws/lambda/api"]),
            vec!["cwl", "--region", "us-east-1", "--group=/aws/lambda/api"]
        );
    }

    #[test]
    fn bare_bool_flags_get_an_explicit_value() {
        assert_eq!(
            normalize(&["cwl", "-tail", "--interleaved", "-interleaved=false"]),
            vec![
                "cwl",
                "--tail=true",
                "--interleaved=true",
                "--interleaved=false"
            ]
        );
    }

    #[test]
    fn flag_values_are_passed_through_verbatim() {
        assert_eq!(
            normalize(&["cwl", "-filter", "-ERROR", "-start", "-5m"]),
            vec!["cwl", "--filter", "-ERROR", "--start", "-5m"]
        );
    }

    #[test]
    fn short_flags_and_separator_are_untouched() {
        assert_eq!(
            normalize(&["cwl", "-h", "--", "-region"]),
            vec!["cwl", "-h", "--", "-region"]
        );
    }

    #[test]
    fn parse_applies_defaults() {
        let opt = Opt::parse(vec!["cwl"]).unwrap();
        assert_eq!(opt.profile, "");
        assert_eq!(opt.region, "");
        assert_eq!(opt.start, None);
        assert_eq!(opt.end, None);
        assert_eq!(opt.limit, 50);
        assert!(!opt.tail);
        assert_eq!(opt.refresh, 5);
        assert!(opt.interleaved);
    }

    #[test]
    fn parse_rejects_unknown_flags() {
        assert!(Opt::parse(vec!["cwl", "-follow"]).is_err());
        assert!(Opt::parse(vec!["cwl", "-refresh=soon"]).is_err());
    }

    #[test]
    fn usage_lists_every_option() {
        let text = usage();
        assert!(text.starts_with("cwl - A command line tool"));
        for name in VALUE_FLAGS.iter().chain(BOOL_FLAGS) {
            assert!(text.contains(&format!("--{}", name)), "missing {}", name);
        }
        assert!(text.contains("[default: 50]"));
        assert!(text.contains("The RFC 3339 time that log events should start from"));
        assert_eq!(text.matches("reviewing Amazon CloudWatch Logs").count(), 1);
    }
}
