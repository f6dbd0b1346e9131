//! Command-line options of `patchc run`.

use patch_diagnostic::{ColorMode, TraceStyle};
use patch_eval::DEFAULT_MAX_CALL_DEPTH;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub script: String,
    /// JSON document to patch; an empty object when absent.
    pub root: Option<String>,
    pub trace_style: TraceStyle,
    pub color: ColorMode,
    /// `None` removes the limit.
    pub max_call_depth: Option<usize>,
}

impl RunOptions {
    /// Parse the arguments following `run`.
    pub fn parse(args: &[String]) -> Result<RunOptions, String> {
        let mut script = None;
        let mut options = RunOptions {
            script: String::new(),
            root: None,
            trace_style: TraceStyle::Full,
            color: ColorMode::Auto,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        };

        for arg in args {
            if let Some(path) = arg.strip_prefix("--root=") {
                options.root = Some(path.to_string());
            } else if arg == "--short-trace" {
                options.trace_style = TraceStyle::Short;
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                options.color = ColorMode::from_flag(mode)
                    .ok_or_else(|| format!("invalid color mode '{mode}'"))?;
            } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
                let depth: usize = depth
                    .parse()
                    .map_err(|_| format!("invalid call depth '{depth}'"))?;
                options.max_call_depth = (depth > 0).then_some(depth);
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if script.is_none() {
                script = Some(arg.clone());
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }

        options.script = script.ok_or_else(|| "missing script path".to_string())?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Result<RunOptions, String> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        RunOptions::parse(&args)
    }

    #[test]
    fn defaults() {
        assert_eq!(
            parse(&["main.patch"]),
            Ok(RunOptions {
                script: "main.patch".to_string(),
                root: None,
                trace_style: TraceStyle::Full,
                color: ColorMode::Auto,
                max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            })
        );
    }

    #[test]
    fn all_flags() {
        let options = parse(&[
            "--short-trace",
            "main.patch",
            "--root=doc.json",
            "--color=never",
            "--max-depth=10",
        ]);
        assert_eq!(
            options,
            Ok(RunOptions {
                script: "main.patch".to_string(),
                root: Some("doc.json".to_string()),
                trace_style: TraceStyle::Short,
                color: ColorMode::Never,
                max_call_depth: Some(10),
            })
        );
    }

    #[test]
    fn zero_depth_means_unlimited() {
        let options = parse(&["main.patch", "--max-depth=0"]);
        assert_eq!(options.map(|o| o.max_call_depth), Ok(None));
    }

    #[test]
    fn errors() {
        assert_eq!(parse(&[]), Err("missing script path".to_string()));
        assert_eq!(
            parse(&["a.patch", "--color=sometimes"]),
            Err("invalid color mode 'sometimes'".to_string())
        );
        assert_eq!(
            parse(&["a.patch", "--max-depth=x"]),
            Err("invalid call depth 'x'".to_string())
        );
        assert_eq!(
            parse(&["a.patch", "--verbose"]),
            Err("unknown option '--verbose'".to_string())
        );
        assert_eq!(
            parse(&["a.patch", "b.patch"]),
            Err("unexpected argument 'b.patch'".to_string())
        );
    }
}
