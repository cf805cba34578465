//! Helpers for inspecting rendered help listings and default dumps.

/// Names of the flags in a help listing, in output order.
///
/// Lines that do not start with `--` after indentation are ignored.
#[must_use]
pub fn listed_names(help: &str) -> Vec<String> {
    help.lines()
        .filter_map(|line| line.trim_start().strip_prefix("--"))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_owned)
        .collect()
}

/// Splits each `NAME=VALUE` line of a default dump.
///
/// Lines without `=` are skipped.
#[must_use]
pub fn dump_pairs(dump: &str) -> Vec<(String, String)> {
    dump.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{dump_pairs, listed_names};

    #[test]
    fn extracts_names_from_help_lines() {
        let help = "    --flagfile PATH  Files\n    --timeout VALUE  Wait\n    --verbose  Talk\n";
        assert_eq!(listed_names(help), ["flagfile", "timeout", "verbose"]);
    }

    #[test]
    fn splits_dump_lines_at_first_equals() {
        let dump = "a=1\nb=x=y\nnoise\n";
        assert_eq!(
            dump_pairs(dump),
            [
                (String::from("a"), String::from("1")),
                (String::from("b"), String::from("x=y")),
            ]
        );
    }
}
