use std::fs;
use std::path::PathBuf;

use clusterscope_core::{ClusteringMethod, Msg, SelectedFile};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    /// 1-based row of the displayed file list.
    RemoveRow(usize),
    Show,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Command::Empty;
    }
    // `raw` is everything after the single separator following the verb.
    let (verb, raw) = match line.split_once(char::is_whitespace) {
        Some((verb, raw)) => (verb, raw),
        None => (line, ""),
    };
    let rest = raw.trim();

    match verb.to_ascii_lowercase().as_str() {
        "files" | "browse" => match read_selected_files(rest) {
            Ok(files) => Command::Dispatch(vec![Msg::FilesSelected(files)]),
            Err(message) => Command::Invalid(message),
        },
        "drop" => match read_selected_files(rest) {
            Ok(files) => Command::Dispatch(vec![Msg::DragEntered, Msg::FilesDropped(files)]),
            Err(message) => Command::Invalid(message),
        },
        "remove" | "rm" => match rest.parse::<usize>() {
            Ok(row) if row > 0 => Command::RemoveRow(row),
            _ => Command::Invalid("usage: remove <row number>".to_string()),
        },
        // Text keeps the remainder verbatim; `\n` escapes allow multi-line input.
        "text" => Command::Dispatch(vec![Msg::TextChanged(raw.replace("\\n", "\n"))]),
        "clear-text" => Command::Dispatch(vec![Msg::TextChanged(String::new())]),
        "method" => match rest.parse::<ClusteringMethod>() {
            Ok(method) => Command::Dispatch(vec![Msg::MethodClicked(method)]),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "analyze" => Command::Dispatch(vec![Msg::AnalyzeClicked]),
        // Cluster ids come from the server and are matched exactly.
        "download" if !rest.is_empty() => Command::Dispatch(vec![Msg::DownloadClusterClicked {
            cluster_id: raw.to_string(),
        }]),
        "download" => Command::Invalid("usage: download <cluster id>".to_string()),
        "download-all" => Command::Dispatch(vec![Msg::DownloadAllClicked]),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command `{other}`, try `help`")),
    }
}

/// Reads size metadata for every path; file contents are not touched.
fn read_selected_files(args: &str) -> Result<Vec<SelectedFile>, String> {
    let paths = split_args(args)?;
    if paths.is_empty() {
        return Err("expected one or more file paths".to_string());
    }
    paths
        .into_iter()
        .map(|raw| read_selected_file(PathBuf::from(raw)))
        .collect()
}

pub fn read_selected_file(path: PathBuf) -> Result<SelectedFile, String> {
    let meta =
        fs::metadata(&path).map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
    if !meta.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    Ok(SelectedFile::new(path, meta.len()))
}

/// Splits on whitespace, honoring quotes and backslash escapes the way
/// terminals format dragged-in paths.
pub fn split_args(input: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            (None | Some('"'), '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_arg = true;
                }
                None => return Err("dangling escape at end of input".to_string()),
            },
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (_, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}
