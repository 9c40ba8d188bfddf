//! Test helpers for composing input tables in a scratch directory.

use super::*;
use tempfile::TempDir;

/// Header of a thirteen-column table whose feature text sits in `tags`.
pub(super) const WIDE_HEADER: &str = "path,c1,c2,c3,c4,c5,c6,c7,c8,c9,c10,tags,notes";

/// One row of a [`WIDE_HEADER`] table.
pub(super) fn wide_row(identifier: &str, tags: &str) -> String {
    format!("{identifier},1,2,3,4,5,6,7,8,9,10,{tags},ignored words")
}

/// Build a wide table from `(identifier, tags)` pairs.
pub(super) fn wide_table(rows: &[(&str, &str)]) -> String {
    let mut table = format!("{WIDE_HEADER}\n");
    for (identifier, tags) in rows {
        table.push_str(&wide_row(identifier, tags));
        table.push('\n');
    }
    table
}

/// Three rows tagged `超绝` sharing text plus one untagged row.
pub(super) fn tagged_table() -> String {
    wide_table(&[
        ("albums/超绝/a.png", "sunset bay"),
        ("albums/超绝/b.png", "sunset bay"),
        ("albums/超绝/c.png", "sunset bay"),
        ("inbox/d.png", "budget memo"),
    ])
}

/// A scratch directory holding input and output tables.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        std::fs::write(path.as_std_path(), contents).expect("write input table");
        path
    }

    pub(super) fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name).as_std_path()).expect("read output table")
    }

    pub(super) fn exists(&self, name: &str) -> bool {
        self.path(name).as_std_path().exists()
    }

    /// Run the CLI as `prefscore <args...>`.
    pub(super) fn run(&self, args: &[&str]) -> Result<ScoreSummary, CliError> {
        let argv = std::iter::once("prefscore".to_owned())
            .chain(args.iter().map(|arg| (*arg).to_owned()));
        run_from(argv)
    }

    /// Run the CLI as `prefscore <input> <output>` within this workspace.
    pub(super) fn score(&self, input: &str, output: &str) -> Result<ScoreSummary, CliError> {
        let input_path = self.path(input);
        let output_path = self.path(output);
        self.run(&[input_path.as_str(), output_path.as_str()])
    }
}

/// Parse a written table back into its header and rows.
pub(super) fn parse_output(contents: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let body = contents
        .strip_prefix('\u{feff}')
        .expect("output starts with a byte-order mark");
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = reader
        .headers()
        .expect("output header")
        .iter()
        .map(str::to_owned)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("output record")
                .iter()
                .map(str::to_owned)
                .collect()
        })
        .collect();
    (headers, rows)
}
